//! # vize_croquis
//!
//! Croquis - Options API script analysis for Vize.
//!
//! ## Name Origin
//!
//! **Croquis** (/kʁɔ.ki/) is a French term for a quick, sketchy drawing that captures
//! the essential features of a subject. `vize_croquis` does the same for a
//! component script: it reads what the options object declares (props,
//! registered children, mixins, events) without ever running it.
//!
//! ## Purpose
//!
//! - **Script Parsing**: OXC-backed parsing of a script and lookup of its
//!   default-exported options object
//! - **Literal Evaluation**: interpretation of option values under a restricted
//!   literal grammar
//! - **Option Interpretation**: `props`, `components`, `mixins`, `extends`, `emits`
//! - **Event Scanning**: lexical discovery of `$emit('name')` calls
//!
//! ## Architecture
//!
//! ```text
//! vize_atelier_sfc (Split .vue)
//!        ↓
//!  vize_croquis (Script Analysis)  ← This crate
//!        ↓
//!   vize_loupe (Resolution + Caching)
//! ```
//!
//! ## Example
//!
//! ```
//! use oxc_allocator::Allocator;
//! use vize_croquis::{interpret_props, ScriptAst};
//!
//! let allocator = Allocator::default();
//! let ast = ScriptAst::parse(&allocator, "export default { props: ['title'] }", "a.js").unwrap();
//! let options = ast.default_export_options().unwrap();
//! let props = interpret_props(&options.option("props").unwrap());
//! assert!(props.contains_key("title"));
//! ```

pub mod emits;
pub mod literal;
pub mod options_api;
pub mod props;
pub mod script_parser;

pub use emits::scan_emitted_event_names;
pub use literal::{evaluate_literal, LiteralValue};
pub use options_api::{
    interpret_components, interpret_emits, interpret_extends, interpret_mixins, ComponentBinding,
    ComponentTarget,
};
pub use props::{interpret_props, props_from_literal, PropDescriptor, PropMap, TypeTag};
pub use script_parser::{
    ImportBinding, ImportKind, OptionEntry, OptionValue, OptionsNode, ScriptAst, ScriptParseError,
};
