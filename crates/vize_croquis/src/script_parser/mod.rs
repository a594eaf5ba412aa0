//! OXC-based parsing of component scripts.
//!
//! Parses a script into an arena-backed [`ScriptAst`] and exposes the two
//! structural queries metadata extraction needs:
//!
//! - [`ScriptAst::default_export_options`] - the options object of
//!   `export default { ... }` (also through `defineComponent(...)`)
//! - [`ScriptAst::import_bindings`] - every top-level import binding
//!
//! ## Module Structure
//!
//! - [`options`] - default-export lookup and option reading
//! - [`imports`] - import binding listing

mod imports;
mod options;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

pub use imports::{ImportBinding, ImportKind};
pub use options::{OptionEntry, OptionValue, OptionsNode};
pub(crate) use options::{property_key_name, slice, strip_wrappers};

/// Error returned when a script cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptParseError {
    /// The parser reported syntax errors.
    #[error("{count} syntax error(s), first: {first}")]
    Syntax { count: usize, first: String },

    /// The parser gave up on the input.
    #[error("parser aborted")]
    Panicked,
}

/// A parsed script, valid for the lifetime of its allocator.
pub struct ScriptAst<'a> {
    source: &'a str,
    program: Program<'a>,
}

impl<'a> ScriptAst<'a> {
    /// Parse `source`, choosing the dialect from `filename`'s extension
    /// (`.ts`, `.tsx`, `.jsx`, ...). Unknown extensions parse as an ES module.
    pub fn parse(
        allocator: &'a Allocator,
        source: &'a str,
        filename: &str,
    ) -> Result<Self, ScriptParseError> {
        let source_type = SourceType::from_path(filename)
            .unwrap_or_default()
            .with_module(true);

        let ret = Parser::new(allocator, source, source_type).parse();

        if let Some(first) = ret.errors.first() {
            return Err(ScriptParseError::Syntax {
                count: ret.errors.len(),
                first: first.to_string(),
            });
        }
        if ret.panicked {
            return Err(ScriptParseError::Panicked);
        }

        Ok(Self {
            source,
            program: ret.program,
        })
    }

    /// The script text this tree was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The parsed program.
    pub fn program(&self) -> &Program<'a> {
        &self.program
    }

    /// Locate the default-exported options object.
    pub fn default_export_options(&self) -> Option<OptionsNode<'_, 'a>> {
        options::find_default_export_options(&self.program, self.source)
    }

    /// Every top-level import binding, in source order.
    pub fn import_bindings(&self) -> Vec<ImportBinding> {
        imports::list_import_bindings(&self.program)
    }

    /// The import a local name was bound by, if any.
    pub fn import_for(&self, local_name: &str) -> Option<ImportBinding> {
        self.import_bindings()
            .into_iter()
            .find(|binding| binding.local_name == local_name)
    }
}
