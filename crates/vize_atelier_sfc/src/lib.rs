//! # vize_atelier_sfc
//!
//! Atelier SFC - The Single File Component workshop for Vize.
//!
//! Splits a `.vue` source into its top-level blocks without interpreting
//! their contents. Block contents are borrowed from the input, so splitting
//! allocates only for attribute maps.
//!
//! ```
//! use vize_atelier_sfc::split_component;
//!
//! let regions = split_component("<template><div/></template>\n<script>export default {}</script>").unwrap();
//! assert_eq!(regions.script.content, "export default {}");
//! assert!(regions.template.is_some());
//! ```

mod parse;
mod types;

pub use parse::{parse_sfc, split_component};
pub use types::*;
