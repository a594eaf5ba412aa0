//! Carton - The artist's toolbox for Vize.
//!
//! This crate provides the small shared utilities every other Vize crate
//! reaches for, much like a carton (artist's portfolio case) holds all the
//! essential tools and materials an artist needs for their work.
//!
//! # Modules
//!
//! - **hash**: xxHash3 fingerprints used as cache keys
//! - **general**: case conversion helpers for component and prop names
//!
//! # Example
//!
//! ```
//! use vize_carton::{hyphenate, to_pascal_case, Fingerprint};
//!
//! assert_eq!(to_pascal_case("user-card"), "UserCard");
//! assert_eq!(hyphenate("isOpen"), "is-open");
//!
//! let a = Fingerprint::of_str("<template></template>");
//! let b = Fingerprint::of_str("<template></template>");
//! assert_eq!(a, b);
//! ```

pub mod general;
pub mod hash;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export shared utilities
pub use general::*;
pub use hash::Fingerprint;
