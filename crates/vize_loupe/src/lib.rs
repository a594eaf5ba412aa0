//! # vize_loupe
//!
//! Loupe - Component metadata resolution for Vize editor tooling.
//!
//! ## Name Origin
//!
//! A **loupe** is the small magnifier an artist or jeweller holds to the eye to
//! inspect detail. `vize_loupe` takes that close look at a component for the
//! editor: which props it accepts, which events it emits, and which child
//! components it registers, across mixins and import aliases.
//!
//! ## Architecture
//!
//! ```text
//!  ResolutionService ── FingerprintCache (files: 100, buffers: 10)
//!         │
//!      extract ── vize_atelier_sfc (split) ── vize_croquis (analyze)
//!         │
//!   AliasResolver ── Settings + ProjectConfig (jsconfig/tsconfig paths)
//! ```
//!
//! A cache miss extracts one file; its mixins are resolved through the same
//! service, so every file is parsed at most once per fingerprint. Failures
//! never escape the service: a file that is missing or cannot be analyzed
//! has empty metadata.
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use vize_loupe::{describe, ResolutionService, ServiceOptions, Settings};
//!
//! let service = ResolutionService::new(ServiceOptions::new("/project"));
//! let settings = Settings::default().with_alias("@/", "src/");
//!
//! let metadata = service.resolve_file(Path::new("/project/src/components/Card.vue"), &settings);
//! for line in describe::hover_lines(&metadata) {
//!     println!("{line}");
//! }
//! ```

pub mod alias;
pub mod cache;
pub mod config;
pub mod describe;
mod error;
pub mod extract;
pub mod metadata;
pub mod service;

pub use alias::{normalize_path, AliasResolver, AliasTable, ModuleKind, Resolution};
pub use cache::{CacheStats, FingerprintCache};
pub use config::{ProjectConfig, ProjectConfigCache, Settings};
pub use error::{LoupeError, LoupeResult};
pub use extract::{extract, MetadataProvider};
pub use metadata::{ComponentMap, ComponentSource, ExtractKind, Metadata};
pub use service::{ResolutionService, ServiceOptions};
