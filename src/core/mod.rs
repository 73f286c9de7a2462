//! Extraction and synchronization engine.
//!
//! ## Module Structure
//!
//! - `lexer`: Token stream over Java source, with exact byte spans
//! - `scanner`: Hardcoded-text call sites and the text filters
//! - `keys`: Key synthesis and the per-run key registry
//! - `rewrite`: Turning call sites into lookup / format calls
//! - `catalog`: `.properties` catalogs and transactional deltas
//! - `usage`: Keys referenced by lookup calls
//! - `sync`: Audit and back-fill across the locales of a module
//! - `rename`: Prefix migration of keys in source and catalogs
//! - `extract` / `check`: The command-level passes
//! - `context` / `files` / `fs`: Run configuration, file discovery, file I/O

pub mod catalog;
pub mod check;
pub mod context;
pub mod extract;
pub mod files;
pub mod fs;
pub mod keys;
pub mod lexer;
pub mod rename;
pub mod rewrite;
pub mod scanner;
pub mod sync;
pub mod usage;

pub use context::{ModuleCatalogs, ModuleSpec, RunContext};
