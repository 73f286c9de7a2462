//! locsync - i18n extraction and catalog synchronization for Java UI code
//!
//! locsync finds hardcoded UI text in Java sources (JavaFX/Swing style
//! constructor and setter calls), rewrites it into catalog lookups, and keeps
//! the `.properties` catalogs of every locale in step with what the source
//! actually references.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Scanning, key synthesis, rewriting and catalog maintenance
//! - `issues`: Issue type definitions and reporting
//! - `logging`: Diagnostic `tracing` output on stderr
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod utils;
