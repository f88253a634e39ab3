//! Build-pipeline host for buildstrip
//!
//! Bridges the pure text engine in `strip-core` to files: project
//! configuration, include/exclude filters, the per-file [`transform`] hook,
//! and a [`run`]ner that walks a whole tree while isolating per-file failures.

pub mod config;
pub mod error;
pub mod filter;
pub mod host;
pub mod io;
pub mod runner;
pub mod transform;

pub use config::{CONFIG_FILE_NAME, CONFIG_FILE_NAMES, ConfigStore, ProjectConfig};
pub use error::{Error, Result};
pub use filter::PathFilter;
pub use host::{DryRun, FsHost, Host, MemoryHost};
pub use runner::{BuildReport, FileFailure, RewrittenFile, run, run_with};
pub use transform::{TransformOptions, TransformResult, Transformer, transform};
