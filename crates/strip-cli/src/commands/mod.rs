//! Command implementations

pub mod config;
pub mod edit;
pub mod scan;
pub mod strip;

pub use config::{run_config_get, run_config_init, run_config_set, run_config_show};
pub use edit::{EditOutput, SelectionArg, run_commands, run_edit};
pub use scan::run_scan;
pub use strip::{StripArgs, run_strip};
