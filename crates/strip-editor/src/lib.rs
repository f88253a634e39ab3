//! Interactive marker editing for buildstrip
//!
//! An editor host owns a [`Document`] with a selection and a [`Settings`]
//! store. It calls [`execute`] with one [`Command`] from the catalogue and
//! shows the returned [`CommandOutcome`]. Each applied command is exactly
//! one edit, so one command is one undo step.

pub mod command;
pub mod document;
pub mod error;
pub mod settings;

pub use command::{Command, CommandOutcome, ConfigureAction, NO_ACTIVE_EDITOR, execute};
pub use document::Document;
pub use error::{Error, Result};
pub use settings::{SETTING_KEYS, Settings};
