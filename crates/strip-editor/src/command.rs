//! The interactive command catalogue

use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use strip_core::{
    CommentStyle, Edit, EditOutcome, FamilyKind, MarkerConfig, SkipReason, WrapRequest,
    convert_to_inline, erase, mark_lines, wrap,
};
use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::settings::Settings;

/// What a `configure` command does to the settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureAction {
    Show,
    Get(String),
    Set { key: String, value: String },
    Reset,
}

/// One entry of the command catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Wrap the selection in block comment markers on their own lines
    WrapBlock,
    /// Wrap the selection in line comment markers on their own lines
    WrapLine,
    /// Wrap the selection in block comment markers on a single line
    WrapInline,
    /// Wrap the selection in a named family's markers
    WrapFamily(FamilyKind),
    /// Append the line marker to each selected line
    MarkLine,
    /// Remove every known marker from the selection
    EraseMarkers,
    /// Rewrite a selected block region onto one line
    ConvertToInline,
    Configure(ConfigureAction),
}

impl Command {
    /// Every command a host should register, with `Configure` shown once
    pub fn catalogue() -> Vec<Command> {
        let mut commands = vec![Self::WrapBlock, Self::WrapLine, Self::WrapInline];
        commands.extend(FamilyKind::ALL.into_iter().map(Self::WrapFamily));
        commands.extend([
            Self::MarkLine,
            Self::EraseMarkers,
            Self::ConvertToInline,
            Self::Configure(ConfigureAction::Show),
        ]);
        commands
    }

    /// Stable identifier a host binds keys and menus to
    pub fn id(&self) -> &'static str {
        match self {
            Self::WrapBlock => "buildstrip.wrapBlock",
            Self::WrapLine => "buildstrip.wrapLine",
            Self::WrapInline => "buildstrip.wrapInline",
            Self::WrapFamily(FamilyKind::Production) => "buildstrip.wrapProduction",
            Self::WrapFamily(FamilyKind::Development) => "buildstrip.wrapDevelopment",
            Self::WrapFamily(FamilyKind::Test) => "buildstrip.wrapTest",
            Self::WrapFamily(FamilyKind::Debug) => "buildstrip.wrapDebug",
            Self::MarkLine => "buildstrip.markLine",
            Self::EraseMarkers => "buildstrip.eraseMarkers",
            Self::ConvertToInline => "buildstrip.convertToInline",
            Self::Configure(_) => "buildstrip.configure",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::WrapBlock => "Wrap Selection in Block Markers",
            Self::WrapLine => "Wrap Selection in Line Markers",
            Self::WrapInline => "Wrap Selection in Inline Markers",
            Self::WrapFamily(FamilyKind::Production) => "Wrap Selection in Production Markers",
            Self::WrapFamily(FamilyKind::Development) => "Wrap Selection in Development Markers",
            Self::WrapFamily(FamilyKind::Test) => "Wrap Selection in Test Markers",
            Self::WrapFamily(FamilyKind::Debug) => "Wrap Selection in Debug Markers",
            Self::MarkLine => "Mark Lines for Removal",
            Self::EraseMarkers => "Remove Markers from Selection",
            Self::ConvertToInline => "Convert Block to Inline",
            Self::Configure(_) => "Configure Markers",
        }
    }

    /// Whether the command edits a document
    pub fn needs_document(&self) -> bool {
        !matches!(self, Self::Configure(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Command {
    type Err = String;

    /// Accepts either an identifier or its kebab-case short name
    /// (`buildstrip.wrapBlock` or `wrap-block`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parsed = match s {
            "wrap-block" => Some(Self::WrapBlock),
            "wrap-line" => Some(Self::WrapLine),
            "wrap-inline" => Some(Self::WrapInline),
            "wrap-production" => Some(Self::WrapFamily(FamilyKind::Production)),
            "wrap-development" => Some(Self::WrapFamily(FamilyKind::Development)),
            "wrap-test" => Some(Self::WrapFamily(FamilyKind::Test)),
            "wrap-debug" => Some(Self::WrapFamily(FamilyKind::Debug)),
            "mark-line" => Some(Self::MarkLine),
            "erase-markers" => Some(Self::EraseMarkers),
            "convert-to-inline" => Some(Self::ConvertToInline),
            "configure" => Some(Self::Configure(ConfigureAction::Show)),
            id => Self::catalogue().into_iter().find(|c| c.id() == id),
        };
        parsed.ok_or_else(|| format!("unknown command '{s}'"))
    }
}

/// What the host should show after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The document was changed by exactly this edit
    Applied(Edit),
    /// Nothing changed; tell the user why
    Warning(String),
    /// Nothing changed; informational message
    Info(String),
}

impl CommandOutcome {
    pub fn edit(&self) -> Option<&Edit> {
        match self {
            Self::Applied(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Applied(_) => None,
            Self::Warning(message) | Self::Info(message) => Some(message),
        }
    }
}

pub const NO_ACTIVE_EDITOR: &str = "No active editor";

/// Run one command against the active document.
///
/// No-op conditions come back as [`CommandOutcome::Warning`] or
/// [`CommandOutcome::Info`]; `Err` is reserved for invalid configuration and
/// stale edits.
pub fn execute(
    document: Option<&mut Document>,
    command: Command,
    settings: &mut Settings,
) -> Result<CommandOutcome> {
    match &command {
        Command::Configure(action) => configure(action.clone(), settings),
        Command::WrapBlock => edit_document(
            document,
            &command,
            settings,
            wrap_with(WrapRequest::block(CommentStyle::Block)),
        ),
        Command::WrapLine => edit_document(
            document,
            &command,
            settings,
            wrap_with(WrapRequest::block(CommentStyle::Line)),
        ),
        Command::WrapInline => {
            edit_document(document, &command, settings, wrap_with(WrapRequest::inline()))
        }
        Command::WrapFamily(kind) => {
            let kind = *kind;
            edit_document(document, &command, settings, move |text, selection, config| {
                wrap(
                    text,
                    selection,
                    &config.markers_for(Some(kind)),
                    WrapRequest::block(config.formatting.default_style),
                    &config.formatting,
                )
            })
        }
        Command::MarkLine => edit_document(document, &command, settings, |text, selection, config| {
            mark_lines(text, selection, &config.markers, &config.formatting)
        }),
        Command::EraseMarkers => {
            edit_document(document, &command, settings, |text, selection, config| {
                erase(text, selection, &config.catalogue())
            })
        }
        Command::ConvertToInline => edit_document(document, &command, settings, convert_to_inline),
    }
}

/// Wrap with the default markers
fn wrap_with(
    request: WrapRequest,
) -> impl FnOnce(&str, Range<usize>, &MarkerConfig) -> strip_core::Result<EditOutcome> {
    move |text, selection, config| {
        wrap(text, selection, &config.markers, request, &config.formatting)
    }
}

/// Shared path of every editing command: check the document and selection,
/// compute one edit, apply it.
fn edit_document<F>(
    document: Option<&mut Document>,
    command: &Command,
    settings: &Settings,
    compute: F,
) -> Result<CommandOutcome>
where
    F: FnOnce(&str, Range<usize>, &MarkerConfig) -> strip_core::Result<EditOutcome>,
{
    let Some(document) = document else {
        return Ok(CommandOutcome::Warning(NO_ACTIVE_EDITOR.to_string()));
    };

    if *command != Command::MarkLine && document.selected_text().trim().is_empty() {
        return Ok(CommandOutcome::Warning(
            SkipReason::EmptySelection.to_string(),
        ));
    }

    let config = settings.config();
    config.validate()?;
    let outcome = compute(document.text(), document.selection(), config)?;

    match outcome {
        EditOutcome::Applied(edit) => {
            document.apply(&edit)?;
            debug!(command = %command, span = ?edit.span, "Applied edit");
            Ok(CommandOutcome::Applied(edit))
        }
        EditOutcome::Skipped(reason) => {
            debug!(command = %command, %reason, "Command skipped");
            let message = reason.to_string();
            Ok(match reason {
                SkipReason::EmptySelection | SkipReason::NotARemovalBlock => {
                    CommandOutcome::Warning(message)
                }
                SkipReason::NoMarkersFound | SkipReason::AlreadyMarked => {
                    CommandOutcome::Info(message)
                }
            })
        }
    }
}

fn configure(action: ConfigureAction, settings: &mut Settings) -> Result<CommandOutcome> {
    let message = match action {
        ConfigureAction::Show => settings
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{key} = {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        ConfigureAction::Get(key) => settings.get(&key)?,
        ConfigureAction::Set { key, value } => {
            settings.set(&key, &value)?;
            format!("{key} set to {value}")
        }
        ConfigureAction::Reset => {
            settings.reset();
            "Settings reset to defaults".to_string()
        }
    };
    Ok(CommandOutcome::Info(message))
}
