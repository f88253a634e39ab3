//! The flat key/value settings surface an editor host persists
//!
//! Keys mirror what a host shows in its settings UI. Internally they map onto
//! one [`MarkerConfig`], which is validated on every change.

use serde_json::{Map, Value};
use strip_core::{CommentStyle, FamilyKind, MarkerConfig};

use crate::error::{Error, Result};

/// Every settings key, in display order
pub const SETTING_KEYS: [&str; 15] = [
    "startMarker",
    "endMarker",
    "lineMarker",
    "productionStartMarker",
    "productionEndMarker",
    "developmentStartMarker",
    "developmentEndMarker",
    "testStartMarker",
    "testEndMarker",
    "debugStartMarker",
    "debugEndMarker",
    "useSpacing",
    "preserveIndentation",
    "addEmptyLines",
    "defaultCommentStyle",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Start,
    End,
    Line,
    FamilyStart(FamilyKind),
    FamilyEnd(FamilyKind),
    UseSpacing,
    PreserveIndentation,
    AddEmptyLines,
    DefaultCommentStyle,
}

impl Key {
    fn parse(key: &str) -> Result<Self> {
        let parsed = match key {
            "startMarker" => Self::Start,
            "endMarker" => Self::End,
            "lineMarker" => Self::Line,
            "useSpacing" => Self::UseSpacing,
            "preserveIndentation" => Self::PreserveIndentation,
            "addEmptyLines" => Self::AddEmptyLines,
            "defaultCommentStyle" => Self::DefaultCommentStyle,
            other => {
                let family = |suffix: &str| {
                    other
                        .strip_suffix(suffix)
                        .and_then(|name| name.parse::<FamilyKind>().ok())
                        .filter(|kind| other == format!("{}{suffix}", kind.as_str()))
                };
                if let Some(kind) = family("StartMarker") {
                    Self::FamilyStart(kind)
                } else if let Some(kind) = family("EndMarker") {
                    Self::FamilyEnd(kind)
                } else {
                    return Err(Error::UnknownSetting {
                        key: key.to_string(),
                    });
                }
            }
        };
        Ok(parsed)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Error::invalid_setting(key, value, "expected true or false")),
    }
}

/// Editor settings backed by a [`MarkerConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    config: MarkerConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing configuration. It is validated first.
    pub fn from_config(config: MarkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    pub fn to_config(&self) -> MarkerConfig {
        self.config.clone()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let config = &self.config;
        let value = match Key::parse(key)? {
            Key::Start => config.markers.block_start.clone(),
            Key::End => config.markers.block_end.clone(),
            Key::Line => config.markers.line_marker.clone(),
            Key::FamilyStart(kind) => config.families.get(kind).start.clone(),
            Key::FamilyEnd(kind) => config.families.get(kind).end.clone(),
            Key::UseSpacing => config.formatting.use_spacing.to_string(),
            Key::PreserveIndentation => config.formatting.preserve_indentation.to_string(),
            Key::AddEmptyLines => config.formatting.add_empty_lines.to_string(),
            Key::DefaultCommentStyle => config.formatting.default_style.to_string(),
        };
        Ok(value)
    }

    /// Change one setting.
    ///
    /// The resulting configuration must validate; otherwise nothing changes.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.config.clone();
        match Key::parse(key)? {
            Key::Start => {
                next.markers.block_start = value.to_string();
                next.markers.line_start = value.to_string();
            }
            Key::End => {
                next.markers.block_end = value.to_string();
                next.markers.line_end = value.to_string();
            }
            Key::Line => next.markers.line_marker = value.to_string(),
            Key::FamilyStart(kind) => next.families.get_mut(kind).start = value.to_string(),
            Key::FamilyEnd(kind) => next.families.get_mut(kind).end = value.to_string(),
            Key::UseSpacing => next.formatting.use_spacing = parse_bool(key, value)?,
            Key::PreserveIndentation => {
                next.formatting.preserve_indentation = parse_bool(key, value)?
            }
            Key::AddEmptyLines => next.formatting.add_empty_lines = parse_bool(key, value)?,
            Key::DefaultCommentStyle => {
                next.formatting.default_style = value
                    .parse::<CommentStyle>()
                    .map_err(|reason| Error::invalid_setting(key, value, reason))?
            }
        }

        next.validate()
            .map_err(|e| Error::invalid_setting(key, value, e.to_string()))?;
        self.config = next;
        Ok(())
    }

    /// Restore every setting to its default
    pub fn reset(&mut self) {
        self.config = MarkerConfig::default();
    }

    /// All settings as `(key, value)` pairs, in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        SETTING_KEYS
            .iter()
            .filter_map(|&key| self.get(key).ok().map(|value| (key, value)))
            .collect()
    }

    /// Settings as a JSON object, booleans typed
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .into_iter()
            .map(|(key, value)| {
                let typed = match value.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => Value::String(value),
                };
                (key.to_string(), typed)
            })
            .collect();
        Value::Object(map)
    }
}
