//! Marker vocabulary and formatting options
//!
//! [`MarkerConfig`] is the single, fully-defaulted configuration struct. It is
//! validated once at every entry point; everything downstream can assume the
//! tokens are non-empty and distinct.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_START_MARKER: &str = "BUILD_REMOVE_START";
pub const DEFAULT_END_MARKER: &str = "BUILD_REMOVE_END";
pub const DEFAULT_LINE_MARKER: &str = "BUILD_REMOVE";

fn default_environments() -> Vec<String> {
    vec!["production".to_string()]
}

/// The five literal tokens that identify regions of one family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerSet {
    pub block_start: String,
    pub block_end: String,
    pub line_start: String,
    pub line_end: String,
    pub line_marker: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::uniform(DEFAULT_START_MARKER, DEFAULT_END_MARKER, DEFAULT_LINE_MARKER)
    }
}

impl MarkerSet {
    /// Use the same start/end pair for block and line regions
    pub fn uniform(
        start: impl Into<String>,
        end: impl Into<String>,
        line_marker: impl Into<String>,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            block_start: start.clone(),
            block_end: end.clone(),
            line_start: start,
            line_end: end,
            line_marker: line_marker.into(),
        }
    }

    /// Build a set from a start/end pair, deriving the line marker.
    ///
    /// `PRODUCTION_REMOVE_START` / `PRODUCTION_REMOVE_END` yields the line
    /// marker `PRODUCTION_REMOVE`.
    pub fn from_pair(start: &str, end: &str) -> Self {
        Self::uniform(start, end, derive_line_marker(start, end))
    }

    /// Tokens paired with their configuration key
    pub fn tokens(&self) -> [(&'static str, &str); 5] {
        [
            ("blockStart", &self.block_start),
            ("blockEnd", &self.block_end),
            ("lineStart", &self.line_start),
            ("lineEnd", &self.line_end),
            ("lineMarker", &self.line_marker),
        ]
    }

    /// Check that every token is usable. `label` prefixes keys in errors.
    pub fn validate(&self, label: &str) -> Result<()> {
        for (key, token) in self.tokens() {
            validate_token(&format!("{label}.{key}"), token)?;
        }

        let pairs = [
            ("blockStart", &self.block_start, "blockEnd", &self.block_end),
            ("lineStart", &self.line_start, "lineEnd", &self.line_end),
        ];
        for (first, a, second, b) in pairs {
            if a == b {
                return Err(Error::DuplicateMarker {
                    token: a.clone(),
                    first: format!("{label}.{first}"),
                    second: format!("{label}.{second}"),
                });
            }
        }

        for (key, token) in self.tokens().into_iter().take(4) {
            if token == self.line_marker {
                return Err(Error::DuplicateMarker {
                    token: token.to_string(),
                    first: format!("{label}.{key}"),
                    second: format!("{label}.lineMarker"),
                });
            }
        }

        Ok(())
    }
}

fn validate_token(key: &str, token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(Error::empty_marker(key));
    }
    if token.contains(['\n', '\r']) {
        return Err(Error::invalid_marker(key, "contains a line break"));
    }
    if token.contains("*/") || token.contains("/*") {
        return Err(Error::invalid_marker(key, "contains comment delimiters"));
    }
    Ok(())
}

fn derive_line_marker(start: &str, end: &str) -> String {
    let common = start
        .char_indices()
        .zip(end.chars())
        .take_while(|((_, a), b)| a == b)
        .last()
        .map(|((i, c), _)| i + c.len_utf8())
        .unwrap_or(0);

    match start[..common].rfind('_') {
        Some(idx) if idx > 0 => start[..idx].to_string(),
        _ => format!("{start}_LINE"),
    }
}

/// Named marker families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Production,
    Development,
    Test,
    Debug,
}

impl FamilyKind {
    pub const ALL: [FamilyKind; 4] = [
        FamilyKind::Production,
        FamilyKind::Development,
        FamilyKind::Test,
        FamilyKind::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FamilyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "debug" => Ok(Self::Debug),
            other => Err(format!(
                "unknown marker family '{other}' (expected production, development, test or debug)"
            )),
        }
    }
}

/// A family's start/end pair and the environments in which it is stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerFamily {
    pub start: String,
    pub end: String,
    pub environments: Vec<String>,
}

impl MarkerFamily {
    pub fn new(start: impl Into<String>, end: impl Into<String>, environments: &[&str]) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            environments: environments.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn defaults(kind: FamilyKind) -> Self {
        match kind {
            FamilyKind::Production => Self::new(
                "PRODUCTION_REMOVE_START",
                "PRODUCTION_REMOVE_END",
                &["production"],
            ),
            FamilyKind::Development => Self::new(
                "DEVELOPMENT_REMOVE_START",
                "DEVELOPMENT_REMOVE_END",
                &["development"],
            ),
            FamilyKind::Test => Self::new("TEST_REMOVE_START", "TEST_REMOVE_END", &["test"]),
            FamilyKind::Debug => {
                Self::new("DEBUG_REMOVE_START", "DEBUG_REMOVE_END", &["production"])
            }
        }
    }

    pub fn markers(&self) -> MarkerSet {
        MarkerSet::from_pair(&self.start, &self.end)
    }
}

fn default_production() -> MarkerFamily {
    MarkerFamily::defaults(FamilyKind::Production)
}

fn default_development() -> MarkerFamily {
    MarkerFamily::defaults(FamilyKind::Development)
}

fn default_test() -> MarkerFamily {
    MarkerFamily::defaults(FamilyKind::Test)
}

fn default_debug() -> MarkerFamily {
    MarkerFamily::defaults(FamilyKind::Debug)
}

/// The four named families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Families {
    #[serde(default = "default_production")]
    pub production: MarkerFamily,
    #[serde(default = "default_development")]
    pub development: MarkerFamily,
    #[serde(default = "default_test")]
    pub test: MarkerFamily,
    #[serde(default = "default_debug")]
    pub debug: MarkerFamily,
}

impl Default for Families {
    fn default() -> Self {
        Self {
            production: default_production(),
            development: default_development(),
            test: default_test(),
            debug: default_debug(),
        }
    }
}

impl Families {
    pub fn get(&self, kind: FamilyKind) -> &MarkerFamily {
        match kind {
            FamilyKind::Production => &self.production,
            FamilyKind::Development => &self.development,
            FamilyKind::Test => &self.test,
            FamilyKind::Debug => &self.debug,
        }
    }

    pub fn get_mut(&mut self, kind: FamilyKind) -> &mut MarkerFamily {
        match kind {
            FamilyKind::Production => &mut self.production,
            FamilyKind::Development => &mut self.development,
            FamilyKind::Test => &mut self.test,
            FamilyKind::Debug => &mut self.debug,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FamilyKind, &MarkerFamily)> {
        FamilyKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Comment syntax used when writing markers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    /// `/* TOKEN */`
    #[default]
    Block,
    /// `// TOKEN`
    Line,
}

impl CommentStyle {
    /// Render a complete comment carrying `token`
    pub fn render(&self, token: &str, spacing: bool) -> String {
        match (self, spacing) {
            (Self::Block, true) => format!("/* {token} */"),
            (Self::Block, false) => format!("/*{token}*/"),
            (Self::Line, true) => format!("// {token}"),
            (Self::Line, false) => format!("//{token}"),
        }
    }

    /// The start/end tokens of `markers` that belong to this style
    pub fn pair<'a>(&self, markers: &'a MarkerSet) -> (&'a str, &'a str) {
        match self {
            Self::Block => (&markers.block_start, &markers.block_end),
            Self::Line => (&markers.line_start, &markers.line_end),
        }
    }
}

impl fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => f.write_str("block"),
            Self::Line => f.write_str("line"),
        }
    }
}

impl FromStr for CommentStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "line" => Ok(Self::Line),
            other => Err(format!("unknown comment style '{other}' (expected block or line)")),
        }
    }
}

/// Presentation knobs for the marker writer. The scanner ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattingOptions {
    pub use_spacing: bool,
    pub preserve_indentation: bool,
    pub add_empty_lines: bool,
    #[serde(rename = "defaultCommentStyle")]
    pub default_style: CommentStyle,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            use_spacing: true,
            preserve_indentation: true,
            add_empty_lines: false,
            default_style: CommentStyle::Block,
        }
    }
}

/// How the scanner treats markers that do not pair up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalancePolicy {
    /// Any unpaired, stray, or nested marker is an error
    #[default]
    Strict,
    /// Each start pairs with the first end after it; leftovers are reported
    Lenient,
}

/// Complete marker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkerConfig {
    pub markers: MarkerSet,
    pub families: Families,
    pub formatting: FormattingOptions,
    pub environments: Vec<String>,
    pub balance: BalancePolicy,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            markers: MarkerSet::default(),
            families: Families::default(),
            formatting: FormattingOptions::default(),
            environments: default_environments(),
            balance: BalancePolicy::default(),
        }
    }
}

impl MarkerConfig {
    /// Validate every marker token. Call once before any scan.
    pub fn validate(&self) -> Result<()> {
        self.markers.validate("markers")?;
        for (kind, family) in self.families.iter() {
            validate_token(&format!("families.{kind}.start"), &family.start)?;
            validate_token(&format!("families.{kind}.end"), &family.end)?;
            family.markers().validate(&format!("families.{kind}"))?;
        }
        Ok(())
    }

    /// Marker set of the default family or a named one
    pub fn markers_for(&self, family: Option<FamilyKind>) -> MarkerSet {
        match family {
            None => self.markers.clone(),
            Some(kind) => self.families.get(kind).markers(),
        }
    }

    /// The default set followed by every family set
    pub fn all_marker_sets(&self) -> Vec<MarkerSet> {
        std::iter::once(self.markers.clone())
            .chain(self.families.iter().map(|(_, family)| family.markers()))
            .collect()
    }

    /// Every configured token, deduplicated, longest first
    pub fn catalogue(&self) -> Vec<String> {
        let mut tokens: Vec<String> = self
            .all_marker_sets()
            .iter()
            .flat_map(|set| set.tokens().map(|(_, token)| token.to_string()))
            .collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        tokens.dedup();
        tokens
    }

    /// Block-comment start/end pairs across all families
    pub fn block_pairs(&self) -> Vec<(String, String)> {
        self.all_marker_sets()
            .into_iter()
            .map(|set| (set.block_start, set.block_end))
            .collect()
    }
}
