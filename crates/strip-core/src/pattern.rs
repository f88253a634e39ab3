//! Regex construction for marker comments
//!
//! Tokens are always escaped verbatim. A token that begins or ends with a
//! word character gets a `\b` guard on that side, so `BUILD_REMOVE` does not
//! match inside `BUILD_REMOVE_START`.

use regex::Regex;

use crate::config::MarkerSet;
use crate::error::Result;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Escaped token with word-boundary guards
pub fn token_fragment(token: &str) -> String {
    let mut fragment = String::with_capacity(token.len() + 4);
    if token.starts_with(is_word_char) {
        fragment.push_str(r"\b");
    }
    fragment.push_str(&regex::escape(token));
    if token.ends_with(is_word_char) {
        fragment.push_str(r"\b");
    }
    fragment
}

/// Alternation of several tokens, in the order given
pub fn alternation(tokens: &[String]) -> String {
    let parts: Vec<String> = tokens.iter().map(|t| token_fragment(t)).collect();
    format!("(?:{})", parts.join("|"))
}

/// A block comment holding exactly `fragment`, optionally padded with whitespace
pub fn block_comment(fragment: &str) -> String {
    format!(r"/\*\s*{fragment}\s*\*/")
}

/// A line comment containing `fragment`, through the end of the line
pub fn line_comment(fragment: &str) -> String {
    format!(r"//[^\r\n]*?{fragment}[^\r\n]*")
}

/// Compiled patterns for one marker set
#[derive(Debug, Clone)]
pub struct MarkerPatterns {
    pub block_start: Regex,
    pub block_end: Regex,
    pub line_start: Regex,
    pub line_end: Regex,
    pub line_marker: Regex,
}

impl MarkerPatterns {
    pub fn compile(markers: &MarkerSet) -> Result<Self> {
        let block = |token: &str| Regex::new(&block_comment(&token_fragment(token)));
        let line = |token: &str| Regex::new(&line_comment(&token_fragment(token)));

        Ok(Self {
            block_start: block(&markers.block_start)?,
            block_end: block(&markers.block_end)?,
            line_start: line(&markers.line_start)?,
            line_end: line(&markers.line_end)?,
            line_marker: line(&markers.line_marker)?,
        })
    }
}
