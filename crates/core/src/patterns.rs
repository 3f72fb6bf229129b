//! Markers that identify closed-caption and SDH pollution in subtitle text.
//! The structure analyzer and the cleaning pipeline share these so both
//! see exactly the same matches.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest `(...)` span on a single line.
pub static PARENTHESES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)\n]*\)").unwrap());

/// Shortest `[...]` span on a single line.
pub static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]\n]*\]").unwrap());

/// Shortest `{...}` span on a single line.
pub static CURLY_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}\n]*\}").unwrap());

/// Sound cue wrapped in hash marks, e.g. `#Sighs#`.
pub static HASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[^#\n]*#").unwrap());

/// Speaker label at line start: everything up to the first colon.
pub static SPEAKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*([^:\n]+?)\s*:").unwrap());

/// Hyphen, en-dash or em-dash opening a line.
pub static LEADING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-–—]").unwrap());

pub(crate) static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub(crate) static SPACE_AFTER_DASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([-–—])\s+").unwrap());

pub(crate) static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([.,!?;:])").unwrap());

/// Music note glyph. Removed wherever it appears, paired or not.
pub const MUSIC: char = '♪';

/// Remove parenthetical, bracketed, braced and hash-delimited spans plus
/// every music glyph. Speaker labels and dashes are left alone.
pub fn strip_annotations(text: &str) -> String {
    let text = PARENTHESES.replace_all(text, "");
    let text = BRACKETS.replace_all(&text, "");
    let text = CURLY_BRACKETS.replace_all(&text, "");
    let text = HASH.replace_all(&text, "");
    text.replace(MUSIC, "")
}

/// Remove a speaker label (and its colon) from the start of `text`.
/// Colons further into the line are never touched.
pub fn strip_speaker_label(text: &str) -> String {
    SPEAKER.replace(text, "").into_owned()
}

/// Raw label text in front of the first colon, if the line opens with one.
pub fn speaker_label(line: &str) -> Option<&str> {
    SPEAKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether the line, ignoring surrounding whitespace, opens with a dash.
pub fn starts_with_dash(line: &str) -> bool {
    LEADING_DASH.is_match(line.trim())
}
