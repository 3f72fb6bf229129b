//! Cleaning pipeline that strips CC/SDH pollution from captions.
//! Each step works line by line and the result is always a new caption.

use crate::patterns::{
    self, LEADING_DASH, SPACE_AFTER_DASH, SPACE_BEFORE_PUNCTUATION, WHITESPACE_RUN,
};
use crate::srt::Caption;

pub mod structure;

pub use structure::{analyze, StructuralProfile};

/// Clean `caption` using the profile of its original lines.
pub fn clean_caption(caption: &Caption) -> Caption {
    clean(caption, &analyze(&caption.lines))
}

/// Executes all cleaning steps on a caption.
/// `profile` must describe the caption before cleaning: speaker labels and
/// dashes that get stripped still decide the dialogue formatting.
pub fn clean(caption: &Caption, profile: &StructuralProfile) -> Caption {
    let stripped: Vec<String> = caption
        .lines
        .iter()
        .map(|line| clean_line(line))
        .filter(|line| !line.is_empty())
        .collect();
    let formatted = format_structure(profile, stripped);
    caption.with_text(&final_cleanup(&formatted.join("\n")))
}

/// Remove annotations, music and a leading speaker label from one line.
fn clean_line(line: &str) -> String {
    let line = patterns::strip_annotations(line);
    patterns::strip_speaker_label(&line).trim().to_string()
}

/// Whether cleaned lines should be rendered as a dash-per-line exchange.
fn wants_dialogue_dashes(profile: &StructuralProfile, lines: &[String]) -> bool {
    profile.speaker_count() > 1
        || profile.has_dashes
        || lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .any(|l| patterns::starts_with_dash(l))
}

/// Prefix every non-empty line with a single hyphen when the caption is a
/// dialogue exchange; otherwise hand the lines back untouched.
fn format_structure(profile: &StructuralProfile, lines: Vec<String>) -> Vec<String> {
    if lines.iter().all(|l| l.trim().is_empty()) || !wants_dialogue_dashes(profile, &lines) {
        return lines;
    }
    lines
        .into_iter()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return String::new();
            }
            let rest = LEADING_DASH.replace(trimmed, "");
            if rest.is_empty() {
                trimmed.to_string()
            } else {
                format!("-{rest}")
            }
        })
        .collect()
}

/// Squeeze whitespace, tighten dashes and punctuation, drop empty lines.
fn final_cleanup(text: &str) -> String {
    text.split('\n')
        .filter_map(|line| {
            let line = WHITESPACE_RUN.replace_all(line, " ");
            let line = line.trim();
            let line = SPACE_AFTER_DASH.replace_all(line, "$1");
            let line = SPACE_BEFORE_PUNCTUATION.replace_all(&line, "$1");
            (!line.is_empty()).then(|| line.into_owned())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
