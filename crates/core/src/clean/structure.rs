//! Structural analysis of a caption's lines.
//! The profile is computed from the lines as first observed and drives the
//! formatting decisions of the cleaning pipeline.

use crate::patterns::{self, BRACKETS, CURLY_BRACKETS, HASH, MUSIC, PARENTHESES};
use std::collections::BTreeSet;

/// Read-only summary of the pollution markers and speakers in a caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralProfile {
    /// Speaker names as found, with annotations stripped.
    pub speakers: BTreeSet<String>,
    pub has_dashes: bool,
    pub has_parentheses: bool,
    pub has_brackets: bool,
    pub has_curly_brackets: bool,
    pub has_hash_content: bool,
    pub has_music: bool,
    pub line_count: usize,
}

impl StructuralProfile {
    pub fn speaker_count(&self) -> usize {
        self.speakers.len()
    }

    pub fn has_speakers(&self) -> bool {
        self.speaker_count() > 0
    }
}

/// Analyze `lines` and build their structural profile.
pub fn analyze<S: AsRef<str>>(lines: &[S]) -> StructuralProfile {
    let mut profile = StructuralProfile {
        line_count: lines.len(),
        ..Default::default()
    };
    for line in lines {
        let line = line.as_ref().trim();

        if let Some(label) = patterns::speaker_label(line) {
            let name = speaker_name(label);
            if !name.is_empty() {
                profile.speakers.insert(name);
            }
        }

        profile.has_parentheses |= PARENTHESES.is_match(line);
        profile.has_brackets |= BRACKETS.is_match(line);
        profile.has_curly_brackets |= CURLY_BRACKETS.is_match(line);
        profile.has_hash_content |= HASH.is_match(line);
        profile.has_music |= line.contains(MUSIC);
        profile.has_dashes |= patterns::starts_with_dash(line);
    }
    profile
}

/// Clean a raw speaker label. `SHELDON (excitedly)` becomes `SHELDON`.
fn speaker_name(label: &str) -> String {
    patterns::strip_annotations(label.trim()).trim().to_string()
}
