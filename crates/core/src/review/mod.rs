//! Review orchestration utilities.
//! This module wires subtitle parsing, cleaning, per-caption decisions and
//! the final rewrite of the file.

use crate::clean::{self, StructuralProfile};
use crate::srt::{self, Caption};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

pub mod policy;

/// What to do with a caption the pipeline changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Take the cleaned caption, or drop it when cleaning emptied it.
    Accept,
    KeepOriginal,
    Remove,
    /// Replace the caption text with a manual edit.
    Edit(String),
    /// Stop reviewing and leave the file alone.
    Abort,
}

/// A proposed change offered to a reviewer.
#[derive(Debug)]
pub struct Review<'a> {
    pub original: &'a Caption,
    pub cleaned: Caption,
    pub profile: StructuralProfile,
}

impl<'a> Review<'a> {
    /// Build the proposal for `caption`, profiling its lines before cleaning.
    pub fn new(caption: &'a Caption) -> Self {
        let profile = clean::analyze(&caption.lines);
        let cleaned = clean::clean(caption, &profile);
        Review {
            original: caption,
            cleaned,
            profile,
        }
    }

    pub fn changed(&self) -> bool {
        self.cleaned.text() != self.original.text()
    }

    /// True when nothing survives cleaning.
    pub fn recommends_removal(&self) -> bool {
        self.cleaned.is_blank()
    }
}

/// Decides the fate of each changed caption.
pub trait Reviewer {
    fn decide(&mut self, review: &Review<'_>) -> Result<Decision>;
}

/// Final captions of a completed review plus what happened to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub captions: Vec<Caption>,
    pub modified: usize,
    pub removed: usize,
}

impl Session {
    pub fn has_changes(&self) -> bool {
        self.modified > 0 || self.removed > 0
    }
}

/// Result of processing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Aborted,
    Unchanged,
    Rewritten {
        backup: PathBuf,
        modified: usize,
        removed: usize,
    },
}

/// Walk `captions` in order and apply the reviewer's decisions.
/// Returns `None` when the reviewer aborts.
pub fn review_captions<R: Reviewer>(
    captions: &[Caption],
    reviewer: &mut R,
) -> Result<Option<Session>> {
    info!("analyzing {} captions", captions.len());
    let mut kept = Vec::with_capacity(captions.len());
    let mut modified = 0;
    let mut removed = 0;
    for caption in captions {
        let review = Review::new(caption);
        if !review.changed() {
            kept.push(caption.clone());
            continue;
        }
        let decision = reviewer.decide(&review)?;
        debug!("caption #{}: {:?}", caption.number, decision);
        match decision {
            Decision::Abort => {
                info!("review aborted at caption #{}", caption.number);
                return Ok(None);
            }
            Decision::Accept if review.recommends_removal() => removed += 1,
            Decision::Accept => {
                kept.push(review.cleaned);
                modified += 1;
            }
            Decision::KeepOriginal => kept.push(caption.clone()),
            Decision::Remove => removed += 1,
            Decision::Edit(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!("empty edit for caption #{}, keeping original", caption.number);
                    kept.push(caption.clone());
                } else {
                    kept.push(caption.with_text(text));
                    modified += 1;
                }
            }
        }
    }
    Ok(Some(Session {
        captions: kept,
        modified,
        removed,
    }))
}

/// Clean an SRT file in place, asking `reviewer` about every change.
/// The original is kept next to it as `<file>.backup` when anything changes.
pub fn process_file<R: Reviewer>(path: &Path, reviewer: &mut R) -> Result<Outcome> {
    trace!("process_file path={}", path.display());
    let captions = srt::read_file(path)?;
    let Some(session) = review_captions(&captions, reviewer)? else {
        return Ok(Outcome::Aborted);
    };
    if !session.has_changes() {
        info!("no changes were made");
        return Ok(Outcome::Unchanged);
    }
    let backup = backup_path(path);
    fs::rename(path, &backup)
        .with_context(|| format!("creating backup {}", backup.display()))?;
    if let Err(err) = fs::write(path, srt::format(&session.captions)) {
        warn!("writing {} failed, restoring backup", path.display());
        fs::rename(&backup, path)
            .with_context(|| format!("restoring backup {}", backup.display()))?;
        return Err(err).with_context(|| format!("writing {}", path.display()));
    }
    info!(
        "wrote {} ({} modified, {} removed, backup {})",
        path.display(),
        session.modified,
        session.removed,
        backup.display()
    );
    Ok(Outcome::Rewritten {
        backup,
        modified: session.modified,
        removed: session.removed,
    })
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}
