//! Non-interactive reviewers.

use super::{Decision, Review, Reviewer};
use anyhow::Result;
use tracing::info;

/// Accepts every proposed change.
pub struct AcceptAll;

impl Reviewer for AcceptAll {
    fn decide(&mut self, _review: &Review<'_>) -> Result<Decision> {
        Ok(Decision::Accept)
    }
}

/// Dry run: logs each proposal and keeps the original.
#[derive(Debug, Default)]
pub struct KeepAll {
    /// Changed captions seen so far.
    pub proposed: usize,
    /// How many of those would be removed.
    pub removals: usize,
}

impl Reviewer for KeepAll {
    fn decide(&mut self, review: &Review<'_>) -> Result<Decision> {
        self.proposed += 1;
        if review.recommends_removal() {
            self.removals += 1;
            info!(
                "#{}: {:?} -> (remove)",
                review.original.number,
                review.original.text()
            );
        } else {
            info!(
                "#{}: {:?} -> {:?}",
                review.original.number,
                review.original.text(),
                review.cleaned.text()
            );
        }
        Ok(Decision::KeepOriginal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srt::Caption;

    #[test]
    fn keep_all_counts_proposals() {
        let speech = Caption::new(1, "a", "b", vec!["AMY: Hi.".into()]);
        let noise = Caption::new(2, "c", "d", vec!["[thunder]".into()]);
        let mut reviewer = KeepAll::default();
        assert_eq!(reviewer.decide(&Review::new(&speech)).unwrap(), Decision::KeepOriginal);
        assert_eq!(reviewer.decide(&Review::new(&noise)).unwrap(), Decision::KeepOriginal);
        assert_eq!(reviewer.proposed, 2);
        assert_eq!(reviewer.removals, 1);
    }

    #[test]
    fn accept_all_accepts() {
        let caption = Caption::new(1, "a", "b", vec!["(sighs)".into()]);
        assert_eq!(AcceptAll.decide(&Review::new(&caption)).unwrap(), Decision::Accept);
    }
}
