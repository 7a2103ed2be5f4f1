//! Session-local vote selection for a single post.
//!
//! The tracker never touches counters itself: it only computes the partial
//! update to send and moves its selection once the backend confirms.

use crate::post::{Post, VoteChanges, VoteColumn};

/// What a click on a vote button turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    /// Same button again: take the vote back.
    Retract,
    /// Different button: move the vote from `from`.
    Move { from: VoteColumn },
    /// Nothing selected yet.
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    target: VoteColumn,
    kind: VoteKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteTracker {
    selected: Option<VoteColumn>,
    pending: Option<Pending>,
}

impl VoteKind {
    fn classify(selected: Option<VoteColumn>, target: VoteColumn) -> Self {
        match selected {
            Some(current) if current == target => Self::Retract,
            Some(from) => Self::Move { from },
            None => Self::First,
        }
    }
}

impl VoteTracker {
    pub fn selected(&self) -> Option<VoteColumn> {
        self.selected
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a vote on `target`, returning the columns to write.
    ///
    /// Returns `None` while a previous vote is still in flight.
    pub fn begin(&mut self, target: VoteColumn, post: &Post) -> Option<VoteChanges> {
        if self.pending.is_some() {
            return None;
        }

        let kind = VoteKind::classify(self.selected, target);
        let mut changes = VoteChanges::new();
        match kind {
            VoteKind::Retract => {
                changes.insert(target, post.votes(target).saturating_sub(1));
            }
            VoteKind::Move { from } => {
                changes.insert(from, post.votes(from).saturating_sub(1));
                changes.insert(target, post.votes(target).saturating_add(1));
            }
            VoteKind::First => {
                changes.insert(target, post.votes(target).saturating_add(1));
            }
        }

        self.pending = Some(Pending { target, kind });
        Some(changes)
    }

    /// The backend accepted the in-flight vote.
    pub fn confirm(&mut self) {
        if let Some(Pending { target, kind }) = self.pending.take() {
            self.selected = match kind {
                VoteKind::Retract => None,
                VoteKind::Move { .. } | VoteKind::First => Some(target),
            };
        }
    }

    /// The in-flight vote failed; selection stays where it was.
    pub fn fail(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    pub fn pending_kind(&self) -> Option<VoteKind> {
        self.pending.map(|p| p.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::sample;

    fn apply(post: &mut Post, changes: &VoteChanges) {
        for (column, value) in changes {
            post.set_votes(*column, *value);
        }
    }

    /// Runs one click through begin + confirm, applying the changes like the
    /// backend would.
    fn click(tracker: &mut VoteTracker, post: &mut Post, target: VoteColumn) {
        let changes = tracker.begin(target, post).expect("not pending");
        apply(post, &changes);
        tracker.confirm();
    }

    #[test]
    fn first_vote_increments_target() {
        let post = sample(1, "news", (4, 2, 1));
        let mut tracker = VoteTracker::default();

        let changes = tracker.begin(VoteColumn::Mindblowing, &post).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[&VoteColumn::Mindblowing], 3);
        assert_eq!(tracker.pending_kind(), Some(VoteKind::First));

        tracker.confirm();
        assert_eq!(tracker.selected(), Some(VoteColumn::Mindblowing));
        assert!(!tracker.is_pending());
    }

    #[test]
    fn retract_round_trip_restores_baseline() {
        let mut post = sample(1, "news", (5, 0, 0));
        let mut tracker = VoteTracker::default();

        click(&mut tracker, &mut post, VoteColumn::Interesting);
        assert_eq!(post.vote_interesting, 6);

        click(&mut tracker, &mut post, VoteColumn::Interesting);
        assert_eq!(post.vote_interesting, 5);
        assert_eq!(tracker.selected(), None);
    }

    #[test]
    fn move_law() {
        let mut post = sample(1, "news", (5, 1, 2));
        let mut tracker = VoteTracker::default();

        click(&mut tracker, &mut post, VoteColumn::Interesting);
        let changes = tracker.begin(VoteColumn::False, &post).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(
            tracker.pending_kind(),
            Some(VoteKind::Move {
                from: VoteColumn::Interesting
            })
        );
        apply(&mut post, &changes);
        tracker.confirm();

        assert_eq!(post.vote_interesting, 5);
        assert_eq!(post.vote_mindblowing, 1);
        assert_eq!(post.vote_false, 3);
        assert_eq!(tracker.selected(), Some(VoteColumn::False));
    }

    #[test]
    fn rejects_clicks_while_pending() {
        let post = sample(1, "news", (0, 0, 0));
        let mut tracker = VoteTracker::default();

        assert!(tracker.begin(VoteColumn::False, &post).is_some());
        assert!(tracker.begin(VoteColumn::False, &post).is_none());
        assert!(tracker.begin(VoteColumn::Interesting, &post).is_none());
    }

    #[test]
    fn failure_keeps_selection() {
        let mut post = sample(1, "news", (0, 0, 0));
        let mut tracker = VoteTracker::default();
        click(&mut tracker, &mut post, VoteColumn::Interesting);

        tracker.begin(VoteColumn::Mindblowing, &post).unwrap();
        tracker.fail();

        assert_eq!(tracker.selected(), Some(VoteColumn::Interesting));
        assert!(!tracker.is_pending());
        assert!(tracker.begin(VoteColumn::Mindblowing, &post).is_some());
    }

    #[test]
    fn selection_follows_last_confirmed_target() {
        let mut post = sample(1, "news", (0, 0, 0));
        let mut tracker = VoteTracker::default();
        let clicks = [
            VoteColumn::False,
            VoteColumn::False,
            VoteColumn::Mindblowing,
            VoteColumn::Interesting,
            VoteColumn::Interesting,
            VoteColumn::False,
        ];
        let expected = [
            Some(VoteColumn::False),
            None,
            Some(VoteColumn::Mindblowing),
            Some(VoteColumn::Interesting),
            None,
            Some(VoteColumn::False),
        ];

        for (target, want) in clicks.into_iter().zip(expected) {
            click(&mut tracker, &mut post, target);
            assert_eq!(tracker.selected(), want);
        }
        assert_eq!(
            (post.vote_interesting, post.vote_mindblowing, post.vote_false),
            (0, 0, 1)
        );
    }

    #[test]
    fn retract_never_underflows() {
        let post = sample(1, "news", (0, 0, 0));
        let mut tracker = VoteTracker {
            selected: Some(VoteColumn::False),
            pending: None,
        };

        let changes = tracker.begin(VoteColumn::False, &post).unwrap();
        assert_eq!(changes[&VoteColumn::False], 0);
    }
}
