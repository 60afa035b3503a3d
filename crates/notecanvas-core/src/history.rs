//! Linear undo/redo history of raster snapshots.

use crate::snapshot::RasterSnapshot;
use std::collections::VecDeque;

/// Undo/redo stack for the active notebook.
///
/// `past` runs oldest to newest, `future` nearest to farthest. Every mutator
/// finishes with [`HistoryStore::recompute_flags`] so the capability flags
/// are always derived from the sequences in one place.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    past: Vec<RasterSnapshot>,
    current: Option<RasterSnapshot>,
    future: VecDeque<RasterSnapshot>,
    /// Set by the first push after a reset.
    committed: bool,
    can_undo: bool,
    can_redo: bool,
}

impl HistoryStore {
    /// Create an empty history (no notebook selected).
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all history and start again from `initial`.
    pub fn reset(&mut self, initial: Option<RasterSnapshot>) {
        self.past.clear();
        self.future.clear();
        self.current = initial;
        self.committed = false;
        self.recompute_flags();
        log::debug!("History reset (current present: {})", self.current.is_some());
    }

    /// Commit a new snapshot. Any redo future is discarded.
    pub fn push(&mut self, snapshot: RasterSnapshot) {
        if let Some(previous) = self.current.take() {
            self.past.push(previous);
        }
        self.current = Some(snapshot);
        self.future.clear();
        self.committed = true;
        self.recompute_flags();
        log::debug!("History push: {} past entries", self.past.len());
    }

    /// Step back one entry. Returns the new current snapshot, or `None`
    /// (leaving state untouched) when there is nothing earlier.
    pub fn undo(&mut self) -> Option<RasterSnapshot> {
        let previous = self.past.pop()?;
        if let Some(current) = self.current.replace(previous) {
            self.future.push_front(current);
        }
        self.recompute_flags();
        log::debug!(
            "History undo: {} past, {} future",
            self.past.len(),
            self.future.len()
        );
        self.current.clone()
    }

    /// Step forward one entry. Returns the new current snapshot, or `None`
    /// (leaving state untouched) when there is nothing to redo.
    pub fn redo(&mut self) -> Option<RasterSnapshot> {
        let next = self.future.pop_front()?;
        if let Some(current) = self.current.replace(next) {
            self.past.push(current);
        }
        self.recompute_flags();
        log::debug!(
            "History redo: {} past, {} future",
            self.past.len(),
            self.future.len()
        );
        self.current.clone()
    }

    /// Derive both capability flags from the sequences.
    ///
    /// `can_undo` also holds for the very first push after a reset to an
    /// absent snapshot: that entry is reported as undoable even though there
    /// is no earlier state to return to, and `undo` stays a no-op there.
    fn recompute_flags(&mut self) {
        let first_commit = self.committed && self.current.is_some() && self.future.is_empty();
        self.can_undo = !self.past.is_empty() || first_commit;
        self.can_redo = !self.future.is_empty();
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo
    }

    pub fn current(&self) -> Option<&RasterSnapshot> {
        self.current.as_ref()
    }

    /// Earlier snapshots, oldest first.
    pub fn past(&self) -> &[RasterSnapshot] {
        &self.past
    }

    /// Undone snapshots, nearest first.
    pub fn future(&self) -> impl Iterator<Item = &RasterSnapshot> {
        self.future.iter()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(name: &str) -> RasterSnapshot {
        RasterSnapshot::from_data_url(format!("data:test,{name}"))
    }

    #[test]
    fn test_fresh_reset_has_no_capabilities() {
        let mut history = HistoryStore::new();
        history.reset(None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.current().is_none());

        history.reset(Some(snap("base")));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_documented_scenario() {
        let (s1, s2) = (snap("s1"), snap("s2"));
        let mut history = HistoryStore::new();
        history.reset(None);

        history.push(s1.clone());
        assert!(history.current().unwrap().ptr_eq(&s1));
        assert!(history.can_undo());

        history.push(s2.clone());
        assert_eq!(history.past().len(), 1);
        assert!(history.past()[0].ptr_eq(&s1));
        assert!(history.current().unwrap().ptr_eq(&s2));

        let undone = history.undo().unwrap();
        assert!(undone.ptr_eq(&s1));
        assert_eq!(history.future_len(), 1);
        assert!(history.future().next().unwrap().ptr_eq(&s2));
        assert!(history.can_redo());
        assert!(!history.can_undo());

        assert!(history.undo().is_none());
        assert!(history.current().unwrap().ptr_eq(&s1));

        let redone = history.redo().unwrap();
        assert!(redone.ptr_eq(&s2));
        assert_eq!(history.future_len(), 0);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_returns_reverse_insertion_order() {
        let base = snap("base");
        let pushed: Vec<_> = (0..5).map(|i| snap(&format!("s{i}"))).collect();
        let mut history = HistoryStore::new();
        history.reset(Some(base.clone()));
        for s in &pushed {
            history.push(s.clone());
        }

        let mut expected: Vec<_> = pushed[..pushed.len() - 1].iter().rev().collect();
        expected.push(&base);
        for want in expected {
            let got = history.undo().unwrap();
            assert!(got.ptr_eq(want));
        }

        let past_before = history.past().len();
        let future_before = history.future_len();
        assert!(history.undo().is_none());
        assert_eq!(history.past().len(), past_before);
        assert_eq!(history.future_len(), future_before);
        assert!(history.current().unwrap().ptr_eq(&base));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_replays_in_original_order() {
        let pushed = [snap("s1"), snap("s2"), snap("s3")];
        let mut history = HistoryStore::new();
        history.reset(Some(snap("base")));
        for s in &pushed {
            history.push(s.clone());
        }
        for _ in 0..3 {
            assert!(history.undo().is_some());
        }
        assert_eq!(history.current(), Some(&snap("base")));

        for want in &pushed {
            assert_eq!(history.redo().as_ref(), Some(want));
        }
        assert!(history.redo().is_none());
        assert!(!history.can_redo());
        assert_eq!(history.past().len(), 3);
    }

    #[test]
    fn test_redo_after_undo_restores_snapshot() {
        let (a, b) = (snap("a"), snap("b"));
        let mut history = HistoryStore::new();
        history.reset(None);
        history.push(a.clone());
        history.push(b.clone());
        assert!(history.undo().unwrap().ptr_eq(&a));
        assert!(history.redo().unwrap().ptr_eq(&b));
    }

    #[test]
    fn test_push_discards_future() {
        let mut history = HistoryStore::new();
        history.reset(Some(snap("base")));
        history.push(snap("a"));
        history.push(snap("b"));
        history.undo();
        history.undo();
        assert_eq!(history.future_len(), 2);

        let c = snap("c");
        history.push(c.clone());
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert!(history.current().unwrap().ptr_eq(&c));
        assert_eq!(history.past().len(), 1);
    }

    #[test]
    fn test_first_push_after_empty_reset_is_flagged_undoable() {
        let mut history = HistoryStore::new();
        history.reset(None);
        history.push(snap("only"));
        assert!(history.can_undo());
        // Nothing earlier exists, so undo degrades to a no-op.
        assert!(history.undo().is_none());
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_on_empty_future_is_noop() {
        let mut history = HistoryStore::new();
        history.reset(Some(snap("base")));
        assert!(history.redo().is_none());
        assert_eq!(history.past().len(), 0);
    }
}
