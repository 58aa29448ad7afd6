//! Record module - per-name statistics that outlive a single session
//!
//! The [`RecordBook`] is the one place records live. It is created with the
//! engine and only grows: a record is added the first time a name starts a
//! session and is never removed. Players hold a [`RecordHandle`] into it, so
//! every session played under the same name feeds the same totals.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Wins and points accumulated under one name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub total_wins: u32,
    pub total_score: u32,
}

impl PlayerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_win(&mut self) {
        self.total_wins = self.total_wins.saturating_add(1);
    }

    pub fn add_score(&mut self, points: u32) {
        self.total_score = self.total_score.saturating_add(points);
    }
}

/// Shared handle to a record in the book.
///
/// Cloning the handle shares the record; it never copies the totals.
#[derive(Debug, Clone, Default)]
pub struct RecordHandle(Rc<RefCell<PlayerRecord>>);

impl RecordHandle {
    pub fn new(record: PlayerRecord) -> Self {
        Self(Rc::new(RefCell::new(record)))
    }

    pub fn add_win(&self) {
        self.0.borrow_mut().add_win();
    }

    pub fn add_score(&self, points: u32) {
        self.0.borrow_mut().add_score(points);
    }

    /// Current totals.
    pub fn get(&self) -> PlayerRecord {
        *self.0.borrow()
    }

    pub fn total_wins(&self) -> u32 {
        self.get().total_wins
    }

    pub fn total_score(&self) -> u32 {
        self.get().total_score
    }

    /// Both handles point at the same record.
    pub fn same_record(&self, other: &RecordHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Name-keyed store of every record seen by this engine.
#[derive(Debug, Clone, Default)]
pub struct RecordBook {
    records: BTreeMap<String, RecordHandle>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `name`, creating an empty record on first use.
    pub fn get_or_create(&mut self, name: &str) -> RecordHandle {
        self.records
            .entry(name.to_owned())
            .or_default()
            .clone()
    }

    pub fn get(&self, name: &str) -> Option<RecordHandle> {
        self.records.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PlayerRecord)> + '_ {
        self.records.iter().map(|(name, h)| (name.as_str(), h.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counters_only_grow() {
        let mut record = PlayerRecord::new();
        record.add_score(30);
        record.add_score(20);
        record.add_win();
        assert_eq!(record.total_score, 50);
        assert_eq!(record.total_wins, 1);
    }

    #[test]
    fn test_handles_share_one_record() {
        let a = RecordHandle::default();
        let b = a.clone();
        a.add_score(40);
        b.add_win();
        assert_eq!(a.get(), PlayerRecord { total_wins: 1, total_score: 40 });
        assert!(a.same_record(&b));
    }

    #[test]
    fn test_book_creates_lazily_and_reuses() {
        let mut book = RecordBook::new();
        assert!(book.get("Ana").is_none());

        let first = book.get_or_create("Ana");
        first.add_win();
        let again = book.get_or_create("Ana");
        assert!(first.same_record(&again));
        assert_eq!(again.total_wins(), 1);
        assert_eq!(book.len(), 1);

        book.get_or_create("Budi");
        let names: Vec<&str> = book.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Ana", "Budi"]);
    }
}
