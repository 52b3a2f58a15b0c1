//! Change journal for transaction rollback.
//!
//! The journal records full before-images, so rollback restores the exact
//! prior state by applying inverse operations in reverse order.

use crate::record_store::RecordStore;
use alloc::vec::Vec;
use finderdb_core::{Record, RecordId, Result};

/// A single journaled change.
#[derive(Clone, Debug)]
pub enum JournalEntry {
    /// A record was inserted.
    Insert { id: RecordId },
    /// A record was updated; `before` is the full prior record.
    Update { before: Record, after: Record },
    /// A record was deleted; `record` is the full prior record.
    Delete { record: Record },
}

/// An ordered log of changes made within one transaction.
#[derive(Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an insert.
    pub fn record_insert(&mut self, id: RecordId) {
        self.entries.push(JournalEntry::Insert { id });
    }

    /// Records an update with its before- and after-images.
    pub fn record_update(&mut self, before: Record, after: Record) {
        self.entries.push(JournalEntry::Update { before, after });
    }

    /// Records a delete with the removed record.
    pub fn record_delete(&mut self, record: Record) {
        self.entries.push(JournalEntry::Delete { record });
    }

    /// Returns the journal entries in application order.
    pub fn get_entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no changes were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the journal, returning its entries.
    pub fn commit(self) -> Vec<JournalEntry> {
        self.entries
    }

    /// Undoes every recorded change against the store, newest first.
    pub fn rollback(self, store: &mut RecordStore) -> Result<()> {
        for entry in self.entries.into_iter().rev() {
            match entry {
                JournalEntry::Insert { id } => store.remove_raw(id),
                JournalEntry::Update { before, .. } => store.put_raw(before),
                JournalEntry::Delete { record } => store.put_raw(record),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use finderdb_core::schema::EntityBuilder;
    use finderdb_core::{DataType, Value};

    fn store() -> RecordStore {
        let entity = EntityBuilder::new("simple")
            .unwrap()
            .add_field("name", DataType::Str)
            .unwrap()
            .add_field("age", DataType::Int)
            .unwrap()
            .build();
        RecordStore::new(entity)
    }

    fn values(name: &str, age: i64) -> Vec<Value> {
        vec![Value::Str(name.into()), Value::Int(age)]
    }

    #[test]
    fn test_journal_records_entries_in_order() {
        let mut journal = Journal::new();
        journal.record_insert(1);
        journal.record_delete(Record::new(2, values("sophia", 32)));

        assert_eq!(journal.len(), 2);
        assert!(matches!(journal.get_entries()[0], JournalEntry::Insert { id: 1 }));
        assert!(matches!(journal.get_entries()[1], JournalEntry::Delete { .. }));
    }

    #[test]
    fn test_rollback_undoes_insert() {
        let mut store = store();
        let mut journal = Journal::new();

        let id = store.insert(values("siro", 29)).unwrap();
        journal.record_insert(id);

        journal.rollback(&mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_rollback_undoes_delete() {
        let mut store = store();
        let mut journal = Journal::new();

        let id = store.insert(values("siro", 29)).unwrap();
        let removed = store.delete(id).unwrap();
        journal.record_delete(removed);

        journal.rollback(&mut store).unwrap();
        assert_eq!(store.require(id).unwrap().get(1), Some(&Value::Int(29)));
    }

    #[test]
    fn test_rollback_undoes_update() {
        let mut store = store();
        let mut journal = Journal::new();

        let id = store.insert(values("siro", 29)).unwrap();
        let before = store.require(id).unwrap().clone();
        store.update(id, values("siro", 30)).unwrap();
        let after = store.require(id).unwrap().clone();
        journal.record_update(before, after);

        journal.rollback(&mut store).unwrap();
        assert_eq!(store.require(id).unwrap().get(1), Some(&Value::Int(29)));
    }

    #[test]
    fn test_commit_returns_entries() {
        let mut journal = Journal::new();
        journal.record_insert(1);
        let entries = journal.commit();
        assert_eq!(entries.len(), 1);
    }
}
