//! Transaction management for the finderdb record store.
//!
//! The transaction scope is an explicit object whose lifecycle (begin,
//! commit, rollback) is owned by the caller. Mutations flow through the
//! transaction so the journal can undo them.

use crate::journal::{Journal, JournalEntry};
use crate::record_store::RecordStore;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};
use finderdb_core::{Error, Record, RecordId, Result, Value};

/// Global transaction ID counter.
static NEXT_TX_ID: AtomicU64 = AtomicU64::new(1);

/// Transaction ID type.
pub type TransactionId = u64;

/// Transaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Transaction is active and can perform operations.
    Active,
    /// Transaction has been committed.
    Committed,
    /// Transaction has been rolled back.
    RolledBack,
}

/// A caller-owned transaction scope over a record store.
pub struct Transaction {
    /// Unique transaction ID.
    id: TransactionId,
    /// Journal for tracking changes.
    journal: Journal,
    /// Current state.
    state: TransactionState,
}

impl Transaction {
    /// Begins a new transaction.
    pub fn begin() -> Self {
        Self {
            id: NEXT_TX_ID.fetch_add(1, Ordering::SeqCst),
            journal: Journal::new(),
            state: TransactionState::Active,
        }
    }

    /// Returns the transaction ID.
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the current state.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Returns true if the transaction is active.
    pub fn is_active(&self) -> bool {
        self.state == TransactionState::Active
    }

    /// Checks that the transaction is active.
    fn check_active(&self) -> Result<()> {
        if self.state != TransactionState::Active {
            return Err(Error::invalid_operation("Transaction is not active"));
        }
        Ok(())
    }

    /// Inserts a record within this transaction.
    pub fn insert(&mut self, store: &mut RecordStore, values: Vec<Value>) -> Result<RecordId> {
        self.check_active()?;

        let id = store.insert(values)?;
        self.journal.record_insert(id);
        Ok(id)
    }

    /// Updates a record within this transaction.
    pub fn update(
        &mut self,
        store: &mut RecordStore,
        id: RecordId,
        values: Vec<Value>,
    ) -> Result<()> {
        self.check_active()?;

        let before = store.require(id)?.clone();
        store.update(id, values)?;
        let after = store.require(id)?.clone();
        self.journal.record_update(before, after);
        Ok(())
    }

    /// Deletes a record within this transaction.
    pub fn delete(&mut self, store: &mut RecordStore, id: RecordId) -> Result<Record> {
        self.check_active()?;

        let record = store.delete(id)?;
        self.journal.record_delete(record.clone());
        Ok(record)
    }

    /// Deletes a batch of records within this transaction.
    ///
    /// Absent identities are ignored. Returns the number removed.
    pub fn delete_many(&mut self, store: &mut RecordStore, ids: &[RecordId]) -> Result<usize> {
        self.check_active()?;

        let mut removed = 0;
        for &id in ids {
            if store.contains(id) {
                let record = store.delete(id)?;
                self.journal.record_delete(record);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Commits the transaction, returning the journaled changes.
    pub fn commit(mut self) -> Result<Vec<JournalEntry>> {
        self.check_active()?;
        self.state = TransactionState::Committed;
        Ok(core::mem::take(&mut self.journal).commit())
    }

    /// Rolls back the transaction, undoing its changes.
    pub fn rollback(mut self, store: &mut RecordStore) -> Result<()> {
        self.check_active()?;
        self.state = TransactionState::RolledBack;
        core::mem::take(&mut self.journal).rollback(store)
    }

    /// Returns the journal entries recorded so far.
    pub fn get_changes(&self) -> &[JournalEntry] {
        self.journal.get_entries()
    }
}
