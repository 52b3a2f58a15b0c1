//! Record storage for the finderdb record store.
//!
//! This module provides the `RecordStore` struct which manages the records of
//! a single entity: identity assignment, value validation, lookups, scans,
//! and deletion.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{Error, Record, RecordId, Result, Value};
use hashbrown::HashSet;

/// In-memory record storage for one entity.
///
/// Records are keyed by identity in a BTreeMap; identities are assigned
/// monotonically from 1, so scan order is insertion order. Identities are
/// never reused after deletion.
///
/// All mutation goes through `&mut self`, so batch operations are atomic
/// with respect to readers: no shared reference can observe a partially
/// applied batch.
pub struct RecordStore {
    entity: Entity,
    records: BTreeMap<RecordId, Record>,
    next_id: RecordId,
}

impl RecordStore {
    /// Creates an empty store for an entity.
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Returns the entity this store holds records for.
    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Validates values against the entity's fields.
    fn validate(&self, values: &[Value]) -> Result<()> {
        if values.len() != self.entity.field_count() {
            return Err(Error::parameter_mismatch(
                self.entity.field_count(),
                values.len(),
            ));
        }
        for (field, value) in self.entity.fields().iter().zip(values) {
            match value.data_type() {
                None => {
                    if !field.is_nullable() {
                        return Err(Error::null_constraint(field.name()));
                    }
                }
                Some(got) => {
                    if got != field.data_type() {
                        return Err(Error::type_mismatch(field.data_type(), Some(got)));
                    }
                }
            }
        }
        Ok(())
    }

    /// Inserts a record, assigning the next identity.
    pub fn insert(&mut self, values: Vec<Value>) -> Result<RecordId> {
        self.validate(&values)?;
        let id = self.next_id;
        self.next_id += 1;
        self.records.insert(id, Record::new(id, values));
        Ok(id)
    }

    /// Gets a record by identity.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(&id)
    }

    /// Gets a record by identity, or a `NotFound` error.
    pub fn require(&self, id: RecordId) -> Result<&Record> {
        self.records
            .get(&id)
            .ok_or_else(|| Error::not_found(self.entity.name(), id))
    }

    /// Returns true if a record with this identity exists.
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    /// Replaces the values of an existing record.
    pub fn update(&mut self, id: RecordId, values: Vec<Value>) -> Result<()> {
        self.validate(&values)?;
        match self.records.get_mut(&id) {
            Some(record) => {
                record.set_values(values);
                Ok(())
            }
            None => Err(Error::not_found(self.entity.name(), id)),
        }
    }

    /// Deletes a record by identity, returning it.
    ///
    /// The identity is not reissued to later inserts.
    pub fn delete(&mut self, id: RecordId) -> Result<Record> {
        self.records
            .remove(&id)
            .ok_or_else(|| Error::not_found(self.entity.name(), id))
    }

    /// Deletes all records whose identity appears in `ids`, in one step.
    ///
    /// Absent identities are ignored. Returns the number of records removed.
    pub fn delete_many(&mut self, ids: &[RecordId]) -> usize {
        let ids: HashSet<RecordId> = ids.iter().copied().collect();
        let mut removed = 0;
        for id in ids {
            if self.records.remove(&id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Deletes every record, returning the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in identity (= insertion) order.
    pub fn scan(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Clones the stored records in identity order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.values().cloned().collect()
    }

    /// Puts a record back, keeping the identity counter ahead of it.
    /// Used by journal rollback.
    pub(crate) fn put_raw(&mut self, record: Record) {
        self.next_id = self.next_id.max(record.id() + 1);
        self.records.insert(record.id(), record);
    }

    /// Removes a record without a `NotFound` check. Used by journal rollback.
    pub(crate) fn remove_raw(&mut self, id: RecordId) {
        self.records.remove(&id);
    }
}
