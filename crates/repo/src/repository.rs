//! The repository facade.
//!
//! A `Repository` owns one entity's record store and exposes the operations
//! the derived-query surface is built from: saves, lookups by identity,
//! sorted and paged scans, derived finder queries, example queries, counts,
//! and deletes.

use crate::example::Example;
use alloc::boxed::Box;
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{Record, RecordId, Result, Value};
use finderdb_query::descriptor::QueryDescriptor;
use finderdb_query::executor::QueryRunner;
use finderdb_query::page::{Page, PageRequest};
use finderdb_query::planner::{Arg, QueryPlan, QueryPlanner};
use finderdb_query::sort::SortSpec;
use finderdb_query::trace::TraceSink;
use finderdb_storage::{RecordStore, Transaction};
use hashbrown::HashSet;

/// A repository over one entity.
pub struct Repository {
    store: RecordStore,
    trace: Option<Box<dyn TraceSink>>,
}

impl Repository {
    /// Creates an empty repository for an entity.
    pub fn new(entity: Entity) -> Self {
        Self {
            store: RecordStore::new(entity),
            trace: None,
        }
    }

    /// Attaches a trace sink to query execution.
    pub fn with_trace(mut self, trace: Box<dyn TraceSink>) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Returns the entity definition.
    pub fn entity(&self) -> &Entity {
        self.store.entity()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Returns the underlying store mutably, for caller-owned transactions.
    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    fn runner(&self) -> QueryRunner<'_> {
        let runner = QueryRunner::new(self.store.entity());
        match &self.trace {
            Some(trace) => runner.with_trace(trace.as_ref()),
            None => runner,
        }
    }

    // ---- saves ----

    /// Inserts a record and returns it with its assigned identity.
    pub fn save(&mut self, values: Vec<Value>) -> Result<Record> {
        let id = self.store.insert(values)?;
        Ok(self.store.require(id)?.clone())
    }

    /// Inserts a batch of records in one transactional step.
    ///
    /// If any row fails validation, no row is kept.
    pub fn save_all(&mut self, rows: Vec<Vec<Value>>) -> Result<Vec<Record>> {
        let mut tx = Transaction::begin();
        let mut ids = Vec::with_capacity(rows.len());
        for values in rows {
            match tx.insert(&mut self.store, values) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    tx.rollback(&mut self.store)?;
                    return Err(err);
                }
            }
        }
        tx.commit()?;
        ids.into_iter()
            .map(|id| Ok(self.store.require(id)?.clone()))
            .collect()
    }

    /// Replaces an existing record's values, returning the updated record.
    pub fn update(&mut self, id: RecordId, values: Vec<Value>) -> Result<Record> {
        self.store.update(id, values)?;
        Ok(self.store.require(id)?.clone())
    }

    // ---- lookups ----

    /// Finds a record by identity.
    pub fn find_by_id(&self, id: RecordId) -> Result<Record> {
        Ok(self.store.require(id)?.clone())
    }

    /// Returns all records in insertion order.
    pub fn find_all(&self) -> Vec<Record> {
        self.store.snapshot()
    }

    /// Returns all records under a sort.
    pub fn find_all_sorted(&self, sort: &SortSpec) -> Result<Vec<Record>> {
        let keys = sort.resolve(self.store.entity())?;
        let plan = QueryPlan::scan_all().with_appended_sort(keys);
        Ok(self.runner().run(&plan, self.store.snapshot()))
    }

    /// Returns the records whose identity appears in `ids`, in insertion
    /// order. Absent identities are skipped.
    pub fn find_all_by_id(&self, ids: &[RecordId]) -> Vec<Record> {
        let ids: HashSet<RecordId> = ids.iter().copied().collect();
        self.store
            .scan()
            .filter(|record| ids.contains(&record.id()))
            .cloned()
            .collect()
    }

    /// Returns one page of all records.
    pub fn find_all_paged(&self, request: &PageRequest) -> Result<Page<Record>> {
        self.runner()
            .run_page(&QueryPlan::scan_all(), self.store.snapshot(), request)
    }

    // ---- derived queries ----

    /// Runs a derived finder query, e.g.
    /// `find_by("findByNameAndAge", vec!["siro".into(), 77.into()])`.
    pub fn find_by(&self, descriptor: &str, args: Vec<Arg>) -> Result<Vec<Record>> {
        let plan = self.plan(descriptor, args)?;
        Ok(self.runner().run(&plan, self.store.snapshot()))
    }

    /// Runs a derived finder query expected to match at most one record.
    pub fn find_one_by(&self, descriptor: &str, args: Vec<Arg>) -> Result<Option<Record>> {
        Ok(self.find_by(descriptor, args)?.into_iter().next())
    }

    /// Runs a derived finder query and slices one page of its result.
    pub fn find_by_paged(
        &self,
        descriptor: &str,
        args: Vec<Arg>,
        request: &PageRequest,
    ) -> Result<Page<Record>> {
        let plan = self.plan(descriptor, args)?;
        self.runner()
            .run_page(&plan, self.store.snapshot(), request)
    }

    /// Finds all records matching an example probe.
    pub fn find_by_example(&self, example: &Example) -> Result<Vec<Record>> {
        let predicate = example.to_predicate(self.store.entity())?;
        let plan = QueryPlan::new(predicate, Vec::new(), None);
        Ok(self.runner().run(&plan, self.store.snapshot()))
    }

    fn plan(&self, descriptor: &str, args: Vec<Arg>) -> Result<QueryPlan> {
        let entity = self.store.entity();
        let descriptor = QueryDescriptor::parse(entity, descriptor)?;
        QueryPlanner::new(entity).plan(&descriptor, args)
    }

    // ---- counts ----

    /// Returns true if a record with this identity exists.
    pub fn exists_by_id(&self, id: RecordId) -> bool {
        self.store.contains(id)
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    // ---- deletes ----

    /// Deletes a record by identity.
    pub fn delete_by_id(&mut self, id: RecordId) -> Result<()> {
        self.store.delete(id).map(|_| ())
    }

    /// Deletes the records whose identity appears in `ids`, in one step.
    /// Absent identities are ignored. Returns the number removed.
    pub fn delete_all_by_id(&mut self, ids: &[RecordId]) -> usize {
        self.store.delete_many(ids)
    }

    /// Deletes every record, returning the number removed.
    pub fn delete_all(&mut self) -> usize {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use finderdb_core::schema::EntityBuilder;
    use finderdb_core::DataType;

    fn repository() -> Repository {
        let entity = EntityBuilder::new("simple")
            .unwrap()
            .add_field("name", DataType::Str)
            .unwrap()
            .add_field("age", DataType::Int)
            .unwrap()
            .build();
        Repository::new(entity)
    }

    fn values(name: &str, age: i64) -> Vec<Value> {
        vec![Value::Str(name.into()), Value::Int(age)]
    }

    #[test]
    fn test_save_assigns_identity() {
        let mut repo = repository();
        let record = repo.save(values("siro", 29)).unwrap();
        assert_eq!(record.id(), 1);
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_save_all_is_atomic() {
        let mut repo = repository();
        let rows = vec![
            values("siro", 29),
            vec![Value::Int(1), Value::Int(2)], // wrong type for name
        ];
        assert!(repo.save_all(rows).is_err());
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_update_existing() {
        let mut repo = repository();
        let record = repo.save(values("siro", 29)).unwrap();
        let updated = repo.update(record.id(), values("siro", 30)).unwrap();
        assert_eq!(updated.id(), record.id());
        assert_eq!(updated.get(1), Some(&Value::Int(30)));
    }

    #[test]
    fn test_find_one_by() {
        let mut repo = repository();
        repo.save(values("siro", 29)).unwrap();
        repo.save(values("sophia", 32)).unwrap();

        let found = repo
            .find_one_by("findByName", vec!["sophia".into()])
            .unwrap();
        assert_eq!(found.unwrap().id(), 2);

        let missing = repo.find_one_by("findByName", vec!["nobody".into()]).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_find_all_by_id_skips_absent() {
        let mut repo = repository();
        repo.save(values("siro", 29)).unwrap();
        repo.save(values("sophia", 32)).unwrap();

        let found = repo.find_all_by_id(&[1, 99]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), 1);
    }
}
