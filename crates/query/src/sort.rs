//! Sort specifications for queries and page requests.

use crate::ast::FieldRef;
use alloc::string::String;
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::Result;

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A single sort key: a field name and a direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

/// An ordered sequence of sort keys.
///
/// The empty spec is "unsorted": results keep their insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates an empty (unsorted) spec.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Creates a spec with a single ascending key.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::unsorted().and_asc(field)
    }

    /// Creates a spec with a single descending key.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::unsorted().and_desc(field)
    }

    /// Appends an ascending key.
    pub fn and_asc(mut self, field: impl Into<String>) -> Self {
        self.keys.push(SortKey {
            field: field.into(),
            order: SortOrder::Asc,
        });
        self
    }

    /// Appends a descending key.
    pub fn and_desc(mut self, field: impl Into<String>) -> Self {
        self.keys.push(SortKey {
            field: field.into(),
            order: SortOrder::Desc,
        });
        self
    }

    /// Returns the sort keys.
    #[inline]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true if this spec has at least one key.
    pub fn is_sorted(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Returns true if this spec has no keys.
    pub fn is_unsorted(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolves each key's field name against an entity.
    pub fn resolve(&self, entity: &Entity) -> Result<Vec<(FieldRef, SortOrder)>> {
        self.keys
            .iter()
            .map(|key| Ok((FieldRef::resolve(entity, &key.field)?, key.order)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finderdb_core::schema::EntityBuilder;
    use finderdb_core::DataType;

    #[test]
    fn test_unsorted() {
        let spec = SortSpec::unsorted();
        assert!(spec.is_unsorted());
        assert!(!spec.is_sorted());
    }

    #[test]
    fn test_builder_chain() {
        let spec = SortSpec::desc("id").and_asc("name");
        assert!(spec.is_sorted());
        assert_eq!(spec.keys().len(), 2);
        assert_eq!(spec.keys()[0].order, SortOrder::Desc);
        assert_eq!(spec.keys()[1].field, "name");
    }

    #[test]
    fn test_resolve() {
        let entity = EntityBuilder::new("simple")
            .unwrap()
            .add_field("name", DataType::Str)
            .unwrap()
            .add_field("age", DataType::Int)
            .unwrap()
            .build();

        let resolved = SortSpec::desc("id").and_asc("age").resolve(&entity).unwrap();
        assert_eq!(resolved[0], (FieldRef::Id, SortOrder::Desc));
        assert_eq!(resolved[1], (FieldRef::Field { index: 1 }, SortOrder::Asc));

        assert!(SortSpec::asc("height").resolve(&entity).is_err());
    }
}
