//! Field references for query predicates and sort keys.

use finderdb_core::schema::Entity;
use finderdb_core::{DataType, Error, Record, Result, Value};

/// A resolved reference to a record field.
///
/// The record identity is not a declared entity field, so descriptors that
/// mention `Id` resolve to the dedicated `Id` variant instead of a positional
/// index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRef {
    /// The implicit record identity.
    Id,
    /// A declared field, by positional index.
    Field { index: usize },
}

impl FieldRef {
    /// Resolves a field name against an entity.
    pub fn resolve(entity: &Entity, name: &str) -> Result<Self> {
        if name == "id" {
            return Ok(FieldRef::Id);
        }
        entity
            .field_index(name)
            .map(|index| FieldRef::Field { index })
            .ok_or_else(|| Error::unknown_field(entity.name(), name))
    }

    /// Returns the data type addressed by this reference.
    pub fn data_type(&self, entity: &Entity) -> DataType {
        match self {
            FieldRef::Id => DataType::Int,
            FieldRef::Field { index } => entity.fields()[*index].data_type(),
        }
    }

    /// Reads the referenced value out of a record.
    ///
    /// The identity is materialized as an `Int`; a positional index past the
    /// record's values reads as `Null`.
    pub fn value_of(&self, record: &Record) -> Value {
        match self {
            FieldRef::Id => Value::Int(record.id() as i64),
            FieldRef::Field { index } => record.get(*index).cloned().unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use finderdb_core::schema::EntityBuilder;

    fn simple_entity() -> Entity {
        EntityBuilder::new("simple")
            .unwrap()
            .add_field("name", DataType::Str)
            .unwrap()
            .add_field("age", DataType::Int)
            .unwrap()
            .build()
    }

    #[test]
    fn test_resolve_declared_field() {
        let entity = simple_entity();
        assert_eq!(
            FieldRef::resolve(&entity, "age").unwrap(),
            FieldRef::Field { index: 1 }
        );
    }

    #[test]
    fn test_resolve_id() {
        let entity = simple_entity();
        assert_eq!(FieldRef::resolve(&entity, "id").unwrap(), FieldRef::Id);
    }

    #[test]
    fn test_resolve_unknown_field() {
        let entity = simple_entity();
        let err = FieldRef::resolve(&entity, "height").unwrap_err();
        assert_eq!(err, Error::unknown_field("simple", "height"));
    }

    #[test]
    fn test_value_of() {
        let entity = simple_entity();
        let record = Record::new(7, vec![Value::Str("siro".into()), Value::Int(29)]);

        let name = FieldRef::resolve(&entity, "name").unwrap();
        assert_eq!(name.value_of(&record), Value::Str("siro".into()));

        let id = FieldRef::resolve(&entity, "id").unwrap();
        assert_eq!(id.value_of(&record), Value::Int(7));
    }
}
