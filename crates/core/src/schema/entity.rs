//! Entity definition for the finderdb record store.
//!
//! An `Entity` is the explicit field-accessor table for one kind of record:
//! it maps field names to positional indices, and all record access goes
//! through those indices. The record identity (`id`) is implicit and is not a
//! declared field.

use super::field::Field;
use crate::error::{Error, Result};
use crate::types::DataType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// An entity definition: a named, ordered set of fields.
#[derive(Clone, Debug)]
pub struct Entity {
    /// Entity name.
    name: String,
    /// Field definitions, in declaration order.
    fields: Vec<Field>,
}

impl Entity {
    /// Creates a new entity with the given name and fields.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        let fields: Vec<Field> = fields
            .into_iter()
            .enumerate()
            .map(|(i, f)| f.with_index(i))
            .collect();

        Self {
            name: name.into(),
            fields,
        }
    }

    /// Returns the entity name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Gets a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Gets a field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    /// Gets a field by name, or an `UnknownField` error.
    pub fn require_field(&self, name: &str) -> Result<&Field> {
        self.field(name)
            .ok_or_else(|| Error::unknown_field(&self.name, name))
    }
}

/// Builder for creating entity definitions.
pub struct EntityBuilder {
    name: String,
    fields: Vec<Field>,
}

impl EntityBuilder {
    /// Creates a new entity builder.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        Ok(Self {
            name,
            fields: Vec::new(),
        })
    }

    /// Validates a name follows naming rules.
    fn check_naming_rules(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::invalid_schema("Name cannot be empty"));
        }
        let first = match name.chars().next() {
            Some(c) => c,
            None => return Err(Error::invalid_schema("Name cannot be empty")),
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(Error::invalid_schema(format!(
                "Name must start with letter or underscore: {}",
                name
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::invalid_schema(format!(
                "Name contains invalid characters: {}",
                name
            )));
        }
        Ok(())
    }

    /// Adds a field to the entity.
    pub fn add_field(mut self, name: impl Into<String>, data_type: DataType) -> Result<Self> {
        let name = name.into();
        Self::check_naming_rules(&name)?;
        if name == "id" {
            return Err(Error::invalid_schema(
                "The id field is implicit and cannot be declared",
            ));
        }
        if self.fields.iter().any(|f| f.name() == name) {
            return Err(Error::invalid_schema(format!(
                "Field already exists: {}",
                name
            )));
        }
        self.fields.push(Field::new(name, data_type));
        Ok(self)
    }

    /// Marks the named fields as nullable.
    pub fn add_nullable(mut self, fields: &[&str]) -> Self {
        for name in fields {
            if let Some(field) = self.fields.iter_mut().find(|f| f.name() == *name) {
                *field = field.clone().nullable(true);
            }
        }
        self
    }

    /// Builds the entity.
    pub fn build(self) -> Entity {
        Entity::new(self.name, self.fields)
    }
}
