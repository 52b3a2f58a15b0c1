//! Field definition for finderdb entities.

use crate::types::DataType;
use alloc::string::String;

/// A field definition in an entity.
#[derive(Clone, Debug)]
pub struct Field {
    /// Field name.
    name: String,
    /// Data type of the field.
    data_type: DataType,
    /// Whether this field allows null values.
    nullable: bool,
    /// Field index in the entity (0-based).
    index: usize,
}

impl Field {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            index: 0,
        }
    }

    /// Sets whether this field is nullable.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the field index.
    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns whether this field is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the field index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.data_type == other.data_type
    }
}
