//! Finderdb Core - Core types and entity definitions for the finderdb record store.
//!
//! This crate provides the foundational types for finderdb:
//!
//! - `DataType`: Supported data types (Bool, Int, Str)
//! - `Value`: Runtime values that can be stored in a record field
//! - `Record`: A stored record with a unique identifier
//! - `schema`: Entity definitions (Field, Entity, EntityBuilder)
//! - `Error`: Error types for store and query operations
//!
//! # Example
//!
//! ```rust
//! use finderdb_core::{DataType, Value, Record};
//! use finderdb_core::schema::EntityBuilder;
//!
//! // Define an entity
//! let entity = EntityBuilder::new("simple")
//!     .unwrap()
//!     .add_field("name", DataType::Str)
//!     .unwrap()
//!     .add_field("age", DataType::Int)
//!     .unwrap()
//!     .build();
//!
//! // Field lookup goes through the accessor table
//! assert_eq!(entity.field_index("age"), Some(1));
//!
//! // Records hold values positionally aligned with the entity's fields
//! let record = Record::new(1, vec![
//!     Value::Str("siro".into()),
//!     Value::Int(29),
//! ]);
//!
//! assert_eq!(record.id(), 1);
//! assert_eq!(record.get(1), Some(&Value::Int(29)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
pub mod schema;
mod types;
mod value;

pub use error::{Error, Result};
pub use record::{Record, RecordId};
pub use types::DataType;
pub use value::Value;
