//! Entity definitions for the finderdb record store.

mod entity;
mod field;

pub use entity::{Entity, EntityBuilder};
pub use field::Field;
