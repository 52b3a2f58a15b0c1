//! AST module for derived query predicates.

mod field;
mod operator;
mod predicate;

pub use field::FieldRef;
pub use operator::{Connector, Operator};
pub use predicate::{CompiledPredicate, Condition};
