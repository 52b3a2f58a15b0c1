//! Predicate definitions for derived query filtering.

use crate::ast::field::FieldRef;
use crate::ast::operator::Connector;
use alloc::string::String;
use alloc::vec::Vec;
use finderdb_core::{Record, Value};
use hashbrown::HashSet;

/// The bound test a condition applies to its field's value.
#[derive(Clone, Debug)]
enum Test {
    Eq(Value),
    Ge(Value),
    Le(Value),
    Gt(Value),
    Lt(Value),
    Between(Value, Value),
    In(HashSet<Value>),
    StartsWith(String),
    EndsWith(String),
    Contains(String),
    NotNull,
}

/// A single bound comparison against one record field.
#[derive(Clone, Debug)]
pub struct Condition {
    field: FieldRef,
    test: Test,
}

impl Condition {
    pub fn eq(field: FieldRef, value: Value) -> Self {
        Self { field, test: Test::Eq(value) }
    }

    pub fn ge(field: FieldRef, value: Value) -> Self {
        Self { field, test: Test::Ge(value) }
    }

    pub fn le(field: FieldRef, value: Value) -> Self {
        Self { field, test: Test::Le(value) }
    }

    pub fn gt(field: FieldRef, value: Value) -> Self {
        Self { field, test: Test::Gt(value) }
    }

    pub fn lt(field: FieldRef, value: Value) -> Self {
        Self { field, test: Test::Lt(value) }
    }

    pub fn between(field: FieldRef, low: Value, high: Value) -> Self {
        Self { field, test: Test::Between(low, high) }
    }

    pub fn is_in(field: FieldRef, values: Vec<Value>) -> Self {
        Self { field, test: Test::In(values.into_iter().collect()) }
    }

    pub fn starting_with(field: FieldRef, prefix: impl Into<String>) -> Self {
        Self { field, test: Test::StartsWith(prefix.into()) }
    }

    pub fn ending_with(field: FieldRef, suffix: impl Into<String>) -> Self {
        Self { field, test: Test::EndsWith(suffix.into()) }
    }

    pub fn containing(field: FieldRef, needle: impl Into<String>) -> Self {
        Self { field, test: Test::Contains(needle.into()) }
    }

    pub fn not_null(field: FieldRef) -> Self {
        Self { field, test: Test::NotNull }
    }

    /// Returns the field this condition reads.
    pub fn field(&self) -> FieldRef {
        self.field
    }

    /// Evaluates the condition against a record.
    ///
    /// A null field value fails every test except `NotNull`.
    pub fn matches(&self, record: &Record) -> bool {
        let value = self.field.value_of(record);
        match &self.test {
            Test::NotNull => !value.is_null(),
            _ if value.is_null() => false,
            Test::Eq(other) => value == *other,
            Test::Ge(other) => value >= *other,
            Test::Le(other) => value <= *other,
            Test::Gt(other) => value > *other,
            Test::Lt(other) => value < *other,
            Test::Between(low, high) => value >= *low && value <= *high,
            Test::In(set) => set.contains(&value),
            Test::StartsWith(prefix) => {
                value.as_str().map(|s| s.starts_with(prefix.as_str())).unwrap_or(false)
            }
            Test::EndsWith(suffix) => {
                value.as_str().map(|s| s.ends_with(suffix.as_str())).unwrap_or(false)
            }
            Test::Contains(needle) => {
                value.as_str().map(|s| s.contains(needle.as_str())).unwrap_or(false)
            }
        }
    }
}

/// A fully bound filter predicate: conditions combined left-to-right.
///
/// `connectors[i]` joins `conditions[i]` with `conditions[i + 1]`. Evaluation
/// folds strictly in source order with boolean short-circuiting; `And` does
/// not bind tighter than `Or`.
#[derive(Clone, Debug)]
pub struct CompiledPredicate {
    conditions: Vec<Condition>,
    connectors: Vec<Connector>,
}

impl CompiledPredicate {
    /// Creates a predicate from conditions and the connectors joining them.
    pub fn new(conditions: Vec<Condition>, connectors: Vec<Connector>) -> Self {
        debug_assert_eq!(connectors.len(), conditions.len().saturating_sub(1));
        Self { conditions, connectors }
    }

    /// Creates a predicate that matches every record.
    pub fn always() -> Self {
        Self { conditions: Vec::new(), connectors: Vec::new() }
    }

    /// Returns true if this predicate has no conditions.
    pub fn is_always(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluates the predicate against a record.
    pub fn matches(&self, record: &Record) -> bool {
        let mut iter = self.conditions.iter();
        let mut acc = match iter.next() {
            Some(first) => first.matches(record),
            None => return true,
        };
        for (connector, condition) in self.connectors.iter().zip(iter) {
            match connector {
                Connector::And => {
                    if acc {
                        acc = condition.matches(record);
                    }
                }
                Connector::Or => {
                    if !acc {
                        acc = condition.matches(record);
                    }
                }
            }
        }
        acc
    }
}
