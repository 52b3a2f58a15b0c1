//! Example-based querying.
//!
//! An `Example` is a probe value set plus a `Matcher` describing how each
//! field is compared. The matcher is plain data - a map of per-field
//! comparators and a set of ignored fields - evaluated directly against
//! records by compiling down to the query crate's predicate form.

use alloc::string::String;
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{DataType, Error, Result, Value};
use finderdb_query::ast::{CompiledPredicate, Condition, Connector, FieldRef};
use hashbrown::{HashMap, HashSet};

/// How a probe field is compared against record values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Comparator {
    /// Exact equality.
    #[default]
    Exact,
    /// Substring match (text fields only).
    Contains,
    /// Prefix match (text fields only).
    StartsWith,
    /// Suffix match (text fields only).
    EndsWith,
}

/// Per-field matching rules for an example.
#[derive(Clone, Debug, Default)]
pub struct Matcher {
    comparators: HashMap<String, Comparator>,
    ignored: HashSet<String>,
}

impl Matcher {
    /// Creates a matcher with default (exact) matching for every field.
    pub fn matching() -> Self {
        Self::default()
    }

    /// Sets the comparator for a field.
    pub fn with_matcher(mut self, field: impl Into<String>, comparator: Comparator) -> Self {
        self.comparators.insert(field.into(), comparator);
        self
    }

    /// Excludes fields from matching entirely.
    pub fn with_ignore_paths(mut self, fields: &[&str]) -> Self {
        for field in fields {
            self.ignored.insert(String::from(*field));
        }
        self
    }

    fn comparator_for(&self, field: &str) -> Comparator {
        self.comparators.get(field).copied().unwrap_or_default()
    }

    fn is_ignored(&self, field: &str) -> bool {
        self.ignored.contains(field)
    }

    /// Validates that every configured field name exists on the entity.
    fn validate(&self, entity: &Entity) -> Result<()> {
        for field in self.comparators.keys().chain(self.ignored.iter()) {
            entity.require_field(field)?;
        }
        Ok(())
    }
}

/// A query-by-example probe: values positionally aligned with the entity's
/// fields, plus the matcher to apply them with.
#[derive(Clone, Debug)]
pub struct Example {
    probe: Vec<Value>,
    matcher: Matcher,
}

impl Example {
    /// Creates an example with exact matching for every probe field.
    pub fn of(probe: Vec<Value>) -> Self {
        Self {
            probe,
            matcher: Matcher::matching(),
        }
    }

    /// Attaches a matcher to this example.
    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Compiles the example to a predicate over the entity's records.
    ///
    /// Ignored fields and null probe fields contribute no condition; the
    /// remaining conditions are joined with `And`. An example with no
    /// effective conditions matches every record.
    pub fn to_predicate(&self, entity: &Entity) -> Result<CompiledPredicate> {
        if self.probe.len() != entity.field_count() {
            return Err(Error::parameter_mismatch(
                entity.field_count(),
                self.probe.len(),
            ));
        }
        self.matcher.validate(entity)?;

        let mut conditions = Vec::new();
        for (field, value) in entity.fields().iter().zip(&self.probe) {
            if self.matcher.is_ignored(field.name()) || value.is_null() {
                continue;
            }

            let field_ref = FieldRef::Field {
                index: field.index(),
            };
            let condition = match self.matcher.comparator_for(field.name()) {
                Comparator::Exact => Condition::eq(field_ref, value.clone()),
                comparator => {
                    if !field.data_type().is_text() {
                        return Err(Error::type_mismatch(
                            DataType::Str,
                            Some(field.data_type()),
                        ));
                    }
                    let needle = match value {
                        Value::Str(s) => s.clone(),
                        other => {
                            return Err(Error::type_mismatch(DataType::Str, other.data_type()))
                        }
                    };
                    match comparator {
                        Comparator::Contains => Condition::containing(field_ref, needle),
                        Comparator::StartsWith => Condition::starting_with(field_ref, needle),
                        Comparator::EndsWith => Condition::ending_with(field_ref, needle),
                        Comparator::Exact => Condition::eq(field_ref, value.clone()),
                    }
                }
            };
            conditions.push(condition);
        }

        let connectors = alloc::vec![Connector::And; conditions.len().saturating_sub(1)];
        Ok(CompiledPredicate::new(conditions, connectors))
    }
}
