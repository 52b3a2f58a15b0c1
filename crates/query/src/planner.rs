//! Query planning: binding arguments to a parsed descriptor.
//!
//! The planner turns a `QueryDescriptor` plus positional arguments into an
//! executable `QueryPlan`: a compiled predicate, resolved order-by keys, and
//! an optional result limit.

use crate::ast::{CompiledPredicate, Condition, FieldRef, Operator};
use crate::descriptor::{ConditionSpec, QueryDescriptor};
use crate::sort::SortOrder;
use alloc::string::String;
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{DataType, Error, Result, Value};

/// A positional argument bound to a descriptor placeholder.
///
/// `In` placeholders bind a `List`; every other operator binds a scalar
/// `Value`. Lists are a binding-time concept only and are never stored in a
/// record field.
#[derive(Clone, Debug)]
pub enum Arg {
    Value(Value),
    List(Vec<Value>),
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Value(Value::Int(value))
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Arg::Value(Value::Bool(value))
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Value(Value::Str(value.into()))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Value(Value::Str(value))
    }
}

impl From<Vec<Value>> for Arg {
    fn from(values: Vec<Value>) -> Self {
        Arg::List(values)
    }
}

/// An executable query plan: filter, order, limit.
#[derive(Clone, Debug)]
pub struct QueryPlan {
    predicate: CompiledPredicate,
    order_by: Vec<(FieldRef, SortOrder)>,
    limit: Option<usize>,
}

impl QueryPlan {
    /// Creates a plan from its parts.
    pub fn new(
        predicate: CompiledPredicate,
        order_by: Vec<(FieldRef, SortOrder)>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            predicate,
            order_by,
            limit,
        }
    }

    /// A plan that matches everything, unordered and unlimited.
    pub fn scan_all() -> Self {
        Self::new(CompiledPredicate::always(), Vec::new(), None)
    }

    /// Returns the filter predicate.
    #[inline]
    pub fn predicate(&self) -> &CompiledPredicate {
        &self.predicate
    }

    /// Returns the order-by keys.
    #[inline]
    pub fn order_by(&self) -> &[(FieldRef, SortOrder)] {
        &self.order_by
    }

    /// Returns the result limit.
    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Appends sort keys as tie-breakers after the plan's own keys.
    pub fn with_appended_sort(mut self, keys: Vec<(FieldRef, SortOrder)>) -> Self {
        self.order_by.extend(keys);
        self
    }
}

/// Builds executable plans for one entity.
pub struct QueryPlanner<'a> {
    entity: &'a Entity,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner for an entity.
    pub fn new(entity: &'a Entity) -> Self {
        Self { entity }
    }

    /// Binds positional arguments to a parsed descriptor.
    ///
    /// Arguments are consumed in condition order; `Between` consumes two,
    /// `In` consumes one list, `IsNotNull` none, everything else one scalar.
    pub fn plan(&self, descriptor: &QueryDescriptor, args: Vec<Arg>) -> Result<QueryPlan> {
        let expected = descriptor.parameter_count();
        if args.len() != expected {
            return Err(Error::parameter_mismatch(expected, args.len()));
        }

        let mut conditions = Vec::with_capacity(descriptor.conditions().len());
        let mut connectors = Vec::new();
        let mut args = args.into_iter();

        for spec in descriptor.conditions() {
            let condition = self.bind_condition(spec, &mut args)?;
            if let Some(connector) = spec.connector {
                connectors.push(connector);
            }
            conditions.push(condition);
        }

        Ok(QueryPlan::new(
            CompiledPredicate::new(conditions, connectors),
            descriptor.order_by().to_vec(),
            descriptor.limit(),
        ))
    }

    fn bind_condition(
        &self,
        spec: &ConditionSpec,
        args: &mut impl Iterator<Item = Arg>,
    ) -> Result<Condition> {
        let field = spec.field_ref;
        let data_type = field.data_type(self.entity);

        if spec.operator.is_text() && !data_type.is_text() {
            return Err(Error::type_mismatch(DataType::Str, Some(data_type)));
        }
        if spec.operator.is_range() && !data_type.is_ordered() {
            return Err(Error::type_mismatch(DataType::Int, Some(data_type)));
        }

        match spec.operator {
            Operator::IsNotNull => Ok(Condition::not_null(field)),
            Operator::Between => {
                let low = self.scalar(args, data_type)?;
                let high = self.scalar(args, data_type)?;
                Ok(Condition::between(field, low, high))
            }
            Operator::In => {
                let values = self.list(args, data_type)?;
                Ok(Condition::is_in(field, values))
            }
            Operator::Equals => Ok(Condition::eq(field, self.scalar(args, data_type)?)),
            Operator::GreaterThanEqual => Ok(Condition::ge(field, self.scalar(args, data_type)?)),
            Operator::LessThanEqual => Ok(Condition::le(field, self.scalar(args, data_type)?)),
            Operator::GreaterThan => Ok(Condition::gt(field, self.scalar(args, data_type)?)),
            Operator::LessThan => Ok(Condition::lt(field, self.scalar(args, data_type)?)),
            Operator::StartingWith => {
                Ok(Condition::starting_with(field, self.text(args)?))
            }
            Operator::EndingWith => Ok(Condition::ending_with(field, self.text(args)?)),
            Operator::Containing => Ok(Condition::containing(field, self.text(args)?)),
        }
    }

    /// Pulls one scalar argument and checks it against the field's type.
    fn scalar(
        &self,
        args: &mut impl Iterator<Item = Arg>,
        expected: DataType,
    ) -> Result<Value> {
        match args.next() {
            Some(Arg::Value(value)) => {
                match value.data_type() {
                    Some(got) if got != expected => Err(Error::type_mismatch(expected, Some(got))),
                    _ => Ok(value),
                }
            }
            Some(Arg::List(_)) => Err(Error::type_mismatch(expected, None)),
            // arity was checked up front
            None => Err(Error::parameter_mismatch(1, 0)),
        }
    }

    /// Pulls one list argument and checks its elements against the field's type.
    fn list(
        &self,
        args: &mut impl Iterator<Item = Arg>,
        expected: DataType,
    ) -> Result<Vec<Value>> {
        match args.next() {
            Some(Arg::List(values)) => {
                for value in &values {
                    if let Some(got) = value.data_type() {
                        if got != expected {
                            return Err(Error::type_mismatch(expected, Some(got)));
                        }
                    }
                }
                Ok(values)
            }
            Some(Arg::Value(_)) => Err(Error::type_mismatch(expected, None)),
            None => Err(Error::parameter_mismatch(1, 0)),
        }
    }

    /// Pulls one scalar argument that must be a string.
    fn text(&self, args: &mut impl Iterator<Item = Arg>) -> Result<String> {
        match self.scalar(args, DataType::Str)? {
            Value::Str(s) => Ok(s),
            other => Err(Error::type_mismatch(DataType::Str, other.data_type())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::QueryDescriptor;
    use alloc::vec;
    use finderdb_core::schema::EntityBuilder;
    use finderdb_core::Record;

    fn simple_entity() -> Entity {
        EntityBuilder::new("simple")
            .unwrap()
            .add_field("name", DataType::Str)
            .unwrap()
            .add_field("age", DataType::Int)
            .unwrap()
            .build()
    }

    fn person(id: u64, name: &str, age: i64) -> Record {
        Record::new(id, vec![Value::Str(name.into()), Value::Int(age)])
    }

    fn plan(descriptor: &str, args: Vec<Arg>) -> Result<QueryPlan> {
        let entity = simple_entity();
        let descriptor = QueryDescriptor::parse(&entity, descriptor)?;
        QueryPlanner::new(&entity).plan(&descriptor, args)
    }

    #[test]
    fn test_plan_name_and_age() {
        let plan = plan("findByNameAndAge", vec!["siro".into(), 77.into()]).unwrap();
        assert!(plan.predicate().matches(&person(6, "siro", 77)));
        assert!(!plan.predicate().matches(&person(1, "siro", 29)));
    }

    #[test]
    fn test_plan_between() {
        let plan = plan("findByAgeBetween", vec![20.into(), 30.into()]).unwrap();
        assert!(plan.predicate().matches(&person(1, "siro", 29)));
        assert!(plan.predicate().matches(&person(3, "dennis", 25)));
        assert!(!plan.predicate().matches(&person(2, "sophia", 32)));
    }

    #[test]
    fn test_plan_in_list() {
        let args = vec![Arg::List(vec![
            Value::Int(29),
            Value::Int(32),
            Value::Int(25),
        ])];
        let plan = plan("findByAgeIn", args).unwrap();
        assert!(plan.predicate().matches(&person(1, "siro", 29)));
        assert!(!plan.predicate().matches(&person(4, "james", 41)));
    }

    #[test]
    fn test_plan_not_null_takes_no_args() {
        let plan = plan("findByIdIsNotNull", vec![]).unwrap();
        assert!(plan.predicate().matches(&person(1, "siro", 29)));
    }

    #[test]
    fn test_plan_too_few_arguments() {
        let err = plan("findByAgeBetween", vec![20.into()]).unwrap_err();
        assert_eq!(err, Error::parameter_mismatch(2, 1));
    }

    #[test]
    fn test_plan_too_many_arguments() {
        let err = plan("findByName", vec!["siro".into(), 77.into()]).unwrap_err();
        assert_eq!(err, Error::parameter_mismatch(1, 2));
    }

    #[test]
    fn test_plan_scalar_where_list_expected() {
        let err = plan("findByAgeIn", vec![29.into()]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_plan_list_where_scalar_expected() {
        let err = plan("findByAge", vec![Arg::List(vec![Value::Int(29)])]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_plan_wrong_argument_type() {
        let err = plan("findByAge", vec!["siro".into()]).unwrap_err();
        assert_eq!(
            err,
            Error::type_mismatch(DataType::Int, Some(DataType::Str))
        );
    }

    #[test]
    fn test_plan_text_operator_on_int_field() {
        let err = plan("findByAgeContaining", vec!["si".into()]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_plan_carries_limit_and_order() {
        let plan = plan("findTop2ByNameOrderByIdDesc", vec!["siro".into()]).unwrap();
        assert_eq!(plan.limit(), Some(2));
        assert_eq!(plan.order_by(), &[(FieldRef::Id, SortOrder::Desc)]);
    }
}
