//! Parser for finder-method query descriptors.
//!
//! A descriptor is a method-name-style query such as
//! `findByNameAndAgeBetween` or `findFirst2ByNameOrderByIdDesc`. Parsing
//! resolves field fragments against a target entity and produces an ordered
//! sequence of conditions, an optional result limit, and order-by keys.
//!
//! Grammar:
//!
//! ```text
//! descriptor  := verb [ ("Top" | "First") [digits] ] "By" predicate [ order ]
//! verb        := "find" | "get" | "read" | "query" | "search" | "stream"
//! predicate   := condition (("And" | "Or") condition)*
//! condition   := Field ["Is"] [keyword]
//! order       := "OrderBy" (Field ["Asc" | "Desc"])+
//! ```
//!
//! Field fragments are the entity's field names with the first letter
//! upper-cased; matching is longest-first and otherwise case-sensitive. `Id`
//! resolves to the implicit record identity.

use crate::ast::{Connector, FieldRef, Operator};
use crate::sort::SortOrder;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use finderdb_core::schema::Entity;
use finderdb_core::{Error, Result};

/// Finder verbs. All verbs are synonyms.
const VERBS: &[&str] = &["find", "get", "read", "query", "search", "stream"];

/// Operator keywords, longest first within shared prefixes.
const KEYWORDS: &[(&str, Operator)] = &[
    ("GreaterThanEqual", Operator::GreaterThanEqual),
    ("GreaterThan", Operator::GreaterThan),
    ("LessThanEqual", Operator::LessThanEqual),
    ("LessThan", Operator::LessThan),
    ("StartingWith", Operator::StartingWith),
    ("EndingWith", Operator::EndingWith),
    ("Containing", Operator::Containing),
    ("NotNull", Operator::IsNotNull),
    ("Between", Operator::Between),
    ("Before", Operator::LessThan),
    ("After", Operator::GreaterThan),
    ("In", Operator::In),
];

/// One parsed condition: a resolved field, an operator, and the connector
/// joining it to the preceding condition (None for the first).
#[derive(Clone, Debug)]
pub struct ConditionSpec {
    pub field: String,
    pub field_ref: FieldRef,
    pub operator: Operator,
    pub connector: Option<Connector>,
}

/// A parsed query descriptor.
#[derive(Clone, Debug)]
pub struct QueryDescriptor {
    conditions: Vec<ConditionSpec>,
    limit: Option<usize>,
    order_by: Vec<(FieldRef, SortOrder)>,
}

impl QueryDescriptor {
    /// Parses a descriptor string against an entity.
    pub fn parse(entity: &Entity, input: &str) -> Result<Self> {
        Parser::new(entity, input).parse()
    }

    /// Returns the parsed conditions in source order.
    #[inline]
    pub fn conditions(&self) -> &[ConditionSpec] {
        &self.conditions
    }

    /// Returns the Top/First result limit, if any.
    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the order-by keys.
    #[inline]
    pub fn order_by(&self) -> &[(FieldRef, SortOrder)] {
        &self.order_by
    }

    /// Number of bound arguments this descriptor expects.
    pub fn parameter_count(&self) -> usize {
        self.conditions.iter().map(|c| c.operator.arity()).sum()
    }
}

struct Parser<'a> {
    entity: &'a Entity,
    input: &'a str,
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn new(entity: &'a Entity, input: &'a str) -> Self {
        Self {
            entity,
            input,
            rest: input,
        }
    }

    fn parse(mut self) -> Result<QueryDescriptor> {
        self.parse_verb()?;
        let limit = self.parse_limit()?;
        if !self.consume("By") {
            return Err(Error::parse(self.remaining_fragment()));
        }

        let mut conditions = Vec::new();
        let mut order_by = Vec::new();

        if self.consume("OrderBy") {
            self.parse_order_clause(&mut order_by)?;
        } else {
            let mut connector: Option<Connector> = None;
            loop {
                let (field, field_ref) = self.parse_field()?;
                let operator = self.parse_operator();
                conditions.push(ConditionSpec {
                    field,
                    field_ref,
                    operator,
                    connector,
                });

                if self.rest.is_empty() {
                    break;
                }
                if self.consume("OrderBy") {
                    self.parse_order_clause(&mut order_by)?;
                    break;
                }
                if self.consume("And") {
                    connector = Some(Connector::And);
                } else if self.consume("Or") {
                    connector = Some(Connector::Or);
                } else {
                    return Err(Error::parse(self.rest));
                }
            }
        }

        Ok(QueryDescriptor {
            conditions,
            limit,
            order_by,
        })
    }

    fn parse_verb(&mut self) -> Result<()> {
        for verb in VERBS {
            if self.consume(verb) {
                return Ok(());
            }
        }
        Err(Error::parse(self.remaining_fragment()))
    }

    fn parse_limit(&mut self) -> Result<Option<usize>> {
        if !self.consume("Top") && !self.consume("First") {
            return Ok(None);
        }
        let digits: &str = {
            let end = self
                .rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(self.rest.len());
            &self.rest[..end]
        };
        if digits.is_empty() {
            // Top/First without a count limits to a single result
            return Ok(Some(1));
        }
        let count: usize = digits
            .parse()
            .map_err(|_| Error::parse(digits.to_string()))?;
        self.advance(digits.len());
        Ok(Some(count))
    }

    /// Longest-match resolution of a field fragment, including the implicit
    /// `Id`.
    fn parse_field(&mut self) -> Result<(String, FieldRef)> {
        if self.rest.is_empty() {
            return Err(Error::parse(self.input));
        }

        let mut best: Option<(&str, FieldRef)> = None;
        let mut best_len = 0;
        for field in self.entity.fields() {
            let name = field.name();
            if name.len() > best_len && self.starts_with_fragment(name) {
                best = Some((name, FieldRef::Field {
                    index: field.index(),
                }));
                best_len = name.len();
            }
        }
        if best_len < 2 && self.rest.starts_with("Id") {
            best = Some(("id", FieldRef::Id));
            best_len = 2;
        }

        match best {
            Some((name, field_ref)) => {
                self.advance(best_len);
                Ok((name.to_string(), field_ref))
            }
            None => Err(Error::unknown_field(
                self.entity.name(),
                decapitalize(self.leading_fragment()),
            )),
        }
    }

    /// Checks whether `rest` starts with the descriptor fragment of a field
    /// name (first letter upper-cased, remainder case-sensitive).
    fn starts_with_fragment(&self, field_name: &str) -> bool {
        let mut field_chars = field_name.chars();
        let mut rest_chars = self.rest.chars();
        match (field_chars.next(), rest_chars.next()) {
            (Some(f), Some(r)) if f.to_ascii_uppercase() == r => {}
            _ => return false,
        }
        self.rest[1..].starts_with(field_chars.as_str())
    }

    fn parse_operator(&mut self) -> Operator {
        if self.rest.starts_with("Is") {
            let saved = self.rest;
            self.advance(2);
            if let Some(op) = self.try_keyword() {
                return op;
            }
            // A bare `Is` reads as Equals when a connector, an order clause,
            // or the end of the descriptor follows.
            if self.rest.is_empty()
                || self.rest.starts_with("And")
                || self.rest.starts_with("Or")
            {
                return Operator::Equals;
            }
            self.rest = saved;
            return Operator::Equals;
        }
        self.try_keyword().unwrap_or(Operator::Equals)
    }

    fn try_keyword(&mut self) -> Option<Operator> {
        for (keyword, operator) in KEYWORDS {
            if self.rest.starts_with(keyword) {
                self.advance(keyword.len());
                return Some(*operator);
            }
        }
        None
    }

    fn parse_order_clause(&mut self, order_by: &mut Vec<(FieldRef, SortOrder)>) -> Result<()> {
        if self.rest.is_empty() {
            return Err(Error::parse("OrderBy"));
        }
        while !self.rest.is_empty() {
            let (_, field_ref) = self.parse_field()?;
            let order = if self.consume("Desc") {
                SortOrder::Desc
            } else {
                // omitted direction reads as ascending
                self.consume("Asc");
                SortOrder::Asc
            };
            order_by.push((field_ref, order));
        }
        Ok(())
    }

    fn consume(&mut self, token: &str) -> bool {
        if self.rest.starts_with(token) {
            self.advance(token.len());
            true
        } else {
            false
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.rest = &self.rest[bytes..];
    }

    /// The leading camel-hump of `rest`: one character plus the following
    /// non-uppercase run. Used for error reporting.
    fn leading_fragment(&self) -> &str {
        let mut indices = self.rest.char_indices();
        let _ = indices.next();
        for (i, c) in indices {
            if c.is_ascii_uppercase() {
                return &self.rest[..i];
            }
        }
        self.rest
    }

    fn remaining_fragment(&self) -> &str {
        if self.rest.is_empty() {
            self.input
        } else {
            self.rest
        }
    }
}

fn decapitalize(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}
