//! Field descriptors and query values.
//!
//! # Responsibility
//! - Describe entity columns with their semantic type.
//! - Provide the value type carried by predicates and bind parameters.
//!
//! # Invariants
//! - A `Field` is identified by `(entity, name)`; `kind` never changes.
//! - Descriptors are `'static` constants owned by the entity types.

use crate::predicate::Predicate;
use crate::query::{Order, SortDirection};
use std::fmt::{Display, Formatter};

/// Semantic type of an entity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Text,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "text",
        }
    }
}

/// Typed handle to one column of one entity.
///
/// Hand-written replacement for generated query metamodel paths:
/// `Person::NAME.eq("NAME")` instead of a reflected property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub entity: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn integer(entity: &'static str, name: &'static str) -> Self {
        Self {
            entity,
            name,
            kind: FieldKind::Integer,
        }
    }

    pub const fn text(entity: &'static str, name: &'static str) -> Self {
        Self {
            entity,
            name,
            kind: FieldKind::Text,
        }
    }

    /// Equality condition against this field.
    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        Predicate::Equals {
            field: self,
            value: value.into(),
        }
    }

    /// `LIKE` condition against this field. The pattern is used verbatim.
    pub fn like(self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            field: self,
            pattern: pattern.into(),
        }
    }

    pub fn asc(self) -> Order {
        Order {
            field: self,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(self) -> Order {
        Order {
            field: self,
            direction: SortDirection::Desc,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.entity, self.name)
    }
}

/// Scalar value compared against a field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
}

impl Value {
    /// Returns the field kind this value can be compared with, or `None` for `Null`.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Text(_) => Some(FieldKind::Text),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Entity type descriptor consumed by query drivers.
///
/// # Invariants
/// - `FIELDS` lists every queryable column, and each entry has
///   `entity == TABLE`.
/// - `value_of` returns `None` only for fields not in `FIELDS`.
pub trait Entity: Clone {
    const TABLE: &'static str;
    const FIELDS: &'static [Field];

    fn value_of(&self, field: &Field) -> Option<Value>;

    /// Drops lazily-owned relations when a query did not ask for join-fetch.
    fn without_relations(self) -> Self {
        self
    }

    fn has_field(field: &Field) -> bool {
        Self::FIELDS.contains(field)
    }
}
