//! Predicate expression tree and composition.
//!
//! # Responsibility
//! - Represent selection criteria as an explicit tree that drivers can
//!   evaluate (`eval`) or translate (`sql`).
//! - Compose fragments with AND/OR while treating `True` as "no condition".
//!
//! # Invariants
//! - Composition never fails and never produces nested groups of the same kind.
//! - Neutral fragments are dropped from groups; an empty group is `True`.
//! - Predicates are immutable values and are `Send + Sync`.

use crate::model::field::{Entity, Field, FieldKind, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod address;
pub mod builders;
pub mod eval;
pub mod pattern;
pub mod person;
pub mod sql;

pub use builders::{text_equals, text_like};
pub use pattern::{has_text, like, like_with, WILDCARD_MULTIPLE_CHARS};

/// Boolean condition over an entity's fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Predicate {
    /// Neutral fragment: matches every record.
    #[default]
    True,
    Equals {
        field: Field,
        value: Value,
    },
    /// SQL `LIKE` semantics: `%` for any run, `_` for one character.
    Like {
        field: Field,
        pattern: String,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// `True` or an empty group; both select every record.
    pub fn is_neutral(&self) -> bool {
        match self {
            Self::True => true,
            Self::And(parts) | Self::Or(parts) => parts.is_empty(),
            _ => false,
        }
    }

    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Predicate) -> Predicate {
        Self::all([self, other])
    }

    /// Disjunction of `self` and `other`.
    ///
    /// A neutral side is skipped like in `and`, so an omitted filter never
    /// widens the result to everything.
    pub fn or(self, other: Predicate) -> Predicate {
        Self::any([self, other])
    }

    /// ANDs every fragment; returns `True` when nothing remains.
    pub fn all(fragments: impl IntoIterator<Item = Predicate>) -> Predicate {
        let mut parts = Vec::new();
        for fragment in fragments {
            match fragment {
                fragment if fragment.is_neutral() => {}
                Self::And(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        collapse(parts, Self::And)
    }

    /// ORs every fragment; returns `True` when nothing remains.
    pub fn any(fragments: impl IntoIterator<Item = Predicate>) -> Predicate {
        let mut parts = Vec::new();
        for fragment in fragments {
            match fragment {
                fragment if fragment.is_neutral() => {}
                Self::Or(inner) => parts.extend(inner),
                other => parts.push(other),
            }
        }
        collapse(parts, Self::Or)
    }

    /// Checks every referenced field belongs to `E` and every value fits its
    /// field kind.
    pub fn validate_for<E: Entity>(&self) -> Result<(), PredicateError> {
        match self {
            Self::True => Ok(()),
            Self::Equals { field, value } => {
                check_field::<E>(field)?;
                match value.kind() {
                    Some(kind) if kind != field.kind => Err(PredicateError::TypeMismatch {
                        field: *field,
                        found: value.type_name(),
                    }),
                    _ => Ok(()),
                }
            }
            Self::Like { field, .. } => {
                check_field::<E>(field)?;
                if field.kind != FieldKind::Text {
                    return Err(PredicateError::LikeOnNonText { field: *field });
                }
                Ok(())
            }
            Self::And(parts) | Self::Or(parts) => {
                parts.iter().try_for_each(|part| part.validate_for::<E>())
            }
        }
    }
}

fn collapse(mut parts: Vec<Predicate>, group: fn(Vec<Predicate>) -> Predicate) -> Predicate {
    match parts.len() {
        0 => Predicate::True,
        1 => parts.remove(0),
        _ => group(parts),
    }
}

pub(crate) fn check_field<E: Entity>(field: &Field) -> Result<(), PredicateError> {
    if E::has_field(field) {
        Ok(())
    } else {
        Err(PredicateError::UnknownField {
            entity: E::TABLE,
            field: *field,
        })
    }
}

/// Malformed predicate detected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredicateError {
    UnknownField { entity: &'static str, field: Field },
    TypeMismatch { field: Field, found: &'static str },
    LikeOnNonText { field: Field },
}

impl Display for PredicateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField { entity, field } => {
                write!(f, "field `{field}` does not belong to entity `{entity}`")
            }
            Self::TypeMismatch { field, found } => write!(
                f,
                "field `{field}` expects {} but got {found}",
                field.kind.as_str()
            ),
            Self::LikeOnNonText { field } => {
                write!(f, "LIKE requires a text field, `{field}` is not text")
            }
        }
    }
}

impl Error for PredicateError {}
