//! In-memory predicate evaluation.
//!
//! # Invariants
//! - Results agree with the SQLite translation in `sql` for the same
//!   `case_sensitive` setting.
//! - `Value::Null` never compares equal, mirroring SQL three-valued logic.

use crate::model::field::{Entity, Value};
use crate::predicate::pattern::like_matches;
use crate::predicate::Predicate;

impl Predicate {
    /// Returns whether `entity` satisfies this predicate.
    ///
    /// Fields that `entity` does not expose never match; callers validate with
    /// `validate_for` first to turn that into an error.
    pub fn matches<E: Entity>(&self, entity: &E, case_sensitive: bool) -> bool {
        match self {
            Self::True => true,
            Self::Equals { field, value } => match entity.value_of(field) {
                Some(actual) => values_equal(&actual, value, case_sensitive),
                None => false,
            },
            Self::Like { field, pattern } => match entity.value_of(field) {
                Some(Value::Text(text)) => like_matches(pattern, &text, case_sensitive),
                _ => false,
            },
            Self::And(parts) => parts.iter().all(|part| part.matches(entity, case_sensitive)),
            Self::Or(parts) => {
                parts.is_empty() || parts.iter().any(|part| part.matches(entity, case_sensitive))
            }
        }
    }
}

fn values_equal(actual: &Value, expected: &Value, case_sensitive: bool) -> bool {
    match (actual, expected) {
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Text(left), Value::Text(right)) if !case_sensitive => {
            left.eq_ignore_ascii_case(right)
        }
        (left, right) => left == right,
    }
}
