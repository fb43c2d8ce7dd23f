//! Generic optional-value predicate builders.
//!
//! Domain builders (`person`, `address`) delegate here so every field gets
//! the same blank-value handling.

use crate::model::field::Field;
use crate::predicate::pattern::{has_text, like_with};
use crate::predicate::Predicate;

/// Exact match on `field`, or `True` when `value` is absent or blank.
pub fn text_equals<'a>(field: Field, value: impl Into<Option<&'a str>>) -> Predicate {
    match value.into() {
        Some(text) if has_text(Some(text)) => field.eq(text),
        _ => Predicate::True,
    }
}

/// Partial match on `field`, or `True` when `value` is absent or blank.
pub fn text_like<'a>(field: Field, value: impl Into<Option<&'a str>>, left_like: bool) -> Predicate {
    match value.into() {
        Some(text) if has_text(Some(text)) => field.like(like_with(left_like, text)),
        _ => Predicate::True,
    }
}

#[cfg(test)]
mod tests {
    use super::{text_equals, text_like};
    use crate::model::person::Person;
    use crate::predicate::Predicate;

    #[test]
    fn blank_values_yield_neutral() {
        for blank in [None, Some(""), Some("   ")] {
            assert_eq!(text_equals(Person::NAME, blank), Predicate::True);
            assert_eq!(text_like(Person::NAME, blank, true), Predicate::True);
        }
    }

    #[test]
    fn value_is_kept_verbatim() {
        assert_eq!(
            text_equals(Person::NAME, " NAME "),
            Person::NAME.eq(" NAME ")
        );
        assert_eq!(
            text_like(Person::NAME, "NA", false),
            Person::NAME.like("NA%")
        );
    }
}
