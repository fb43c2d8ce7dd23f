//! Person search predicates.
//!
//! Every builder returns `Predicate::True` for absent or blank input, so
//! callers can AND them together straight from optional form fields.

use crate::model::person::Person;
use crate::predicate::builders::{text_equals, text_like};
use crate::predicate::Predicate;

/// `name LIKE 'value%'`.
pub fn name_like<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_like(Person::NAME, value, false)
}

/// `name LIKE '%value%'`.
pub fn name_contains<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_like(Person::NAME, value, true)
}

pub fn name_equals<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_equals(Person::NAME, value)
}

pub fn surname_like<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_like(Person::SURNAME, value, false)
}

pub fn surname_equals<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_equals(Person::SURNAME, value)
}

#[cfg(test)]
mod tests {
    use super::{name_contains, name_equals, name_like, surname_equals};
    use crate::model::person::Person;
    use crate::predicate::Predicate;

    #[test]
    fn name_like_is_starts_with() {
        assert_eq!(name_like("NA"), Person::NAME.like("NA%"));
        assert_eq!(name_contains("AM"), Person::NAME.like("%AM%"));
    }

    #[test]
    fn blank_search_values_are_skipped() {
        assert_eq!(name_equals(""), Predicate::True);
        assert_eq!(name_like(None), Predicate::True);
        assert_eq!(surname_equals("  "), Predicate::True);
    }

    #[test]
    fn equals_and_like_compose_into_one_group() {
        let composed = name_equals("NAME").and(name_like("NAME"));
        assert_eq!(
            composed,
            Predicate::And(vec![Person::NAME.eq("NAME"), Person::NAME.like("NAME%")])
        );
    }
}
