//! Address search predicates.

use crate::model::address::Address;
use crate::model::person::PersonId;
use crate::predicate::builders::{text_equals, text_like};
use crate::predicate::Predicate;

pub fn street_equals<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_equals(Address::STREET, value)
}

pub fn street_like<'a>(value: impl Into<Option<&'a str>>) -> Predicate {
    text_like(Address::STREET, value, false)
}

/// Addresses owned by `person_id`; `True` when no owner is given.
pub fn owned_by(person_id: Option<PersonId>) -> Predicate {
    person_id.map_or(Predicate::True, |id| Address::PERSON_ID.eq(id))
}

#[cfg(test)]
mod tests {
    use super::{owned_by, street_equals, street_like};
    use crate::model::address::Address;
    use crate::predicate::Predicate;

    #[test]
    fn street_builders_follow_blank_rules() {
        assert_eq!(street_equals(None), Predicate::True);
        assert_eq!(street_like("MAIN"), Address::STREET.like("MAIN%"));
        assert_eq!(owned_by(None), Predicate::True);
        assert_eq!(owned_by(Some(2)), Address::PERSON_ID.eq(2_i64));
    }
}
