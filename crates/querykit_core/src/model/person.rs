//! Person entity and its detached projection.
//!
//! # Responsibility
//! - Define the person record used as query target.
//! - Provide typed field descriptors (`Person::NAME`, ...).
//!
//! # Invariants
//! - `name` and `surname` are always present.
//! - `addresses == None` means the collection was not loaded by the query.
//!   It is never an empty-but-unknown state.

use crate::model::address::{Address, EntityValidationError};
use crate::model::field::{Entity, Field, Value};
use serde::{Deserialize, Serialize};

/// Surrogate identifier assigned by the backing store.
pub type PersonId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// `None` until the person has been saved.
    pub id: Option<PersonId>,
    pub name: String,
    pub surname: String,
    /// Owned addresses, present only when loaded with join-fetch or built
    /// in memory.
    pub addresses: Option<Vec<Address>>,
}

impl Person {
    pub const ID: Field = Field::integer("person", "id");
    pub const NAME: Field = Field::text("person", "name");
    pub const SURNAME: Field = Field::text("person", "surname");

    /// Creates a transient person with an empty, loaded address collection.
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            surname: surname.into(),
            addresses: Some(Vec::new()),
        }
    }

    /// Appends an owned address and links its back reference.
    pub fn add_address(&mut self, street: impl Into<String>) -> &mut Self {
        let address = Address {
            person_id: self.id,
            ..Address::new(street)
        };
        self.addresses.get_or_insert_with(Vec::new).push(address);
        self
    }

    /// Returns owned addresses, or `None` when they were not fetched.
    pub fn addresses(&self) -> Option<&[Address]> {
        self.addresses.as_deref()
    }

    /// Checks that every loaded address points back at this person.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        for address in self.addresses().unwrap_or_default() {
            if let Some(owner) = address.person_id {
                if self.id != Some(owner) {
                    return Err(EntityValidationError::OwnerMismatch {
                        expected: self.id,
                        found: owner,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Entity for Person {
    const TABLE: &'static str = "person";
    const FIELDS: &'static [Field] = &[Self::ID, Self::NAME, Self::SURNAME];

    fn value_of(&self, field: &Field) -> Option<Value> {
        if *field == Self::ID {
            Some(self.id.into())
        } else if *field == Self::NAME {
            Some(self.name.as_str().into())
        } else if *field == Self::SURNAME {
            Some(self.surname.as_str().into())
        } else {
            None
        }
    }

    fn without_relations(mut self) -> Self {
        self.addresses = None;
        self
    }
}

/// Flattened person projection with value semantics.
///
/// Carries results outside the persistence boundary without any link to
/// addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonDto {
    pub id: Option<PersonId>,
    pub name: String,
    pub surname: String,
}

impl PersonDto {
    pub fn new(id: Option<PersonId>, name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            surname: surname.into(),
        }
    }
}

impl From<Person> for PersonDto {
    fn from(value: Person) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
        }
    }
}

impl From<&Person> for PersonDto {
    fn from(value: &Person) -> Self {
        Self::new(value.id, value.name.as_str(), value.surname.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Person, PersonDto};
    use crate::model::address::EntityValidationError;
    use crate::model::field::Entity;
    use std::collections::HashSet;

    #[test]
    fn new_person_has_loaded_empty_addresses() {
        let person = Person::new("NAME", "SURNAME");
        assert_eq!(person.addresses(), Some(&[][..]));
        assert!(person.clone().without_relations().addresses().is_none());
    }

    #[test]
    fn add_address_links_back_reference() {
        let mut person = Person::new("NAME", "SURNAME");
        person.id = Some(4);
        person.add_address("STREET");
        assert_eq!(person.addresses().unwrap()[0].person_id, Some(4));
        assert!(person.validate().is_ok());
    }

    #[test]
    fn validate_rejects_foreign_address() {
        let mut person = Person::new("NAME", "SURNAME");
        person.add_address("STREET");
        person.addresses.as_mut().unwrap()[0].person_id = Some(99);
        assert_eq!(
            person.validate(),
            Err(EntityValidationError::OwnerMismatch {
                expected: None,
                found: 99
            })
        );
    }

    #[test]
    fn dto_has_value_semantics() {
        let mut person = Person::new("NAME", "SURNAME");
        person.id = Some(1);
        let first = PersonDto::from(&person);
        let second = PersonDto::new(Some(1), "NAME", "SURNAME");
        assert_eq!(first, second);

        let set: HashSet<PersonDto> = [first, second].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
