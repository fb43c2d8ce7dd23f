//! Address entity.
//!
//! # Invariants
//! - `street` is always present.
//! - `person_id` is a back reference to the owning person; it never controls
//!   the owner's lifecycle.

use crate::model::field::{Entity, Field, Value};
use crate::model::person::PersonId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate identifier assigned by the backing store.
pub type AddressId = i64;

/// Street address owned by a `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// `None` until the address has been saved.
    pub id: Option<AddressId>,
    pub street: String,
    /// Owner id. Set by `PersonRepository::save` for owned addresses.
    pub person_id: Option<PersonId>,
}

impl Address {
    pub const ID: Field = Field::integer("address", "id");
    pub const STREET: Field = Field::text("address", "street");
    pub const PERSON_ID: Field = Field::integer("address", "person_id");

    pub fn new(street: impl Into<String>) -> Self {
        Self {
            id: None,
            street: street.into(),
            person_id: None,
        }
    }

    /// Creates an address pointing at an already stored owner.
    pub fn owned_by(person_id: PersonId, street: impl Into<String>) -> Self {
        Self {
            person_id: Some(person_id),
            ..Self::new(street)
        }
    }

    /// Checks the address can be saved on its own.
    pub fn validate(&self) -> Result<(), EntityValidationError> {
        if self.person_id.is_none() {
            return Err(EntityValidationError::AddressWithoutOwner);
        }
        Ok(())
    }
}

impl Entity for Address {
    const TABLE: &'static str = "address";
    const FIELDS: &'static [Field] = &[Self::ID, Self::STREET, Self::PERSON_ID];

    fn value_of(&self, field: &Field) -> Option<Value> {
        if *field == Self::ID {
            Some(self.id.into())
        } else if *field == Self::STREET {
            Some(self.street.as_str().into())
        } else if *field == Self::PERSON_ID {
            Some(self.person_id.into())
        } else {
            None
        }
    }
}

/// Entity state that cannot be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityValidationError {
    /// A standalone address save needs an owner.
    AddressWithoutOwner,
    /// An owned address points at a different person.
    OwnerMismatch {
        expected: Option<PersonId>,
        found: PersonId,
    },
}

impl Display for EntityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddressWithoutOwner => write!(f, "address has no owning person"),
            Self::OwnerMismatch { expected, found } => match expected {
                Some(expected) => write!(
                    f,
                    "address belongs to person {found}, expected person {expected}"
                ),
                None => write!(
                    f,
                    "address belongs to person {found}, but owner is not saved yet"
                ),
            },
        }
    }
}

impl Error for EntityValidationError {}

#[cfg(test)]
mod tests {
    use super::{Address, EntityValidationError};
    use crate::model::field::{Entity, Value};

    #[test]
    fn standalone_address_requires_owner() {
        assert_eq!(
            Address::new("Main").validate(),
            Err(EntityValidationError::AddressWithoutOwner)
        );
        assert!(Address::owned_by(3, "Main").validate().is_ok());
    }

    #[test]
    fn value_of_exposes_back_reference() {
        let address = Address::owned_by(9, "Main");
        assert_eq!(address.value_of(&Address::PERSON_ID), Some(Value::Integer(9)));
        assert_eq!(address.value_of(&Address::ID), Some(Value::Null));
    }
}
