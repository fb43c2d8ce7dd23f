//! Repository contracts and the SQLite query driver.
//!
//! # Responsibility
//! - Define entity repositories on top of the `QueryExecutor` façade.
//! - Keep SQL generation and row decoding inside this module.
//!
//! # Invariants
//! - Predicates are validated before any SQL is prepared.
//! - Store failures are returned as `RepoError::Db` without reinterpretation.

use crate::db::DbError;
use crate::model::address::EntityValidationError;
use crate::predicate::PredicateError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod address_repo;
pub mod person_repo;
mod sqlite;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by query drivers and repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntityValidationError),
    Db(DbError),
    /// Query referenced a foreign field or bound a value of the wrong kind.
    InvalidPredicate(PredicateError),
    /// `fetch_one` matched more than one row.
    NonUniqueResult { entity: &'static str },
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidPredicate(err) => write!(f, "invalid predicate: {err}"),
            Self::NonUniqueResult { entity } => {
                write!(f, "query did not return a unique {entity} result")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidPredicate(err) => Some(err),
            Self::NonUniqueResult { .. } | Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<EntityValidationError> for RepoError {
    fn from(value: EntityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PredicateError> for RepoError {
    fn from(value: PredicateError) -> Self {
        Self::InvalidPredicate(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
