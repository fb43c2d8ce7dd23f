//! Address repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Standalone saves require an owner (`Address::validate`).
//! - Deletes affect `address` rows only.

use crate::config::QueryConfig;
use crate::model::address::Address;
use crate::model::person::PersonId;
use crate::predicate::Predicate;
use crate::query::executor::QueryExecutor;
use crate::query::Query;
use crate::repo::sqlite::{self, SqlEntity};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

/// Repository interface for address persistence and predicate queries.
pub trait AddressRepository: QueryExecutor<Address> {
    /// Inserts or updates one owned address.
    fn save(&self, address: &Address) -> RepoResult<Address>;

    fn delete_where(&self, predicate: &Predicate) -> RepoResult<usize>;

    fn find_by_owner(&self, person_id: PersonId) -> RepoResult<Vec<Address>> {
        self.fetch_all(&Query::filtered(Address::PERSON_ID.eq(person_id)))
    }

    fn count_all(&self) -> RepoResult<u64> {
        self.count(&Predicate::True)
    }
}

/// SQLite-backed address repository.
pub struct SqliteAddressRepository<'conn> {
    conn: &'conn Connection,
    config: QueryConfig,
}

impl<'conn> SqliteAddressRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_config(conn, QueryConfig::default())
    }

    pub fn with_config(conn: &'conn Connection, config: QueryConfig) -> Self {
        Self { conn, config }
    }
}

impl SqlEntity for Address {
    const COLUMNS: &'static str = "address.id, address.street, address.person_id";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            street: row.get(1)?,
            person_id: row.get(2)?,
        })
    }
}

impl QueryExecutor<Address> for SqliteAddressRepository<'_> {
    fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn fetch_all(&self, query: &Query) -> RepoResult<Vec<Address>> {
        sqlite::select(self.conn, query, &self.config)
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        sqlite::count::<Address>(self.conn, predicate, &self.config)
    }
}

impl AddressRepository for SqliteAddressRepository<'_> {
    fn save(&self, address: &Address) -> RepoResult<Address> {
        address.validate()?;
        write_address(self.conn, address)
    }

    fn delete_where(&self, predicate: &Predicate) -> RepoResult<usize> {
        sqlite::delete_where::<Address>(self.conn, predicate, &self.config)
    }
}

/// Inserts `address` when transient, updates it otherwise.
pub(crate) fn write_address(conn: &Connection, address: &Address) -> RepoResult<Address> {
    let id = match address.id {
        Some(id) => {
            let changed = conn.execute(
                "UPDATE address SET street = ?1, person_id = ?2 WHERE id = ?3;",
                params![address.street.as_str(), address.person_id, id],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound {
                    entity: "address",
                    id,
                });
            }
            id
        }
        None => {
            conn.execute(
                "INSERT INTO address (street, person_id) VALUES (?1, ?2);",
                params![address.street.as_str(), address.person_id],
            )?;
            conn.last_insert_rowid()
        }
    };

    Ok(Address {
        id: Some(id),
        ..address.clone()
    })
}

pub(crate) fn load_addresses_for_person(
    conn: &Connection,
    person_id: PersonId,
) -> RepoResult<Vec<Address>> {
    let query = Query::filtered(Address::PERSON_ID.eq(person_id));
    sqlite::select(conn, &query, &QueryConfig::default())
}
