//! Person repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist persons with their owned addresses.
//! - Run predicate queries, projections and bulk updates over `person`.
//!
//! # Invariants
//! - `save` writes the person and its loaded addresses atomically.
//! - Addresses are loaded only when a query asks for join-fetch.
//! - Bulk deletes never cascade to addresses; referenced persons fail with
//!   the store's constraint error.

use crate::config::QueryConfig;
use crate::model::address::Address;
use crate::model::field::{Field, Value};
use crate::model::person::{Person, PersonDto, PersonId};
use crate::predicate::sql::to_sql;
use crate::predicate::Predicate;
use crate::query::executor::QueryExecutor;
use crate::query::Query;
use crate::repo::address_repo::{load_addresses_for_person, write_address};
use crate::repo::sqlite::{self, bind_value, SqlEntity};
use crate::repo::{RepoError, RepoResult};
use log::{debug, info};
use rusqlite::{params, params_from_iter, Connection, Row};

/// Repository interface for person persistence and predicate queries.
pub trait PersonRepository: QueryExecutor<Person> {
    /// Inserts or updates `person` and its loaded addresses.
    ///
    /// Returns the stored copy with every id assigned.
    fn save(&self, person: &Person) -> RepoResult<Person>;

    /// Deletes every person row. Fails when addresses still reference one.
    fn delete_all(&self) -> RepoResult<usize>;

    fn delete_where(&self, predicate: &Predicate) -> RepoResult<usize>;

    /// Sets `field = value` on every person matching `predicate`.
    fn update_where(&self, field: Field, value: Value, predicate: &Predicate)
        -> RepoResult<usize>;

    /// Distinct names of matching persons, sorted ascending.
    fn distinct_names(&self, predicate: &Predicate) -> RepoResult<Vec<String>>;

    fn find_all(&self) -> RepoResult<Vec<Person>> {
        self.fetch_all(&Query::new())
    }

    fn find_by_id(&self, id: PersonId, join_fetch: bool) -> RepoResult<Option<Person>> {
        let query = Query {
            join_fetch,
            ..Query::filtered(Person::ID.eq(id))
        };
        self.fetch_one(&query)
    }

    fn count_all(&self) -> RepoResult<u64> {
        self.count(&Predicate::True)
    }

    /// Projects matching persons into detached DTOs.
    fn fetch_dtos(&self, query: &Query) -> RepoResult<Vec<PersonDto>> {
        let plain = Query {
            join_fetch: false,
            ..query.clone()
        };
        Ok(self
            .fetch_all(&plain)?
            .into_iter()
            .map(PersonDto::from)
            .collect())
    }

    fn fetch_one_dto(&self, query: &Query) -> RepoResult<Option<PersonDto>> {
        let plain = Query {
            join_fetch: false,
            ..query.clone()
        };
        Ok(self.fetch_one(&plain)?.map(PersonDto::from))
    }
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
    config: QueryConfig,
}

impl<'conn> SqlitePersonRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_config(conn, QueryConfig::default())
    }

    pub fn with_config(conn: &'conn Connection, config: QueryConfig) -> Self {
        Self { conn, config }
    }
}

impl SqlEntity for Person {
    const COLUMNS: &'static str = "person.id, person.name, person.surname";

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            surname: row.get(2)?,
            addresses: None,
        })
    }
}

impl QueryExecutor<Person> for SqlitePersonRepository<'_> {
    fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn fetch_all(&self, query: &Query) -> RepoResult<Vec<Person>> {
        let mut persons: Vec<Person> = sqlite::select(self.conn, query, &self.config)?;
        if query.join_fetch {
            for person in &mut persons {
                let id = person.id.ok_or_else(|| {
                    RepoError::InvalidData("person row without id".to_string())
                })?;
                person.addresses = Some(load_addresses_for_person(self.conn, id)?);
            }
        }
        Ok(persons)
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        sqlite::count::<Person>(self.conn, predicate, &self.config)
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn save(&self, person: &Person) -> RepoResult<Person> {
        person.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let id = match person.id {
            Some(id) => {
                let changed = tx.execute(
                    "UPDATE person SET name = ?1, surname = ?2 WHERE id = ?3;",
                    params![person.name.as_str(), person.surname.as_str(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "person",
                        id,
                    });
                }
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO person (name, surname) VALUES (?1, ?2);",
                    params![person.name.as_str(), person.surname.as_str()],
                )?;
                tx.last_insert_rowid()
            }
        };

        let addresses = match person.addresses() {
            Some(owned) => {
                let mut stored = Vec::with_capacity(owned.len());
                for address in owned {
                    let linked = Address {
                        person_id: Some(id),
                        ..address.clone()
                    };
                    stored.push(write_address(&tx, &linked)?);
                }
                Some(stored)
            }
            None => None,
        };
        tx.commit()?;

        info!(
            "event=person_save module=repo status=ok person_id={} addresses={}",
            id,
            addresses.as_ref().map_or(0, Vec::len)
        );
        Ok(Person {
            id: Some(id),
            name: person.name.clone(),
            surname: person.surname.clone(),
            addresses,
        })
    }

    fn delete_all(&self) -> RepoResult<usize> {
        sqlite::delete_where::<Person>(self.conn, &Predicate::True, &self.config)
    }

    fn delete_where(&self, predicate: &Predicate) -> RepoResult<usize> {
        sqlite::delete_where::<Person>(self.conn, predicate, &self.config)
    }

    fn update_where(
        &self,
        field: Field,
        value: Value,
        predicate: &Predicate,
    ) -> RepoResult<usize> {
        sqlite::update_where::<Person>(self.conn, field, &value, predicate, &self.config)
    }

    fn distinct_names(&self, predicate: &Predicate) -> RepoResult<Vec<String>> {
        predicate.validate_for::<Person>()?;
        let filter = to_sql(predicate, self.config.case_sensitive);
        let sql = format!(
            "SELECT person.name FROM person WHERE {} GROUP BY person.name ORDER BY person.name ASC",
            filter.sql
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(filter.params.iter().map(bind_value)))?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get(0)?);
        }

        debug!(
            "event=query_distinct module=repo status=ok entity=person field=name rows={}",
            names.len()
        );
        Ok(names)
    }
}
