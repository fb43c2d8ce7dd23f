//! Type-safe predicate and query composition over `Person`/`Address`.
//!
//! Optional search values become composable predicates. Those predicates run
//! through a stateless query façade against SQLite or an in-memory store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod predicate;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{ConfigError, QueryConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::address::{Address, AddressId, EntityValidationError};
pub use model::field::{Entity, Field, FieldKind, Value};
pub use model::person::{Person, PersonDto, PersonId};
pub use predicate::{Predicate, PredicateError};
pub use query::executor::QueryExecutor;
pub use query::memory::MemoryStore;
pub use query::{Order, Page, PageRequest, Query, SortDirection};
pub use repo::address_repo::{AddressRepository, SqliteAddressRepository};
pub use repo::person_repo::{PersonRepository, SqlitePersonRepository};
pub use repo::{RepoError, RepoResult};
pub use service::person_search::{MatchMode, PersonSearch, PersonSearchService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
