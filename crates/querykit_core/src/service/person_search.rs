//! Person search use-case.
//!
//! # Responsibility
//! - Compose optional search fields into one predicate.
//! - Return paged results or detached DTOs.
//!
//! # Invariants
//! - Blank fields never narrow the result.
//! - Results are ordered by `surname ASC, name ASC`.

use crate::model::person::{Person, PersonDto};
use crate::predicate::person::{
    name_contains, name_equals, name_like, surname_equals, surname_like,
};
use crate::predicate::Predicate;
use crate::query::executor::QueryExecutor;
use crate::query::{Page, PageRequest, Query};
use crate::repo::RepoResult;
use log::info;

/// How text search fields are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Exact,
    StartsWith,
    Contains,
}

/// Search form input. `None` or blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSearch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub mode: MatchMode,
    /// Combine fields with OR instead of AND.
    pub any: bool,
    /// Load addresses along with each person.
    pub with_addresses: bool,
}

impl PersonSearch {
    /// Builds the composed predicate for this form.
    pub fn predicate(&self) -> Predicate {
        let name = self.name.as_deref();
        let surname = self.surname.as_deref();
        let fragments = match self.mode {
            MatchMode::Exact => [name_equals(name), surname_equals(surname)],
            MatchMode::StartsWith => [name_like(name), surname_like(surname)],
            // Surname has no left-wildcard builder; contains-search applies to names.
            MatchMode::Contains => [name_contains(name), surname_like(surname)],
        };

        if self.any {
            Predicate::any(fragments)
        } else {
            Predicate::all(fragments)
        }
    }

    pub fn query(&self) -> Query {
        let query = Query::filtered(self.predicate())
            .order_by(Person::SURNAME.asc())
            .order_by(Person::NAME.asc());
        if self.with_addresses {
            query.join_fetch()
        } else {
            query
        }
    }
}

/// Search service over any person query driver.
pub struct PersonSearchService<R: QueryExecutor<Person>> {
    repo: R,
}

impl<R: QueryExecutor<Person>> PersonSearchService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Runs the search and returns one page.
    pub fn search(&self, search: &PersonSearch, page: PageRequest) -> RepoResult<Page<Person>> {
        let result = self.repo.fetch_page(&search.query(), page)?;
        info!(
            "event=person_search module=service status=ok mode={:?} any={} page={} rows={} total={}",
            search.mode,
            search.any,
            result.page,
            result.number_of_elements(),
            result.total_elements
        );
        Ok(result)
    }

    /// Runs the search and projects every match into a DTO.
    pub fn search_dtos(&self, search: &PersonSearch) -> RepoResult<Vec<PersonDto>> {
        let query = Query {
            join_fetch: false,
            ..search.query()
        };
        Ok(self
            .repo
            .fetch_all(&query)?
            .into_iter()
            .map(PersonDto::from)
            .collect())
    }

    /// Returns the single match, `None` when nothing matches.
    pub fn find_unique(&self, search: &PersonSearch) -> RepoResult<Option<Person>> {
        self.repo.fetch_one(&search.query())
    }
}
