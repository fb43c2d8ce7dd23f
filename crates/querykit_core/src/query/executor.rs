//! Query execution façade shared by all drivers.
//!
//! # Responsibility
//! - Expose fetch-all, fetch-one and fetch-page over any backing store.
//! - Keep result-shape policy (uniqueness, paging math) out of drivers.
//!
//! # Invariants
//! - Every call is independent; no cursor survives between calls.
//! - `fetch_one` distinguishes "no rows" (`Ok(None)`) from "more than one
//!   row" (`Err(RepoError::NonUniqueResult)`).
//! - `fetch_page` counts with the same predicate it fetches with.

use crate::config::QueryConfig;
use crate::model::field::Entity;
use crate::predicate::Predicate;
use crate::query::{Page, PageRequest, Query};
use crate::repo::{RepoError, RepoResult};

/// Backing-store contract for one entity type.
///
/// Drivers implement `fetch_all` and `count`; the other result shapes are
/// derived from them.
pub trait QueryExecutor<E: Entity> {
    /// Config that drives case sensitivity and page-size bounds.
    fn config(&self) -> &QueryConfig;

    /// Returns every row selected by `query`, honoring order, offset and limit.
    fn fetch_all(&self, query: &Query) -> RepoResult<Vec<E>>;

    /// Counts rows matching `predicate`, ignoring pagination.
    fn count(&self, predicate: &Predicate) -> RepoResult<u64>;

    /// Returns the single selected row, `None` when nothing matches.
    ///
    /// The query's offset still applies; its limit is replaced so uniqueness
    /// is checked over every row past that offset.
    ///
    /// # Errors
    /// - `RepoError::NonUniqueResult` when two or more rows match.
    fn fetch_one(&self, query: &Query) -> RepoResult<Option<E>> {
        let uniqueness_check = Query {
            limit: Some(2),
            ..query.clone()
        };
        let mut rows = self.fetch_all(&uniqueness_check)?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            _ => Err(RepoError::NonUniqueResult { entity: E::TABLE }),
        }
    }

    /// Returns one page of `query` results plus the total match count.
    ///
    /// `request` replaces any offset/limit already set on `query`.
    fn fetch_page(&self, query: &Query, request: PageRequest) -> RepoResult<Page<E>> {
        let size = self.config().page_size(request.size);
        let paged = Query {
            offset: u64::from(request.page) * u64::from(size),
            limit: Some(u64::from(size)),
            ..query.clone()
        };
        let content = self.fetch_all(&paged)?;
        let total_elements = self.count(&query.predicate)?;

        Ok(Page {
            content,
            page: request.page,
            size,
            total_elements,
        })
    }

    fn exists(&self, predicate: &Predicate) -> RepoResult<bool> {
        Ok(self.count(predicate)? > 0)
    }
}
