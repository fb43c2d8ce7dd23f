//! In-memory query driver.
//!
//! # Responsibility
//! - Run queries over a materialised record list with the same semantics as
//!   the SQLite driver.
//!
//! # Invariants
//! - Natural order is insertion order.
//! - Records are cloned out; the store is never mutated by queries.

use crate::config::QueryConfig;
use crate::model::field::Entity;
use crate::predicate::Predicate;
use crate::query::executor::QueryExecutor;
use crate::query::{Query, SortDirection};
use crate::repo::{RepoError, RepoResult};
use log::debug;
use std::cmp::Ordering;

/// Query driver backed by an owned `Vec<E>`.
#[derive(Debug, Clone)]
pub struct MemoryStore<E> {
    records: Vec<E>,
    config: QueryConfig,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self::with_config(records, QueryConfig::default())
    }

    pub fn with_config(records: Vec<E>, config: QueryConfig) -> Self {
        Self { records, config }
    }

    pub fn push(&mut self, record: E) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<E: Entity> QueryExecutor<E> for MemoryStore<E> {
    fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn fetch_all(&self, query: &Query) -> RepoResult<Vec<E>> {
        query.validate_for::<E>().map_err(RepoError::InvalidPredicate)?;

        let case_sensitive = self.config.case_sensitive;
        let mut selected: Vec<&E> = self
            .records
            .iter()
            .filter(|record| query.predicate.matches(*record, case_sensitive))
            .collect();

        if !query.order_by.is_empty() {
            // Stable sort keeps insertion order for ties.
            selected.sort_by(|left, right| {
                query
                    .order_by
                    .iter()
                    .map(|order| {
                        let ordering = left.value_of(&order.field).cmp(&right.value_of(&order.field));
                        match order.direction {
                            SortDirection::Asc => ordering,
                            SortDirection::Desc => ordering.reverse(),
                        }
                    })
                    .find(|ordering| *ordering != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });
        }

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));
        let rows: Vec<E> = selected
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| {
                if query.join_fetch {
                    record.clone()
                } else {
                    record.clone().without_relations()
                }
            })
            .collect();

        debug!(
            "event=query_fetch module=memory status=ok entity={} rows={}",
            E::TABLE,
            rows.len()
        );
        Ok(rows)
    }

    fn count(&self, predicate: &Predicate) -> RepoResult<u64> {
        predicate
            .validate_for::<E>()
            .map_err(RepoError::InvalidPredicate)?;
        let matched = self
            .records
            .iter()
            .filter(|record| predicate.matches(*record, self.config.case_sensitive))
            .count();
        Ok(matched as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::person::Person;
    use crate::query::executor::QueryExecutor;
    use crate::query::Query;

    fn person(id: i64, name: &str) -> Person {
        let mut person = Person::new(name, "SURNAME");
        person.id = Some(id);
        person.add_address("STREET");
        person
    }

    #[test]
    fn ordering_and_paging_apply_after_filter() {
        let store = MemoryStore::new(vec![person(1, "B"), person(2, "A"), person(3, "C")]);
        let query = Query::new().order_by(Person::NAME.desc()).offset(1).limit(1);
        let rows = store.fetch_all(&query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "B");
    }

    #[test]
    fn relations_are_dropped_without_join_fetch() {
        let store = MemoryStore::new(vec![person(1, "A")]);
        let lazy = store.fetch_all(&Query::new()).unwrap();
        assert!(lazy[0].addresses().is_none());

        let eager = store.fetch_all(&Query::new().join_fetch()).unwrap();
        assert_eq!(eager[0].addresses().map(<[_]>::len), Some(1));
    }
}
