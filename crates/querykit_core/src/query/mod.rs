//! Query description and result shapes.
//!
//! # Responsibility
//! - Bundle a predicate with ordering, pagination and join-fetch directives.
//! - Define the page result returned by `fetch_page`.
//!
//! # Invariants
//! - A `Query` is a plain value; executing it never mutates it.
//! - Join-fetch is opt-in per query; there is no ambient loading context.

use crate::model::field::{Entity, Field};
use crate::predicate::{check_field, Predicate, PredicateError};

pub mod executor;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub field: Field,
    pub direction: SortDirection,
}

/// Selection plus shaping directives for one driver call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub predicate: Predicate,
    /// Empty means natural (primary key / insertion) order.
    pub order_by: Vec<Order>,
    pub offset: u64,
    pub limit: Option<u64>,
    /// Loads owned collections eagerly.
    pub join_fetch: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query filtered by `predicate`.
    pub fn filtered(predicate: Predicate) -> Self {
        Self {
            predicate,
            ..Self::default()
        }
    }

    /// ANDs `predicate` into the current filter.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = std::mem::take(&mut self.predicate).and(predicate);
        self
    }

    pub fn order_by(mut self, order: Order) -> Self {
        self.order_by.push(order);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn join_fetch(mut self) -> Self {
        self.join_fetch = true;
        self
    }

    /// Checks predicate and ordering fields against entity `E`.
    pub fn validate_for<E: Entity>(&self) -> Result<(), PredicateError> {
        self.predicate.validate_for::<E>()?;
        self.order_by
            .iter()
            .try_for_each(|order| check_field::<E>(&order.field))
    }
}

/// Zero-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }
}

/// Bounded slice of a result set plus its total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    /// Effective size after config clamping.
    pub size: u32,
    /// Rows matching the predicate across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) + 1 < self.total_pages()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
