//! Use-case services composed from predicate builders and repositories.
//!
//! # Responsibility
//! - Turn form-style search input into composed queries.
//! - Keep callers independent of the backing store.

pub mod person_search;
