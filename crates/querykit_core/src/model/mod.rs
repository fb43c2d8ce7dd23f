//! Entity model used as query targets.
//!
//! # Responsibility
//! - Define `Person`, `Address` and the detached `PersonDto` projection.
//! - Describe queryable fields without code generation or reflection.
//!
//! # Invariants
//! - Entities never reach into storage; drivers read them through `Entity`.

pub mod address;
pub mod field;
pub mod person;
