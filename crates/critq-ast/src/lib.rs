//! Search criteria tree definitions
//!
//! This crate defines the declarative query descriptor consumed by the
//! critq compiler: a boolean predicate tree (`SearchCriterion`), sort
//! order, pagination, and join aliasing (`SearchQuery`). Descriptors are
//! produced by upstream query builders or translation layers, passed once
//! into the compiler, and never mutated by it.

mod criterion;
mod query;
mod relation;

pub use criterion::*;
pub use query::*;
pub use relation::*;
