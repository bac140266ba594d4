//! Compiled query representation
//!
//! The output object model consumed by the downstream execution engine:
//! predicate tree, projection list, sort order, pagination, join aliases,
//! and the distinct flag. Each `build()` produces a fresh, independently
//! owned tree. The SQL-flavoured `render()` output is advisory (diagnostics
//! and snapshots); consumers walk the structured model.

mod model;
mod render;

pub use model::*;
