//! Backend-agnostic search-criteria compiler
//!
//! Translates a declarative query descriptor — a boolean predicate tree
//! with sort order, pagination, join aliasing, and optional aggregate
//! constraints — into a target engine's predicate/projection
//! representation. Execution, result materialization, and caching belong
//! to callers.
//!
//! # Example
//!
//! ```
//! use critq::ast::{Relation, SearchCriterion, SearchQuery};
//! use critq::schema::{EntityInfo, MemorySchema};
//!
//! let schema = MemorySchema::new().register("Person", EntityInfo::new("id"));
//! let query = SearchQuery::new("Person")
//!     .with_criterion(SearchCriterion::simple_compare(Relation::Eq, "status", "ACTIVE"));
//!
//! let compiled = critq::compile(&query, &schema).unwrap();
//! assert_eq!(compiled.render(), "select * from Person where status = 'ACTIVE'");
//! ```

// Re-export all public APIs from internal crates
pub use critq_ast as ast;
pub use critq_compiler as compiler;
pub use critq_schema as schema;
pub use critq_target as target;

// Convenience re-exports
pub use critq_ast::{SearchCriterion, SearchQuery};
pub use critq_compiler::{CompileError, CompileResult, QueryAssembler};
pub use critq_schema::SchemaInfo;
pub use critq_target::CompiledQuery;

/// Compile a query descriptor against schema metadata.
///
/// Equivalent to `QueryAssembler::new(query, schema).build()`.
pub fn compile(query: &SearchQuery, schema: &dyn SchemaInfo) -> CompileResult<CompiledQuery> {
    QueryAssembler::new(query, schema).build()
}
