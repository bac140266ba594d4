//! Search-criteria compiler core
//!
//! Translates a [`critq_ast::SearchQuery`] descriptor into the
//! [`critq_target::CompiledQuery`] representation consumed by a downstream
//! execution engine. Compilation is a pure, synchronous, post-order tree
//! recursion: child criteria and nested query descriptors are compiled
//! before their parents, aggregate (`Count`) constraints are rewritten into
//! correlated identifier-membership subqueries, and any malformed or
//! unsupported node aborts the build with a [`CompileError`].
//!
//! A [`QueryAssembler`] accumulates per-build state and is consumed by
//! `build()`; one assembler serves exactly one build.

mod assembler;
mod error;
mod mapper;
mod predicate;
mod projection;
mod subquery;

pub use assembler::QueryAssembler;
pub use error::{CompileError, CompileResult};
pub use predicate::PredicateCompiler;
pub use subquery::compile_subquery;
