//! Compilation errors
//!
//! All errors are deterministic programming/data errors, raised fail-fast:
//! the first offending node aborts the build and no partial output escapes.

use critq_ast::{CriterionKind, Relation};
use thiserror::Error;

/// Result type for compilation operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that can occur while compiling a search query
#[derive(Debug, Error, Clone)]
pub enum CompileError {
    /// A criterion kind/shape combination has no compilation rule
    #[error("Unsupported search type: {kind}")]
    UnsupportedSearchType {
        /// Offending kind name
        kind: String,
    },

    /// A relation has no mapping in the given comparison context
    #[error("Unsupported relation '{relation}' in {context}")]
    UnsupportedRelation {
        /// Offending relation token
        relation: String,
        /// Mapping context the relation was used in
        context: String,
    },

    /// The query descriptor lacks a root object or root criterion
    #[error("Search query has no root object or root criterion")]
    MissingRootObject,

    /// The schema cannot resolve identifier/type metadata for a root object
    #[error("No schema metadata for root object '{root_object}'")]
    MissingRequiredMetadata {
        /// Root object name that failed to resolve
        root_object: String,
    },

    /// Parameter/child/subquery arity mismatch for a criterion kind
    #[error("Malformed {kind} node: {reason}")]
    MalformedNode {
        /// Kind of the offending node
        kind: String,
        /// What was wrong with its shape
        reason: String,
    },
}

impl CompileError {
    /// Create an unsupported-search-type error
    pub fn unsupported_search_type(kind: CriterionKind) -> Self {
        Self::UnsupportedSearchType {
            kind: kind.name().to_string(),
        }
    }

    /// Create an unsupported-relation error
    pub fn unsupported_relation(relation: Relation, context: impl Into<String>) -> Self {
        Self::UnsupportedRelation {
            relation: relation.symbol().to_string(),
            context: context.into(),
        }
    }

    /// Create a missing-metadata error
    pub fn missing_metadata(root_object: impl Into<String>) -> Self {
        Self::MissingRequiredMetadata {
            root_object: root_object.into(),
        }
    }

    /// Create a malformed-node error
    pub fn malformed(kind: CriterionKind, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            kind: kind.name().to_string(),
            reason: reason.into(),
        }
    }
}
