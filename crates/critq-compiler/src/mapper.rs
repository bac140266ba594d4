//! Relation and match-mode mapping tables
//!
//! Pure functions mapping abstract relations to compiled predicate
//! constructors, one per comparison context. Property-to-property
//! comparisons use a different constructor family from property-to-literal
//! ones, and collection-size comparisons a third. There is no default
//! fallback: a relation outside a table's domain is an
//! [`CompileError::UnsupportedRelation`].

use crate::{CompileError, CompileResult};
use critq_ast::{MatchMode, MatchOptions, Relation};
use critq_target::{CompareOp, Predicate, Value};

const fn ordering_op(relation: Relation) -> Option<CompareOp> {
    match relation {
        Relation::Eq => Some(CompareOp::Eq),
        Relation::Ne => Some(CompareOp::Ne),
        Relation::Gt => Some(CompareOp::Gt),
        Relation::Ge => Some(CompareOp::Ge),
        Relation::Lt => Some(CompareOp::Lt),
        Relation::Le => Some(CompareOp::Le),
        Relation::Like => None,
    }
}

/// Literal-valued comparison. `Like` is accepted here (and only here) when
/// the operand is a string, producing an unanchored pattern match.
pub(crate) fn compare(
    relation: Relation,
    property: &str,
    value: Value,
    ignore_case: bool,
) -> CompileResult<Predicate> {
    match (ordering_op(relation), value) {
        (Some(op), value) => Ok(Predicate::Comparison {
            property: property.to_string(),
            op,
            value,
            ignore_case,
        }),
        (None, Value::Str(pattern)) => Ok(Predicate::PatternMatch {
            property: property.to_string(),
            value: pattern,
            mode: MatchMode::Exact,
            case_insensitive: ignore_case,
        }),
        (None, _) => Err(CompileError::unsupported_relation(
            relation,
            "non-string literal comparison",
        )),
    }
}

/// Property-valued comparison; the six ordering relations only
pub(crate) fn compare_properties(
    relation: Relation,
    lhs: &str,
    rhs: &str,
) -> CompileResult<Predicate> {
    let op = ordering_op(relation)
        .ok_or_else(|| CompileError::unsupported_relation(relation, "property comparison"))?;
    Ok(Predicate::PropertyComparison {
        op,
        lhs: lhs.to_string(),
        rhs: rhs.to_string(),
    })
}

/// Collection-cardinality comparison; the six ordering relations only
pub(crate) fn compare_size(
    relation: Relation,
    property: &str,
    size: i64,
) -> CompileResult<Predicate> {
    let op = ordering_op(relation)
        .ok_or_else(|| CompileError::unsupported_relation(relation, "size comparison"))?;
    Ok(Predicate::SizeComparison {
        property: property.to_string(),
        op,
        size,
    })
}

/// Aggregate (having-clause) comparison operator; the six ordering
/// relations only
pub(crate) fn having_op(relation: Relation) -> CompileResult<CompareOp> {
    ordering_op(relation)
        .ok_or_else(|| CompileError::unsupported_relation(relation, "aggregate comparison"))
}

/// Anchor mode for a string-match criterion: explicit option wins,
/// otherwise no anchoring
pub(crate) fn match_mode(options: Option<&MatchOptions>) -> MatchMode {
    options
        .and_then(|opts| opts.match_mode)
        .unwrap_or(MatchMode::Exact)
}
