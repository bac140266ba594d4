//! Subquery compilation and aggregate-count emulation
//!
//! Target engines in this domain support row-level predicates but no
//! aggregate-filter predicate inside an arbitrary boolean tree. A `Count`
//! constraint is therefore rewritten into a correlated subquery: the base
//! query is grouped by the root identifier, groups are filtered with a
//! having clause, and the outer predicate becomes a membership test of the
//! identifier against that projection.

use crate::assembler::QueryAssembler;
use crate::error::{CompileError, CompileResult};
use crate::mapper;
use critq_ast::{Relation, SearchCriterion, SearchQuery};
use critq_schema::SchemaInfo;
use critq_target::{CompiledQuery, Predicate, Projection};

/// Compile a nested query descriptor through the full pipeline.
///
/// Each nested descriptor gets a fresh assembler; aliases declared on an
/// ancestor descriptor are not inherited.
pub fn compile_subquery(
    query: &SearchQuery,
    schema: &dyn SchemaInfo,
) -> CompileResult<CompiledQuery> {
    QueryAssembler::new(query, schema).build()
}

/// Rewrite a `Count` node into an identifier-membership predicate over its
/// already-compiled base query.
pub(crate) fn compile_count(
    schema: &dyn SchemaInfo,
    node: &SearchCriterion,
    relation: Relation,
    value: i64,
    distinct: bool,
    mut base: CompiledQuery,
) -> CompileResult<Predicate> {
    // The base query was compiled from the node's single descriptor; it
    // shares the identifier space of the owning query.
    let descriptor = node.subqueries.first().ok_or_else(|| {
        CompileError::malformed(node.kind, "expected exactly 1 subquery, found 0")
    })?;
    let root_object = descriptor
        .root_object
        .as_deref()
        .ok_or(CompileError::MissingRootObject)?;
    let identifier = schema
        .identifier_property(root_object)
        .ok_or_else(|| CompileError::missing_metadata(root_object))?;

    // Composite identifiers are enumerated column by column; simple ones
    // group by the identifier property itself.
    let group_properties = if schema.is_composite_identifier(root_object) {
        let components = schema.component_properties(root_object);
        if components.is_empty() {
            return Err(CompileError::missing_metadata(root_object));
        }
        components
    } else {
        vec![identifier.clone()]
    };

    base.projection = Some(Projection::GroupHaving {
        group_properties,
        distinct,
        aggregate_property: identifier.clone(),
        op: mapper::having_op(relation)?,
        value,
    });

    Ok(Predicate::InSubquery {
        property: identifier,
        subquery: Box::new(base),
    })
}
