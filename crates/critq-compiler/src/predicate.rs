//! Predicate compilation
//!
//! Post-order visitor over the criterion tree: children and nested query
//! descriptors are compiled first, then the node itself is dispatched on
//! its kind. Dispatch is an exhaustive match, so adding a kind without a
//! compilation rule fails at compile time rather than at runtime.

use crate::error::{CompileError, CompileResult};
use crate::subquery::{compile_count, compile_subquery};
use crate::mapper;
use critq_ast::{CriterionKind, Param, SearchCriterion};
use critq_schema::SchemaInfo;
use critq_target::{CompiledQuery, Predicate, Projection, Value};

/// Compiles one criterion tree into a compiled predicate tree
pub struct PredicateCompiler<'a> {
    schema: &'a dyn SchemaInfo,
}

impl<'a> PredicateCompiler<'a> {
    /// Create a compiler against the given schema metadata
    pub fn new(schema: &'a dyn SchemaInfo) -> Self {
        Self { schema }
    }

    /// Compile a criterion tree, post-order
    pub fn compile(&self, node: &SearchCriterion) -> CompileResult<Predicate> {
        let children = node
            .children
            .iter()
            .map(|child| self.compile(child))
            .collect::<CompileResult<Vec<_>>>()?;
        let subqueries = node
            .subqueries
            .iter()
            .map(|query| compile_subquery(query, self.schema))
            .collect::<CompileResult<Vec<_>>>()?;
        self.compile_node(node, children, subqueries)
    }

    /// Compile one node given its already-compiled children and subqueries
    fn compile_node(
        &self,
        node: &SearchCriterion,
        children: Vec<Predicate>,
        subqueries: Vec<CompiledQuery>,
    ) -> CompileResult<Predicate> {
        use CriterionKind::*;

        // Only Count and In own nested query descriptors; the combination
        // of any other kind with a subquery has no compilation rule.
        if !node.subqueries.is_empty() && !matches!(node.kind, Count | In) {
            return Err(CompileError::unsupported_search_type(node.kind));
        }

        match node.kind {
            And => {
                let (left, right) = take_binary(node, children)?;
                Ok(Predicate::and(vec![left, right]))
            }
            Or => {
                let (left, right) = take_binary(node, children)?;
                Ok(Predicate::or(vec![left, right]))
            }
            // TODO: give Union/Intersection real set semantics; they
            // currently compile exactly like Or/And
            Union => {
                let (left, right) = take_binary(node, children)?;
                Ok(Predicate::or(vec![left, right]))
            }
            Intersection => {
                let (left, right) = take_binary(node, children)?;
                Ok(Predicate::and(vec![left, right]))
            }
            Not => {
                let mut members = children.into_iter();
                match (members.next(), members.next()) {
                    (Some(child), None) => Ok(Predicate::Not(Box::new(child))),
                    _ => Err(arity(node, "exactly 1 child", node.children.len())),
                }
            }
            Conjunction => Ok(Predicate::and(children)),
            Disjunction => Ok(Predicate::or(children)),
            IsNull => Ok(Predicate::IsNull(single_property(node)?)),
            IsNotNull => Ok(Predicate::IsNotNull(single_property(node)?)),
            IsEmpty => Ok(Predicate::IsEmpty(single_property(node)?)),
            IsNotEmpty => Ok(Predicate::IsNotEmpty(single_property(node)?)),
            PropertyCompare => {
                expect_leaf(node)?;
                expect_params(node, 3)?;
                let relation = relation_param(node, 0)?;
                let lhs = str_param(node, 1)?;
                let rhs = str_param(node, 2)?;
                mapper::compare_properties(relation, lhs, rhs)
            }
            SimpleCompare => {
                expect_leaf(node)?;
                expect_params(node, 3)?;
                let relation = relation_param(node, 0)?;
                let property = str_param(node, 1)?;
                let value = value_param(node, 2)?;
                let ignore_case = node
                    .match_options
                    .is_some_and(|options| options.ignore_case);
                mapper::compare(relation, property, value, ignore_case)
            }
            SizeCompare => {
                expect_leaf(node)?;
                expect_params(node, 3)?;
                let relation = relation_param(node, 0)?;
                let property = str_param(node, 1)?;
                let size = int_param(node, 2)?;
                mapper::compare_size(relation, property, size)
            }
            Like | Ilike => {
                expect_leaf(node)?;
                expect_params(node, 2)?;
                let property = str_param(node, 0)?;
                let pattern = str_param(node, 1)?;
                let case_insensitive = node.kind == Ilike
                    || node
                        .match_options
                        .is_some_and(|options| options.ignore_case);
                Ok(Predicate::PatternMatch {
                    property: property.to_string(),
                    value: pattern.to_string(),
                    mode: mapper::match_mode(node.match_options.as_ref()),
                    case_insensitive,
                })
            }
            RawExpression => {
                expect_leaf(node)?;
                expect_params(node, 1)?;
                Ok(Predicate::Raw(str_param(node, 0)?.to_string()))
            }
            In => {
                expect_leaf(node)?;
                if node.parameters.is_empty() {
                    return Err(CompileError::malformed(
                        node.kind,
                        "expected a property name at parameter 0",
                    ));
                }
                let property = str_param(node, 0)?.to_string();
                let mut nested = subqueries.into_iter();
                match (nested.next(), nested.next()) {
                    (None, _) => {
                        let values = (1..node.parameters.len())
                            .map(|i| value_param(node, i))
                            .collect::<CompileResult<Vec<_>>>()?;
                        Ok(Predicate::In { property, values })
                    }
                    // Correlated set membership: project the nested query
                    // onto the same property and test membership against it
                    (Some(mut base), None) => {
                        base.projection = Some(Projection::Property(property.clone()));
                        Ok(Predicate::InSubquery {
                            property,
                            subquery: Box::new(base),
                        })
                    }
                    (Some(_), Some(_)) => Err(CompileError::malformed(
                        node.kind,
                        format!(
                            "expected at most 1 subquery, found {}",
                            node.subqueries.len()
                        ),
                    )),
                }
            }
            Between => {
                expect_leaf(node)?;
                expect_params(node, 3)?;
                let property = str_param(node, 0)?.to_string();
                let low = value_param(node, 1)?;
                let high = value_param(node, 2)?;
                Ok(Predicate::Between {
                    property,
                    low,
                    high,
                })
            }
            Count => {
                if !node.children.is_empty() {
                    return Err(arity(node, "no children", node.children.len()));
                }
                expect_params(node, 3)?;
                let mut nested = subqueries.into_iter();
                let base = match (nested.next(), nested.next()) {
                    (Some(base), None) => base,
                    _ => {
                        return Err(CompileError::malformed(
                            node.kind,
                            format!(
                                "expected exactly 1 subquery, found {}",
                                node.subqueries.len()
                            ),
                        ));
                    }
                };
                let relation = relation_param(node, 0)?;
                let value = int_param(node, 1)?;
                let distinct = bool_param(node, 2)?;
                compile_count(self.schema, node, relation, value, distinct, base)
            }
        }
    }
}

fn take_binary(
    node: &SearchCriterion,
    children: Vec<Predicate>,
) -> CompileResult<(Predicate, Predicate)> {
    let mut members = children.into_iter();
    match (members.next(), members.next(), members.next()) {
        (Some(left), Some(right), None) => Ok((left, right)),
        _ => Err(arity(node, "exactly 2 children", node.children.len())),
    }
}

fn arity(node: &SearchCriterion, expected: &str, found: usize) -> CompileError {
    CompileError::malformed(node.kind, format!("expected {expected}, found {found}"))
}

fn expect_leaf(node: &SearchCriterion) -> CompileResult<()> {
    if node.children.is_empty() {
        Ok(())
    } else {
        Err(arity(node, "no children", node.children.len()))
    }
}

fn expect_params(node: &SearchCriterion, count: usize) -> CompileResult<()> {
    if node.parameters.len() == count {
        Ok(())
    } else {
        Err(CompileError::malformed(
            node.kind,
            format!(
                "expected exactly {count} parameters, found {}",
                node.parameters.len()
            ),
        ))
    }
}

fn single_property(node: &SearchCriterion) -> CompileResult<String> {
    expect_leaf(node)?;
    expect_params(node, 1)?;
    Ok(str_param(node, 0)?.to_string())
}

fn param<'n>(node: &'n SearchCriterion, index: usize) -> CompileResult<&'n Param> {
    node.parameters.get(index).ok_or_else(|| {
        CompileError::malformed(node.kind, format!("missing parameter {index}"))
    })
}

fn str_param<'n>(node: &'n SearchCriterion, index: usize) -> CompileResult<&'n str> {
    match param(node, index)? {
        Param::Str(value) => Ok(value),
        other => Err(CompileError::malformed(
            node.kind,
            format!("expected a string at parameter {index}, found {other:?}"),
        )),
    }
}

fn relation_param(node: &SearchCriterion, index: usize) -> CompileResult<critq_ast::Relation> {
    match param(node, index)? {
        Param::Relation(relation) => Ok(*relation),
        other => Err(CompileError::malformed(
            node.kind,
            format!("expected a relation at parameter {index}, found {other:?}"),
        )),
    }
}

fn int_param(node: &SearchCriterion, index: usize) -> CompileResult<i64> {
    match param(node, index)? {
        Param::Int(value) => Ok(*value),
        other => Err(CompileError::malformed(
            node.kind,
            format!("expected an integer at parameter {index}, found {other:?}"),
        )),
    }
}

fn bool_param(node: &SearchCriterion, index: usize) -> CompileResult<bool> {
    match param(node, index)? {
        Param::Bool(value) => Ok(*value),
        other => Err(CompileError::malformed(
            node.kind,
            format!("expected a boolean at parameter {index}, found {other:?}"),
        )),
    }
}

fn value_param(node: &SearchCriterion, index: usize) -> CompileResult<Value> {
    match param(node, index)? {
        Param::Str(value) => Ok(Value::Str(value.clone())),
        Param::Int(value) => Ok(Value::Int(*value)),
        Param::Float(value) => Ok(Value::Float(*value)),
        Param::Bool(value) => Ok(Value::Bool(*value)),
        Param::Relation(relation) => Err(CompileError::malformed(
            node.kind,
            format!("expected a literal value at parameter {index}, found relation '{relation}'"),
        )),
    }
}
