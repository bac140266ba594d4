//! Predicate tree nodes

use crate::{MatchMode, MatchOptions, Relation, SearchQuery};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a [`SearchCriterion`] node.
///
/// The set and order of `parameters`, the child arity, and the subquery
/// cardinality are fixed per kind; the compiler rejects any other shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionKind {
    /// Logical AND of exactly two children
    And,
    /// Logical OR of exactly two children
    Or,
    /// Negation of exactly one child
    Not,
    /// N-ary AND fold over all children
    Conjunction,
    /// N-ary OR fold over all children
    Disjunction,
    /// Aggregate-count constraint over one subquery;
    /// parameters `[relation, value, distinct]`
    Count,
    /// Set membership; parameter 0 is the property, the rest are literal
    /// values unless a subquery is attached
    In,
    /// Inclusive range; parameters `[property, low, high]`
    Between,
    /// Property is null; parameter `[property]`
    IsNull,
    /// Property is not null; parameter `[property]`
    IsNotNull,
    /// Collection property is empty; parameter `[property]`
    IsEmpty,
    /// Collection property is not empty; parameter `[property]`
    IsNotEmpty,
    /// Property-to-property comparison; parameters `[relation, lhs, rhs]`
    PropertyCompare,
    /// Property-to-literal comparison; parameters `[relation, property, value]`
    SimpleCompare,
    /// Collection-cardinality comparison; parameters `[relation, property, size]`
    SizeCompare,
    /// Case-sensitive string match; parameters `[property, pattern]`
    Like,
    /// Case-insensitive string match; parameters `[property, pattern]`
    Ilike,
    /// Verbatim target-engine fragment; parameter `[expression]`.
    /// Escape/injection safety is the caller's responsibility.
    RawExpression,
    /// Set union of exactly two children
    Union,
    /// Set intersection of exactly two children
    Intersection,
}

impl CriterionKind {
    /// Human-readable kind name, used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Conjunction => "Conjunction",
            Self::Disjunction => "Disjunction",
            Self::Count => "Count",
            Self::In => "In",
            Self::Between => "Between",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
            Self::IsEmpty => "IsEmpty",
            Self::IsNotEmpty => "IsNotEmpty",
            Self::PropertyCompare => "PropertyCompare",
            Self::SimpleCompare => "SimpleCompare",
            Self::SizeCompare => "SizeCompare",
            Self::Like => "Like",
            Self::Ilike => "Ilike",
            Self::RawExpression => "RawExpression",
            Self::Union => "Union",
            Self::Intersection => "Intersection",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positional, typed scalar parameter of a criterion node.
///
/// Property names travel as `Str` parameters; the position decides the role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Param {
    /// String value or property name
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Comparison relation
    Relation(Relation),
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Relation> for Param {
    fn from(r: Relation) -> Self {
        Self::Relation(r)
    }
}

/// One node of the search predicate tree.
///
/// Trees are acyclic and finite; `parameters`, `children`, and `subqueries`
/// are positionally ordered and the order is semantically load-bearing.
/// Nodes are immutable once built and may be shared across many builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriterion {
    /// Node kind; fixes the expected parameter/child/subquery shape
    pub kind: CriterionKind,
    /// Positional typed scalar parameters
    pub parameters: Vec<Param>,
    /// Ordered sub-predicates
    pub children: Vec<SearchCriterion>,
    /// Nested query descriptors (at most one in this design)
    pub subqueries: Vec<SearchQuery>,
    /// Optional comparison flags
    pub match_options: Option<MatchOptions>,
}

impl SearchCriterion {
    /// Create a bare node of the given kind
    pub fn new(kind: CriterionKind) -> Self {
        Self {
            kind,
            parameters: Vec::new(),
            children: Vec::new(),
            subqueries: Vec::new(),
            match_options: None,
        }
    }

    /// Logical AND of two criteria
    pub fn and(left: Self, right: Self) -> Self {
        Self::binary(CriterionKind::And, left, right)
    }

    /// Logical OR of two criteria
    pub fn or(left: Self, right: Self) -> Self {
        Self::binary(CriterionKind::Or, left, right)
    }

    /// Set union of two criteria
    pub fn union(left: Self, right: Self) -> Self {
        Self::binary(CriterionKind::Union, left, right)
    }

    /// Set intersection of two criteria
    pub fn intersection(left: Self, right: Self) -> Self {
        Self::binary(CriterionKind::Intersection, left, right)
    }

    /// Negation of one criterion
    pub fn not(child: Self) -> Self {
        let mut node = Self::new(CriterionKind::Not);
        node.children.push(child);
        node
    }

    /// N-ary AND fold over all children
    pub fn conjunction(children: Vec<Self>) -> Self {
        let mut node = Self::new(CriterionKind::Conjunction);
        node.children = children;
        node
    }

    /// N-ary OR fold over all children
    pub fn disjunction(children: Vec<Self>) -> Self {
        let mut node = Self::new(CriterionKind::Disjunction);
        node.children = children;
        node
    }

    /// Property is null
    pub fn is_null(property: impl Into<String>) -> Self {
        Self::unary_property(CriterionKind::IsNull, property)
    }

    /// Property is not null
    pub fn is_not_null(property: impl Into<String>) -> Self {
        Self::unary_property(CriterionKind::IsNotNull, property)
    }

    /// Collection property is empty
    pub fn is_empty(property: impl Into<String>) -> Self {
        Self::unary_property(CriterionKind::IsEmpty, property)
    }

    /// Collection property is not empty
    pub fn is_not_empty(property: impl Into<String>) -> Self {
        Self::unary_property(CriterionKind::IsNotEmpty, property)
    }

    /// Property-to-literal comparison
    pub fn simple_compare(
        relation: Relation,
        property: impl Into<String>,
        value: impl Into<Param>,
    ) -> Self {
        let mut node = Self::new(CriterionKind::SimpleCompare);
        node.parameters = vec![
            Param::Relation(relation),
            Param::Str(property.into()),
            value.into(),
        ];
        node
    }

    /// Property-to-property comparison
    pub fn property_compare(
        relation: Relation,
        lhs: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(CriterionKind::PropertyCompare);
        node.parameters = vec![
            Param::Relation(relation),
            Param::Str(lhs.into()),
            Param::Str(rhs.into()),
        ];
        node
    }

    /// Collection-cardinality comparison
    pub fn size_compare(relation: Relation, property: impl Into<String>, size: i64) -> Self {
        let mut node = Self::new(CriterionKind::SizeCompare);
        node.parameters = vec![
            Param::Relation(relation),
            Param::Str(property.into()),
            Param::Int(size),
        ];
        node
    }

    /// Case-sensitive string match
    pub fn like(property: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::string_match(CriterionKind::Like, property, pattern)
    }

    /// Case-insensitive string match
    pub fn ilike(property: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::string_match(CriterionKind::Ilike, property, pattern)
    }

    /// String match with an explicit anchor mode
    pub fn like_mode(
        property: impl Into<String>,
        pattern: impl Into<String>,
        mode: MatchMode,
    ) -> Self {
        Self::string_match(CriterionKind::Like, property, pattern)
            .with_match_options(MatchOptions::with_mode(mode))
    }

    /// Verbatim target-engine fragment
    pub fn raw(expression: impl Into<String>) -> Self {
        let mut node = Self::new(CriterionKind::RawExpression);
        node.parameters = vec![Param::Str(expression.into())];
        node
    }

    /// Membership in a literal value list
    pub fn in_values(property: impl Into<String>, values: Vec<Param>) -> Self {
        let mut node = Self::new(CriterionKind::In);
        node.parameters = vec![Param::Str(property.into())];
        node.parameters.extend(values);
        node
    }

    /// Membership in the projection of a nested query on the same property
    pub fn in_subquery(property: impl Into<String>, subquery: SearchQuery) -> Self {
        let mut node = Self::new(CriterionKind::In);
        node.parameters = vec![Param::Str(property.into())];
        node.subqueries.push(subquery);
        node
    }

    /// Inclusive range
    pub fn between(
        property: impl Into<String>,
        low: impl Into<Param>,
        high: impl Into<Param>,
    ) -> Self {
        let mut node = Self::new(CriterionKind::Between);
        node.parameters = vec![Param::Str(property.into()), low.into(), high.into()];
        node
    }

    /// Aggregate-count constraint over a base query:
    /// `count[ distinct](id) <relation> value` per root-identity group
    pub fn count(relation: Relation, value: i64, distinct: bool, base: SearchQuery) -> Self {
        let mut node = Self::new(CriterionKind::Count);
        node.parameters = vec![
            Param::Relation(relation),
            Param::Int(value),
            Param::Bool(distinct),
        ];
        node.subqueries.push(base);
        node
    }

    /// Attach match options to this node
    pub fn with_match_options(mut self, options: MatchOptions) -> Self {
        self.match_options = Some(options);
        self
    }

    fn binary(kind: CriterionKind, left: Self, right: Self) -> Self {
        let mut node = Self::new(kind);
        node.children.push(left);
        node.children.push(right);
        node
    }

    fn unary_property(kind: CriterionKind, property: impl Into<String>) -> Self {
        let mut node = Self::new(kind);
        node.parameters = vec![Param::Str(property.into())];
        node
    }

    fn string_match(
        kind: CriterionKind,
        property: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(kind);
        node.parameters = vec![Param::Str(property.into()), Param::Str(pattern.into())];
        node
    }
}
