//! Compiled predicate/projection/query model

use critq_ast::{MatchMode, SortDirection};
use serde::{Deserialize, Serialize};

/// Binary comparison operator in the compiled representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
}

impl CompareOp {
    /// Operator token used in rendered output
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }
}

/// A literal value in the compiled representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// String literal
    Str(String),
    /// Integer literal
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// Boolean literal
    Bool(bool),
}

/// Combination mode of a [`Predicate::Junction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JunctionKind {
    /// All members must hold; empty junction is always true
    And,
    /// At least one member must hold; empty junction is always false
    Or,
}

/// One node of the compiled predicate tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// AND/OR combination of member predicates
    Junction {
        /// Combination mode
        kind: JunctionKind,
        /// Member predicates, in compilation order
        members: Vec<Predicate>,
    },
    /// Negation
    Not(Box<Predicate>),
    /// Property-to-literal comparison
    Comparison {
        /// Property name
        property: String,
        /// Comparison operator
        op: CompareOp,
        /// Literal operand
        value: Value,
        /// Compare case-insensitively (string literals)
        ignore_case: bool,
    },
    /// Property-to-property comparison
    PropertyComparison {
        /// Comparison operator
        op: CompareOp,
        /// Left-hand property
        lhs: String,
        /// Right-hand property
        rhs: String,
    },
    /// Collection-cardinality comparison
    SizeComparison {
        /// Collection property
        property: String,
        /// Comparison operator
        op: CompareOp,
        /// Cardinality operand
        size: i64,
    },
    /// Anchored string pattern match
    PatternMatch {
        /// Property name
        property: String,
        /// Raw pattern value, before anchoring
        value: String,
        /// Anchor mode
        mode: MatchMode,
        /// Match case-insensitively
        case_insensitive: bool,
    },
    /// Property is null
    IsNull(String),
    /// Property is not null
    IsNotNull(String),
    /// Collection property is empty
    IsEmpty(String),
    /// Collection property is not empty
    IsNotEmpty(String),
    /// Membership in a literal value list
    In {
        /// Property name
        property: String,
        /// Literal values
        values: Vec<Value>,
    },
    /// Membership in the projection of a correlated subquery
    InSubquery {
        /// Property name
        property: String,
        /// Compiled nested query; its projection decides the membership column
        subquery: Box<CompiledQuery>,
    },
    /// Inclusive range
    Between {
        /// Property name
        property: String,
        /// Low bound
        low: Value,
        /// High bound
        high: Value,
    },
    /// Verbatim target-engine fragment
    Raw(String),
}

impl Predicate {
    /// AND junction over members
    pub fn and(members: Vec<Predicate>) -> Self {
        Self::Junction {
            kind: JunctionKind::And,
            members,
        }
    }

    /// OR junction over members
    pub fn or(members: Vec<Predicate>) -> Self {
        Self::Junction {
            kind: JunctionKind::Or,
            members,
        }
    }
}

/// A projection attached to a compiled query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Single property column
    Property(String),
    /// Ordered projection list
    List(Vec<Projection>),
    /// Group-by/having projection emulating an aggregate filter:
    /// group rows by the identifier columns and keep groups satisfying
    /// `count[ distinct](aggregate_property) <op> value`
    GroupHaving {
        /// Grouping columns; one per identifier component
        group_properties: Vec<String>,
        /// Count distinct values rather than rows
        distinct: bool,
        /// Property the aggregate is computed over
        aggregate_property: String,
        /// Aggregate comparison operator
        op: CompareOp,
        /// Aggregate comparison operand
        value: i64,
    },
}

/// A compiled join alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledAlias {
    /// Association path joined
    pub join_path: String,
    /// Alias name
    pub alias: String,
    /// Fetch the association eagerly
    pub eager_fetch: bool,
}

/// A compiled sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSort {
    /// Property sorted by
    pub property: String,
    /// Sort direction
    pub direction: SortDirection,
}

/// The compiled query handed to the downstream execution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledQuery {
    /// Fully qualified root object name
    pub root_object: String,
    /// Join aliases, in declaration order
    pub aliases: Vec<CompiledAlias>,
    /// Compiled predicate tree
    pub predicate: Option<Predicate>,
    /// Explicit projection, if any
    pub projection: Option<Projection>,
    /// Sort keys, primary first
    pub sorts: Vec<CompiledSort>,
    /// Zero-based offset of the first result
    pub first_result: Option<u64>,
    /// Maximum number of results
    pub max_results: Option<u64>,
    /// De-duplicate results by root identity
    pub distinct: bool,
}

impl CompiledQuery {
    /// Create an empty compiled query bound to a root object
    pub fn new(root_object: impl Into<String>) -> Self {
        Self {
            root_object: root_object.into(),
            aliases: Vec::new(),
            predicate: None,
            projection: None,
            sorts: Vec::new(),
            first_result: None,
            max_results: None,
            distinct: false,
        }
    }
}
