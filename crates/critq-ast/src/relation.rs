//! Comparison relations and string match options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract comparison relation between a property and a value (or another
/// property, or a collection size — the compiler decides the flavor).
///
/// `Like` is only meaningful for literal string comparisons; the other
/// mapping contexts reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
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
    /// Pattern match (literal string comparisons only)
    Like,
}

impl Relation {
    /// Operator token used in rendered output
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a string pattern is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Match the entire value (no anchor)
    #[default]
    Exact,
    /// Match values beginning with the pattern
    StartsWith,
    /// Match values ending with the pattern
    EndsWith,
    /// Match values containing the pattern
    Contains,
}

impl MatchMode {
    /// Apply the anchor wildcards to a raw pattern value
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Exact => value.to_string(),
            Self::StartsWith => format!("{value}%"),
            Self::EndsWith => format!("%{value}"),
            Self::Contains => format!("%{value}%"),
        }
    }
}

/// Optional flags attached to comparison leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Compare case-insensitively (meaningful for string literals only;
    /// no type check is performed at this layer)
    pub ignore_case: bool,
    /// Pattern anchoring for string-match criteria
    pub match_mode: Option<MatchMode>,
}

impl MatchOptions {
    /// Options requesting a case-insensitive comparison
    pub const fn case_insensitive() -> Self {
        Self {
            ignore_case: true,
            match_mode: None,
        }
    }

    /// Options carrying a pattern anchor mode
    pub const fn with_mode(mode: MatchMode) -> Self {
        Self {
            ignore_case: false,
            match_mode: Some(mode),
        }
    }

    /// Set the ignore-case flag
    pub const fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }
}
