//! Query descriptors

use crate::SearchCriterion;
use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order (default)
    #[default]
    Ascending,
    /// Descending order
    Descending,
}

impl SortDirection {
    /// Check if this is descending
    pub const fn is_descending(&self) -> bool {
        matches!(self, Self::Descending)
    }
}

/// One sort key; first-listed is the primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Property to sort by
    pub property: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortCriterion {
    /// Ascending sort on a property
    pub fn ascending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on a property
    pub fn descending(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// A join alias declaration, eagerly fetched when applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAlias {
    /// Association path to join
    pub join_path: String,
    /// Alias name introduced for the joined association
    pub alias: String,
}

impl QueryAlias {
    /// Create a new alias declaration
    pub fn new(join_path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            join_path: join_path.into(),
            alias: alias.into(),
        }
    }
}

/// A full query descriptor, root or nested.
///
/// Aliases are scoped to this descriptor only; nested subquery descriptors
/// do not inherit them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Target collection/table to query against (resolved externally)
    pub root_object: Option<String>,
    /// Predicate tree root
    pub root_criterion: Option<SearchCriterion>,
    /// Ordered join alias declarations
    pub aliases: Vec<QueryAlias>,
    /// Ordered sort keys
    pub sorts: Vec<SortCriterion>,
    /// Zero-based index of the first result to return
    pub first_result: Option<u64>,
    /// Maximum number of results to return
    pub max_results: Option<u64>,
    /// De-duplicate results by root identity after compilation
    pub distinct: bool,
}

impl SearchQuery {
    /// Create a query descriptor against a root object
    pub fn new(root_object: impl Into<String>) -> Self {
        Self {
            root_object: Some(root_object.into()),
            ..Self::default()
        }
    }

    /// Set the predicate tree root
    pub fn with_criterion(mut self, criterion: SearchCriterion) -> Self {
        self.root_criterion = Some(criterion);
        self
    }

    /// Add a join alias declaration
    pub fn with_alias(mut self, join_path: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.push(QueryAlias::new(join_path, alias));
        self
    }

    /// Add a sort key
    pub fn with_sort(mut self, sort: SortCriterion) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Set the first-result offset
    pub fn with_first_result(mut self, first: u64) -> Self {
        self.first_result = Some(first);
        self
    }

    /// Set the result limit
    pub fn with_max_results(mut self, max: u64) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Request root-identity de-duplication
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }
}
