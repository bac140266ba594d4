//! Schema metadata trait

use serde::{Deserialize, Serialize};

/// A resolved root type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHandle {
    /// Unqualified type name
    pub name: String,
    /// Optional package/namespace the type lives in
    pub package: Option<String>,
}

impl TypeHandle {
    /// Create an unqualified type handle
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
        }
    }

    /// Create a type handle inside a package
    pub fn in_package(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: Some(package.into()),
        }
    }

    /// Fully qualified name, `package.Name` when a package is known
    pub fn qualified_name(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Identifier/type metadata lookup, supplied by the persistence layer.
///
/// Lookups are synchronous and side-effect-free from the compiler's point
/// of view. Implementations must be shareable across builds.
pub trait SchemaInfo: Send + Sync {
    /// Resolve a root object name to its type, optionally disambiguated by
    /// a package hint
    fn resolve_root(&self, root_object: &str, package_hint: Option<&str>) -> Option<TypeHandle>;

    /// Name of the identifier property of a root object
    fn identifier_property(&self, root_object: &str) -> Option<String>;

    /// Whether the identifier is a composite (multi-column) key
    fn is_composite_identifier(&self, root_object: &str) -> bool;

    /// Component property names of a composite identifier, in column order.
    /// Empty for simple identifiers and unknown root objects.
    fn component_properties(&self, root_object: &str) -> Vec<String>;
}
