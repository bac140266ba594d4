//! In-memory schema registry

use crate::{SchemaInfo, TypeHandle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Metadata for one registered entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    /// Optional package/namespace
    pub package: Option<String>,
    /// Identifier property name
    pub identifier: String,
    /// Component property names when the identifier is composite;
    /// empty for simple identifiers
    pub components: Vec<String>,
}

impl EntityInfo {
    /// Entity with a simple (single-column) identifier
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            package: None,
            identifier: identifier.into(),
            components: Vec::new(),
        }
    }

    /// Entity with a composite identifier and its component columns
    pub fn composite(
        identifier: impl Into<String>,
        components: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            package: None,
            identifier: identifier.into(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Place the entity in a package
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// In-memory [`SchemaInfo`] implementation backed by an insertion-ordered map
#[derive(Debug, Clone, Default)]
pub struct MemorySchema {
    entities: IndexMap<String, EntityInfo>,
}

impl MemorySchema {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its root object name
    pub fn register(mut self, root_object: impl Into<String>, info: EntityInfo) -> Self {
        self.entities.insert(root_object.into(), info);
        self
    }

    /// Look up a registered entity
    pub fn entity(&self, root_object: &str) -> Option<&EntityInfo> {
        self.entities.get(root_object)
    }
}

impl SchemaInfo for MemorySchema {
    fn resolve_root(&self, root_object: &str, package_hint: Option<&str>) -> Option<TypeHandle> {
        let info = self.entities.get(root_object)?;
        let package = info
            .package
            .as_deref()
            .or(package_hint)
            .map(ToString::to_string);
        Some(TypeHandle {
            name: root_object.to_string(),
            package,
        })
    }

    fn identifier_property(&self, root_object: &str) -> Option<String> {
        self.entities
            .get(root_object)
            .map(|info| info.identifier.clone())
    }

    fn is_composite_identifier(&self, root_object: &str) -> bool {
        self.entities
            .get(root_object)
            .is_some_and(|info| !info.components.is_empty())
    }

    fn component_properties(&self, root_object: &str) -> Vec<String> {
        self.entities
            .get(root_object)
            .map(|info| info.components.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn schema() -> MemorySchema {
        MemorySchema::new()
            .register("Person", EntityInfo::new("id").in_package("demo.model"))
            .register(
                "Enrollment",
                EntityInfo::composite("pk", ["pk.personId", "pk.studyId"]),
            )
    }

    #[test]
    fn resolves_registered_root() {
        let handle = schema().resolve_root("Person", None).unwrap();
        assert_eq!(handle.qualified_name(), "demo.model.Person");
    }

    #[test]
    fn package_hint_applies_when_unregistered_package() {
        let handle = schema().resolve_root("Enrollment", Some("demo.model")).unwrap();
        assert_eq!(handle.qualified_name(), "demo.model.Enrollment");
    }

    #[test]
    fn unknown_root_is_none() {
        assert!(schema().resolve_root("Nope", None).is_none());
        assert!(schema().identifier_property("Nope").is_none());
        assert!(!schema().is_composite_identifier("Nope"));
        assert!(schema().component_properties("Nope").is_empty());
    }

    #[test]
    fn composite_metadata() {
        let s = schema();
        assert!(s.is_composite_identifier("Enrollment"));
        assert_eq!(
            s.component_properties("Enrollment"),
            vec!["pk.personId".to_string(), "pk.studyId".to_string()]
        );
        assert_eq!(s.identifier_property("Enrollment").unwrap(), "pk");
    }
}
