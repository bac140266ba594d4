//! Top-level query assembly
//!
//! Orchestrates one build: validates the descriptor, resolves the root
//! object, applies aliases, compiles the predicate tree, composes the
//! projection list, and applies sort order, pagination, and the distinct
//! transform.

use crate::error::{CompileError, CompileResult};
use crate::predicate::PredicateCompiler;
use crate::projection;
use critq_ast::SearchQuery;
use critq_schema::SchemaInfo;
use critq_target::{CompiledAlias, CompiledQuery, CompiledSort};

/// Assembles one compiled query from one descriptor.
///
/// `build` consumes the assembler, so an instance serves exactly one build;
/// the input descriptor and schema are borrowed read-only and may be shared
/// across any number of assemblers.
pub struct QueryAssembler<'a> {
    query: &'a SearchQuery,
    schema: &'a dyn SchemaInfo,
    package_hint: Option<&'a str>,
}

impl<'a> QueryAssembler<'a> {
    /// Create an assembler for a query descriptor
    pub fn new(query: &'a SearchQuery, schema: &'a dyn SchemaInfo) -> Self {
        Self {
            query,
            schema,
            package_hint: None,
        }
    }

    /// Disambiguate root-type resolution with a package hint
    pub fn with_package_hint(mut self, package: &'a str) -> Self {
        self.package_hint = Some(package);
        self
    }

    /// Build the compiled query
    pub fn build(self) -> CompileResult<CompiledQuery> {
        let root_object = self
            .query
            .root_object
            .as_deref()
            .ok_or(CompileError::MissingRootObject)?;
        let criterion = self
            .query
            .root_criterion
            .as_ref()
            .ok_or(CompileError::MissingRootObject)?;
        let handle = self
            .schema
            .resolve_root(root_object, self.package_hint)
            .ok_or_else(|| CompileError::missing_metadata(root_object))?;

        let mut compiled = CompiledQuery::new(handle.qualified_name());

        // Declared order, no de-duplication; re-declarations are the
        // engine's concern
        for alias in &self.query.aliases {
            compiled.aliases.push(CompiledAlias {
                join_path: alias.join_path.clone(),
                alias: alias.alias.clone(),
                eager_fetch: true,
            });
        }

        compiled.predicate = Some(PredicateCompiler::new(self.schema).compile(criterion)?);
        compiled.projection = projection::compose(criterion);

        for sort in &self.query.sorts {
            compiled.sorts.push(CompiledSort {
                property: sort.property.clone(),
                direction: sort.direction,
            });
        }
        compiled.first_result = self.query.first_result;
        compiled.max_results = self.query.max_results;
        compiled.distinct = self.query.distinct;

        Ok(compiled)
    }
}
