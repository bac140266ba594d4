//! Schema metadata abstraction
//!
//! The compiler resolves root object names and identifier/column metadata
//! through the [`SchemaInfo`] trait, supplied by the embedding persistence
//! layer. [`MemorySchema`] is an in-memory registry implementation used by
//! embedders and the test suite.

mod info;
mod registry;

pub use info::*;
pub use registry::*;
