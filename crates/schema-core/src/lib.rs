//! Core of the schema-eval framework.
//!
//! A [`Schema`] is a nested tree of groups and leaves. Each leaf binds a
//! generator name and static arguments to a [`FieldProvider`], and is tagged
//! [`FieldKind::Eager`] or [`FieldKind::Lazy`] by that provider.
//!
//! # Architecture
//!
//! ```text
//! Schema (builder or YAML)
//!        │
//!        ▼  classify::extract
//! ┌──────────────┐   ┌─────────────┐
//! │ eager schema │   │ lazy schema │
//! └──────┬───────┘   └──────┬──────┘
//!        │ pass 1           │ pass 2 (eager results as context)
//!        ▼                  ▼
//!  eager results ──────► lazy results
//!        │                  │
//!        └────── merge ─────┘
//!                 │
//!                 ▼
//!            ResultTree
//! ```
//!
//! # Example
//!
//! ```rust
//! use schema_core::{EvaluatedSchema, FieldKind, FieldProvider, GenerationError, Invocation, Leaf, Schema, Value};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Constant(FieldKind);
//!
//! impl FieldProvider for Constant {
//!     fn kind(&self) -> FieldKind {
//!         self.0
//!     }
//!
//!     fn invoke(&self, call: &Invocation<'_>) -> Result<Value, GenerationError> {
//!         match call.generator() {
//!             "name" => Ok(Value::from("Ada Lovelace")),
//!             "shout" => Ok(Value::from(call.lookup("name")?.to_string().to_uppercase())),
//!             other => Err(GenerationError::UnknownGenerator(other.to_string())),
//!         }
//!     }
//! }
//!
//! let schema = Schema::new()
//!     .leaf("loud", Leaf::bare(Arc::new(Constant(FieldKind::Lazy)), "shout"))
//!     .leaf("name", Leaf::bare(Arc::new(Constant(FieldKind::Eager)), "name"));
//!
//! let row = EvaluatedSchema::new(&schema).create().unwrap();
//! assert_eq!(row["loud"], Value::from("ADA LOVELACE"));
//! ```

pub mod classify;
pub mod error;
pub mod evaluate;
pub mod loader;
pub mod merge;
pub mod schema;
pub mod value;

// Re-exports for convenience
pub use classify::extract;
pub use error::{EvaluationError, GenerationError, SchemaError};
pub use evaluate::{EvaluatedSchema, Rows};
pub use loader::{SchemaLoader, DEFAULT_PROVIDER};
pub use merge::{merge, merge_checked};
pub use schema::{
    FieldKind, FieldProvider, Invocation, KeyFn, Leaf, Schema, SchemaNode, EAGER_CONTEXT_ARG,
};
pub use value::{lookup, Kwargs, ResultTree, Value};
