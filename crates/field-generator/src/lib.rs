//! Field providers and built-in generators for schema-eval.
//!
//! A [`GeneratorRegistry`] maps generator names to functions. Providers
//! ([`Field`], [`Fieldset`]) own a registry handle plus their own seeded
//! state, and are what schema leaves are bound to.
//!
//! # Example
//!
//! ```rust
//! use field_generator::{Field, GeneratorRegistry, LeafExt};
//! use schema_core::{EvaluatedSchema, Kwargs, Schema, Value};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(GeneratorRegistry::with_builtins());
//! let eager = Arc::new(Field::eager(registry.clone(), 42));
//! let lazy = Arc::new(Field::lazy(registry, 44));
//!
//! let domains = Kwargs::from([("domains".to_string(), Value::from(vec!["example.org"]))]);
//! let owner = Schema::new()
//!     .leaf("email", lazy.leaf("custom_email", domains).unwrap())
//!     .leaf("creator", eager.bare("full_name"));
//! let schema = Schema::new()
//!     .leaf("pk", eager.bare("increment"))
//!     .group("owner", owner);
//!
//! let row = EvaluatedSchema::new(&schema).create().unwrap();
//! assert_eq!(row["pk"], Value::Int(1));
//! ```

pub mod field;
pub mod generators;
pub mod registry;

use schema_core::SchemaLoader;
use std::sync::Arc;

// Re-exports for convenience
pub use field::{
    Field, Fieldset, LeafExt, DEFAULT_FIELDSET_SIZE, FIELDSET_SIZE_ARG, MAX_FIELDSET_SIZE,
};
pub use generators::register_builtins;
pub use registry::{GeneratorFn, GeneratorRegistry, GeneratorState};

/// Provider name for [`Fieldset`] leaves in YAML schemas.
pub const FIELDSET_PROVIDER: &str = "fieldset";

/// Provider name for lazy [`Field`] leaves in YAML schemas.
pub const LAZY_PROVIDER: &str = "lazy";

/// Loader with the standard providers registered.
///
/// `field` is an eager [`Field`], `fieldset` a [`Fieldset`] and `lazy` a lazy
/// [`Field`]. Each gets its own seed derived from `seed`.
pub fn standard_loader(registry: Arc<GeneratorRegistry>, seed: u64) -> SchemaLoader {
    SchemaLoader::new()
        .provider(
            schema_core::DEFAULT_PROVIDER,
            Arc::new(Field::eager(registry.clone(), seed)),
        )
        .provider(
            FIELDSET_PROVIDER,
            Arc::new(Fieldset::new(registry.clone(), seed.wrapping_add(1))),
        )
        .provider(
            LAZY_PROVIDER,
            Arc::new(Field::lazy(registry, seed.wrapping_add(2))),
        )
}
