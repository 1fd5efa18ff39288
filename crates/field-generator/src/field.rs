//! Field providers backed by a [`GeneratorRegistry`].

use crate::registry::{GeneratorRegistry, GeneratorState};
use schema_core::{
    FieldKind, FieldProvider, GenerationError, Invocation, Kwargs, Leaf, SchemaError, Value,
};
use std::sync::{Arc, Mutex, PoisonError};

/// Number of values a [`Fieldset`] produces when `i` is not given.
pub const DEFAULT_FIELDSET_SIZE: i64 = 10;

/// Argument naming how many values a [`Fieldset`] produces.
pub const FIELDSET_SIZE_ARG: &str = "i";

/// Largest accepted [`Fieldset`] size.
pub const MAX_FIELDSET_SIZE: i64 = 100_000;

/// Provider that dispatches generator names to a registry.
///
/// Each provider owns its own seeded state, so two providers built with the
/// same registry and seed produce the same sequence of values.
#[derive(Debug)]
pub struct Field {
    kind: FieldKind,
    registry: Arc<GeneratorRegistry>,
    state: Mutex<GeneratorState>,
}

impl Field {
    pub fn new(kind: FieldKind, registry: Arc<GeneratorRegistry>, seed: u64) -> Self {
        Self {
            kind,
            registry,
            state: Mutex::new(GeneratorState::new(seed)),
        }
    }

    /// Provider for leaves evaluated in the first pass.
    pub fn eager(registry: Arc<GeneratorRegistry>, seed: u64) -> Self {
        Self::new(FieldKind::Eager, registry, seed)
    }

    /// Provider for leaves that read the eager results.
    pub fn lazy(registry: Arc<GeneratorRegistry>, seed: u64) -> Self {
        Self::new(FieldKind::Lazy, registry, seed)
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    fn call(&self, call: &Invocation<'_>) -> Result<Value, GenerationError> {
        let generator = self
            .registry
            .get(call.generator())
            .ok_or_else(|| GenerationError::UnknownGenerator(call.generator().to_string()))?;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        generator(&mut *state, call).map(|value| call.apply_key(value))
    }
}

impl FieldProvider for Field {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn invoke(&self, call: &Invocation<'_>) -> Result<Value, GenerationError> {
        self.call(call)
    }
}

/// Eager provider that calls a generator `i` times and returns the list.
#[derive(Debug)]
pub struct Fieldset {
    field: Field,
}

impl Fieldset {
    pub fn new(registry: Arc<GeneratorRegistry>, seed: u64) -> Self {
        Self {
            field: Field::eager(registry, seed),
        }
    }
}

impl FieldProvider for Fieldset {
    fn kind(&self) -> FieldKind {
        FieldKind::Eager
    }

    fn invoke(&self, call: &Invocation<'_>) -> Result<Value, GenerationError> {
        let size = call.get_i64(FIELDSET_SIZE_ARG)?.unwrap_or(DEFAULT_FIELDSET_SIZE);
        if !(1..=MAX_FIELDSET_SIZE).contains(&size) {
            return Err(GenerationError::failed(
                call.generator(),
                format!("fieldset size must be between 1 and {MAX_FIELDSET_SIZE}, got {size}"),
            ));
        }

        let mut kwargs = call.kwargs().clone();
        kwargs.shift_remove(FIELDSET_SIZE_ARG);
        let inner = call.with_kwargs(&kwargs);

        (0..size)
            .map(|_| self.field.call(&inner))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }
}

/// Convenience for building leaves on a shared provider.
pub trait LeafExt {
    /// Leaf with static arguments.
    fn leaf(&self, generator: &str, kwargs: Kwargs) -> Result<Leaf, SchemaError>;

    /// Leaf with static arguments whose values are passed through `key`.
    ///
    /// On a [`Fieldset`] the key is applied to each item.
    fn leaf_with_key<F>(
        &self,
        generator: &str,
        kwargs: Kwargs,
        key: F,
    ) -> Result<Leaf, SchemaError>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static;

    /// Leaf without arguments.
    fn bare(&self, generator: &str) -> Leaf;
}

impl<P: FieldProvider + 'static> LeafExt for Arc<P> {
    fn leaf(&self, generator: &str, kwargs: Kwargs) -> Result<Leaf, SchemaError> {
        Leaf::new(self.clone(), generator, kwargs)
    }

    fn leaf_with_key<F>(
        &self,
        generator: &str,
        kwargs: Kwargs,
        key: F,
    ) -> Result<Leaf, SchemaError>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Ok(self.leaf(generator, kwargs)?.with_key(key))
    }

    fn bare(&self, generator: &str) -> Leaf {
        Leaf::bare(self.clone(), generator)
    }
}
