//! Named generator functions.

use rand::rngs::StdRng;
use rand::SeedableRng;
use schema_core::{GenerationError, Invocation, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Mutable state a provider hands to its generators.
pub struct GeneratorState {
    /// Seeded random number generator for reproducibility
    pub rng: StdRng,
    /// Running counters for `increment`, keyed by accumulator name
    pub accumulators: HashMap<String, i64>,
}

impl GeneratorState {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            accumulators: HashMap::new(),
        }
    }
}

impl fmt::Debug for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorState")
            .field("accumulators", &self.accumulators)
            .finish_non_exhaustive()
    }
}

/// Signature of a registered generator.
pub type GeneratorFn =
    dyn Fn(&mut GeneratorState, &Invocation<'_>) -> Result<Value, GenerationError> + Send + Sync;

/// Mapping from generator name to generator function.
///
/// Registries are plain values: build one during application setup, register
/// what you need and hand it to providers behind an `Arc`.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<String, Arc<GeneratorFn>>,
}

impl GeneratorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in generator registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::generators::register_builtins(&mut registry);
        registry
    }

    /// Register `generator` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, generator: F) -> &mut Self
    where
        F: Fn(&mut GeneratorState, &Invocation<'_>) -> Result<Value, GenerationError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self
            .generators
            .insert(name.clone(), Arc::new(generator))
            .is_some()
        {
            tracing::debug!(generator = %name, "Replaced registered generator");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<GeneratorFn>> {
        self.generators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.names())
            .finish()
    }
}
