//! Schema trees: groups of leaves, each leaf bound to a field provider.
//!
//! ## Calling convention
//!
//! A leaf is evaluated by calling [`FieldProvider::invoke`] with an
//! [`Invocation`] carrying the generator name and the leaf's static
//! arguments. Lazy invocations also carry the complete eager result tree,
//! read through [`Invocation::eager_context`] or [`Invocation::lookup`]. The
//! argument name [`EAGER_CONTEXT_ARG`] (`"_eager_data"`) is reserved for that
//! context; static arguments may not use it.
//!
//! Generators alone interpret their arguments; the schema never inspects them.

use crate::error::{GenerationError, SchemaError};
use crate::value::{self, Kwargs, ResultTree, Value};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Reserved argument name under which lazy generators receive the eager context.
pub const EAGER_CONTEXT_ARG: &str = "_eager_data";

/// Evaluation phase of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// No dependency on other fields; evaluated in the first pass
    Eager,
    /// Reads the eager results; evaluated in the second pass
    Lazy,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => f.write_str("eager"),
            Self::Lazy => f.write_str("lazy"),
        }
    }
}

/// A generator-holder: resolves generator names and produces values.
///
/// Implementations must be safe to call concurrently if the owning
/// evaluator is shared between threads.
pub trait FieldProvider: fmt::Debug + Send + Sync {
    /// Phase that leaves built on this provider are tagged with.
    fn kind(&self) -> FieldKind;

    /// Produce one value.
    fn invoke(&self, call: &Invocation<'_>) -> Result<Value, GenerationError>;
}

/// Post-processor applied to every value a leaf's provider produces.
pub type KeyFn = dyn Fn(Value) -> Value + Send + Sync;

/// Arguments for a single generator call.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    generator: &'a str,
    kwargs: &'a Kwargs,
    eager_context: Option<&'a ResultTree>,
    key: Option<&'a KeyFn>,
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("generator", &self.generator)
            .field("kwargs", &self.kwargs)
            .field("eager_context", &self.eager_context)
            .field("key", &self.key.is_some())
            .finish()
    }
}

impl<'a> Invocation<'a> {
    /// Invocation without an eager context (first pass).
    pub fn eager(generator: &'a str, kwargs: &'a Kwargs) -> Self {
        Self {
            generator,
            kwargs,
            eager_context: None,
            key: None,
        }
    }

    /// Invocation carrying the complete eager result tree (second pass).
    pub fn lazy(generator: &'a str, kwargs: &'a Kwargs, eager_context: &'a ResultTree) -> Self {
        Self {
            generator,
            kwargs,
            eager_context: Some(eager_context),
            key: None,
        }
    }

    /// Same call with a post-processor for produced values.
    pub fn with_key(mut self, key: Option<&'a KeyFn>) -> Self {
        self.key = key;
        self
    }

    /// Same call with a different argument map.
    pub fn with_kwargs<'b>(&self, kwargs: &'b Kwargs) -> Invocation<'b>
    where
        'a: 'b,
    {
        Invocation {
            generator: self.generator,
            kwargs,
            eager_context: self.eager_context,
            key: self.key,
        }
    }

    /// Run `value` through the leaf's post-processor, if it has one.
    ///
    /// Providers call this once per produced value, so a provider returning
    /// several values applies it to each of them.
    pub fn apply_key(&self, value: Value) -> Value {
        match self.key {
            Some(key) => key(value),
            None => value,
        }
    }

    /// Name of the generator being invoked.
    pub fn generator(&self) -> &'a str {
        self.generator
    }

    /// Static arguments of the leaf.
    pub fn kwargs(&self) -> &'a Kwargs {
        self.kwargs
    }

    /// Whether this call carries an eager context.
    pub fn is_lazy(&self) -> bool {
        self.eager_context.is_some()
    }

    /// Get a static argument by name.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.kwargs.get(name)
    }

    /// The eager result tree, or an error when invoked eagerly.
    pub fn eager_context(&self) -> Result<&'a ResultTree, GenerationError> {
        self.eager_context
            .ok_or_else(|| GenerationError::MissingEagerContext(self.generator.to_string()))
    }

    /// Resolve a dotted path inside the eager context.
    pub fn lookup(&self, path: &str) -> Result<&'a Value, GenerationError> {
        value::lookup(self.eager_context()?, path)
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: &'static str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, GenerationError> {
        match self.kwargs.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(value).map(Some).ok_or_else(|| {
                GenerationError::InvalidArgument {
                    generator: self.generator.to_string(),
                    argument: name.to_string(),
                    expected,
                }
            }),
        }
    }

    fn required<T>(&self, name: &str, value: Option<T>) -> Result<T, GenerationError> {
        value.ok_or_else(|| GenerationError::MissingArgument {
            generator: self.generator.to_string(),
            argument: name.to_string(),
        })
    }

    /// Optional string argument.
    pub fn get_str(&self, name: &str) -> Result<Option<&'a str>, GenerationError> {
        self.typed(name, "a string", Value::as_str)
    }

    /// Required string argument.
    pub fn require_str(&self, name: &str) -> Result<&'a str, GenerationError> {
        let value = self.get_str(name)?;
        self.required(name, value)
    }

    /// Optional integer argument.
    pub fn get_i64(&self, name: &str) -> Result<Option<i64>, GenerationError> {
        self.typed(name, "an integer", Value::as_i64)
    }

    /// Required integer argument.
    pub fn require_i64(&self, name: &str) -> Result<i64, GenerationError> {
        let value = self.get_i64(name)?;
        self.required(name, value)
    }

    /// Optional number argument; integers are accepted.
    pub fn get_f64(&self, name: &str) -> Result<Option<f64>, GenerationError> {
        self.typed(name, "a number", Value::as_f64)
    }

    /// Required number argument.
    pub fn require_f64(&self, name: &str) -> Result<f64, GenerationError> {
        let value = self.get_f64(name)?;
        self.required(name, value)
    }

    /// Optional boolean argument.
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, GenerationError> {
        self.typed(name, "a boolean", Value::as_bool)
    }

    /// Optional list argument.
    pub fn get_list(&self, name: &str) -> Result<Option<&'a [Value]>, GenerationError> {
        self.typed(name, "a list", |v| v.as_array().map(Vec::as_slice))
    }

    /// Required list argument.
    pub fn require_list(&self, name: &str) -> Result<&'a [Value], GenerationError> {
        let value = self.get_list(name)?;
        self.required(name, value)
    }
}

/// A schema entry bound to one generator call plus its static arguments.
pub struct Leaf {
    kind: FieldKind,
    provider: Arc<dyn FieldProvider>,
    generator: String,
    kwargs: Kwargs,
    key: Option<Arc<KeyFn>>,
}

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("kind", &self.kind)
            .field("provider", &self.provider)
            .field("generator", &self.generator)
            .field("kwargs", &self.kwargs)
            .field("key", &self.key.is_some())
            .finish()
    }
}

impl Leaf {
    /// Bind a generator on `provider`. The leaf takes its kind from the provider.
    pub fn new(
        provider: Arc<dyn FieldProvider>,
        generator: impl Into<String>,
        kwargs: Kwargs,
    ) -> Result<Self, SchemaError> {
        let generator = generator.into();
        if kwargs.contains_key(EAGER_CONTEXT_ARG) {
            return Err(SchemaError::ReservedArgument {
                generator,
                argument: EAGER_CONTEXT_ARG.to_string(),
            });
        }

        Ok(Self {
            kind: provider.kind(),
            provider,
            generator,
            kwargs,
            key: None,
        })
    }

    /// Bind a generator that takes no static arguments.
    pub fn bare(provider: Arc<dyn FieldProvider>, generator: impl Into<String>) -> Self {
        Self {
            kind: provider.kind(),
            provider,
            generator: generator.into(),
            kwargs: Kwargs::new(),
            key: None,
        }
    }

    /// Post-process every value the provider produces for this leaf.
    pub fn with_key<F>(mut self, key: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.key = Some(Arc::new(key));
        self
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn generator(&self) -> &str {
        &self.generator
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    pub fn provider(&self) -> &Arc<dyn FieldProvider> {
        &self.provider
    }

    /// Invoke the leaf, with the eager context for lazy leaves.
    pub fn invoke(&self, eager_context: Option<&ResultTree>) -> Result<Value, GenerationError> {
        let call = match eager_context {
            Some(context) => Invocation::lazy(&self.generator, &self.kwargs, context),
            None => Invocation::eager(&self.generator, &self.kwargs),
        };
        self.provider.invoke(&call.with_key(self.key.as_deref()))
    }
}

/// A schema tree entry.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Nested schema tree
    Group(Schema),
    /// Shared leaf; classified trees reference the same `Leaf`
    Leaf(Arc<Leaf>),
}

impl PartialEq for SchemaNode {
    /// Groups compare structurally, leaves by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Group(a), Self::Group(b)) => a == b,
            (Self::Leaf(a), Self::Leaf(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Leaf> for SchemaNode {
    fn from(leaf: Leaf) -> Self {
        Self::Leaf(Arc::new(leaf))
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        Self::Group(schema)
    }
}

/// Ordered mapping from keys to groups and leaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    nodes: IndexMap<String, SchemaNode>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a leaf under `key`.
    pub fn leaf(mut self, key: impl Into<String>, leaf: Leaf) -> Self {
        self.insert(key, leaf);
        self
    }

    /// Builder: add a nested group under `key`.
    pub fn group(mut self, key: impl Into<String>, group: Schema) -> Self {
        self.insert(key, group);
        self
    }

    /// Insert a node, replacing any previous node under `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<SchemaNode>) {
        self.nodes.insert(key.into(), node.into());
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.nodes.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of leaves at any depth.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                SchemaNode::Group(group) => group.leaf_count(),
                SchemaNode::Leaf(_) => 1,
            })
            .sum()
    }

    /// Dotted path and kind of every leaf, in declaration order.
    pub fn leaf_paths(&self) -> Vec<(String, FieldKind)> {
        let mut paths = Vec::new();
        self.collect_leaf_paths("", &mut paths);
        paths
    }

    fn collect_leaf_paths(&self, prefix: &str, out: &mut Vec<(String, FieldKind)>) {
        for (key, node) in &self.nodes {
            let path = join_path(prefix, key);
            match node {
                SchemaNode::Group(group) => group.collect_leaf_paths(&path, out),
                SchemaNode::Leaf(leaf) => out.push((path, leaf.kind())),
            }
        }
    }
}

impl FromIterator<(String, SchemaNode)> for Schema {
    fn from_iter<I: IntoIterator<Item = (String, SchemaNode)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a SchemaNode);
    type IntoIter = indexmap::map::Iter<'a, String, SchemaNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Join a dotted path prefix with a key.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
