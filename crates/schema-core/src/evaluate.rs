//! Two-phase schema evaluation.

use crate::classify::extract;
use crate::error::EvaluationError;
use crate::merge::merge_checked;
use crate::schema::{join_path, FieldKind, Schema, SchemaNode};
use crate::value::{ResultTree, Value};

/// A schema split into its eager and lazy halves, ready to produce results.
///
/// Classification happens once in [`EvaluatedSchema::new`]; every call to
/// [`EvaluatedSchema::create`] re-invokes all generators and shares nothing
/// with previous calls.
#[derive(Debug, Clone)]
pub struct EvaluatedSchema {
    eager: Schema,
    lazy: Schema,
}

impl EvaluatedSchema {
    /// Classify `schema` into eager and lazy sub-schemas.
    pub fn new(schema: &Schema) -> Self {
        let eager = extract(schema, &[FieldKind::Eager]);
        let lazy = extract(schema, &[FieldKind::Lazy]);

        tracing::debug!(
            eager_fields = eager.leaf_count(),
            lazy_fields = lazy.leaf_count(),
            "Classified schema"
        );

        Self { eager, lazy }
    }

    /// Leaves evaluated in the first pass.
    pub fn eager_schema(&self) -> &Schema {
        &self.eager
    }

    /// Leaves evaluated in the second pass, with the eager results as context.
    pub fn lazy_schema(&self) -> &Schema {
        &self.lazy
    }

    /// Produce one result tree.
    ///
    /// Eager leaves are evaluated first. Every lazy leaf then receives the
    /// complete eager result tree. The two trees are merged into the shape of
    /// the original schema. Any generator failure aborts the call and no
    /// partial result is returned.
    pub fn create(&self) -> Result<ResultTree, EvaluationError> {
        let eager_results = evaluate(&self.eager, "", None)?;
        let lazy_results = evaluate(&self.lazy, "", Some(&eager_results))?;
        merge_checked(eager_results, lazy_results)
    }

    /// Produce `count` independent result trees.
    pub fn rows(&self, count: u64) -> Rows<'_> {
        Rows {
            schema: self,
            remaining: count,
        }
    }
}

impl From<Schema> for EvaluatedSchema {
    fn from(schema: Schema) -> Self {
        Self::new(&schema)
    }
}

fn evaluate(
    schema: &Schema,
    prefix: &str,
    eager_context: Option<&ResultTree>,
) -> Result<ResultTree, EvaluationError> {
    let mut results = ResultTree::with_capacity(schema.len());
    for (key, node) in schema {
        let path = join_path(prefix, key);
        let value = match node {
            SchemaNode::Group(group) => Value::Object(evaluate(group, &path, eager_context)?),
            SchemaNode::Leaf(leaf) => {
                tracing::trace!(field = %path, generator = leaf.generator(), kind = %leaf.kind(), "Invoking generator");
                leaf.invoke(eager_context)
                    .map_err(|source| EvaluationError::Field { path, source })?
            }
        };
        results.insert(key.clone(), value);
    }
    Ok(results)
}

/// Iterator over independently created result trees.
pub struct Rows<'a> {
    schema: &'a EvaluatedSchema,
    remaining: u64,
}

impl Iterator for Rows<'_> {
    type Item = Result<ResultTree, EvaluationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.schema.create())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}
