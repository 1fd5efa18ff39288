//! Structural merge of result trees.

use crate::error::EvaluationError;
use crate::schema::join_path;
use crate::value::{ResultTree, Value};

/// Deep-merge `overlay` into `base`.
///
/// Groups present in both trees are merged recursively. Any other value in
/// `overlay` replaces whatever `base` holds under the same key, including a
/// group. Keys only present in `base` are kept unchanged.
pub fn merge(base: ResultTree, overlay: ResultTree) -> ResultTree {
    let mut result = base;
    for (key, value) in overlay {
        let merged = match value {
            Value::Object(group) => {
                let existing = match result.get_mut(&key) {
                    Some(Value::Object(existing)) => std::mem::take(existing),
                    _ => ResultTree::new(),
                };
                Value::Object(merge(existing, group))
            }
            other => other,
        };
        result.insert(key, merged);
    }
    result
}

/// Deep-merge like [`merge`], but refuse to overwrite.
///
/// Fails with [`EvaluationError::MergeConflict`] when both trees define the same
/// key and at least one side holds a non-group value there.
pub fn merge_checked(base: ResultTree, overlay: ResultTree) -> Result<ResultTree, EvaluationError> {
    merge_checked_at("", base, overlay)
}

fn merge_checked_at(
    prefix: &str,
    base: ResultTree,
    overlay: ResultTree,
) -> Result<ResultTree, EvaluationError> {
    let mut result = base;
    for (key, value) in overlay {
        let path = join_path(prefix, &key);
        let merged = match (result.get_mut(&key), value) {
            (None, value) => value,
            (Some(Value::Object(existing)), Value::Object(group)) => {
                let existing = std::mem::take(existing);
                Value::Object(merge_checked_at(&path, existing, group)?)
            }
            (Some(_), _) => return Err(EvaluationError::MergeConflict { path }),
        };
        result.insert(key, merged);
    }
    Ok(result)
}
