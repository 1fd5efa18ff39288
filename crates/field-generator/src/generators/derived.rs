//! Generators that derive their value from the eager results.
//!
//! These must be registered on a lazy provider; invoked without an eager
//! context they fail with [`GenerationError::MissingEagerContext`].

use super::{choose, string_list};
use crate::registry::GeneratorState;
use schema_core::{GenerationError, Invocation, Value};

const DEFAULT_EMAIL_SOURCE: &str = "owner.creator";

/// Email address built from a name in the eager results.
///
/// The name at `source` is lowercased with spaces replaced by dots and joined
/// with a random entry of `domains`.
pub fn custom_email(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let source = call.get_str("source")?.unwrap_or(DEFAULT_EMAIL_SOURCE);
    let name = call.lookup(source)?.as_str().ok_or_else(|| {
        GenerationError::failed(call.generator(), format!("value at '{source}' is not a string"))
    })?;
    let domains = string_list(call, "domains")?;
    let domain = choose(&mut state.rng, &domains, call, "domains")?;

    let username = name.replace(' ', ".").to_lowercase();
    Ok(Value::from(format!("{username}@{domain}")))
}

/// Copy of the eager value at `source`.
pub fn copy(_: &mut GeneratorState, call: &Invocation<'_>) -> Result<Value, GenerationError> {
    let source = call.require_str("source")?;
    call.lookup(source).cloned()
}

/// String built from `template`, replacing each `{path}` with the eager value
/// at that path.
pub fn template(_: &mut GeneratorState, call: &Invocation<'_>) -> Result<Value, GenerationError> {
    let template = call.require_str("template")?;
    let context = call.eager_context()?;
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            return Err(GenerationError::failed(
                call.generator(),
                format!("unclosed placeholder in template '{template}'"),
            ));
        };
        let path = &rest[start + 1..start + len];
        result.push_str(&schema_core::lookup(context, path)?.to_string());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);

    Ok(Value::from(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema_core::{Kwargs, ResultTree};

    fn args(entries: Vec<(&str, Value)>) -> Kwargs {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn eager_results() -> ResultTree {
        let owner = ResultTree::from([("creator".to_string(), Value::from("Ada Lovelace"))]);
        ResultTree::from([
            ("pk".to_string(), Value::Int(7)),
            ("owner".to_string(), Value::Object(owner)),
        ])
    }

    #[test]
    fn test_custom_email_from_creator() {
        let mut state = GeneratorState::new(42);
        let context = eager_results();
        let kwargs = args(vec![("domains", Value::from(vec!["example.org"]))]);

        let value =
            custom_email(&mut state, &Invocation::lazy("custom_email", &kwargs, &context)).unwrap();
        assert_eq!(value, Value::from("ada.lovelace@example.org"));
    }

    #[test]
    fn test_custom_email_missing_source() {
        let mut state = GeneratorState::new(42);
        let context = eager_results();
        let kwargs = args(vec![
            ("domains", Value::from(vec!["example.org"])),
            ("source", Value::from("owner.email")),
        ]);

        let err = custom_email(&mut state, &Invocation::lazy("custom_email", &kwargs, &context))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Lookup {
                path: "owner.email".to_string()
            }
        );
    }

    #[test]
    fn test_custom_email_needs_context() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![("domains", Value::from(vec!["example.org"]))]);

        let err = custom_email(&mut state, &Invocation::eager("custom_email", &kwargs)).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MissingEagerContext("custom_email".to_string())
        );
    }

    #[test]
    fn test_copy() {
        let mut state = GeneratorState::new(42);
        let context = eager_results();
        let kwargs = args(vec![("source", Value::from("pk"))]);

        let value = copy(&mut state, &Invocation::lazy("copy", &kwargs, &context)).unwrap();
        assert_eq!(value, Value::Int(7));
    }

    #[test]
    fn test_template() {
        let mut state = GeneratorState::new(42);
        let context = eager_results();
        let kwargs = args(vec![(
            "template",
            Value::from("#{pk} by {owner.creator}"),
        )]);

        let value = template(&mut state, &Invocation::lazy("template", &kwargs, &context)).unwrap();
        assert_eq!(value, Value::from("#7 by Ada Lovelace"));
    }

    #[test]
    fn test_template_unclosed_placeholder() {
        let mut state = GeneratorState::new(42);
        let context = eager_results();
        let kwargs = args(vec![("template", Value::from("{pk"))]);

        let err =
            template(&mut state, &Invocation::lazy("template", &kwargs, &context)).unwrap_err();
        assert!(matches!(err, GenerationError::Failed { .. }));
    }
}
