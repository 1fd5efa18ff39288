//! Loading schema trees from YAML.
//!
//! A mapping that has a `generator` key is a leaf; any other mapping is a
//! group:
//!
//! ```yaml
//! pk:
//!   generator: increment
//! owner:
//!   creator:
//!     generator: full_name
//!     args: { gender: female }
//!   email:
//!     field: lazy
//!     generator: custom_email
//!     args: { domains: [example.com] }
//! ```
//!
//! `field` names a provider registered on the [`SchemaLoader`] and defaults to
//! `field`. Leaves may not have keys other than `generator`, `field` and `args`.

use crate::error::SchemaError;
use crate::schema::{join_path, FieldProvider, Leaf, Schema};
use crate::value::{Kwargs, Value};
use serde_yaml::{Mapping, Value as YamlValue};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Provider name used when a leaf has no `field` key.
pub const DEFAULT_PROVIDER: &str = "field";

const LEAF_KEYS: [&str; 3] = ["generator", "field", "args"];

/// Builds [`Schema`] trees from YAML, binding leaves to named providers.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    providers: HashMap<String, Arc<dyn FieldProvider>>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider that leaves can name in their `field` key.
    pub fn provider(mut self, name: impl Into<String>, provider: Arc<dyn FieldProvider>) -> Self {
        self.providers.insert(name.into(), provider);
        self
    }

    /// Load a schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(&self, path: P) -> Result<Schema, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.from_yaml(&content)
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(&self, yaml: &str) -> Result<Schema, SchemaError> {
        let document: YamlValue = serde_yaml::from_str(yaml)?;
        match document {
            YamlValue::Mapping(mapping) if !is_leaf(&mapping) => self.parse_group("", &mapping),
            YamlValue::Null => Ok(Schema::new()),
            _ => Err(malformed("", "the document root must be a group mapping")),
        }
    }

    fn parse_group(&self, prefix: &str, mapping: &Mapping) -> Result<Schema, SchemaError> {
        let mut schema = Schema::new();
        for (key, node) in mapping {
            let key = key
                .as_str()
                .ok_or_else(|| malformed(prefix, "keys must be strings"))?;
            let path = join_path(prefix, key);

            match node {
                YamlValue::Mapping(inner) if is_leaf(inner) => {
                    schema.insert(key, self.parse_leaf(&path, inner)?);
                }
                YamlValue::Mapping(inner) => {
                    schema.insert(key, self.parse_group(&path, inner)?);
                }
                _ => {
                    return Err(malformed(
                        &path,
                        "expected a group mapping or a leaf with a `generator` key",
                    ))
                }
            }
        }
        Ok(schema)
    }

    fn parse_leaf(&self, path: &str, mapping: &Mapping) -> Result<Leaf, SchemaError> {
        if let Some(extra) = mapping
            .keys()
            .find(|k| !k.as_str().is_some_and(|k| LEAF_KEYS.contains(&k)))
        {
            return Err(malformed(
                path,
                format!("unexpected leaf key {}", describe(extra)),
            ));
        }

        let generator = mapping
            .get("generator")
            .and_then(YamlValue::as_str)
            .ok_or_else(|| malformed(path, "`generator` must be a string"))?;

        let provider_name = match mapping.get("field") {
            None => DEFAULT_PROVIDER,
            Some(value) => value
                .as_str()
                .ok_or_else(|| malformed(path, "`field` must be a string"))?,
        };
        let provider = self.providers.get(provider_name).ok_or_else(|| {
            SchemaError::UnknownProvider {
                path: path.to_string(),
                provider: provider_name.to_string(),
            }
        })?;

        let kwargs = match mapping.get("args") {
            None | Some(YamlValue::Null) => Kwargs::new(),
            Some(YamlValue::Mapping(args)) => args
                .iter()
                .map(|(k, v)| {
                    k.as_str()
                        .map(|k| (k.to_string(), Value::from(v)))
                        .ok_or_else(|| malformed(path, "argument names must be strings"))
                })
                .collect::<Result<Kwargs, _>>()?,
            Some(_) => return Err(malformed(path, "`args` must be a mapping")),
        };

        Leaf::new(Arc::clone(provider), generator, kwargs)
    }
}

fn is_leaf(mapping: &Mapping) -> bool {
    mapping.contains_key("generator")
}

fn malformed(path: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::Malformed {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn describe(key: &YamlValue) -> String {
    match key.as_str() {
        Some(s) => format!("'{s}'"),
        None => format!("{key:?}"),
    }
}
