//! Built-in generators.
//!
//! Nothing is registered implicitly; call [`register_builtins`] (or
//! [`GeneratorRegistry::with_builtins`]) during setup.
//!
//! | name | arguments |
//! |------|-----------|
//! | `increment` | `start` (1), `accumulator` |
//! | `int_range` | `min`, `max` |
//! | `float_range` | `min`, `max`, `precision` |
//! | `weighted_bool` | `true_weight` (0.5) |
//! | `uuid` | |
//! | `word` | |
//! | `full_name` | `gender` (`female`, `male`, any) |
//! | `version` | |
//! | `token_hex` | `entropy` bytes (32) |
//! | `pattern` | `pattern` with `{uuid}` / `{rand:N}` |
//! | `one_of` | `values` |
//! | `static` | `value` |
//! | `timestamp` | `fmt` (`iso`, `posix`), `start_year`, `end_year` |
//! | `timestamp_range` | `start`, `end` |
//! | `custom_email` | `domains`, `source` (`owner.creator`) (lazy) |
//! | `copy` | `source` (lazy) |
//! | `template` | `template` with `{path}` placeholders (lazy) |

pub mod derived;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

use crate::registry::GeneratorRegistry;
use rand::Rng;
use schema_core::{GenerationError, Invocation};

/// Register every built-in generator on `registry`.
pub fn register_builtins(registry: &mut GeneratorRegistry) {
    registry
        .register("increment", numeric::increment)
        .register("int_range", numeric::int_range)
        .register("float_range", numeric::float_range)
        .register("weighted_bool", numeric::weighted_bool)
        .register("uuid", uuid::uuid_v4)
        .register("word", text::word)
        .register("full_name", text::full_name)
        .register("version", text::version)
        .register("token_hex", text::token_hex)
        .register("pattern", text::pattern)
        .register("one_of", text::one_of)
        .register("static", text::static_value)
        .register("timestamp", timestamp::timestamp)
        .register("timestamp_range", timestamp::timestamp_range)
        .register("custom_email", derived::custom_email)
        .register("copy", derived::copy)
        .register("template", derived::template);
}

/// Pick one element, failing on an empty slice.
pub(crate) fn choose<'a, T, R: Rng>(
    rng: &mut R,
    items: &'a [T],
    call: &Invocation<'_>,
    what: &str,
) -> Result<&'a T, GenerationError> {
    if items.is_empty() {
        return Err(GenerationError::failed(
            call.generator(),
            format!("cannot choose from an empty {what} list"),
        ));
    }
    Ok(&items[rng.random_range(0..items.len())])
}

/// Read a list argument whose elements must all be strings.
pub(crate) fn string_list<'a>(
    call: &Invocation<'a>,
    name: &str,
) -> Result<Vec<&'a str>, GenerationError> {
    call.require_list(name)?
        .iter()
        .map(|v| {
            v.as_str().ok_or_else(|| GenerationError::InvalidArgument {
                generator: call.generator().to_string(),
                argument: name.to_string(),
                expected: "a list of strings",
            })
        })
        .collect()
}

