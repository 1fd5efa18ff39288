//! Text and selection generators.

use super::{choose, uuid::random_uuid};
use crate::registry::GeneratorState;
use rand::Rng;
use schema_core::{GenerationError, Invocation, Value};

/// Largest accepted `token_hex` entropy, in bytes.
pub const MAX_TOKEN_ENTROPY: i64 = 4096;

/// Largest accepted digit count of a `{rand:N}` placeholder.
pub const MAX_RANDOM_DIGITS: usize = 1024;

const WORDS: &[&str] = &[
    "anchor", "basket", "candle", "delta", "ember", "falcon", "garnet", "harbor", "island",
    "juniper", "kernel", "lantern", "meadow", "nickel", "orbit", "pepper", "quartz", "river",
    "saddle", "timber", "umbra", "velvet", "willow", "yonder", "zephyr",
];

const FEMALE_NAMES: &[&str] = &[
    "Ada", "Beatrice", "Clara", "Dorothy", "Edith", "Frances", "Grace", "Hedy", "Irene", "Joan",
    "Katherine", "Lise", "Mary", "Nora", "Olive", "Rosalind",
];

const MALE_NAMES: &[&str] = &[
    "Alan", "Bertrand", "Charles", "Dennis", "Edsger", "Frank", "George", "Herbert", "Ivan",
    "John", "Ken", "Linus", "Niklaus", "Robin", "Tony", "Werner",
];

const SURNAMES: &[&str] = &[
    "Babbage", "Curie", "Dijkstra", "Franklin", "Goldberg", "Hamilton", "Hopper", "Johnson",
    "Knuth", "Lamarr", "Lovelace", "Meitner", "Noether", "Ritchie", "Turing", "Wirth",
];

/// Random lowercase word.
pub fn word(state: &mut GeneratorState, call: &Invocation<'_>) -> Result<Value, GenerationError> {
    let word = choose(&mut state.rng, WORDS, call, "word")?;
    Ok(Value::from(*word))
}

/// Random "First Last" name, optionally restricted by `gender`.
pub fn full_name(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let first_names: &[&str] = match call.get_str("gender")? {
        Some("female") => FEMALE_NAMES,
        Some("male") => MALE_NAMES,
        None => {
            if state.rng.random_bool(0.5) {
                FEMALE_NAMES
            } else {
                MALE_NAMES
            }
        }
        Some(_) => {
            return Err(GenerationError::InvalidArgument {
                generator: call.generator().to_string(),
                argument: "gender".to_string(),
                expected: "'female' or 'male'",
            })
        }
    };

    let first = choose(&mut state.rng, first_names, call, "first name")?;
    let last = choose(&mut state.rng, SURNAMES, call, "surname")?;
    Ok(Value::from(format!("{first} {last}")))
}

/// Random semantic version `major.minor.patch`.
pub fn version(state: &mut GeneratorState, _: &Invocation<'_>) -> Result<Value, GenerationError> {
    let major: u8 = state.rng.random_range(0..10);
    let minor: u8 = state.rng.random_range(0..20);
    let patch: u8 = state.rng.random_range(0..50);
    Ok(Value::from(format!("{major}.{minor}.{patch}")))
}

/// Random hex token of `entropy` bytes (default 32).
pub fn token_hex(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let entropy = call.get_i64("entropy")?.unwrap_or(32);
    if !(0..=MAX_TOKEN_ENTROPY).contains(&entropy) {
        return Err(GenerationError::InvalidArgument {
            generator: call.generator().to_string(),
            argument: "entropy".to_string(),
            expected: "an integer between 0 and 4096",
        });
    }

    let token: String = (0..entropy)
        .map(|_| format!("{:02x}", state.rng.random::<u8>()))
        .collect();
    Ok(Value::from(token))
}

/// String built from `pattern`.
///
/// Supports placeholders:
/// - `{uuid}` - random UUID
/// - `{rand:N}` - random N-digit number
pub fn pattern(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let pattern = call.require_str("pattern")?;
    let mut result = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let Some(len) = rest[start..].find('}') else {
            return Err(GenerationError::failed(
                call.generator(),
                format!("unclosed placeholder in pattern '{pattern}'"),
            ));
        };
        let placeholder = &rest[start + 1..start + len];

        if placeholder == "uuid" {
            result.push_str(&random_uuid(&mut state.rng).to_string());
        } else if let Some(digits) = placeholder.strip_prefix("rand:") {
            let digits = digits
                .parse::<usize>()
                .ok()
                .filter(|n| *n <= MAX_RANDOM_DIGITS)
                .ok_or_else(|| {
                    GenerationError::failed(
                        call.generator(),
                        format!(
                            "digit count in '{{{placeholder}}}' must be at most {MAX_RANDOM_DIGITS}"
                        ),
                    )
                })?;
            push_random_digits(&mut state.rng, digits, &mut result);
        } else {
            return Err(GenerationError::failed(
                call.generator(),
                format!("unknown placeholder '{{{placeholder}}}'"),
            ));
        }

        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);

    Ok(Value::from(result))
}

/// Append exactly `digits` random digits, without a leading zero.
fn push_random_digits<R: Rng>(rng: &mut R, digits: usize, out: &mut String) {
    for i in 0..digits {
        let low = if i == 0 { 1 } else { 0 };
        let digit: u8 = rng.random_range(low..10);
        out.push(char::from(b'0' + digit));
    }
}

/// Random element of `values`. An empty list is a generation failure.
pub fn one_of(state: &mut GeneratorState, call: &Invocation<'_>) -> Result<Value, GenerationError> {
    let values = call.require_list("values")?;
    choose(&mut state.rng, values, call, "values").cloned()
}

/// The `value` argument, unchanged.
pub fn static_value(_: &mut GeneratorState, call: &Invocation<'_>) -> Result<Value, GenerationError> {
    call.get("value")
        .cloned()
        .ok_or_else(|| GenerationError::MissingArgument {
            generator: call.generator().to_string(),
            argument: "value".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_core::Kwargs;

    fn run(
        generator: fn(&mut GeneratorState, &Invocation<'_>) -> Result<Value, GenerationError>,
        kwargs: &Kwargs,
    ) -> Result<Value, GenerationError> {
        let mut state = GeneratorState::new(42);
        generator(&mut state, &Invocation::eager("test", kwargs))
    }

    fn args(entries: Vec<(&str, Value)>) -> Kwargs {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_full_name_gender() {
        let kwargs = args(vec![("gender", Value::from("female"))]);
        let mut state = GeneratorState::new(7);
        for _ in 0..20 {
            let name = full_name(&mut state, &Invocation::eager("full_name", &kwargs)).unwrap();
            let first = name.as_str().unwrap().split(' ').next().unwrap().to_string();
            assert!(FEMALE_NAMES.contains(&first.as_str()));
        }

        let bad = args(vec![("gender", Value::from("robot"))]);
        assert!(matches!(
            run(full_name, &bad),
            Err(GenerationError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_token_hex_length() {
        let kwargs = args(vec![("entropy", Value::Int(8))]);
        let token = run(token_hex, &kwargs).unwrap();
        let token = token.as_str().unwrap();
        assert_eq!(token.len(), 16);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        assert_eq!(run(token_hex, &Kwargs::new()).unwrap().as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_token_hex_rejects_unbounded_entropy() {
        for entropy in [i64::MAX, MAX_TOKEN_ENTROPY + 1, -1] {
            let kwargs = args(vec![("entropy", Value::Int(entropy))]);
            assert!(matches!(
                run(token_hex, &kwargs),
                Err(GenerationError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_version_shape() {
        let value = run(version, &Kwargs::new()).unwrap();
        let parts: Vec<_> = value.as_str().unwrap().split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u8>().is_ok()));
    }

    #[test]
    fn test_pattern_random_digits() {
        let kwargs = args(vec![("pattern", Value::from("code-{rand:6}"))]);
        let value = run(pattern, &kwargs).unwrap();
        let s = value.as_str().unwrap();

        assert!(s.starts_with("code-"));
        assert_eq!(s.len(), 5 + 6);
        assert!(s[5..].chars().all(|c| c.is_ascii_digit()));
        assert_ne!(&s[5..6], "0");
    }

    #[test]
    fn test_pattern_uuid() {
        let kwargs = args(vec![("pattern", Value::from("id-{uuid}"))]);
        let value = run(pattern, &kwargs).unwrap();
        assert_eq!(value.as_str().unwrap().len(), 3 + 36);
    }

    #[test]
    fn test_pattern_rejects_unknown_placeholder() {
        let kwargs = args(vec![("pattern", Value::from("{index}"))]);
        assert!(run(pattern, &kwargs).is_err());

        let kwargs = args(vec![("pattern", Value::from("oops {rand:3"))]);
        assert!(run(pattern, &kwargs).is_err());
    }

    #[test]
    fn test_pattern_rejects_huge_digit_count() {
        let kwargs = args(vec![(
            "pattern",
            Value::from("{rand:18446744073709551615}"),
        )]);
        assert!(matches!(
            run(pattern, &kwargs),
            Err(GenerationError::Failed { .. })
        ));
    }

    #[test]
    fn test_one_of() {
        let kwargs = args(vec![(
            "values",
            Value::from(vec!["active", "inactive", "pending"]),
        )]);
        let value = run(one_of, &kwargs).unwrap();
        assert!(["active", "inactive", "pending"].contains(&value.as_str().unwrap()));
    }

    #[test]
    fn test_one_of_empty_is_generation_failure() {
        let kwargs = args(vec![("values", Value::Array(vec![]))]);
        assert!(matches!(
            run(one_of, &kwargs),
            Err(GenerationError::Failed { .. })
        ));
    }

    #[test]
    fn test_static_value() {
        let kwargs = args(vec![("value", Value::Int(1))]);
        assert_eq!(run(static_value, &kwargs).unwrap(), Value::Int(1));
        assert!(run(static_value, &Kwargs::new()).is_err());
    }

    #[test]
    fn test_word() {
        let value = run(word, &Kwargs::new()).unwrap();
        assert!(WORDS.contains(&value.as_str().unwrap()));
    }
}
