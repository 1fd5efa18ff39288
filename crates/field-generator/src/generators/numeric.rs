//! Numeric value generators.

use crate::registry::GeneratorState;
use rand::Rng;
use schema_core::{GenerationError, Invocation, Value};

/// Next value of a running counter.
///
/// Counters are keyed by the `accumulator` argument so independent sequences
/// can share a provider. The first value is `start` (default 1).
pub fn increment(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let start = call.get_i64("start")?.unwrap_or(1);
    let key = call.get_str("accumulator")?.unwrap_or_default();

    let counter = state.accumulators.entry(key.to_string()).or_insert(0);
    let value = start.checked_add(*counter).ok_or_else(|| {
        GenerationError::failed(
            call.generator(),
            format!("counter overflowed after {counter} values from {start}"),
        )
    })?;
    *counter += 1;
    Ok(Value::Int(value))
}

/// Random integer in `min..=max`.
pub fn int_range(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let min = call.require_i64("min")?;
    let max = call.require_i64("max")?;
    if min > max {
        return Err(GenerationError::failed(
            call.generator(),
            format!("empty range {min}..={max}"),
        ));
    }
    Ok(Value::Int(state.rng.random_range(min..=max)))
}

/// Random float in `min..=max`, optionally rounded to `precision` digits.
pub fn float_range(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let min = call.require_f64("min")?;
    let max = call.require_f64("max")?;
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(GenerationError::failed(
            call.generator(),
            format!("empty range {min}..={max}"),
        ));
    }

    let value = state.rng.random_range(min..=max);
    let value = match call.get_i64("precision")? {
        Some(digits) => {
            let factor = 10f64.powi(digits.clamp(0, 15) as i32);
            (value * factor).round() / factor
        }
        None => value,
    };
    Ok(Value::Float(value))
}

/// Boolean that is true with probability `true_weight`.
pub fn weighted_bool(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let weight = call.get_f64("true_weight")?.unwrap_or(0.5);
    if !(0.0..=1.0).contains(&weight) {
        return Err(GenerationError::InvalidArgument {
            generator: call.generator().to_string(),
            argument: "true_weight".to_string(),
            expected: "a probability between 0 and 1",
        });
    }
    Ok(Value::Bool(state.rng.random_bool(weight)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_core::Kwargs;

    fn args(entries: Vec<(&str, Value)>) -> Kwargs {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_increment_counts_per_accumulator() {
        let mut state = GeneratorState::new(42);
        let plain = Kwargs::new();
        let orders = args(vec![("accumulator", Value::from("orders"))]);

        let call = Invocation::eager("increment", &plain);
        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(1));
        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(2));

        let call = Invocation::eager("increment", &orders);
        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_increment_start() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![("start", Value::Int(100))]);
        let call = Invocation::eager("increment", &kwargs);
        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(100));
        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(101));
    }

    #[test]
    fn test_increment_overflow_fails() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![("start", Value::Int(i64::MAX))]);
        let call = Invocation::eager("increment", &kwargs);

        assert_eq!(increment(&mut state, &call).unwrap(), Value::Int(i64::MAX));
        assert!(matches!(
            increment(&mut state, &call),
            Err(GenerationError::Failed { .. })
        ));
    }

    #[test]
    fn test_int_range() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![("min", Value::Int(10)), ("max", Value::Int(20))]);
        let call = Invocation::eager("int_range", &kwargs);

        for _ in 0..100 {
            let v = int_range(&mut state, &call).unwrap().as_i64().unwrap();
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn test_int_range_empty_fails() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![("min", Value::Int(5)), ("max", Value::Int(1))]);
        let err = int_range(&mut state, &Invocation::eager("int_range", &kwargs)).unwrap_err();
        assert!(matches!(err, GenerationError::Failed { .. }));
    }

    #[test]
    fn test_float_range_precision() {
        let mut state = GeneratorState::new(42);
        let kwargs = args(vec![
            ("min", Value::Int(0)),
            ("max", Value::Float(1.0)),
            ("precision", Value::Int(2)),
        ]);
        let call = Invocation::eager("float_range", &kwargs);

        for _ in 0..50 {
            let v = float_range(&mut state, &call).unwrap().as_f64().unwrap();
            assert!((0.0..=1.0).contains(&v));
            assert!(((v * 100.0).round() - v * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_weighted_bool_extremes() {
        let mut state = GeneratorState::new(42);
        let always = args(vec![("true_weight", Value::Float(1.0))]);
        let never = args(vec![("true_weight", Value::Int(0))]);

        assert_eq!(
            weighted_bool(&mut state, &Invocation::eager("weighted_bool", &always)).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            weighted_bool(&mut state, &Invocation::eager("weighted_bool", &never)).unwrap(),
            Value::Bool(false)
        );

        let bad = args(vec![("true_weight", Value::Float(1.5))]);
        assert!(weighted_bool(&mut state, &Invocation::eager("weighted_bool", &bad)).is_err());
    }
}
