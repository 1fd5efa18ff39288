//! UUID value generator.

use crate::registry::GeneratorState;
use rand::Rng;
use schema_core::{GenerationError, Invocation, Value};
use uuid::Uuid;

/// Random UUID v4 drawn from the provider's seeded RNG.
pub fn uuid_v4(state: &mut GeneratorState, _: &Invocation<'_>) -> Result<Value, GenerationError> {
    Ok(Value::Uuid(random_uuid(&mut state.rng)))
}

/// Build a version 4 UUID from 16 random bytes.
pub(crate) fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}
