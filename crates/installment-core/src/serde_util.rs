//! Serde helpers for tolerant decoding of gateway payloads.

use serde::{Deserialize, Deserializer};

/// Decodes `null` (and a missing field, together with `#[serde(default)]`)
/// as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
