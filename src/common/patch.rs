// src/common/patch.rs

use serde::{Deserialize, Deserializer};

/// Para campos de atualização parcial que podem ser limpos.
///
/// Usar junto com `#[serde(default)]`: campo ausente vira `None`,
/// `null` vira `Some(None)` e um valor vira `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
