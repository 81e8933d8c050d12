//! Small serde helpers shared by patch types.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (even `null`) as `Some(value)`.
///
/// Combined with `#[serde(default)]` on an `Option<Option<T>>` this tells an
/// absent field (`None`) apart from an explicit `null` (`Some(None)`).
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
