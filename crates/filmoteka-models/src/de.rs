use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing field.
///
/// The films API writes `null` for blank text such as an unknown middle name.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
