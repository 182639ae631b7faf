//! Tolerant field decoders for backend payloads.
//!
//! A field whose shape does not match is read as absent instead of failing
//! the whole record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose<T> {
    Parsed(T),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Names {
    One(String),
    Many(Vec<Loose<String>>),
    Other(IgnoredAny),
}

/// Decode an optional field, yielding `None` when the value has the wrong shape.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Loose<T>>::deserialize(deserializer)? {
        Some(Loose::Parsed(value)) => Some(value),
        Some(Loose::Other(IgnoredAny)) => {
            warn!(
                expected = std::any::type_name::<T>(),
                "Ignoring backend field with unexpected shape"
            );
            None
        }
        None => None,
    })
}

/// Decode a list of names, accepting a bare string and skipping non-string entries.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Names>::deserialize(deserializer)? {
        Some(Names::One(name)) => Some(vec![name]),
        Some(Names::Many(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Loose::Parsed(name) => Some(name),
                    Loose::Other(IgnoredAny) => None,
                })
                .collect(),
        ),
        Some(Names::Other(IgnoredAny)) => {
            warn!("Ignoring role list with unexpected shape");
            None
        }
        None => None,
    })
}
