//! Content types returned by the gateway.

mod menu;
mod post;

use serde::{Deserialize, Deserializer};

pub(crate) use menu::MenuResponse;
pub use menu::MenuItem;
pub use post::{Page, PageResult, Post, Rendered};

/// Site-wide options, an arbitrary key/value mapping.
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Deserialize `null` as the type's default.
///
/// WordPress and its plugins send `null` for unset fields; `#[serde(default)]`
/// alone only covers missing ones.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
