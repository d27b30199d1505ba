//! Navigation menu types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// Navigation menu entry as returned by the menus plugin.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MenuItem {
    /// Menu item ID.
    #[serde(
        rename = "ID",
        alias = "id",
        default,
        deserialize_with = "null_as_default"
    )]
    pub id: u64,
    /// Display label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Target URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Parent menu item ID; the plugin sends it as a string, `"0"` for top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item_parent: Option<Value>,
    /// Nested entries.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub child_items: Vec<MenuItem>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuItem {
    /// Parent item ID, `None` for top-level entries.
    pub fn parent_id(&self) -> Option<u64> {
        let parent = match self.menu_item_parent.as_ref()? {
            Value::String(s) => s.parse().ok()?,
            Value::Number(n) => n.as_u64()?,
            _ => return None,
        };
        (parent != 0).then_some(parent)
    }
}

/// Menu endpoint response. Only `items` is used.
#[derive(Debug, Deserialize)]
pub(crate) struct MenuResponse {
    #[serde(default)]
    pub items: Option<Vec<MenuItem>>,
}
