//! Raw entry and collection shapes returned by the delivery backend.
//!
//! These types are the validation boundary: `sys.id` and the collection
//! `total` are required, everything inside `fields` stays an open JSON map
//! until the field mapper reads it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A backend reference such as `{"sys": {"type": "Link", "linkType": "Tag", "id": "rust"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

impl Link {
    /// Convenience constructor for a link of the given type.
    pub fn new(link_type: &str, id: &str) -> Self {
        Self {
            sys: LinkSys {
                id: id.to_string(),
                kind: "Link".to_string(),
                link_type: Some(link_type.to_string()),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// System properties of an entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub content_type: Option<Link>,
}

/// Entry metadata; only tag references are carried.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryMetadata {
    #[serde(default)]
    pub tags: Vec<Link>,
}

/// One entry in the backend's native field naming.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub metadata: EntryMetadata,
}

impl RawEntry {
    /// Look up a raw field value. JSON `null` counts as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Look up a field that must be a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// Side-loaded assets and entries referenced by links in `items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Asset")]
    pub assets: Vec<Value>,
    #[serde(default, rename = "Entry")]
    pub entries: Vec<Value>,
}

impl Includes {
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.entries.is_empty()
    }
}

/// A page of entries plus the backend-reported total.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryCollection {
    /// Total number of entries matching the query, regardless of window.
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    pub items: Vec<RawEntry>,
    #[serde(default)]
    pub includes: Includes,
}

impl EntryCollection {
    /// Replace `Link` values inside entry fields with the matching included
    /// asset or entry object.
    ///
    /// Resolution is one level deep: included objects are inserted as-is and
    /// not resolved further. Links with no included target are left alone.
    pub fn resolve_links(&mut self) {
        if self.includes.is_empty() {
            return;
        }

        let mut index: HashMap<String, &Value> = HashMap::new();
        for (link_type, objects) in [
            ("Asset", &self.includes.assets),
            ("Entry", &self.includes.entries),
        ] {
            for object in objects {
                if let Some(id) = object.pointer("/sys/id").and_then(Value::as_str) {
                    index.insert(format!("{link_type}:{id}"), object);
                }
            }
        }

        for item in &mut self.items {
            for value in item.fields.values_mut() {
                resolve_in(value, &index);
            }
        }
    }
}

fn resolve_in(value: &mut Value, index: &HashMap<String, &Value>) {
    if let Some(target) = link_key(value).and_then(|key| index.get(&key)) {
        *value = (*target).clone();
        return;
    }
    match value {
        Value::Array(items) => items.iter_mut().for_each(|v| resolve_in(v, index)),
        Value::Object(map) => map.values_mut().for_each(|v| resolve_in(v, index)),
        _ => {}
    }
}

fn link_key(value: &Value) -> Option<String> {
    let sys = value.get("sys")?;
    if sys.get("type")?.as_str()? != "Link" {
        return None;
    }
    let link_type = sys.get("linkType")?.as_str()?;
    let id = sys.get("id")?.as_str()?;
    Some(format!("{link_type}:{id}"))
}
