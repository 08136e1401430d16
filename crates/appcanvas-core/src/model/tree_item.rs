use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::element::Element;

/// Tree item - one node of a desired subtree shape
///
/// Only used as reorder input. Accepted on the wire either as a bare UUID
/// string (a leaf) or as `{"id": .., "elements": [..]}` where `children` is
/// accepted as an alias for `elements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    pub fn new(id: Uuid, children: Vec<TreeItem>) -> Self {
        Self { id, children }
    }

    pub fn leaf(id: Uuid) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    /// Describe the current shape of a nested element tree
    pub fn from_elements(elements: &[Element]) -> Vec<TreeItem> {
        elements
            .iter()
            .map(|e| TreeItem::new(e.id, TreeItem::from_elements(&e.children)))
            .collect()
    }

    /// All ids in `items`, depth-first pre-order
    pub fn flatten_ids(items: &[TreeItem]) -> Vec<Uuid> {
        let mut out = Vec::new();
        collect_ids(items, &mut out);
        out
    }
}

fn collect_ids(items: &[TreeItem], out: &mut Vec<Uuid>) {
    for item in items {
        out.push(item.id);
        collect_ids(&item.children, out);
    }
}

fn parse_id<E: de::Error>(value: &str) -> Result<Uuid, E> {
    Uuid::parse_str(value).map_err(|_| E::custom("Element ID is not a valid UUID."))
}

struct TreeItemVisitor;

impl<'de> Visitor<'de> for TreeItemVisitor {
    type Value = TreeItem;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("either a UUID or an object including a UUID and an element list")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<TreeItem, E> {
        Ok(TreeItem::leaf(parse_id(value)?))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TreeItem, A::Error> {
        let mut id: Option<Uuid> = None;
        let mut children: Option<Vec<TreeItem>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => {
                    let raw = map
                        .next_value::<serde_json::Value>()
                        .map_err(|_| de::Error::custom("Element ID must be a string."))?;
                    let text = raw
                        .as_str()
                        .ok_or_else(|| de::Error::custom("Element ID must be a string."))?;
                    id = Some(parse_id(text)?);
                }
                "elements" | "children" => {
                    if children.is_some() {
                        return Err(de::Error::custom(
                            "Only one of elements or children may be given.",
                        ));
                    }
                    children = Some(map.next_value::<Vec<TreeItem>>()?);
                }
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }

        let id = id.ok_or_else(|| de::Error::custom("Element ID is required."))?;
        Ok(TreeItem::new(id, children.unwrap_or_default()))
    }
}

impl<'de> Deserialize<'de> for TreeItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TreeItemVisitor)
    }
}
