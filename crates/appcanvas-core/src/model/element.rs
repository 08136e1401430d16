use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::element_type::ElementType;
use super::event::Event;
use super::tree_item::TreeItem;

/// Arbitrary key/value document (attributes, styles, action data)
pub type JsonObject = Map<String, Value>;

/// Element - a node in a project's content tree
///
/// Elements form an n-ary tree per project. `parent_id` is `None` for
/// top-level elements; siblings are ordered by `order_index`. Parent and
/// order are only ever changed by create (append) and reorder, never by
/// a field update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier, assigned at creation (UUID v7)
    pub id: Uuid,

    /// Owning project; immutable after creation
    pub project_id: Uuid,

    /// Parent element in the same project (None for top-level)
    pub parent_id: Option<Uuid>,

    /// Position among siblings, ascending
    pub order_index: i64,

    /// Display name (trimmed, at most 255 characters)
    pub name: String,

    /// Registered element type
    #[serde(rename = "type")]
    pub element_type: ElementType,

    pub attributes: JsonObject,

    pub styles: JsonObject,

    pub is_visible: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Depth below the scope of a tree read (1 = direct child); 0 outside tree reads
    #[serde(default, skip_serializing_if = "is_zero")]
    pub depth: u32,

    /// Nested children, populated only by nested tree reads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,

    /// Events, populated only when a tree read asks for them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
}

fn is_zero(depth: &u32) -> bool {
    *depth == 0
}

impl Element {
    /// Create a new, not yet persisted element in the given sibling scope
    ///
    /// The element gets a fresh id, an `Invalid` type and `order_index` 0;
    /// the caller applies a payload and the store assigns the order.
    pub fn new(project_id: Uuid, parent_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            project_id,
            parent_id,
            order_index: 0,
            name: String::new(),
            element_type: ElementType::Invalid,
            attributes: JsonObject::new(),
            styles: JsonObject::new(),
            is_visible: true,
            created_at: now,
            updated_at: now,
            depth: 0,
            children: Vec::new(),
            events: None,
        }
    }

    /// Check if this element is top-level within its project
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_screen(&self) -> bool {
        self.element_type.is_screen()
    }

    /// Copy the fields present in `payload` onto this element
    ///
    /// Only content fields are touched; `parent_id` and `order_index` are
    /// not part of a payload. Call `rules::validation::validate_element`
    /// afterwards.
    pub fn apply_payload(&mut self, payload: &ElementPayload) {
        if let Some(name) = &payload.name {
            self.name = name.clone();
        }
        if let Some(element_type) = payload.parsed_type() {
            self.element_type = element_type;
        }
        if let Some(attributes) = &payload.attributes {
            self.attributes = attributes.clone();
        }
        if let Some(styles) = &payload.styles {
            self.styles = styles.clone();
        }
        if let Some(is_visible) = payload.is_visible {
            self.is_visible = is_visible;
        }
    }
}

/// Field updates for creating or saving an element
///
/// Absent fields keep their current value (or the default on create).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPayload {
    #[serde(default)]
    pub name: Option<String>,

    /// Wire name of the type, kept as given so a rejection can echo it
    #[serde(default, rename = "type")]
    pub element_type: Option<String>,

    #[serde(default)]
    pub attributes: Option<JsonObject>,

    #[serde(default)]
    pub styles: Option<JsonObject>,

    #[serde(default)]
    pub is_visible: Option<bool>,

    /// Desired shape of the element's subtree, applied after the field
    /// update on save. Ignored on create: a new element has no children.
    #[serde(default)]
    pub elements: Option<Vec<TreeItem>>,
}

impl ElementPayload {
    /// Payload with just a name and a type
    pub fn named(name: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            name: Some(name.into()),
            element_type: Some(element_type.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Parsed type; an unrecognised name yields `ElementType::Invalid`
    pub fn parsed_type(&self) -> Option<ElementType> {
        self.element_type.as_deref().map(ElementType::parse)
    }
}

/// Scope - the parent context of a sibling group
///
/// Either a project root (top-level elements) or a specific element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeScope {
    Project(Uuid),
    Element(Uuid),
}

impl TreeScope {
    /// The `parent_id` that direct children of this scope carry
    pub fn parent_id(&self) -> Option<Uuid> {
        match self {
            TreeScope::Project(_) => None,
            TreeScope::Element(id) => Some(*id),
        }
    }

    /// The id naming the scope itself (project or element)
    pub fn id(&self) -> Uuid {
        match self {
            TreeScope::Project(id) | TreeScope::Element(id) => *id,
        }
    }
}

impl std::fmt::Display for TreeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeScope::Project(id) => write!(f, "project:{}", id),
            TreeScope::Element(id) => write!(f, "element:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_element() {
        let project_id = Uuid::now_v7();
        let element = Element::new(project_id, None);

        assert_eq!(element.project_id, project_id);
        assert!(element.is_top_level());
        assert!(element.is_visible);
        assert!(element.attributes.is_empty());
        assert!(element.styles.is_empty());
        assert_eq!(element.element_type, ElementType::Invalid);
        assert!(element.events.is_none());
    }

    #[test]
    fn test_apply_payload_only_touches_present_fields() {
        let mut element = Element::new(Uuid::now_v7(), None);
        element.name = "Before".to_string();
        element.element_type = ElementType::Screen;

        let payload = ElementPayload {
            is_visible: Some(false),
            ..ElementPayload::default()
        };
        element.apply_payload(&payload);

        assert_eq!(element.name, "Before");
        assert_eq!(element.element_type, ElementType::Screen);
        assert!(!element.is_visible);
    }

    #[test]
    fn test_payload_deserializes_wire_shape() {
        let payload: ElementPayload = serde_json::from_value(json!({
            "name": "Home",
            "type": "screen",
            "attributes": {"title": "Welcome"}
        }))
        .unwrap();

        assert_eq!(payload.name.as_deref(), Some("Home"));
        assert_eq!(payload.element_type.as_deref(), Some("screen"));
        assert_eq!(payload.parsed_type(), Some(ElementType::Screen));
        assert_eq!(
            payload.attributes.unwrap().get("title"),
            Some(&json!("Welcome"))
        );
        assert!(payload.styles.is_none());
    }

    #[test]
    fn test_virtual_fields_omitted_when_empty() {
        let element = Element::new(Uuid::now_v7(), None);
        let value = serde_json::to_value(&element).unwrap();

        assert!(value.get("children").is_none());
        assert!(value.get("events").is_none());
        assert!(value.get("depth").is_none());
        assert_eq!(value.get("type"), Some(&json!("")));
    }

    #[test]
    fn test_scope_parent_id() {
        let id = Uuid::now_v7();
        assert_eq!(TreeScope::Project(id).parent_id(), None);
        assert_eq!(TreeScope::Element(id).parent_id(), Some(id));
        assert_eq!(TreeScope::Element(id).id(), id);
    }
}
