use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::element::JsonObject;

/// Action - a project-level behaviour that element events can invoke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    /// Action kind, e.g. "navigate" or "alert"
    pub action: String,
    pub data: JsonObject,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Action {
    pub fn new(project_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            project_id,
            name: String::new(),
            action: String::new(),
            data: JsonObject::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_payload(&mut self, payload: &ActionPayload) {
        if let Some(name) = &payload.name {
            self.name = name.clone();
        }
        if let Some(action) = &payload.action {
            self.action = action.clone();
        }
        if let Some(data) = &payload.data {
            self.data = data.clone();
        }
    }
}

/// Input for creating or updating an action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data: Option<JsonObject>,
}
