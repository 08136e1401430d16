use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event - binds an element's trigger (e.g. "click") to a project action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub element_id: Uuid,
    pub action_id: Uuid,
    /// Trigger name
    pub event: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(element_id: Uuid, action_id: Uuid, event: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            element_id,
            action_id,
            event,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy the fields present in `payload`; the element binding never moves
    pub fn apply_payload(&mut self, payload: &EventPayload) {
        if let Some(action_id) = payload.action_id {
            self.action_id = action_id;
        }
        if let Some(event) = &payload.event {
            self.event = event.clone();
        }
    }
}

/// Input for creating or updating an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub action_id: Option<Uuid>,
    #[serde(default)]
    pub event: Option<String>,
}
