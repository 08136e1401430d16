use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Project - owner of an element tree
///
/// `main_screen` designates the project's entry point. When set it always
/// references a screen element of this project; it is maintained by the
/// element lifecycle hooks and only written elsewhere after re-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub main_screen: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title,
            description: String::new(),
            main_screen: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Field updates for an existing project
///
/// `main_screen` distinguishes "leave alone" (`None`) from "unset"
/// (`Some(None)`, a JSON `null`) and "point at" (`Some(Some(id))`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub main_screen: Option<Option<Uuid>>,
}

/// Page size served when the caller asks for none, or for too many
pub const DEFAULT_PAGE_LIMIT: u32 = 30;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// One page of the project listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPage {
    pub data: Vec<Project>,
    pub limit: u32,
    pub offset: u32,
    /// Total number of projects, not just this page
    pub count: u64,
    pub has_more: bool,
}

impl ProjectPage {
    /// Clamp a requested page size: 0 or anything above `MAX_PAGE_LIMIT`
    /// falls back to `DEFAULT_PAGE_LIMIT`
    pub fn effective_limit(requested: u32) -> u32 {
        if requested == 0 || requested > MAX_PAGE_LIMIT {
            DEFAULT_PAGE_LIMIT
        } else {
            requested
        }
    }

    pub fn new(data: Vec<Project>, limit: u32, offset: u32, count: u64) -> Self {
        Self {
            data,
            limit,
            offset,
            count,
            has_more: count > u64::from(offset) + u64::from(limit),
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_main_screen_tristate() {
        let absent: ProjectPatch = serde_json::from_value(json!({"title": "T"})).unwrap();
        assert_eq!(absent.main_screen, None);

        let cleared: ProjectPatch = serde_json::from_value(json!({"main_screen": null})).unwrap();
        assert_eq!(cleared.main_screen, Some(None));

        let id = Uuid::now_v7();
        let set: ProjectPatch =
            serde_json::from_value(json!({"main_screen": id.to_string()})).unwrap();
        assert_eq!(set.main_screen, Some(Some(id)));
    }

    #[test]
    fn test_page_limit_falls_back_to_default() {
        assert_eq!(ProjectPage::effective_limit(0), DEFAULT_PAGE_LIMIT);
        assert_eq!(ProjectPage::effective_limit(101), DEFAULT_PAGE_LIMIT);
        assert_eq!(ProjectPage::effective_limit(100), 100);
        assert_eq!(ProjectPage::effective_limit(5), 5);
    }

    #[test]
    fn test_page_has_more() {
        assert!(ProjectPage::new(Vec::new(), 10, 0, 11).has_more);
        assert!(!ProjectPage::new(Vec::new(), 10, 0, 10).has_more);
        assert!(!ProjectPage::new(Vec::new(), 10, 20, 25).has_more);
    }
}
