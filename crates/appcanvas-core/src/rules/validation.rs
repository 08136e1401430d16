//! Payload validation
//!
//! Every write path normalises and validates its entity here before touching
//! the store, so a rejected payload never causes a partial write.

use crate::errors::{AppCanvasError, Result, MAX_NAME_LEN};
use crate::model::{Action, Element, ElementPayload, ElementType, Event, Project};

/// Trim a name and check its length
///
/// # Errors
/// `LengthExceeded` if the trimmed value is longer than 255 characters.
pub fn normalize_name(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(AppCanvasError::LengthExceeded {
            field,
            max: MAX_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate an element before insert or update
///
/// Trims the name in place. Attributes and styles are maps and therefore
/// already default to empty documents.
///
/// # Errors
/// * `LengthExceeded` (field `name`)
/// * `Required` (field `type`) if no type was ever given
/// * `UnsupportedElementType` if the type name was not recognised
pub fn validate_element(element: &mut Element) -> Result<()> {
    element.name = normalize_name("name", &element.name)?;
    validate_element_type(element.element_type)
}

/// Reject the `Invalid` sentinel
///
/// The raw name is gone by this point, so the error carries an empty value.
/// Check payloads with `validate_payload_type` first to report what was sent.
///
/// # Errors
/// `UnsupportedElementType` for `Invalid`.
pub fn validate_element_type(element_type: ElementType) -> Result<()> {
    if element_type.is_valid() {
        Ok(())
    } else {
        Err(AppCanvasError::UnsupportedElementType {
            value: element_type.as_str().to_string(),
        })
    }
}

/// Check the type name a payload carries, if any
///
/// # Errors
/// `UnsupportedElementType` holding the name as sent when it is not registered.
pub fn validate_payload_type(payload: &ElementPayload) -> Result<()> {
    match payload.element_type.as_deref() {
        Some(name) if !ElementType::parse(name).is_valid() => {
            Err(AppCanvasError::UnsupportedElementType {
                value: name.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Error for a payload that never named a type
pub fn missing_type() -> AppCanvasError {
    AppCanvasError::Required { field: "type" }
}

/// Validate a project before insert or update
///
/// # Errors
/// `Required` if the trimmed title is empty, `LengthExceeded` if too long.
pub fn validate_project(project: &mut Project) -> Result<()> {
    project.title = normalize_name("title", &project.title)?;
    if project.title.is_empty() {
        return Err(AppCanvasError::Required { field: "title" });
    }
    Ok(())
}

/// Validate an action before insert or update
///
/// # Errors
/// `LengthExceeded` (field `name`) or `Required` (field `action`).
pub fn validate_action(action: &mut Action) -> Result<()> {
    action.name = normalize_name("name", &action.name)?;
    if action.action.trim().is_empty() {
        return Err(AppCanvasError::Required { field: "action" });
    }
    Ok(())
}

/// Validate an event before insert or update
///
/// # Errors
/// `Required` (field `event`) if the trigger name is blank.
pub fn validate_event(event: &mut Event) -> Result<()> {
    event.event = event.event.trim().to_string();
    if event.event.is_empty() {
        return Err(AppCanvasError::Required { field: "event" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn element(name: &str, element_type: ElementType) -> Element {
        let mut e = Element::new(Uuid::now_v7(), None);
        e.name = name.to_string();
        e.element_type = element_type;
        e
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut e = element("   abc   ", ElementType::Text);
        validate_element(&mut e).unwrap();
        assert_eq!(e.name, "abc");
    }

    #[test]
    fn test_name_length_limit() {
        let mut ok = element(&"a".repeat(255), ElementType::Text);
        assert!(validate_element(&mut ok).is_ok());

        let mut too_long = element(&"a".repeat(256), ElementType::Text);
        assert_eq!(
            validate_element(&mut too_long),
            Err(AppCanvasError::LengthExceeded {
                field: "name",
                max: 255
            })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut e = element(&"é".repeat(255), ElementType::Text);
        assert!(validate_element(&mut e).is_ok());
    }

    #[test]
    fn test_invalid_type_rejected() {
        let mut e = element("x", ElementType::parse("carousel"));
        assert!(matches!(
            validate_element(&mut e),
            Err(AppCanvasError::UnsupportedElementType { .. })
        ));
    }

    #[test]
    fn test_payload_type_error_echoes_name() {
        let payload = ElementPayload {
            element_type: Some("carousel".to_string()),
            ..ElementPayload::default()
        };
        assert_eq!(
            validate_payload_type(&payload),
            Err(AppCanvasError::UnsupportedElementType {
                value: "carousel".to_string()
            })
        );
        assert!(validate_payload_type(&ElementPayload::named("x", ElementType::List)).is_ok());
        assert!(validate_payload_type(&ElementPayload::default()).is_ok());
    }

    #[test]
    fn test_project_title_required() {
        let mut p = Project::new("   ".to_string());
        assert_eq!(
            validate_project(&mut p),
            Err(AppCanvasError::Required { field: "title" })
        );
    }

    #[test]
    fn test_action_requires_kind() {
        let mut a = Action::new(Uuid::now_v7());
        a.name = " Go home ".to_string();
        assert_eq!(
            validate_action(&mut a),
            Err(AppCanvasError::Required { field: "action" })
        );

        a.action = "navigate".to_string();
        validate_action(&mut a).unwrap();
        assert_eq!(a.name, "Go home");
    }

    #[test]
    fn test_event_requires_trigger() {
        let mut ev = Event::new(Uuid::now_v7(), Uuid::now_v7(), "  ".to_string());
        assert_eq!(
            validate_event(&mut ev),
            Err(AppCanvasError::Required { field: "event" })
        );
    }
}
