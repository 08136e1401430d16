use thiserror::Error;
use uuid::Uuid;

/// Result type alias using AppCanvasError
pub type Result<T> = std::result::Result<T, AppCanvasError>;

/// Maximum length (in characters) of names and titles
pub const MAX_NAME_LEN: usize = 255;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error that leaves the store or engine carries one of these kinds.
/// Each kind maps to a stable code that the transport layer can translate
/// into a status and that tests can assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation (field-tagged)
    InvalidInput,
    Required,
    LengthExceeded,
    UnsupportedElementType,
    InvalidUuid,
    NotAScreen,

    // Lookup
    NotFound,

    // Ownership
    ElementNotOwnedByProject,
    ActionNotOwnedByProject,

    // Reorder
    TreeNotCompleted,
    ElementNotInTree,
    DuplicateTreeItem,

    // Integration/IO
    ConstraintViolation,
    Persistence,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Required => "ERR_REQUIRED",
            ExErrorKind::LengthExceeded => "ERR_LENGTH_EXCEEDED",
            ExErrorKind::UnsupportedElementType => "ERR_UNSUPPORTED_ELEMENT_TYPE",
            ExErrorKind::InvalidUuid => "ERR_INVALID_UUID",
            ExErrorKind::NotAScreen => "ERR_NOT_A_SCREEN",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ElementNotOwnedByProject => "ERR_ELEMENT_NOT_OWNED_BY_PROJECT",
            ExErrorKind::ActionNotOwnedByProject => "ERR_ACTION_NOT_OWNED_BY_PROJECT",
            ExErrorKind::TreeNotCompleted => "ERR_TREE_NOT_COMPLETED",
            ExErrorKind::ElementNotInTree => "ERR_ELEMENT_NOT_IN_TREE",
            ExErrorKind::DuplicateTreeItem => "ERR_DUPLICATE_TREE_ITEM",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds the caller can fix by changing its input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput
                | ExErrorKind::Required
                | ExErrorKind::LengthExceeded
                | ExErrorKind::UnsupportedElementType
                | ExErrorKind::InvalidUuid
                | ExErrorKind::NotAScreen
        )
    }
}

/// Canonical structured error type
///
/// Carries the classification (`kind`) used for programmatic handling plus
/// the context needed for debugging: the operation, the entity involved and,
/// for validation failures, the offending input field.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Tag the input field responsible for the error
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the offending input field, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the pure core (validation and tree diffing)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppCanvasError {
    // ===== Validation Errors =====
    /// A required field is missing or blank
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A text field exceeds its maximum length
    #[error("Maximum length of {field} is {max}")]
    LengthExceeded { field: &'static str, max: usize },

    /// The element type is not one of the registered types
    #[error("Unsupported element type: {value:?}")]
    UnsupportedElementType { value: String },

    /// A string that should hold a UUID does not parse as one
    #[error("Not a valid UUID: {value:?}")]
    InvalidUuid { value: String },

    /// Tree projection named a column that does not exist
    #[error("Unknown element column: {column}")]
    UnknownColumn { column: String },

    /// main_screen must point at a screen element
    #[error("Element {element_id} is not a screen")]
    NotAScreen { element_id: Uuid },

    /// main_screen cannot be cleared while the project still has screens
    #[error("Project {project_id} still has screens; main_screen cannot be unset")]
    MainScreenRequired { project_id: Uuid },

    // ===== Lookup Errors =====
    #[error("Project not found: {project_id}")]
    ProjectNotFound { project_id: Uuid },

    #[error("Element not found: {element_id}")]
    ElementNotFound { element_id: Uuid },

    #[error("Action not found: {action_id}")]
    ActionNotFound { action_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    // ===== Ownership Errors =====
    /// Element referenced as parent, main screen or reorder target lives in another project
    #[error("Element {element_id} is not owned by project {project_id}")]
    ElementNotOwnedByProject { element_id: Uuid, project_id: Uuid },

    /// Event references an action from another project
    #[error("Action {action_id} is not owned by project {project_id}")]
    ActionNotOwnedByProject { action_id: Uuid, project_id: Uuid },

    // ===== Reorder Errors =====
    /// Desired tree omits current descendants of the scope
    #[error("Element tree is not completed: {} element(s) missing", .missing.len())]
    TreeNotCompleted { missing: Vec<Uuid> },

    /// Desired tree contains an element that is not a descendant of the scope
    #[error("Element {element_id} is not in the tree")]
    ElementNotInTree { element_id: Uuid },

    /// Desired tree lists the same element more than once
    #[error("Element {element_id} appears more than once in the tree")]
    DuplicateTreeItem { element_id: Uuid },

    // ===== Generic Errors =====
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<AppCanvasError> for ExError {
    fn from(err: AppCanvasError) -> Self {
        let message = err.to_string();
        match err {
            AppCanvasError::Required { field } => ExError::new(ExErrorKind::Required)
                .with_field(field)
                .with_message(message),
            AppCanvasError::LengthExceeded { field, .. } => {
                ExError::new(ExErrorKind::LengthExceeded)
                    .with_field(field)
                    .with_message(message)
            }
            AppCanvasError::UnsupportedElementType { .. } => {
                ExError::new(ExErrorKind::UnsupportedElementType)
                    .with_field("type")
                    .with_message(message)
            }
            AppCanvasError::InvalidUuid { .. } => ExError::new(ExErrorKind::InvalidUuid)
                .with_field("id")
                .with_message(message),
            AppCanvasError::UnknownColumn { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_field("columns")
                .with_message(message),
            AppCanvasError::NotAScreen { element_id } => ExError::new(ExErrorKind::NotAScreen)
                .with_field("main_screen")
                .with_entity_id(element_id.to_string())
                .with_message(message),
            AppCanvasError::MainScreenRequired { project_id } => {
                ExError::new(ExErrorKind::Required)
                    .with_field("main_screen")
                    .with_entity_id(project_id.to_string())
                    .with_message(message)
            }
            AppCanvasError::ProjectNotFound { project_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(project_id.to_string())
                .with_message(message),
            AppCanvasError::ElementNotFound { element_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(element_id.to_string())
                .with_message(message),
            AppCanvasError::ActionNotFound { action_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(action_id.to_string())
                .with_message(message),
            AppCanvasError::EventNotFound { event_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(event_id.to_string())
                .with_message(message),
            AppCanvasError::ElementNotOwnedByProject { element_id, .. } => {
                ExError::new(ExErrorKind::ElementNotOwnedByProject)
                    .with_entity_id(element_id.to_string())
                    .with_message(message)
            }
            AppCanvasError::ActionNotOwnedByProject { action_id, .. } => {
                ExError::new(ExErrorKind::ActionNotOwnedByProject)
                    .with_field("action_id")
                    .with_entity_id(action_id.to_string())
                    .with_message(message)
            }
            AppCanvasError::TreeNotCompleted { missing } => {
                let mut ex = ExError::new(ExErrorKind::TreeNotCompleted).with_message(message);
                if let Some(first) = missing.first() {
                    ex = ex.with_entity_id(first.to_string());
                }
                ex
            }
            AppCanvasError::ElementNotInTree { element_id } => {
                ExError::new(ExErrorKind::ElementNotInTree)
                    .with_entity_id(element_id.to_string())
                    .with_message(message)
            }
            AppCanvasError::DuplicateTreeItem { element_id } => {
                ExError::new(ExErrorKind::DuplicateTreeItem)
                    .with_entity_id(element_id.to_string())
                    .with_message(message)
            }
            AppCanvasError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            AppCanvasError::Internal { .. } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
