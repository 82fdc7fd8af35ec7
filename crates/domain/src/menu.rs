use barberdesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a navigable menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuId(Uuid);

impl MenuId {
    /// Creates a new random menu identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a menu identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MenuId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MenuId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Navigation path of a menu, used as the permission key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MenuPath(String);

impl MenuPath {
    /// Creates a validated absolute path without trailing slash or whitespace.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if !trimmed.starts_with('/') {
            return Err(AppError::Validation(format!(
                "menu path '{trimmed}' must start with '/'"
            )));
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(format!(
                "menu path '{trimmed}' must not contain whitespace"
            )));
        }

        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "menu path must not consist of slashes only".to_owned(),
            ));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MenuPath> for String {
    fn from(value: MenuPath) -> Self {
        value.0
    }
}

/// Validated definition of a permission-gated navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    name: NonEmptyString,
    path: MenuPath,
    icon: Option<String>,
    parent_id: Option<MenuId>,
    sort_order: i32,
}

impl MenuDefinition {
    /// Creates a validated menu definition.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        icon: Option<String>,
        parent_id: Option<MenuId>,
        sort_order: i32,
    ) -> AppResult<Self> {
        if sort_order < 0 {
            return Err(AppError::Validation(
                "sort_order must be greater than or equal to zero".to_owned(),
            ));
        }

        let icon = icon.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Ok(Self {
            name: NonEmptyString::new(name)?,
            path: MenuPath::new(path)?,
            icon,
            parent_id,
            sort_order,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the navigation path.
    #[must_use]
    pub fn path(&self) -> &MenuPath {
        &self.path
    }

    /// Returns the icon reference, if any.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Returns the parent menu, if this is a nested entry.
    #[must_use]
    pub fn parent_id(&self) -> Option<MenuId> {
        self.parent_id
    }

    /// Returns the ordering value among siblings.
    #[must_use]
    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }
}
