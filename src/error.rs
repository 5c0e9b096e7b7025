use std::fmt;

use thiserror::Error;

/// How a boxer was looked up when it could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxerKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for BoxerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxerKey::Id(id) => write!(f, "with ID {id}"),
            BoxerKey::Name(name) => write!(f, "'{name}'"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BoxingError {
    #[error("Invalid {field}: {value}. {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Boxer {0} not found.")]
    NotFound(BoxerKey),

    #[error("Boxer with name '{0}' already exists")]
    Duplicate(String),

    #[error("Invalid entrant: {0}")]
    InvalidEntrant(String),

    #[error("Ring is full, cannot add more boxers.")]
    RingFull,

    #[error("There must be two boxers to start a fight (found {present}).")]
    InsufficientEntrants { present: usize },

    #[error("Database error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed: {0}")]
    HealthCheck(String),
}

impl BoxingError {
    pub(crate) fn validation(
        field: &'static str,
        value: impl fmt::Display,
        reason: &'static str,
    ) -> Self {
        BoxingError::Validation {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, BoxingError>;
