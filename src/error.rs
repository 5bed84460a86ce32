use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    InvalidCredentials,
    PlanNotFound,
    ValidationError,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::PlanNotFound => "PLAN_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct BoardError {
    pub code: ErrorCode,
    pub message: String,
}

impl BoardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "planboard is not initialized. Run `planboard init` first.",
        )
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorCode::InvalidCredentials,
            "Login failed. Email and password are both required; try again.",
        )
    }

    pub fn plan_not_found(id: &str) -> Self {
        Self::new(ErrorCode::PlanNotFound, format!("Plan not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}

impl From<rusqlite::Error> for BoardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(e: serde_json::Error) -> Self {
        Self::storage(format!("Serialization failed: {e}"))
    }
}

impl From<std::io::Error> for BoardError {
    fn from(e: std::io::Error) -> Self {
        Self::storage(e.to_string())
    }
}
