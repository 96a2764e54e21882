use serde::{Deserialize, Serialize};

// ============= Authentication Types =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Email verification with the code the backend mailed after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

/// Token issued by login or verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Registration may or may not log the user in straight away.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, alias = "access_token")]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(alias = "message")]
    pub error: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<altar_core::Error> for ClientError {
    fn from(e: altar_core::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

impl ClientError {
    /// Map a failed session fetch onto the page-level failure taxonomy.
    pub fn into_load_failure(self) -> altar_core::LoadFailure {
        use altar_core::LoadFailure;
        match self {
            ClientError::Status { status, .. } => LoadFailure::Status(status),
            ClientError::AccessDenied => LoadFailure::Status(403),
            ClientError::NotFound(_) => LoadFailure::Status(404),
            ClientError::Decode(e) => LoadFailure::Decode(e),
            other => LoadFailure::Network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
