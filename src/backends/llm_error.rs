use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Rate limit: {message}")]
    RateLimit {
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Error: {message}")]
    Other { message: String },
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimit { .. }
                | LlmError::ServerError { .. }
                | LlmError::NetworkError { .. }
                | LlmError::Timeout { .. }
        )
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn short_message(&self) -> String {
        match self {
            LlmError::RateLimit { .. } => "Rate limit hit".to_string(),
            LlmError::ServerError { status, .. } => format!("Server error ({})", status),
            LlmError::AuthenticationError { .. } => "Authentication error".to_string(),
            LlmError::NetworkError { .. } => "Network error".to_string(),
            LlmError::Timeout { .. } => "Timed out".to_string(),
            LlmError::InvalidResponse { .. } => "Invalid response".to_string(),
            LlmError::Other { .. } => "Error occurred".to_string(),
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => LlmError::RateLimit {
                retry_after: None,
                message,
            },
            500..=599 => LlmError::ServerError { status, message },
            401 | 403 => LlmError::AuthenticationError { message },
            _ => LlmError::Other {
                message: format!("API error {}: {}", status, message),
            },
        }
    }
}
