/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    Schema(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short label used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::HttpClient(_) | AppError::ExternalApi(_) => "transport",
            AppError::Decode(_) => "decode",
            AppError::Schema(_) => "schema",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<regex::Error> for AppError {
    fn from(e: regex::Error) -> Self {
        AppError::InvalidInput(format!("invalid match pattern: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
