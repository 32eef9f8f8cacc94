use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Empty response from the nutrition advisor")]
    EmptyResponse,

    #[error("Missing API key: set GEMINI_API_KEY")]
    MissingApiKey,

    #[error("No profile set up yet")]
    MissingProfile,

    #[error("No meal plan generated yet")]
    MissingPlan,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, NutriError>;
