use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

// Enum for application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    /// Fatal at startup: the app refuses to open a session without a key.
    #[error("GEMINI_API_KEY is not set in the environment, a .env file, or the settings file")]
    MissingApiKey,
}

// Errors from talking to the model provider.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("No message found in the model response")]
    NoMessageFound,

    #[error("Model request failed: {0}")]
    RequestFailed(String),
}

// Errors from the local game tools.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("A die needs at least one side, got {0}")]
    InvalidDiceSides(u32),
}
