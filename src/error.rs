use thiserror::Error;

// Enum for handling various application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI error: {0}")]
    AI(#[from] AIError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("No OpenAI API key configured (settings.json or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

// Errors from the conversation loop and its tools.
#[derive(Debug, Error)]
pub enum AIError {
    #[error("OpenAI API error: {0}")]
    OpenAI(#[from] async_openai::error::OpenAIError),

    #[error("No message found")]
    NoMessageFound, // The model response carried neither text nor tool calls.

    #[error("Unknown tool requested: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(#[from] serde_json::Error),

    #[error("Judge returned no usable score: {0}")]
    InvalidScore(String),

    #[error("Tool round limit reached without an assistant reply")]
    ToolRoundLimit,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// Data-access errors. Whether these are swallowed or propagated depends on
// the operation: reads downgrade to a user-facing message, writes fail the
// whole interaction (see tools.rs).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    // Connection::open and open_in_memory surface the inner error type
    // directly rather than wrapping it.
    #[error("sqlite error: {0}")]
    Rusqlite(#[from] tokio_rusqlite::rusqlite::Error),
}
