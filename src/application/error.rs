use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid source: {0}")]
    InvalidSource(String),

    #[error("source reached end of stream")]
    SourceExhausted,

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("block for slot {slot} not available: {reason}")]
    BlockUnavailable { slot: u64, reason: String },

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("sink error: {0}")]
    SinkError(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("gave up after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },
}

impl AppError {
    /// Errors the block poller swallows and retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::RpcError(_) | AppError::BlockUnavailable { .. } | AppError::ParseError(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
