use thiserror::Error;

#[derive(Error, Debug)]
pub enum GasTickerError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Oracle responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid oracle payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GasTickerError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            GasTickerError::Transport(e) if e.is_timeout() => "TIMEOUT",
            GasTickerError::Transport(_) => "TRANSPORT",
            GasTickerError::Status(_) => "UPSTREAM_STATUS",
            GasTickerError::Decode(_) => "DECODE",
            GasTickerError::Config(_) => "CONFIG",
        }
    }
}
