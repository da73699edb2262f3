use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the checked edges of the simulator.
///
/// The physics operations themselves are infallible; only configuration
/// loading and validated body construction can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Configuration text could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}
