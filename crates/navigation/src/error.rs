use thiserror::Error;

pub type NavigationResult<T> = Result<T, NavigationError>;

#[derive(Debug, Error)]
pub enum NavigationError {
    /// A route tree or stored session that does not deserialize.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid guard configuration: {0}")]
    Config(String),
}
