use thiserror::Error;

/// Errors that can occur while fetching, parsing or configuring resolution.
///
/// Failures of a single resolution task never surface as a `ResolverError`
/// from [`crate::resolution::SwaggerResolver::resolve`]; they are recorded as
/// a [`crate::resolution::TaskStatus`] instead.
#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("fetch error: {message} (url: {url})")]
    Fetch { url: String, message: String },

    #[error("parse error: {message}")]
    Parse { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `ResolverError`.
pub type Result<T> = std::result::Result<T, ResolverError>;
