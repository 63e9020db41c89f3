use thiserror::Error;

pub type Result<T> = std::result::Result<T, WireboxError>;

#[derive(Debug, Error)]
pub enum WireboxError {
    #[error("service '{id}' not found")]
    ServiceNotFound { id: String },

    #[error("parameter '{name}' not found")]
    ParameterNotFound { name: String },

    #[error("circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    #[error("cannot downcast '{id}' to {expected}")]
    DowncastFailed { id: String, expected: &'static str },
}
