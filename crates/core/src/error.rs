use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A required input was absent or blank. Never recovered internally.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A declared generic type could not be resolved against a concrete class.
    #[error("cannot resolve type {type_name} against {context}")]
    UnresolvableType { type_name: String, context: String },
    /// The class store could not load or parse a class.
    #[error("reflection error: {0}")]
    Reflection(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
