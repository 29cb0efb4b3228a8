use thiserror::Error;

#[derive(Error, Debug)]
pub enum RackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Application error: {message}")]
    ApplicationError { message: String },

    #[error("Response error: {message}")]
    ResponseError { message: String },
}

pub type Result<T> = std::result::Result<T, RackError>;
