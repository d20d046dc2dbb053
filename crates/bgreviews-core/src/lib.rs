pub mod app_config;
pub mod body;
pub mod config;
pub mod validate;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use body::{parse_new_comment, parse_vote_delta, NewComment};
pub use config::{load_app_config, load_app_config_from_env};
pub use validate::{parse_id, ReviewListParams, SortColumn, SortOrder};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Request input that failed validation before reaching the database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input is not an accepted data type")]
    InvalidDataType,
    #[error("sort_by is not an accepted column")]
    BadSort,
    #[error("order must be asc or desc")]
    BadOrder,
    #[error("required field '{0}' was not provided")]
    MissingField(&'static str),
}
