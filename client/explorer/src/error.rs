use api::{ApiError, Collection};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Api error: {0}")]
    Api(#[from] ApiError),

    #[error("Invalid {key} value: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("No {collection} with id {id}")]
    NotFound { collection: Collection, id: u32 },

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}
