// Error handling for the mock filesystem module
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Cannot copy directory {0} over a file")]
    IsADirectory(String),

    #[error("File backed by {0} has not been loaded into memory")]
    NotLoaded(String),

    #[error("The root node cannot be removed")]
    RootRemoval,

    #[error("Invalid filesystem description at {key}: {reason}")]
    InvalidDescription { key: String, reason: String },
}

pub type FsResult<T> = Result<T, FsError>;
