use thiserror::Error;

/// "Top-level errors" for scale data generation.
///
/// Only input validation can fail. Everything downstream of a valid scale is total.
#[derive(Debug, Error)]
pub enum FretboardError {
    /// The scale name is not a key of the formula catalog.
    #[error("unknown scale `{0}`")]
    UnknownScale(String),
    /// The root note string does not name a pitch class.
    #[error("unknown note name `{0}`")]
    UnknownNote(String),
    /// A JSON catalog could not be deserialized.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] serde_json::Error),
    /// A catalog entry that parses but cannot be used on the neck.
    #[error("invalid catalog entry: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = std::result::Result<T, FretboardError>;
