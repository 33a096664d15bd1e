use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a known placement export (map editor: {map_editor}; spooner: {spooner})")]
    UnrecognizedFormat { map_editor: String, spooner: String },
}
