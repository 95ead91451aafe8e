#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("feed lists node {key:?} more than once")]
    DuplicateNode { key: String },

    #[error("edge {from:?} -> {to:?} targets a node the feed never listed")]
    UnknownNode { from: String, to: String },

    #[error("malformed feed document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
