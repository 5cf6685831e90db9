use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelinhaError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejections from catalog mutations that leave state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("profile name is empty")]
    EmptyName,

    #[error("household profile limit reached")]
    ProfileLimit,
}
