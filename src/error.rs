use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid source configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("document for category '{category}' is unreadable: {path}")]
    SourceUnreadable { category: String, path: PathBuf },

    #[error("data directory does not exist and could not be created: {0}")]
    DataDir(PathBuf),
}
