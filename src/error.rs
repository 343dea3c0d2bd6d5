use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongrecError {
    #[error("catalog file not found: {0}")]
    CatalogNotFound(String),

    #[error("catalog has no usable rows: {0}")]
    CatalogEmpty(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("no track matches: {0}")]
    UnknownTrack(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SongrecError>;
