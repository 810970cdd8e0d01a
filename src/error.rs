use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllabusError {
    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid difficulty '{0}'")]
    InvalidDifficulty(String),

    #[error("invalid sort order '{0}'")]
    InvalidSortOrder(String),

    #[error("invalid price '{0}'")]
    InvalidPrice(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SyllabusError>;
