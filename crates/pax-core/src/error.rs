use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Value not supported for setting basePercentageOn: {0}")]
    UnsupportedConfiguration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Frame loop error: {0}")]
    FrameLoop(String),
}

pub type Result<T> = std::result::Result<T, Error>;
