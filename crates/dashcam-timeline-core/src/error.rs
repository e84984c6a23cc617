use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] csv::Error),

    #[error("Invalid UTC offset '{0}', expected something like +02:00")]
    InvalidOffset(String),

    #[error("Invalid timeline configuration: {0}")]
    InvalidTimeline(String),

    #[error("{0}")]
    Other(String),
}
