use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("container not found")]
    ContainerNotFound,

    #[error("scenes not found")]
    ScenesNotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame loop error: {0}")]
    FrameLoop(String),
}

pub type Result<T> = std::result::Result<T, Error>;
