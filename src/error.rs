use thiserror::Error;

pub type Result<T> = std::result::Result<T, DealflowError>;

#[derive(Debug, Error)]
pub enum DealflowError {
    #[error("Stage not found: {0}")]
    StageNotFound(String),

    #[error("Deal {0} already exists on the board")]
    DuplicateDeal(String),

    #[error("Invalid deal ID: {0:?}")]
    InvalidDealId(String),

    #[error("Invalid stage ID: {0:?}")]
    InvalidStageId(String),

    #[error("Invalid monetary value: {0:?}")]
    InvalidMoney(String),

    #[error("Stage {0} is defined more than once")]
    DuplicateStage(String),

    #[error("File size exceeds the {limit_mb}MB limit ({size} bytes)")]
    FileTooLarge { size: u64, limit_mb: u64 },

    #[error("File type not supported: {extension}. Please upload: {allowed}")]
    UnsupportedFileType { extension: String, allowed: String },

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),
}
