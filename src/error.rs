use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("This status is reserved for core quests only.")]
    ReservedStatus,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Quest not found: {0}")]
    QuestNotFound(i64),

    #[error("User quest not found for quest {0}")]
    UserQuestNotFound(i64),

    #[error("Quest {0} has already been started")]
    AlreadyExists(i64),

    #[error("Value must be between 0 and 4, got {0}")]
    StrengthOutOfRange(i32),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, QuestError>;
