use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Model error: {0}")]
    Model(#[from] anyhow::Error),

    #[error("Storage error: {0}")]
    Persist(#[from] nous_persist::PersistError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Not enough messages for a summary")]
    NotEnoughTurns,

    #[error("Model did not return a usable digest")]
    SummaryUnavailable,

    #[error("No notes found for analysis")]
    NoNotes,

    #[error("Model did not return a usable state analysis")]
    AnalysisUnavailable,
}

pub type Result<T> = std::result::Result<T, CoreError>;
