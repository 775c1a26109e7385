use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("BSON serialization error: {0}")]
    BsonSerialization(#[from] bson::ser::Error),

    #[error("Encryption error: {0}")]
    Crypto(#[from] nous_crypto::CryptoError),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Checklist not found for date: {0}")]
    ChecklistNotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
