pub mod client;
pub mod error;
pub mod repositories;

pub use client::PersistClient;
pub use error::PersistError;
pub use repositories::{
    ChecklistRepository, NoteRepository, SessionRepository, StateRepository, TemplateRepository,
};
