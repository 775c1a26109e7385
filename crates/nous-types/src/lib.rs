pub mod chat;
pub mod checklist;
pub mod note;
pub mod state;

pub use chat::{ChatSession, ChatTurn, TurnRole};
pub use checklist::{ChecklistItem, ChecklistSuggestion, ChecklistTemplate, DailyChecklist};
pub use note::{Note, NoteUpdate};
pub use state::{StateMetrics, StateRecord};
