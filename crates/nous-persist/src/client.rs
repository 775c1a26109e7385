use mongodb::{bson::doc, Client};

use nous_crypto::FieldCodec;

use crate::error::{PersistError, Result};
use crate::repositories::{
    ChecklistRepository, NoteRepository, SessionRepository, StateRepository, TemplateRepository,
};

/// Aggregates the per-collection repositories over one MongoDB connection.
/// All of them share the same field codec, so nothing reaches storage
/// unencrypted.
pub struct PersistClient {
    sessions: SessionRepository,
    notes: NoteRepository,
    templates: TemplateRepository,
    checklists: ChecklistRepository,
    states: StateRepository,
}

impl PersistClient {
    pub async fn connect(uri: &str, db_name: &str, codec: FieldCodec) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        // Verify the connection before handing out repositories
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        tracing::info!(db = db_name, "Connected to MongoDB");

        Ok(Self {
            sessions: SessionRepository::new(&client, db_name, codec.clone()),
            notes: NoteRepository::new(&client, db_name, codec.clone()),
            templates: TemplateRepository::new(&client, db_name, codec.clone()),
            checklists: ChecklistRepository::new(&client, db_name, codec.clone()),
            states: StateRepository::new(&client, db_name, codec),
        })
    }

    pub fn sessions(&self) -> &SessionRepository {
        &self.sessions
    }

    pub fn notes(&self) -> &NoteRepository {
        &self.notes
    }

    pub fn templates(&self) -> &TemplateRepository {
        &self.templates
    }

    pub fn checklists(&self) -> &ChecklistRepository {
        &self.checklists
    }

    pub fn states(&self) -> &StateRepository {
        &self.states
    }
}
