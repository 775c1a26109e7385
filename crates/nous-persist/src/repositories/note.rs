use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use nous_crypto::FieldCodec;
use nous_types::{Note, NoteUpdate};

use crate::error::{PersistError, Result};

/// Journal notes, stored encrypted and returned decrypted.
#[derive(Clone)]
pub struct NoteRepository {
    collection: Collection<Note>,
    codec: FieldCodec,
}

impl NoteRepository {
    pub fn new(client: &Client, db_name: &str, codec: FieldCodec) -> Self {
        let collection = client.database(db_name).collection("notes");
        Self { collection, codec }
    }

    /// Create a new note
    pub async fn create_note(&self, note: Note) -> Result<Note> {
        let stored = self.codec.encrypt_note(note.clone())?;
        self.collection.insert_one(&stored).await?;
        Ok(note)
    }

    /// List all notes for a user, most recently updated first
    pub async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        let filter = doc! { "user_id": user_id };
        let notes: Vec<Note> = self
            .collection
            .find(filter)
            .sort(doc! { "updated_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(notes.into_iter().map(|n| self.codec.decrypt_note(n)).collect())
    }

    /// Get a note by id
    pub async fn get_note(&self, note_id: &str, user_id: &str) -> Result<Option<Note>> {
        let filter = doc! { "id": note_id, "user_id": user_id };
        let note = self.collection.find_one(filter).await?;
        Ok(note.map(|n| self.codec.decrypt_note(n)))
    }

    /// Apply a partial update, re-encrypting only the supplied fields
    pub async fn update_note(
        &self,
        note_id: &str,
        user_id: &str,
        update: NoteUpdate,
    ) -> Result<Note> {
        let encrypted = self.codec.encrypt_note_update(update)?;

        let mut set = doc! { "updated_at": bson::to_bson(&Utc::now())? };
        if let Some(title) = encrypted.title {
            set.insert("title", title);
        }
        if let Some(content) = encrypted.content {
            set.insert("content", content);
        }

        let filter = doc! { "id": note_id, "user_id": user_id };
        let result = self
            .collection
            .update_one(filter.clone(), doc! { "$set": set })
            .await?;
        if result.matched_count == 0 {
            return Err(PersistError::NoteNotFound(note_id.to_string()));
        }

        let updated = self
            .collection
            .find_one(filter)
            .await?
            .ok_or_else(|| PersistError::NoteNotFound(note_id.to_string()))?;
        Ok(self.codec.decrypt_note(updated))
    }

    /// Delete a note
    pub async fn delete_note(&self, note_id: &str, user_id: &str) -> Result<()> {
        let filter = doc! { "id": note_id, "user_id": user_id };
        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Err(PersistError::NoteNotFound(note_id.to_string()));
        }
        Ok(())
    }

    /// Most recently created notes, for state analysis
    pub async fn recent_notes(&self, user_id: &str, limit: i64) -> Result<Vec<Note>> {
        let filter = doc! { "user_id": user_id };
        let notes: Vec<Note> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(notes.into_iter().map(|n| self.codec.decrypt_note(n)).collect())
    }
}
