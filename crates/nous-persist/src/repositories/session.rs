use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use nous_crypto::FieldCodec;
use nous_types::{ChatSession, ChatTurn};

use crate::error::{PersistError, Result};

/// Chat sessions, stored encrypted and returned decrypted.
#[derive(Clone)]
pub struct SessionRepository {
    collection: Collection<ChatSession>,
    codec: FieldCodec,
}

impl SessionRepository {
    pub fn new(client: &Client, db_name: &str, codec: FieldCodec) -> Self {
        let collection = client.database(db_name).collection("chat_sessions");
        Self { collection, codec }
    }

    /// Create a new session
    pub async fn create_session(
        &self,
        user_id: &str,
        title: Option<String>,
    ) -> Result<ChatSession> {
        let session = ChatSession::new(user_id, title);
        let stored = self.codec.encrypt_session(session.clone())?;
        self.collection.insert_one(&stored).await?;
        Ok(session)
    }

    /// Get a session by id
    pub async fn get_session(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<Option<ChatSession>> {
        let filter = doc! { "id": session_id, "user_id": user_id };
        let session = self.collection.find_one(filter).await?;
        Ok(session.map(|s| self.codec.decrypt_session(s)))
    }

    /// List sessions for a user, most recently active first
    pub async fn list_sessions(&self, user_id: &str, limit: i64) -> Result<Vec<ChatSession>> {
        let filter = doc! { "user_id": user_id };
        let sessions: Vec<ChatSession> = self
            .collection
            .find(filter)
            .sort(doc! { "updated_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(sessions
            .into_iter()
            .map(|s| self.codec.decrypt_session(s))
            .collect())
    }

    /// Rename a session
    pub async fn rename_session(&self, session_id: &str, user_id: &str, title: &str) -> Result<()> {
        let encrypted_title = self.codec.cipher().encrypt(title)?;
        let filter = doc! { "id": session_id, "user_id": user_id };
        let update = doc! {
            "$set": {
                "title": encrypted_title,
                "updated_at": bson::to_bson(&Utc::now())?,
            }
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Err(PersistError::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    /// Delete a session
    pub async fn delete_session(&self, session_id: &str, user_id: &str) -> Result<()> {
        let filter = doc! { "id": session_id, "user_id": user_id };
        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Err(PersistError::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }

    /// Append a user+assistant turn pair, optionally persisting a refreshed
    /// running summary.
    ///
    /// Everything goes through one document update, so a reader never
    /// observes the new turns without their summary.
    pub async fn append_turns(
        &self,
        session_id: &str,
        user_id: &str,
        user_turn: ChatTurn,
        assistant_turn: ChatTurn,
        refreshed_summary: Option<&str>,
    ) -> Result<()> {
        let user_turn = self.codec.encrypt_turn(user_turn)?;
        let assistant_turn = self.codec.encrypt_turn(assistant_turn)?;

        let mut set = doc! { "updated_at": bson::to_bson(&Utc::now())? };
        if let Some(summary) = refreshed_summary {
            set.insert("running_summary", self.codec.cipher().encrypt(summary)?);
        }

        let filter = doc! { "id": session_id, "user_id": user_id };
        let update = doc! {
            "$push": {
                "turns": {
                    "$each": [bson::to_bson(&user_turn)?, bson::to_bson(&assistant_turn)?]
                }
            },
            "$set": set,
        };

        let result = self.collection.update_one(filter, update).await?;
        if result.matched_count == 0 {
            return Err(PersistError::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }
}
