use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use nous_crypto::FieldCodec;
use nous_types::StateRecord;

use crate::error::Result;

/// State snapshots. Append-only: a new record never mutates a prior one,
/// and the latest record by `created_at` is "current".
#[derive(Clone)]
pub struct StateRepository {
    collection: Collection<StateRecord>,
    codec: FieldCodec,
}

impl StateRepository {
    pub fn new(client: &Client, db_name: &str, codec: FieldCodec) -> Self {
        let collection = client.database(db_name).collection("states");
        Self { collection, codec }
    }

    /// Append a new snapshot
    pub async fn insert_state(&self, record: StateRecord) -> Result<StateRecord> {
        let stored = self.codec.encrypt_state(record.clone())?;
        self.collection.insert_one(&stored).await?;
        Ok(record)
    }

    /// Snapshot history, newest first
    pub async fn list_states(&self, user_id: &str, limit: i64) -> Result<Vec<StateRecord>> {
        let filter = doc! { "user_id": user_id };
        let states: Vec<StateRecord> = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(states
            .into_iter()
            .map(|s| self.codec.decrypt_state(s))
            .collect())
    }

    /// The current snapshot, if any
    pub async fn latest_state(&self, user_id: &str) -> Result<Option<StateRecord>> {
        let filter = doc! { "user_id": user_id };
        let state = self
            .collection
            .find_one(filter)
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(state.map(|s| self.codec.decrypt_state(s)))
    }
}
