use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use nous_crypto::FieldCodec;
use nous_types::{ChecklistItem, ChecklistTemplate, DailyChecklist};

use crate::error::{PersistError, Result};

/// Reusable checklist templates.
#[derive(Clone)]
pub struct TemplateRepository {
    collection: Collection<ChecklistTemplate>,
    codec: FieldCodec,
}

impl TemplateRepository {
    pub fn new(client: &Client, db_name: &str, codec: FieldCodec) -> Self {
        let collection = client.database(db_name).collection("checklist_templates");
        Self { collection, codec }
    }

    /// Create a new template
    pub async fn create_template(&self, template: ChecklistTemplate) -> Result<ChecklistTemplate> {
        let stored = self.codec.encrypt_template(template.clone())?;
        self.collection.insert_one(&stored).await?;
        Ok(template)
    }

    /// List templates for a user
    pub async fn list_templates(&self, user_id: &str) -> Result<Vec<ChecklistTemplate>> {
        let filter = doc! { "user_id": user_id };
        let templates: Vec<ChecklistTemplate> = self
            .collection
            .find(filter)
            .await?
            .try_collect()
            .await?;
        Ok(templates
            .into_iter()
            .map(|t| self.codec.decrypt_template(t))
            .collect())
    }

    /// Delete a template
    pub async fn delete_template(&self, template_id: &str, user_id: &str) -> Result<()> {
        let filter = doc! { "id": template_id, "user_id": user_id };
        let result = self.collection.delete_one(filter).await?;
        if result.deleted_count == 0 {
            return Err(PersistError::TemplateNotFound(template_id.to_string()));
        }
        Ok(())
    }
}

/// Daily checklists, one per `{user_id, date}`.
#[derive(Clone)]
pub struct ChecklistRepository {
    collection: Collection<DailyChecklist>,
    codec: FieldCodec,
}

impl ChecklistRepository {
    pub fn new(client: &Client, db_name: &str, codec: FieldCodec) -> Self {
        let collection = client.database(db_name).collection("checklists");
        Self { collection, codec }
    }

    /// Create the checklist for a date, or replace its items if one exists
    pub async fn upsert_daily(
        &self,
        user_id: &str,
        date: &str,
        items: Vec<ChecklistItem>,
        template_id: Option<String>,
    ) -> Result<DailyChecklist> {
        let filter = doc! { "date": date, "user_id": user_id };
        let existing = self.collection.find_one(filter.clone()).await?;

        if existing.is_some() {
            let encrypted_items: Vec<ChecklistItem> = items
                .iter()
                .cloned()
                .map(|mut item| {
                    item.text = self.codec.cipher().encrypt(&item.text)?;
                    Ok::<_, nous_crypto::CryptoError>(item)
                })
                .collect::<std::result::Result<_, _>>()?;

            self.collection
                .update_one(
                    filter.clone(),
                    doc! { "$set": { "items": bson::to_bson(&encrypted_items)? } },
                )
                .await?;

            let updated = self
                .collection
                .find_one(filter)
                .await?
                .ok_or_else(|| PersistError::ChecklistNotFound(date.to_string()))?;
            Ok(self.codec.decrypt_checklist(updated))
        } else {
            let checklist = DailyChecklist::new(user_id, date, items, template_id);
            let stored = self.codec.encrypt_checklist(checklist.clone())?;
            self.collection.insert_one(&stored).await?;
            Ok(checklist)
        }
    }

    /// Get the checklist for a date
    pub async fn get_daily(&self, user_id: &str, date: &str) -> Result<Option<DailyChecklist>> {
        let filter = doc! { "date": date, "user_id": user_id };
        let checklist = self.collection.find_one(filter).await?;
        Ok(checklist.map(|c| self.codec.decrypt_checklist(c)))
    }

    /// Flip an item's completion flag.
    ///
    /// Works on the stored document as-is: the encrypted item text is never
    /// touched, only the `completed` flag.
    pub async fn toggle_item(&self, user_id: &str, date: &str, item_id: &str) -> Result<()> {
        let filter = doc! { "date": date, "user_id": user_id };
        let mut checklist = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or_else(|| PersistError::ChecklistNotFound(date.to_string()))?;

        for item in &mut checklist.items {
            if item.id == item_id {
                item.completed = !item.completed;
                break;
            }
        }

        self.collection
            .update_one(
                filter,
                doc! { "$set": { "items": bson::to_bson(&checklist.items)? } },
            )
            .await?;
        Ok(())
    }
}
