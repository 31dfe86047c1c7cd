use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{FaqStore, StoreError};
use crate::faq::{resolve_image, validate, Faq, FaqId, FaqPayload, ImageUpload};
use crate::storage::Database;

/// Document-store backend over redb. Ids are UUID v4 keys.
pub struct RedbStore {
    db: Database,
    image_prefix: String,
}

impl RedbStore {
    pub fn new(db: Database, image_prefix: impl Into<String>) -> Self {
        Self {
            db,
            image_prefix: image_prefix.into(),
        }
    }

    /// Parse a path id into the canonical key. A malformed id is a lookup
    /// failure, distinct from a well-formed id that is absent.
    fn key(id: &str) -> Result<String, StoreError> {
        Uuid::parse_str(id)
            .map(|uuid| uuid.to_string())
            .map_err(|_| StoreError::MalformedId(id.to_string()))
    }
}

#[async_trait]
impl FaqStore for RedbStore {
    async fn list(&self) -> Result<Vec<Faq>, StoreError> {
        Ok(self.db.get_all_faqs()?)
    }

    async fn get(&self, id: &str) -> Result<Faq, StoreError> {
        let key = Self::key(id)?;
        self.db.get_faq(&key)?.ok_or(StoreError::NotFound)
    }

    async fn create(
        &self,
        payload: FaqPayload,
        upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError> {
        let valid = validate(&payload).map_err(StoreError::Validation)?;
        let img_name = resolve_image(&self.image_prefix, upload.as_ref());

        let key = Uuid::new_v4().to_string();
        let faq = Faq::new(FaqId::Key(key.clone()), valid, img_name, Utc::now());
        self.db.put_faq(&key, &faq)?;

        tracing::debug!(faq_id = %key, "Created FAQ");
        Ok(faq)
    }

    async fn update(
        &self,
        id: &str,
        payload: FaqPayload,
        upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError> {
        let valid = validate(&payload).map_err(StoreError::Validation)?;
        let img_name = resolve_image(&self.image_prefix, upload.as_ref());
        let key = Self::key(id)?;

        let faq = self
            .db
            .modify_faq(&key, |faq| faq.apply(valid, img_name, Utc::now()))?
            .ok_or(StoreError::NotFound)?;

        tracing::debug!(faq_id = %key, "Updated FAQ");
        Ok(faq)
    }

    async fn delete(&self, id: &str) -> Result<Faq, StoreError> {
        let key = Self::key(id)?;
        let faq = self.db.delete_faq(&key)?.ok_or(StoreError::NotFound)?;

        tracing::debug!(faq_id = %key, "Deleted FAQ");
        Ok(faq)
    }
}
