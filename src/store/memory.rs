use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{FaqStore, StoreError};
use crate::faq::{resolve_image, validate, Faq, FaqId, FaqPayload, ImageUpload};

/// Process-local backend. Records are kept in insertion order and lost on
/// restart; ids come from a counter of records ever inserted.
pub struct MemoryStore {
    image_prefix: String,
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    faqs: Vec<Faq>,
    inserted: u64,
}

impl MemoryState {
    fn position(&self, id: u64) -> Option<usize> {
        self.faqs.iter().position(|f| f.id == FaqId::Seq(id))
    }
}

impl MemoryStore {
    pub fn new(image_prefix: impl Into<String>) -> Self {
        Self {
            image_prefix: image_prefix.into(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    /// A non-numeric id can never have been assigned, so it is simply absent.
    fn parse_id(id: &str) -> Result<u64, StoreError> {
        id.trim().parse().map_err(|_| StoreError::NotFound)
    }
}

#[async_trait]
impl FaqStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Faq>, StoreError> {
        Ok(self.lock()?.faqs.clone())
    }

    async fn get(&self, id: &str) -> Result<Faq, StoreError> {
        let id = Self::parse_id(id)?;
        let state = self.lock()?;
        state
            .position(id)
            .map(|i| state.faqs[i].clone())
            .ok_or(StoreError::NotFound)
    }

    async fn create(
        &self,
        payload: FaqPayload,
        upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError> {
        let valid = validate(&payload).map_err(StoreError::Validation)?;
        let img_name = resolve_image(&self.image_prefix, upload.as_ref());
        let updated_date = valid.updated_date.unwrap_or_else(Utc::now);

        let mut state = self.lock()?;
        state.inserted += 1;
        let faq = Faq::new(FaqId::Seq(state.inserted), valid, img_name, updated_date);
        state.faqs.push(faq.clone());

        tracing::debug!(faq_id = %faq.id, "Created FAQ");
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
        let id = Self::parse_id(id)?;

        let mut state = self.lock()?;
        let index = state.position(id).ok_or(StoreError::NotFound)?;
        let faq = &mut state.faqs[index];
        faq.apply(valid, img_name, Utc::now());

        tracing::debug!(faq_id = id, "Updated FAQ");
        Ok(faq.clone())
    }

    async fn delete(&self, id: &str) -> Result<Faq, StoreError> {
        let id = Self::parse_id(id)?;

        let mut state = self.lock()?;
        let index = state.position(id).ok_or(StoreError::NotFound)?;
        let faq = state.faqs.remove(index);

        tracing::debug!(faq_id = id, "Deleted FAQ");
        Ok(faq)
    }
}
