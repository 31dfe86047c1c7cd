//! The FAQ Store: one contract over interchangeable backends.
//!
//! Both backends share the same policy. Payloads are validated before any
//! lookup or write, `img_name` only ever comes from a resolved upload, and
//! `updated_date` is refreshed on every update without moving backwards.

mod memory;
mod persistent;
mod unavailable;

pub use memory::MemoryStore;
pub use persistent::RedbStore;
pub use unavailable::UnavailableStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::faq::{Faq, FaqPayload, ImageUpload};
use crate::storage::DatabaseError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("FAQ not found")]
    NotFound,
    #[error("Malformed FAQ id: {0}")]
    MalformedId(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

impl From<DatabaseError> for StoreError {
    fn from(e: DatabaseError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Abstraction over the backend that persists FAQ records.
/// Ids arrive as the raw text of the request path; each backend parses its own.
#[async_trait]
pub trait FaqStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Faq>, StoreError>;
    async fn get(&self, id: &str) -> Result<Faq, StoreError>;
    async fn create(
        &self,
        payload: FaqPayload,
        upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError>;
    async fn update(
        &self,
        id: &str,
        payload: FaqPayload,
        upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError>;
    async fn delete(&self, id: &str) -> Result<Faq, StoreError>;
}
