use async_trait::async_trait;

use super::{FaqStore, StoreError};
use crate::faq::{Faq, FaqPayload, ImageUpload};

/// Stand-in for a persistent backend that failed to open at startup.
/// The server keeps listening; every store call fails with a backend error.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Backend(format!(
            "store unavailable: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl FaqStore for UnavailableStore {
    async fn list(&self) -> Result<Vec<Faq>, StoreError> {
        self.fail()
    }

    async fn get(&self, _id: &str) -> Result<Faq, StoreError> {
        self.fail()
    }

    async fn create(
        &self,
        _payload: FaqPayload,
        _upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError> {
        self.fail()
    }

    async fn update(
        &self,
        _id: &str,
        _payload: FaqPayload,
        _upload: Option<ImageUpload>,
    ) -> Result<Faq, StoreError> {
        self.fail()
    }

    async fn delete(&self, _id: &str) -> Result<Faq, StoreError> {
        self.fail()
    }
}
