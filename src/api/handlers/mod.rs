mod faqs;
mod health;
mod images;

use crate::api::response::ApiError;
use crate::store::StoreError;

pub use faqs::{create_faq, delete_faq, get_faq, list_faqs, update_faq, FaqForm};
pub use health::health;
pub use images::serve_image;

/// Map a StoreError to an ApiError. Backend detail is logged, never returned;
/// the client sees `generic` instead.
fn store_error(e: StoreError, generic: &str) -> ApiError {
    match e {
        StoreError::Validation(message) => ApiError::bad_request(message),
        StoreError::NotFound => ApiError::not_found("FAQ not found"),
        StoreError::MalformedId(_) | StoreError::Backend(_) => {
            tracing::error!(error = %e, "{generic}");
            ApiError::internal(generic)
        }
    }
}
