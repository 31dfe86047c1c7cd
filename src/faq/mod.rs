//! FAQ domain: records, request payloads, validation and image references.

mod image;
pub mod models;
mod validate;

pub use image::{resolve_image, ImageUpload};
pub use models::{Faq, FaqId, FaqPayload, RelatedServices, ValidFaq};
pub use validate::{validate, ANSWER_MIN_LEN, CATEGORY_MIN_LEN, QUESTION_MIN_LEN};
