use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header;
use axum::Json;

use super::store_error;
use crate::api::response::{ApiError, AppJson};
use crate::faq::{Faq, FaqPayload, ImageUpload, RelatedServices};
use crate::AppState;

/// Multipart field carrying the image file
const IMAGE_FIELD: &str = "img";

// ============================================================================
// Request body
// ============================================================================

/// Create/update body: either `multipart/form-data` (with an optional image
/// file) or `application/json`.
///
/// An uploaded image is written to the image store while the body is read,
/// before the payload is validated. It is not removed if validation fails.
pub struct FaqForm {
    pub payload: FaqPayload,
    pub upload: Option<ImageUpload>,
}

#[axum::async_trait]
impl FromRequest<Arc<AppState>> for FaqForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, ApiError> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?;
            read_multipart(multipart, state).await
        } else {
            let AppJson(payload) = AppJson::<FaqPayload>::from_request(req, state).await?;
            Ok(FaqForm {
                payload,
                upload: None,
            })
        }
    }
}

async fn read_multipart(mut multipart: Multipart, state: &AppState) -> Result<FaqForm, ApiError> {
    let mut payload = FaqPayload::default();
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart data: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            IMAGE_FIELD => {
                // Browsers send an empty, unnamed part when no file was chosen.
                let image = field
                    .file_name()
                    .and_then(ImageUpload::from_original_name);

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {e}")))?;

                let Some(image) = image else {
                    continue;
                };

                if data.len() as u64 > state.config.max_upload_size {
                    return Err(ApiError::payload_too_large(format!(
                        "Image exceeds maximum upload size of {} bytes",
                        state.config.max_upload_size
                    )));
                }

                state.images.put(&image.filename, data).await.map_err(|e| {
                    tracing::error!(file = %image.filename, error = %e, "Failed to store image");
                    ApiError::internal("Error saving image")
                })?;
                tracing::debug!(file = %image.filename, "Stored uploaded image");
                upload = Some(image);
            }
            "question" => payload.question = Some(text(field, "question").await?),
            "answer" => payload.answer = Some(text(field, "answer").await?),
            "category" => payload.category = Some(text(field, "category").await?),
            "img_name" => payload.img_name = Some(text(field, "img_name").await?),
            "updated_date" => payload.updated_date = Some(text(field, "updated_date").await?),
            "related_services" => {
                let value = text(field, "related_services").await?;
                payload.related_services = Some(match payload.related_services.take() {
                    Some(existing) => existing.push(value),
                    None => RelatedServices::One(value),
                });
            }
            _ => {
                // Only the name matters; validation rejects it
                payload.unknown.insert(field_name, serde_json::Value::Null);
            }
        }
    }

    Ok(FaqForm { payload, upload })
}

async fn text(field: Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid {name}: {e}")))
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_faqs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Faq>>, ApiError> {
    let faqs = state
        .store
        .list()
        .await
        .map_err(|e| store_error(e, "Error fetching FAQs"))?;
    Ok(Json(faqs))
}

pub async fn get_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Faq>, ApiError> {
    let faq = state
        .store
        .get(&id)
        .await
        .map_err(|e| store_error(e, "Error fetching FAQ"))?;
    Ok(Json(faq))
}

pub async fn create_faq(
    State(state): State<Arc<AppState>>,
    form: FaqForm,
) -> Result<Json<Faq>, ApiError> {
    let faq = state
        .store
        .create(form.payload, form.upload)
        .await
        .map_err(|e| store_error(e, "Error saving FAQ"))?;
    Ok(Json(faq))
}

pub async fn update_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    form: FaqForm,
) -> Result<Json<Faq>, ApiError> {
    let faq = state
        .store
        .update(&id, form.payload, form.upload)
        .await
        .map_err(|e| store_error(e, "Error saving FAQ"))?;
    Ok(Json(faq))
}

pub async fn delete_faq(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Faq>, ApiError> {
    let faq = state
        .store
        .delete(&id)
        .await
        .map_err(|e| store_error(e, "Error deleting FAQ"))?;
    Ok(Json(faq))
}
