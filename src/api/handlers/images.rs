use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::ApiError;
use crate::object_store::ObjectStoreError;
use crate::AppState;

/// Serve an uploaded image.
/// Route: GET /<image prefix>/*name
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.images.get(&name).await.map_err(|e| match e {
        ObjectStoreError::NotFound(_) | ObjectStoreError::InvalidKey(_) => {
            ApiError::not_found("Image not found")
        }
        _ => {
            tracing::error!(file = %name, error = %e, "Failed to read image");
            ApiError::internal("Error fetching image")
        }
    })?;

    let mime_type = mime_guess::from_path(&name).first_or_octet_stream();

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    if let Ok(value) = header::HeaderValue::from_str(mime_type.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }

    // Same-name uploads replace the file, so clients must revalidate.
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );

    Ok(response)
}
