//! Shared test helpers for in-crate router tests.

use std::sync::Arc;

use crate::config::{Config, ImageConfig, ServerConfig, StorageConfig, StoreBackend};
use crate::object_store::LocalStore;
use crate::storage::Database;
use crate::store::{FaqStore, MemoryStore, RedbStore};
use crate::AppState;

pub const BOUNDARY: &str = "faq-test-boundary";

/// Create a test AppState backed by a temporary directory.
pub fn test_state(temp_dir: &tempfile::TempDir, backend: StoreBackend) -> Arc<AppState> {
    let data_dir = temp_dir.path().join("data");
    let public_dir = temp_dir.path().join("public");
    let images_dir = public_dir.join("images");

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3002,
            public_dir: public_dir.to_string_lossy().to_string(),
        },
        storage: StorageConfig {
            backend,
            data_dir: data_dir.to_string_lossy().to_string(),
        },
        images: ImageConfig {
            dir: images_dir.to_string_lossy().to_string(),
            ..Default::default()
        },
        max_upload_size: 1024 * 1024,
    };

    let prefix = config.images.path_prefix.clone();
    let store: Arc<dyn FaqStore> = match backend {
        StoreBackend::Persistent => {
            let db = Database::open(&data_dir).expect("Failed to open test database");
            Arc::new(RedbStore::new(db, prefix))
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new(prefix)),
    };
    let images = LocalStore::new(&images_dir).expect("Failed to create test image store");

    Arc::new(AppState {
        config,
        store,
        images: Arc::new(images),
    })
}

/// Encode text fields and an optional `img` file part as multipart/form-data.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"img\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
