//! faq-server - HTTP backend for FAQ entries
//!
//! This crate provides create/read/update/delete over FAQ records with:
//! - A validation contract applied before every write
//! - Swappable store backends (redb document store, in-memory list)
//! - Image uploads written to a local image directory and served back
//! - REST API accepting multipart forms or JSON bodies

pub mod api;
pub mod config;
pub mod faq;
pub mod object_store;
pub mod storage;
pub mod store;
#[cfg(test)]
pub mod testutil;

use std::sync::Arc;

use config::Config;
use object_store::ObjectStore;
use store::FaqStore;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FaqStore>,
    pub images: Arc<dyn ObjectStore>,
}
