// Web server module for the stylist API.
// Routes wardrobe storage and image generation endpoints.

mod app;
mod error;
mod extract_upload;
mod handlers;
mod listeners;

pub mod models;

pub use app::create_app;
pub use listeners::create_listener;

use crate::store::WardrobeStore;
use crate::stylist::generator::ImageGenerator;
use std::sync::Arc;

// Maximum allowed size for an uploaded wardrobe image
pub const MAX_IMAGE_SIZE_BYTES: usize = 10 * 1024 * 1024; // 10MB

// Request body cap: one image plus multipart framing and the text fields
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_IMAGE_SIZE_BYTES + 1024 * 1024;

/// Shared service handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WardrobeStore>,
    pub generator: Arc<dyn ImageGenerator>,
}
