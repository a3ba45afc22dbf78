//! Data models for the application
//!
//! Everything here is transient and process-local. Nothing is persisted.

mod api_key;
mod file;
mod upload;

// Re-export all models for convenient imports
pub use api_key::ApiKey;
pub use file::{PreviewRef, SelectedFile};
pub use upload::{ImgbbImage, ImgbbResponse, UploadResult};
