//! imgdrop Core Library
//!
//! This crate provides the domain models, error types, configuration and the
//! upload controller shared by the imgdrop API client and CLI.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod notification;
pub mod ports;

// Re-export commonly used types
pub use config::{UploaderConfig, DEFAULT_UPLOAD_URL};
pub use controller::{
    Selection, SelectionOutcome, UploadController, UploadOutcome, UploadPhase, UploadTicket,
};
pub use error::{LogLevel, UploadError};
pub use models::{ApiKey, ImgbbImage, ImgbbResponse, PreviewRef, SelectedFile, UploadResult};
pub use notification::{Notification, NotificationLevel, Notifier};
pub use ports::ImageUploader;
