//! Seams between the controller and the outside world
//!
//! The controller only knows this trait; the HTTP implementation lives in
//! `imgdrop-api-client`, tests plug in fakes.

use async_trait::async_trait;

use crate::error::UploadError;
use crate::models::SelectedFile;

/// Uploads one image and resolves exactly once with the hosted URL or an error.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload_image(&self, file: &SelectedFile, api_key: &str)
        -> Result<String, UploadError>;
}

#[async_trait]
impl<U: ImageUploader + ?Sized> ImageUploader for std::sync::Arc<U> {
    async fn upload_image(
        &self,
        file: &SelectedFile,
        api_key: &str,
    ) -> Result<String, UploadError> {
        (**self).upload_image(file, api_key).await
    }
}
