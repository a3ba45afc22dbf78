//! Domain methods for the ImgBB client.

use async_trait::async_trait;
use imgdrop_core::{ImageUploader, SelectedFile, UploadError};
use reqwest::multipart::{Form, Part};

use crate::ImgbbClient;

/// Multipart field ImgBB reads the image from.
pub const IMAGE_FIELD: &str = "image";

fn image_part(file: &SelectedFile) -> Part {
    let part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
    match part.mime_str(&file.mime_type) {
        Ok(part) => part,
        Err(e) => {
            tracing::debug!(mime_type = %file.mime_type, error = %e, "Unusable MIME type, sending without");
            Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone())
        }
    }
}

impl ImgbbClient {
    /// Upload one image and return the hosted URL (`data.url`).
    pub async fn upload_image(
        &self,
        file: &SelectedFile,
        api_key: &str,
    ) -> Result<String, UploadError> {
        tracing::debug!(
            file_name = %file.file_name,
            size_bytes = file.size(),
            endpoint = %self.upload_url(),
            "Uploading image"
        );

        let form = Form::new().part(IMAGE_FIELD, image_part(file));
        let response = self.post_multipart(api_key, form).await?;

        tracing::debug!(
            id = ?response.data.id,
            display_url = ?response.data.display_url,
            has_delete_url = response.data.delete_url.is_some(),
            "Image hosted"
        );

        Ok(response.data.url)
    }
}

#[async_trait]
impl ImageUploader for ImgbbClient {
    async fn upload_image(
        &self,
        file: &SelectedFile,
        api_key: &str,
    ) -> Result<String, UploadError> {
        ImgbbClient::upload_image(self, file, api_key).await
    }
}
