//! HTTP client for the ImgBB upload API.
//!
//! Provides a minimal client that posts multipart forms with the API key as a
//! `key` query parameter, plus the domain upload method in [`api`]. The CLI
//! drives it through the `ImageUploader` trait from `imgdrop-core`.

pub mod api;

use anyhow::{Context, Result};
use imgdrop_core::{ImgbbResponse, UploaderConfig, UploadError};
use reqwest::Client;

/// HTTP client for the ImgBB API.
#[derive(Clone, Debug)]
pub struct ImgbbClient {
    client: Client,
    upload_url: String,
}

impl ImgbbClient {
    pub fn new(config: &UploaderConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            upload_url: config.upload_url.clone(),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// POST a multipart form to the upload endpoint and parse the ImgBB body.
    ///
    /// One request, no retries. Any non-2xx status is returned as-is without
    /// looking into the service's error payload.
    pub async fn post_multipart(
        &self,
        api_key: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ImgbbResponse, UploadError> {
        let response = self
            .client
            .post(&self.upload_url)
            .query(&[("key", api_key)])
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        ImgbbResponse::from_slice(&body)
    }
}
