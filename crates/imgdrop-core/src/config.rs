//! Configuration module
//!
//! Uploader settings come from the environment (optionally a `.env` file) and
//! can be overridden by CLI flags.

use std::env;
use std::time::Duration;

use crate::error::UploadError;

/// ImgBB upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// Settings for the upload client.
#[derive(Clone, Debug)]
pub struct UploaderConfig {
    pub upload_url: String,
    /// Default API key. Never logged.
    pub api_key: Option<String>,
    /// Request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            api_key: None,
            timeout_secs: None,
            user_agent: format!("imgdrop/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl UploaderConfig {
    /// Load from IMGBB_UPLOAD_URL, IMGBB_API_KEY and IMGBB_TIMEOUT_SECS.
    pub fn from_env() -> Result<Self, UploadError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UploadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout_secs = match get("IMGBB_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| {
                        UploadError::Config("IMGBB_TIMEOUT_SECS must be a valid number".into())
                    })?,
            ),
            None => None,
        };

        let config = Self {
            upload_url: get("IMGBB_UPLOAD_URL").unwrap_or(defaults.upload_url),
            api_key: get("IMGBB_API_KEY"),
            timeout_secs,
            user_agent: defaults.user_agent,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), UploadError> {
        if !(self.upload_url.starts_with("http://") || self.upload_url.starts_with("https://")) {
            return Err(UploadError::Config(
                "IMGBB_UPLOAD_URL must be an http:// or https:// URL".into(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(UploadError::Config(
                "IMGBB_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
