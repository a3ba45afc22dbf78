use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::UploadError;

/// URL returned by the service after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Success body of `POST /1/upload`. Only `data.url` is required; the
/// remaining fields are informational and never fail the parse.
#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbResponse {
    pub data: ImgbbImage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbImage {
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub delete_url: Option<String>,
}

/// Strings pass through, numbers are stringified, anything else is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl ImgbbResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, UploadError> {
        Ok(serde_json::from_slice(body)?)
    }
}
