use std::fmt;

/// Secret credential for the upload service.
///
/// Stored exactly as typed: no trimming, no validation. `Debug` never prints
/// the value.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One `*` per character.
    pub fn masked(&self) -> String {
        "*".repeat(self.0.chars().count())
    }

    /// Plain text when `visible`, masked otherwise.
    pub fn render(&self, visible: bool) -> String {
        if visible {
            self.0.clone()
        } else {
            self.masked()
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
