use base64::Engine;
use bytes::Bytes;

/// MIME type used when none is known.
const FALLBACK_MIME: &str = "application/octet-stream";

/// The image chosen by the user, held in memory.
///
/// Type and size are not validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        let mime_type = mime_type.into();
        Self {
            file_name: file_name.into(),
            mime_type: if mime_type.is_empty() {
                FALLBACK_MIME.to_string()
            } else {
                mime_type
            },
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Locally renderable handle to a selected file: a `data:` URI.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewRef(String);

impl PreviewRef {
    pub fn from_file(file: &SelectedFile) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
        Self(format!("data:{};base64,{}", file.mime_type, payload))
    }

    pub fn as_uri(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PreviewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Previews can be megabytes long.
        write!(f, "PreviewRef({} bytes)", self.0.len())
    }
}
