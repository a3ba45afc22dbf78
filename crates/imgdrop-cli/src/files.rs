//! Reading picked files from disk.

use std::path::Path;

use imgdrop_core::{SelectedFile, UploadError};

/// Read `path` into a [`SelectedFile`], guessing the MIME type from the extension.
pub async fn load_file(path: &Path) -> Result<SelectedFile, UploadError> {
    let bytes = tokio::fs::read(path).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(SelectedFile::new(file_name, mime_type, bytes))
}

/// Files picked by one selection event. Unreadable paths yield nothing.
pub async fn pick(path: Option<&Path>) -> Vec<SelectedFile> {
    let Some(path) = path else {
        return Vec::new();
    };

    match load_file(path).await {
        Ok(file) => vec![file],
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read selected file");
            Vec::new()
        }
    }
}
