//! Non-interactive single upload.

use std::path::Path;

use anyhow::{Context, Result};
use imgdrop_core::{ImageUploader, Notifier, UploadController, UploadOutcome, UploadResult};

use crate::files;

/// Read `path`, upload it with `api_key` and return the result.
///
/// Unlike the interactive `select`, an unreadable path is reported with its
/// cause instead of becoming an empty selection.
pub async fn upload_file<U, N>(
    controller: &mut UploadController<U, N>,
    path: &Path,
    api_key: String,
) -> Result<UploadResult>
where
    U: ImageUploader,
    N: Notifier,
{
    let file = files::load_file(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    controller.handle_file_selection(vec![file]);
    controller.handle_api_key_input(api_key);

    match controller.trigger_upload().await {
        UploadOutcome::Uploaded(_) => controller
            .upload_result()
            .cloned()
            .context("Upload result missing after success"),
        UploadOutcome::Failed(e) => Err(e).context("Upload failed"),
        other => anyhow::bail!("Upload not attempted: {:?}", other),
    }
}
