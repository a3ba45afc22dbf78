//! Upload controller
//!
//! Holds the transient UI state of an upload session and mediates between raw
//! user input and an [`ImageUploader`]. Every outcome is reported through the
//! [`Notifier`]; nothing here returns an error to the host.
//!
//! The phase is an explicit tagged state. A held file always travels with its
//! preview inside [`Selection`], so "uploading without a file" cannot be
//! expressed. The API key, the visibility flag and the last upload result are
//! independent of the phase.

use crate::error::{LogLevel, UploadError};
use crate::models::{ApiKey, PreviewRef, SelectedFile, UploadResult};
use crate::notification::{self, Notification, Notifier};
use crate::ports::ImageUploader;

/// A selected file together with its preview.
#[derive(Debug, Clone)]
pub struct Selection {
    pub file: SelectedFile,
    pub preview: PreviewRef,
}

impl Selection {
    fn new(file: SelectedFile) -> Self {
        let preview = PreviewRef::from_file(&file);
        Self { file, preview }
    }
}

#[derive(Debug, Clone, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    FileSelected(Selection),
    Uploading(Selection),
    Uploaded(Selection),
}

impl UploadPhase {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            UploadPhase::Idle => None,
            UploadPhase::FileSelected(s) | UploadPhase::Uploading(s) | UploadPhase::Uploaded(s) => {
                Some(s)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "idle",
            UploadPhase::FileSelected(_) => "file_selected",
            UploadPhase::Uploading(_) => "uploading",
            UploadPhase::Uploaded(_) => "uploaded",
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadPhase::Uploading(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected,
    NoFile,
}

#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(String),
    MissingApiKey,
    MissingFile,
    AlreadyUploading,
    Failed(UploadError),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded(_))
    }
}

/// Everything needed to run one upload, detached from the controller.
#[derive(Debug, Clone)]
pub struct UploadTicket {
    pub file: SelectedFile,
    pub api_key: ApiKey,
    attempt: u64,
}

pub struct UploadController<U, N> {
    uploader: U,
    notifier: N,
    phase: UploadPhase,
    api_key: ApiKey,
    key_visible: bool,
    upload_result: Option<UploadResult>,
    attempts: u64,
}

impl<U, N> UploadController<U, N>
where
    U: ImageUploader,
    N: Notifier,
{
    pub fn new(uploader: U, notifier: N) -> Self {
        Self {
            uploader,
            notifier,
            phase: UploadPhase::Idle,
            api_key: ApiKey::default(),
            key_visible: false,
            upload_result: None,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.phase.selection().map(|s| &s.file)
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.phase.selection().map(|s| &s.preview)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// The key as it should be displayed given the visibility flag.
    pub fn displayed_api_key(&self) -> String {
        self.api_key.render(self.key_visible)
    }

    pub fn is_key_visible(&self) -> bool {
        self.key_visible
    }

    pub fn upload_result(&self) -> Option<&UploadResult> {
        self.upload_result.as_ref()
    }

    /// Takes the first file of a file-input event.
    ///
    /// An empty event keeps whatever was selected before.
    pub fn handle_file_selection<I>(&mut self, files: I) -> SelectionOutcome
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        match files.into_iter().next() {
            Some(file) => {
                tracing::debug!(
                    file_name = %file.file_name,
                    mime_type = %file.mime_type,
                    size_bytes = file.size(),
                    "File selected"
                );
                self.phase = UploadPhase::FileSelected(Selection::new(file));
                self.notifier
                    .notify(Notification::success(notification::FILE_SELECTED));
                SelectionOutcome::Selected
            }
            None => {
                tracing::debug!(phase = self.phase.name(), "Empty file selection");
                self.notifier
                    .notify(Notification::error(notification::NO_FILE_SELECTED));
                SelectionOutcome::NoFile
            }
        }
    }

    /// Stores the raw input value.
    pub fn handle_api_key_input(&mut self, value: impl Into<String>) {
        self.api_key = ApiKey::new(value);
    }

    pub fn toggle_key_visibility(&mut self) -> bool {
        self.key_visible = !self.key_visible;
        self.key_visible
    }

    /// Checks preconditions and moves to `Uploading`.
    ///
    /// Checked in order: API key, selected file, in-flight upload.
    pub fn begin_upload(&mut self) -> Result<UploadTicket, UploadOutcome> {
        if self.api_key.is_empty() {
            self.notifier
                .notify(Notification::warning(notification::MISSING_API_KEY));
            return Err(UploadOutcome::MissingApiKey);
        }

        let selection = match std::mem::take(&mut self.phase) {
            UploadPhase::Idle => {
                self.notifier
                    .notify(Notification::error(notification::NO_FILE_SELECTED));
                return Err(UploadOutcome::MissingFile);
            }
            UploadPhase::Uploading(selection) => {
                self.phase = UploadPhase::Uploading(selection);
                self.notifier
                    .notify(Notification::warning(notification::UPLOAD_IN_PROGRESS));
                return Err(UploadOutcome::AlreadyUploading);
            }
            UploadPhase::FileSelected(selection) | UploadPhase::Uploaded(selection) => selection,
        };

        self.attempts += 1;
        let ticket = UploadTicket {
            file: selection.file.clone(),
            api_key: self.api_key.clone(),
            attempt: self.attempts,
        };
        tracing::info!(
            file_name = %ticket.file.file_name,
            size_bytes = ticket.file.size(),
            attempt = ticket.attempt,
            "Starting upload"
        );
        self.phase = UploadPhase::Uploading(selection);
        Ok(ticket)
    }

    /// Applies the single outcome of an upload started with [`begin_upload`].
    ///
    /// A success always replaces the upload result. The phase only moves if
    /// the selection was not replaced while the request was in flight.
    ///
    /// [`begin_upload`]: UploadController::begin_upload
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, UploadError>,
    ) -> UploadOutcome {
        let current = ticket.attempt == self.attempts && self.phase.is_uploading();
        let succeeded = result.is_ok();
        if current {
            if let UploadPhase::Uploading(selection) = std::mem::take(&mut self.phase) {
                self.phase = if succeeded {
                    UploadPhase::Uploaded(selection)
                } else {
                    UploadPhase::FileSelected(selection)
                };
            }
        }

        match result {
            Ok(url) => {
                tracing::info!(url = %url, attempt = ticket.attempt, "Upload complete");
                self.upload_result = Some(UploadResult::new(url.clone()));
                self.notifier
                    .notify(Notification::success(notification::UPLOAD_SUCCEEDED));
                UploadOutcome::Uploaded(url)
            }
            Err(error) => {
                let remote = error.is_remote();
                match error.log_level() {
                    LogLevel::Debug => {
                        tracing::debug!(error = %error, remote = remote, attempt = ticket.attempt, "Upload rejected")
                    }
                    LogLevel::Warn => {
                        tracing::warn!(error = %error, remote = remote, attempt = ticket.attempt, "Upload failed")
                    }
                    LogLevel::Error => {
                        tracing::error!(error = %error, remote = remote, attempt = ticket.attempt, "Upload failed")
                    }
                }
                self.notifier
                    .notify(Notification::error(notification::UPLOAD_FAILED));
                UploadOutcome::Failed(error)
            }
        }
    }

    /// Validates preconditions, runs one upload and applies its outcome.
    pub async fn trigger_upload(&mut self) -> UploadOutcome {
        let ticket = match self.begin_upload() {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };

        let result = self
            .uploader
            .upload_image(&ticket.file, ticket.api_key.as_str())
            .await;
        self.complete_upload(ticket, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationLevel;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeUploader {
        calls: Mutex<Vec<(SelectedFile, String)>>,
        responses: Mutex<VecDeque<Result<String, UploadError>>>,
    }

    impl FakeUploader {
        fn respond(&self, response: Result<String, UploadError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ImageUploader for FakeUploader {
        async fn upload_image(
            &self,
            file: &SelectedFile,
            api_key: &str,
        ) -> Result<String, UploadError> {
            self.calls
                .lock()
                .unwrap()
                .push((file.clone(), api_key.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(UploadError::Transport("no scripted response".into())))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn last(&self) -> Option<Notification> {
            self.seen.lock().unwrap().last().cloned()
        }

        fn count(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    type TestController = UploadController<Arc<FakeUploader>, Arc<RecordingNotifier>>;

    fn setup() -> (TestController, Arc<FakeUploader>, Arc<RecordingNotifier>) {
        let uploader = Arc::new(FakeUploader::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let controller = UploadController::new(uploader.clone(), notifier.clone());
        (controller, uploader, notifier)
    }

    fn cat() -> SelectedFile {
        SelectedFile::new("cat.png", "image/png", b"cat-bytes".to_vec())
    }

    fn dog() -> SelectedFile {
        SelectedFile::new("dog.jpg", "image/jpeg", b"dog-bytes".to_vec())
    }

    #[test]
    fn selecting_takes_first_file() {
        let (mut controller, _, notifier) = setup();

        let outcome = controller.handle_file_selection(vec![cat(), dog()]);

        assert_eq!(outcome, SelectionOutcome::Selected);
        assert_eq!(controller.selected_file(), Some(&cat()));
        assert!(controller.preview().is_some());
        assert_eq!(controller.phase().name(), "file_selected");
        assert_eq!(
            notifier.last(),
            Some(Notification::success(notification::FILE_SELECTED))
        );
    }

    #[test]
    fn empty_selection_from_idle() {
        let (mut controller, _, notifier) = setup();

        let outcome = controller.handle_file_selection(Vec::new());

        assert_eq!(outcome, SelectionOutcome::NoFile);
        assert!(controller.selected_file().is_none());
        assert!(controller.preview().is_none());
        assert_eq!(
            notifier.last(),
            Some(Notification::error(notification::NO_FILE_SELECTED))
        );
    }

    #[test]
    fn empty_selection_keeps_previous_file() {
        let (mut controller, _, notifier) = setup();
        controller.handle_file_selection(vec![cat()]);
        let preview = controller.preview().cloned();

        controller.handle_file_selection(Vec::new());

        assert_eq!(controller.selected_file(), Some(&cat()));
        assert_eq!(controller.preview().cloned(), preview);
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Error);
    }

    #[test]
    fn new_selection_replaces_preview() {
        let (mut controller, _, _) = setup();
        controller.handle_file_selection(vec![cat()]);
        let first = controller.preview().cloned().unwrap();

        controller.handle_file_selection(vec![dog()]);

        let second = controller.preview().cloned().unwrap();
        assert_ne!(first, second);
        assert!(second.as_uri().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn api_key_stored_verbatim() {
        let (mut controller, _, notifier) = setup();
        controller.handle_api_key_input(" ABC123 ");
        assert_eq!(controller.api_key().as_str(), " ABC123 ");
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn toggle_twice_restores_visibility() {
        let (mut controller, _, notifier) = setup();
        controller.handle_api_key_input("ABC123");
        controller.handle_file_selection(vec![cat()]);
        let before = notifier.count();

        assert!(!controller.is_key_visible());
        assert_eq!(controller.displayed_api_key(), "******");
        assert!(controller.toggle_key_visibility());
        assert_eq!(controller.displayed_api_key(), "ABC123");
        assert!(!controller.toggle_key_visibility());

        assert!(!controller.is_key_visible());
        assert_eq!(controller.api_key().as_str(), "ABC123");
        assert_eq!(controller.selected_file(), Some(&cat()));
        assert_eq!(notifier.count(), before);
    }

    #[tokio::test]
    async fn upload_without_key_warns() {
        let (mut controller, uploader, notifier) = setup();
        controller.handle_file_selection(vec![cat()]);

        let outcome = controller.trigger_upload().await;

        assert!(matches!(outcome, UploadOutcome::MissingApiKey));
        assert_eq!(uploader.call_count(), 0);
        assert!(controller.upload_result().is_none());
        assert_eq!(
            notifier.last(),
            Some(Notification::warning(notification::MISSING_API_KEY))
        );
    }

    #[tokio::test]
    async fn missing_key_checked_before_file() {
        let (mut controller, uploader, notifier) = setup();

        let outcome = controller.trigger_upload().await;

        assert!(matches!(outcome, UploadOutcome::MissingApiKey));
        assert_eq!(uploader.call_count(), 0);
        assert_eq!(notifier.last().unwrap().level, NotificationLevel::Warning);
    }

    #[tokio::test]
    async fn upload_without_file_errors() {
        let (mut controller, uploader, notifier) = setup();
        controller.handle_api_key_input("ABC123");

        let outcome = controller.trigger_upload().await;

        assert!(matches!(outcome, UploadOutcome::MissingFile));
        assert_eq!(uploader.call_count(), 0);
        assert_eq!(controller.phase().name(), "idle");
        assert_eq!(
            notifier.last(),
            Some(Notification::error(notification::NO_FILE_SELECTED))
        );
    }

    #[tokio::test]
    async fn successful_upload_sets_result() {
        let (mut controller, uploader, notifier) = setup();
        uploader.respond(Ok("https://x/y.png".to_string()));
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");

        let outcome = controller.trigger_upload().await;

        assert!(outcome.is_success());
        assert_eq!(uploader.call_count(), 1);
        let (file, key) = uploader.calls.lock().unwrap()[0].clone();
        assert_eq!(file, cat());
        assert_eq!(key, "ABC123");
        assert_eq!(controller.upload_result().unwrap().url, "https://x/y.png");
        assert_eq!(controller.phase().name(), "uploaded");
        assert_eq!(
            notifier.last(),
            Some(Notification::success(notification::UPLOAD_SUCCEEDED))
        );
    }

    #[tokio::test]
    async fn failed_upload_keeps_prior_result() {
        let (mut controller, uploader, notifier) = setup();
        uploader.respond(Ok("https://x/first.png".to_string()));
        uploader.respond(Err(UploadError::Status {
            status: 500,
            body: "boom".to_string(),
        }));
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");
        controller.trigger_upload().await;

        controller.handle_file_selection(vec![dog()]);
        let outcome = controller.trigger_upload().await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Status { status: 500, .. })
        ));
        assert_eq!(uploader.call_count(), 2);
        assert_eq!(
            controller.upload_result().unwrap().url,
            "https://x/first.png"
        );
        assert_eq!(controller.phase().name(), "file_selected");
        assert_eq!(controller.selected_file(), Some(&dog()));
        assert_eq!(
            notifier.last(),
            Some(Notification::error(notification::UPLOAD_FAILED))
        );
    }

    #[tokio::test]
    async fn uploaded_file_can_be_uploaded_again() {
        let (mut controller, uploader, _) = setup();
        uploader.respond(Ok("https://x/1.png".to_string()));
        uploader.respond(Ok("https://x/2.png".to_string()));
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");

        controller.trigger_upload().await;
        controller.trigger_upload().await;

        assert_eq!(uploader.call_count(), 2);
        assert_eq!(controller.upload_result().unwrap().url, "https://x/2.png");
    }

    #[test]
    fn second_trigger_while_uploading_is_rejected() {
        let (mut controller, _, notifier) = setup();
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");

        let ticket = controller.begin_upload().unwrap();
        assert!(controller.phase().is_uploading());

        let second = controller.begin_upload();
        assert!(matches!(second, Err(UploadOutcome::AlreadyUploading)));
        assert!(controller.phase().is_uploading());
        assert_eq!(
            notifier.last(),
            Some(Notification::warning(notification::UPLOAD_IN_PROGRESS))
        );

        controller.complete_upload(ticket, Ok("https://x/y.png".to_string()));
        assert_eq!(controller.phase().name(), "uploaded");
    }

    #[test]
    fn reselecting_during_upload_keeps_new_selection() {
        let (mut controller, _, _) = setup();
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");
        let ticket = controller.begin_upload().unwrap();

        controller.handle_file_selection(vec![dog()]);
        let outcome = controller.complete_upload(ticket, Ok("https://x/cat.png".to_string()));

        assert!(outcome.is_success());
        assert_eq!(controller.phase().name(), "file_selected");
        assert_eq!(controller.selected_file(), Some(&dog()));
        assert_eq!(controller.upload_result().unwrap().url, "https://x/cat.png");
    }

    #[test]
    fn stale_ticket_does_not_move_phase() {
        let (mut controller, _, _) = setup();
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("ABC123");
        let first = controller.begin_upload().unwrap();
        controller.handle_file_selection(vec![dog()]);
        let second = controller.begin_upload().unwrap();

        controller.complete_upload(first, Ok("https://x/cat.png".to_string()));
        assert!(controller.phase().is_uploading());

        controller.complete_upload(second, Ok("https://x/dog.png".to_string()));
        assert_eq!(controller.phase().name(), "uploaded");
        assert_eq!(controller.upload_result().unwrap().url, "https://x/dog.png");
    }

    #[test]
    fn ticket_carries_key_at_trigger_time() {
        let (mut controller, _, _) = setup();
        controller.handle_file_selection(vec![cat()]);
        controller.handle_api_key_input("first");
        let ticket = controller.begin_upload().unwrap();
        controller.handle_api_key_input("second");

        assert_eq!(ticket.api_key.as_str(), "first");
        assert_eq!(ticket.file, cat());
    }
}
