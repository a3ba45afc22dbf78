//! Interactive upload session.
//!
//! Reads one command per line and feeds it to the [`UploadController`]. Lines
//! are processed strictly in order, so at most one upload runs at a time.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use imgdrop_core::{ImageUploader, Notifier, UploadController, UploadOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::files;
use crate::truncate_string;

const PREVIEW_WIDTH: usize = 48;

pub const HELP: &str = "\
Commands:
  select [PATH]   pick an image file (no path cancels the picker)
  key <VALUE>     set the API key (taken verbatim)
  toggle-key      show or hide the API key
  upload          upload the selected image
  status          show the current session state
  help            show this help
  quit            leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Select(Option<PathBuf>),
    Key(String),
    ToggleKey,
    Upload,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl SessionCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return None;
        }

        let (word, rest) = match trimmed.find(char::is_whitespace) {
            Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
            None => (trimmed, ""),
        };

        let command = match word {
            "select" => {
                let path = rest.trim();
                SessionCommand::Select((!path.is_empty()).then(|| PathBuf::from(path)))
            }
            // Everything after the single separating whitespace is the key.
            "key" => SessionCommand::Key(
                rest.strip_prefix(|c: char| c.is_whitespace())
                    .unwrap_or(rest)
                    .to_string(),
            ),
            "toggle-key" => SessionCommand::ToggleKey,
            "upload" => SessionCommand::Upload,
            "status" => SessionCommand::Status,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => SessionCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Human-readable snapshot of the controller state.
pub fn render_status<U, N>(controller: &UploadController<U, N>) -> String
where
    U: ImageUploader,
    N: Notifier,
{
    let file = controller
        .selected_file()
        .map(|f| format!("{} ({}, {} bytes)", f.file_name, f.mime_type, f.size()))
        .unwrap_or_else(|| "none".to_string());
    let preview = controller
        .preview()
        .map(|p| truncate_string(p.as_uri(), PREVIEW_WIDTH))
        .unwrap_or_else(|| "none".to_string());
    let key = if controller.api_key().is_empty() {
        "not set".to_string()
    } else {
        controller.displayed_api_key()
    };
    let result = controller
        .upload_result()
        .map(|r| r.url.clone())
        .unwrap_or_else(|| "none".to_string());

    format!(
        "phase:   {}\nfile:    {}\npreview: {}\nkey:     {}\nresult:  {}",
        controller.phase().name(),
        file,
        preview,
        key,
        result
    )
}

/// Apply one command. Returns `false` when the session should end.
pub async fn execute<U, N, W>(
    controller: &mut UploadController<U, N>,
    command: SessionCommand,
    out: &mut W,
) -> Result<bool>
where
    U: ImageUploader,
    N: Notifier,
    W: Write,
{
    match command {
        SessionCommand::Select(path) => {
            let picked = files::pick(path.as_deref()).await;
            controller.handle_file_selection(picked);
        }
        SessionCommand::Key(value) => controller.handle_api_key_input(value),
        SessionCommand::ToggleKey => {
            let visible = controller.toggle_key_visibility();
            writeln!(
                out,
                "key {}: {}",
                if visible { "shown" } else { "hidden" },
                controller.displayed_api_key()
            )?;
        }
        SessionCommand::Upload => {
            if let UploadOutcome::Uploaded(url) = controller.trigger_upload().await {
                writeln!(out, "{}", url)?;
            }
        }
        SessionCommand::Status => writeln!(out, "{}", render_status(controller))?,
        SessionCommand::Help => writeln!(out, "{}", HELP)?,
        SessionCommand::Quit => return Ok(false),
        SessionCommand::Unknown(word) => {
            writeln!(out, "unknown command: {} (type `help`)", word)?;
        }
    }
    Ok(true)
}

/// Run the session until `quit` or end of input.
pub async fn run<U, N, R, W>(
    controller: &mut UploadController<U, N>,
    input: R,
    mut out: W,
) -> Result<()>
where
    U: ImageUploader,
    N: Notifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", HELP)?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let Some(command) = SessionCommand::parse(&line) else {
            continue;
        };

        if !execute(controller, command, &mut out).await? {
            break;
        }
    }

    tracing::debug!("Session ended");
    Ok(())
}
