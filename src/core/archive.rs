use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Event;
use kube::ResourceExt;
use tracing::debug;

use crate::core::error::PurgeError;

const SEPARATOR_WIDTH: usize = 80;

/// Renders the job's spec as pretty-printed JSON and appends it to the log
/// file at `path`.
pub fn archive_spec(job: &Job, path: &Path) -> Result<(), PurgeError> {
    let name = job.name_any();
    let body = serde_json::to_string_pretty(&job.spec).map_err(|err| PurgeError::Render {
        document: "spec",
        job: name.clone(),
        source: err,
    })?;
    let header = format!(
        "Spec for job [{name}], which was deleted at {}",
        Local::now().to_rfc3339()
    );
    append_block(path, &header, &body)
}

/// Renders the job's event list as pretty-printed JSON and appends it to the
/// log file at `path`. The list may be empty; the block is written anyway so
/// the run is visible in the archive.
pub fn archive_events(job: &Job, events: &[Event], path: &Path) -> Result<(), PurgeError> {
    let name = job.name_any();
    let body = serde_json::to_string_pretty(events).map_err(|err| PurgeError::Render {
        document: "events",
        job: name.clone(),
        source: err,
    })?;
    let header = format!(
        "Events for job [{name}], which was deleted at {}",
        Local::now().to_rfc3339()
    );
    append_block(path, &header, &body)
}

/// Appends one framed block to the file: a separator line, the header, the
/// rendered document, a trailing separator. The file is opened in append
/// mode and created if absent, so entries accumulate across runs.
fn append_block(path: &Path, header: &str, body: &str) -> Result<(), PurgeError> {
    let separator = "*".repeat(SEPARATOR_WIDTH);
    let block = format!("\n{separator}\n{header}\n{body}\n{separator}");

    let path = expand_home(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|err| PurgeError::OpenLogFile {
            path: path.clone(),
            source: err,
        })?;

    debug!("Writing content to file: {}", path.display());
    file.write_all(block.as_bytes())
        .map_err(|err| PurgeError::WriteLogFile { path, source: err })
}

/// Expands a leading `~` to the user's home directory; any other path is
/// returned untouched.
fn expand_home(path: &Path) -> Result<PathBuf, PurgeError> {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => Ok(home.join(rest)),
            None => Err(PurgeError::ExpandPath {
                path: path.to_path_buf(),
            }),
        },
        Err(_) => Ok(path.to_path_buf()),
    }
}
