use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PurgeError {
    #[error("failed to resolve cluster credentials: {0}")]
    Credentials(String),
    #[error("failed to list jobs in namespace [{namespace}]: {reason}")]
    ListJobs { namespace: String, reason: String },
    #[error("failed to query events for job [{job}]: {reason}")]
    ListEvents { job: String, reason: String },
    #[error("failed to delete job [{job}]: {reason}")]
    DeleteJob { job: String, reason: String },
    #[error("failed to render the {document} for job [{job}]: {source}")]
    Render {
        document: &'static str,
        job: String,
        source: serde_json::Error,
    },
    #[error("failed to expand log file path [{}]", .path.display())]
    ExpandPath { path: PathBuf },
    #[error("failed to open log file [{}]: {}", .path.display(), .source)]
    OpenLogFile { path: PathBuf, source: io::Error },
    #[error("failed to write to log file [{}]: {}", .path.display(), .source)]
    WriteLogFile { path: PathBuf, source: io::Error },
}
