use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, ReplyError>;

/// Failures raised by the fallible internals.
///
/// None of these ever reach the caller of `ReplyEngine::generate_reply`:
/// the component that owns the failure logs it and degrades to "no reply".
#[derive(Debug, Error)]
pub enum ReplyError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),

	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Artifact not found: {}", .0.display())]
	MissingArtifact(PathBuf),

	#[error("Generation service returned {status}: {detail}")]
	Status { status: u16, detail: String },

	#[error("Generation service is disabled")]
	Disabled,
}
