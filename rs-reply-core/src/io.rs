use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ReplyError, Result};

/// Builds an output path by replacing the last extension of `input_path`.
///
/// Example:
/// `data/markov.model.json` + `"bin"` → `data/markov.model.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();
	if input_path.file_name().is_none() {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"));
	}
	Ok(input_path.with_extension(output_extension))
}

/// Decodes an artifact, preferring its binary snapshot.
///
/// - If `<stem>.bin` exists next to `json_path` and decodes, it is used.
/// - A snapshot that fails to decode is ignored (logged) and the JSON
///   file is read instead.
///
/// # Errors
/// Returns an error if the JSON file is missing, unreadable or malformed.
pub(crate) fn read_artifact<T, P>(json_path: P) -> Result<T>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let json_path = json_path.as_ref();

	let snapshot_path = build_output_path(json_path, "bin")?;
	if snapshot_path.is_file() {
		let decoded = fs::read(&snapshot_path)
			.map_err(ReplyError::from)
			.and_then(|bytes| postcard::from_bytes::<T>(&bytes).map_err(ReplyError::from));
		match decoded {
			Ok(artifact) => return Ok(artifact),
			Err(e) => log::warn!("Ignoring snapshot {}: {e}", snapshot_path.display()),
		}
	}

	read_json(json_path)
}

/// Reads and parses a JSON artifact, ignoring any snapshot.
pub(crate) fn read_json<T, P>(json_path: P) -> Result<T>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let json_path = json_path.as_ref();
	if !json_path.is_file() {
		return Err(ReplyError::MissingArtifact(json_path.to_path_buf()));
	}
	let raw = fs::read_to_string(json_path)?;
	Ok(serde_json::from_str(&raw)?)
}

/// Serializes an artifact with `postcard` next to its JSON source.
///
/// Returns the path of the written snapshot.
pub(crate) fn write_snapshot<T, P>(artifact: &T, json_path: P) -> Result<PathBuf>
where
	T: Serialize,
	P: AsRef<Path>,
{
	let snapshot_path = build_output_path(json_path, "bin")?;
	let bytes = postcard::to_stdvec(artifact)?;
	fs::write(&snapshot_path, bytes)?;
	Ok(snapshot_path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_replaces_last_extension() {
		let path = build_output_path("data/markov.model.json", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/markov.model.bin"));
	}

	#[test]
	fn artifacts_sharing_a_stem_get_distinct_snapshots() {
		let markov = build_output_path("data/corpus.markov.json", "bin").unwrap();
		let knowledge = build_output_path("data/corpus.knowledge.json", "bin").unwrap();
		assert_eq!(markov, PathBuf::from("data/corpus.markov.bin"));
		assert_eq!(knowledge, PathBuf::from("data/corpus.knowledge.bin"));
	}

	#[test]
	fn output_path_without_filename_fails() {
		assert!(build_output_path("/", "bin").is_err());
	}

	#[test]
	fn missing_json_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let result = read_json::<serde_json::Value, _>(dir.path().join("absent.json"));
		assert!(matches!(result, Err(ReplyError::MissingArtifact(_))));
	}
}
