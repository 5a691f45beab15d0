use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::knowledge::Knowledge;
use super::markov::MarkovModel;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::io;

/// Load-once cache of the Markov model and the knowledge corpus.
///
/// Each artifact is read from disk the first time it is asked for and kept
/// for the lifetime of the store, including a failed load: a missing or
/// corrupt artifact is remembered as absent and never retried.
///
/// # Notes
/// - Loading never fails outward; failures are logged and become `None`.
/// - A readable `postcard` snapshot (`<stem>.bin`) takes precedence over
///   the JSON file.
#[derive(Debug, Default)]
pub struct ArtifactStore {
	markov_path: PathBuf,
	knowledge_path: PathBuf,
	markov: OnceLock<Option<MarkovModel>>,
	knowledge: OnceLock<Option<Knowledge>>,
}

impl ArtifactStore {
	/// Creates a store reading the artifacts at the given paths.
	pub fn new<PM, PK>(markov_path: PM, knowledge_path: PK) -> Self
	where
		PM: AsRef<Path>,
		PK: AsRef<Path>,
	{
		Self {
			markov_path: markov_path.as_ref().to_path_buf(),
			knowledge_path: knowledge_path.as_ref().to_path_buf(),
			markov: OnceLock::new(),
			knowledge: OnceLock::new(),
		}
	}

	/// Creates a store from the artifact paths of a configuration.
	pub fn from_config(config: &EngineConfig) -> Self {
		Self::new(&config.model_path, &config.knowledge_path)
	}

	/// Creates a store holding already-loaded artifacts.
	///
	/// Nothing is ever read from disk.
	pub fn preloaded(markov: Option<MarkovModel>, knowledge: Option<Knowledge>) -> Self {
		Self {
			markov_path: PathBuf::new(),
			knowledge_path: PathBuf::new(),
			markov: OnceLock::from(markov),
			knowledge: OnceLock::from(knowledge),
		}
	}

	/// Returns the Markov model, loading it on first access.
	pub fn markov(&self) -> Option<&MarkovModel> {
		self.markov
			.get_or_init(|| load_or_absent(&self.markov_path, "Markov model"))
			.as_ref()
	}

	/// Returns the knowledge corpus, loading it on first access.
	pub fn knowledge(&self) -> Option<&Knowledge> {
		self.knowledge
			.get_or_init(|| load_or_absent(&self.knowledge_path, "knowledge corpus"))
			.as_ref()
	}

	/// Writes a binary snapshot of the Markov model JSON.
	///
	/// # Errors
	/// Returns an error if the JSON cannot be read or the snapshot written.
	pub fn snapshot_markov(&self) -> Result<PathBuf> {
		snapshot::<MarkovModel>(&self.markov_path)
	}

	/// Writes a binary snapshot of the knowledge corpus JSON.
	///
	/// # Errors
	/// Returns an error if the JSON cannot be read or the snapshot written.
	pub fn snapshot_knowledge(&self) -> Result<PathBuf> {
		snapshot::<Knowledge>(&self.knowledge_path)
	}
}

/// Loads an artifact, turning every failure into `None`.
fn load_or_absent<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
	match io::read_artifact(path) {
		Ok(artifact) => {
			log::info!("Loaded {what} from {}", path.display());
			Some(artifact)
		}
		Err(e) => {
			log::warn!("{what} unavailable: {e}");
			None
		}
	}
}

/// Re-encodes a JSON artifact as a snapshot next to it.
fn snapshot<T: DeserializeOwned + Serialize>(json_path: &Path) -> Result<PathBuf> {
	let artifact: T = io::read_json(json_path)?;
	io::write_snapshot(&artifact, json_path)
}
