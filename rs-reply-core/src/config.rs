use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default location of the Markov model artifact.
pub const DEFAULT_MODEL_PATH: &str = "markov.model.json";
/// Default location of the knowledge corpus artifact.
pub const DEFAULT_KNOWLEDGE_PATH: &str = "knowledge.corpus.json";
/// Default base URL of the generation service.
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
/// Default backing model of the generation service.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1-8b";
/// Default request budget, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Settings of a `ReplyEngine`.
///
/// Every field has a default so that an engine can always be built, even
/// with no environment at all. Artifact paths that do not exist simply
/// disable the corresponding stage.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
	/// Markov model artifact (`AI_MODEL_PATH`).
	pub model_path: PathBuf,

	/// Knowledge corpus artifact (`AI_KNOWLEDGE_PATH`).
	pub knowledge_path: PathBuf,

	/// Generation service base URL (`OLLAMA_URL`). Empty disables the service.
	pub ollama_url: String,

	/// Backing model used when no explicit hint is given (`OLLAMA_MODEL`).
	pub ollama_model: String,

	/// Request budget in milliseconds (`OLLAMA_TIMEOUT_MS`).
	pub timeout_ms: u64,

	/// Verbose failure diagnostics for the service (`OLLAMA_DEBUG=1`).
	pub debug: bool,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			model_path: PathBuf::from(DEFAULT_MODEL_PATH),
			knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_PATH),
			ollama_url: DEFAULT_OLLAMA_URL.to_owned(),
			ollama_model: DEFAULT_OLLAMA_MODEL.to_owned(),
			timeout_ms: DEFAULT_TIMEOUT_MS,
			debug: false,
		}
	}
}

impl EngineConfig {
	/// Reads the configuration from process environment variables.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a configuration from an arbitrary key lookup.
	///
	/// Unset or empty variables keep their default, so `OLLAMA_URL=""` does
	/// not disable the service. An unparsable timeout keeps the default
	/// timeout instead of failing.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());
		let mut config = Self::default();

		if let Some(path) = lookup("AI_MODEL_PATH") {
			config.model_path = PathBuf::from(path);
		}
		if let Some(path) = lookup("AI_KNOWLEDGE_PATH") {
			config.knowledge_path = PathBuf::from(path);
		}
		if let Some(url) = lookup("OLLAMA_URL") {
			config.ollama_url = url;
		}
		if let Some(model) = lookup("OLLAMA_MODEL") {
			config.ollama_model = model;
		}
		if let Some(timeout) = lookup("OLLAMA_TIMEOUT_MS") {
			match timeout.trim().parse::<u64>() {
				Ok(ms) => config.timeout_ms = ms,
				Err(_) => log::warn!("Ignoring invalid OLLAMA_TIMEOUT_MS value '{timeout}'"),
			}
		}
		config.debug = lookup("OLLAMA_DEBUG").is_some_and(|value| value == "1");

		config
	}

	/// Request budget of the generation service.
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect();
		move |key: &str| map.get(key).cloned()
	}

	#[test]
	fn empty_environment_uses_defaults() {
		let config = EngineConfig::from_lookup(|_| None);
		assert_eq!(config, EngineConfig::default());
		assert_eq!(config.timeout(), Duration::from_secs(60));
		assert!(!config.debug);
	}

	#[test]
	fn environment_overrides_defaults() {
		let config = EngineConfig::from_lookup(lookup_from(&[
			("AI_MODEL_PATH", "/data/model.json"),
			("AI_KNOWLEDGE_PATH", "/data/knowledge.json"),
			("OLLAMA_URL", "http://gpu:11434"),
			("OLLAMA_MODEL", "qwen2.5:7b"),
			("OLLAMA_TIMEOUT_MS", "1500"),
			("OLLAMA_DEBUG", "1"),
		]));
		assert_eq!(config.model_path, PathBuf::from("/data/model.json"));
		assert_eq!(config.knowledge_path, PathBuf::from("/data/knowledge.json"));
		assert_eq!(config.ollama_url, "http://gpu:11434");
		assert_eq!(config.ollama_model, "qwen2.5:7b");
		assert_eq!(config.timeout(), Duration::from_millis(1500));
		assert!(config.debug);
	}

	#[test]
	fn invalid_timeout_keeps_default() {
		let config = EngineConfig::from_lookup(lookup_from(&[("OLLAMA_TIMEOUT_MS", "soon")]));
		assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
	}

	#[test]
	fn empty_variables_keep_defaults() {
		let config = EngineConfig::from_lookup(lookup_from(&[
			("AI_MODEL_PATH", ""),
			("OLLAMA_URL", ""),
			("OLLAMA_MODEL", ""),
			("OLLAMA_TIMEOUT_MS", ""),
		]));
		assert_eq!(config, EngineConfig::default());
	}

	#[test]
	fn debug_requires_exact_flag() {
		let config = EngineConfig::from_lookup(lookup_from(&[("OLLAMA_DEBUG", "true")]));
		assert!(!config.debug);
	}
}
