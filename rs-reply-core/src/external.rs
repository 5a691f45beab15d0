use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{ReplyError, Result};
use crate::text::Lang;

/// Model hints containing this name pin the local Markov pipeline.
pub const MARKOV_HINT: &str = "markov";

/// Product model-name prefixes served by the configured default model.
const PRODUCT_PREFIXES: &[&str] = &["ven-", "veno-"];

const TEMPERATURE: f32 = 0.6;
const CONTEXT_SIZE: u32 = 2048;

const SYSTEM_EN: &str = "Reply naturally and helpfully. Use the user language. If asked for code, output clean code with line breaks and a short explanation. Avoid markdown styling.";
const SYSTEM_RU: &str = "Отвечай естественно и по-человечески. Пиши на языке пользователя. Если просят код, давай чистый код с последовательными переносами строк и краткое пояснение. Без жирных заголовков и маркдаун-украшений.";

/// Body of `POST /api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
	model: &'a str,
	prompt: &'a str,
	system: &'a str,
	stream: bool,
	options: GenerateOptions,
}

/// Fixed sampling parameters.
#[derive(Debug, Serialize)]
struct GenerateOptions {
	temperature: f32,
	num_ctx: u32,
}

/// The only field read from the service response.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
	#[serde(default)]
	response: String,
}

/// Returns `true` if the hint asks for the Markov pipeline only.
pub fn pins_markov(model_hint: Option<&str>) -> bool {
	model_hint.is_some_and(|hint| hint.to_lowercase().contains(MARKOV_HINT))
}

/// Client of an Ollama-compatible `/api/generate` endpoint.
///
/// # Responsibilities
/// - Build the request (prompt, system instruction, sampling options)
/// - Enforce the request budget (the timeout cancels the request)
/// - Turn every failure into "no reply"
#[derive(Debug)]
pub struct OllamaGenerator {
	client: Client,
	base_url: String,
	default_model: String,
	timeout: Duration,
	debug: bool,
}

impl OllamaGenerator {
	/// Creates a generator from the service settings of `config`.
	pub fn new(config: &EngineConfig) -> Self {
		Self {
			client: Client::new(),
			base_url: config.ollama_url.trim_end_matches('/').to_owned(),
			default_model: config.ollama_model.clone(),
			timeout: config.timeout(),
			debug: config.debug,
		}
	}

	/// `false` when no base URL or default model is configured.
	pub fn is_enabled(&self) -> bool {
		!self.base_url.is_empty() && !self.default_model.is_empty()
	}

	/// Maps a model hint to the backing model name.
	///
	/// - No hint, or a hint with a product prefix (`ven-`, `veno-`), uses
	///   the configured default model.
	/// - Any other hint is passed through unchanged.
	pub fn resolve_model<'a>(&'a self, model_hint: Option<&'a str>) -> &'a str {
		match model_hint {
			Some(hint) => {
				let lower = hint.to_lowercase();
				if PRODUCT_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
					&self.default_model
				} else {
					hint
				}
			}
			None => &self.default_model,
		}
	}

	/// Asks the service for a reply.
	///
	/// Returns `None` on timeout, transport failure, non-success status,
	/// malformed body or blank response. Never panics, never errors.
	pub fn generate(&self, prompt: &str, lang: Lang, model_hint: Option<&str>) -> Option<String> {
		match self.request(prompt, lang, model_hint) {
			Ok(text) if !text.is_empty() => Some(text),
			Ok(_) => None,
			Err(e) => {
				if self.debug {
					log::warn!("[ollama] request failed: {e}");
				} else {
					log::debug!("[ollama] request failed: {e}");
				}
				None
			}
		}
	}

	fn request(&self, prompt: &str, lang: Lang, model_hint: Option<&str>) -> Result<String> {
		if !self.is_enabled() {
			return Err(ReplyError::Disabled);
		}

		let body = GenerateRequest {
			model: self.resolve_model(model_hint),
			prompt,
			system: match lang {
				Lang::Ru => SYSTEM_RU,
				Lang::En => SYSTEM_EN,
			},
			stream: false,
			options: GenerateOptions {
				temperature: TEMPERATURE,
				num_ctx: CONTEXT_SIZE,
			},
		};

		let response = self
			.client
			.post(format!("{}/api/generate", self.base_url))
			.timeout(self.timeout)
			.json(&body)
			.send()?;

		let status = response.status();
		if !status.is_success() {
			let detail = if self.debug { response.text().unwrap_or_default() } else { String::new() };
			return Err(ReplyError::Status {
				status: status.as_u16(),
				detail,
			});
		}

		let parsed: GenerateResponse = response.json()?;
		Ok(parsed.response.trim().to_owned())
	}
}
