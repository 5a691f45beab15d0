use rand::RngCore;

use crate::config::EngineConfig;
use crate::external::{OllamaGenerator, pins_markov};
use crate::intent::{self, Intent};
use crate::model::store::ArtifactStore;
use crate::template::{self, lexicon};
use crate::text::{self, Lang};

/// Token budget of a Markov reply.
pub const MARKOV_MAX_TOKENS: usize = 42;

/// Markov replies with fewer space-separated tokens are discarded.
pub const MARKOV_MIN_TOKENS: usize = 5;

/// A prompt with everything derived from it, alive for one reply.
#[derive(Debug)]
pub struct Prompt<'a> {
	pub text: &'a str,
	pub lang: Lang,
	pub intent: Intent,
	pub model_hint: Option<&'a str>,
}

impl<'a> Prompt<'a> {
	/// Detects language and intent of `text`.
	pub fn new(text: &'a str, model_hint: Option<&'a str>) -> Self {
		Self {
			text,
			lang: text::detect_language(text),
			intent: intent::classify(text),
			model_hint,
		}
	}
}

/// Signature of a stage of the fallback chain.
pub type StageFn = fn(&ReplyEngine, &Prompt<'_>, &mut dyn RngCore) -> Option<String>;

/// A named step of the fallback chain.
pub struct Stage {
	pub name: &'static str,
	pub run: StageFn,
}

/// The fallback chain, in precedence order. The last stage always answers.
pub const STAGES: &[Stage] = &[
	Stage { name: "identity", run: identity_stage },
	Stage { name: "external", run: external_stage },
	Stage { name: "code", run: code_stage },
	Stage { name: "markov", run: markov_stage },
	Stage { name: "knowledge", run: knowledge_stage },
	Stage { name: "template", run: template_stage },
];

/// Multi-stage fallback reply generator.
///
/// Owns the artifact cache and the external service client. Build it
/// once at process start and share it; every method takes `&self`.
///
/// # Example
/// ```no_run
/// use rs_reply_core::{EngineConfig, ReplyEngine};
///
/// let engine = ReplyEngine::new(&EngineConfig::from_env());
/// let reply = engine.generate_reply("How to learn Rust?", Some("markov"));
/// assert!(!reply.is_empty());
/// ```
#[derive(Debug)]
pub struct ReplyEngine {
	store: ArtifactStore,
	external: OllamaGenerator,
}

impl ReplyEngine {
	/// Creates an engine from a configuration. Nothing is loaded yet.
	pub fn new(config: &EngineConfig) -> Self {
		Self::with_parts(ArtifactStore::from_config(config), OllamaGenerator::new(config))
	}

	/// Creates an engine from explicit collaborators.
	pub fn with_parts(store: ArtifactStore, external: OllamaGenerator) -> Self {
		Self { store, external }
	}

	/// Artifact cache of this engine.
	pub fn store(&self) -> &ArtifactStore {
		&self.store
	}

	/// Produces a reply using the thread-local random generator.
	pub fn generate_reply(&self, prompt: &str, model_hint: Option<&str>) -> String {
		self.generate_reply_with(prompt, model_hint, &mut rand::rng())
	}

	/// Produces a reply, drawing every random choice from `rng`.
	///
	/// Always returns a non-empty string.
	pub fn generate_reply_with(&self, prompt: &str, model_hint: Option<&str>, rng: &mut dyn RngCore) -> String {
		let prompt = Prompt::new(prompt, model_hint);
		log::debug!("Prompt classified as {:?} ({})", prompt.intent, prompt.lang);

		for stage in STAGES {
			if let Some(reply) = (stage.run)(self, &prompt, rng) {
				log::debug!("Reply produced by the {} stage", stage.name);
				return reply;
			}
		}

		// The template stage always answers; kept for totality.
		template::fallback_reply(prompt.text, prompt.lang)
	}
}

/// Fixed identity statement for "who created you" questions.
pub fn identity_stage(_engine: &ReplyEngine, prompt: &Prompt<'_>, _rng: &mut dyn RngCore) -> Option<String> {
	(prompt.intent == Intent::Creator).then(|| template::identity_reply(prompt.lang))
}

/// External generation service, unless the hint pins the Markov pipeline.
pub fn external_stage(engine: &ReplyEngine, prompt: &Prompt<'_>, _rng: &mut dyn RngCore) -> Option<String> {
	if pins_markov(prompt.model_hint) {
		return None;
	}
	engine.external.generate(prompt.text, prompt.lang, prompt.model_hint)
}

/// Code snippet template for code requests.
pub fn code_stage(_engine: &ReplyEngine, prompt: &Prompt<'_>, _rng: &mut dyn RngCore) -> Option<String> {
	match prompt.intent {
		Intent::Code(code_lang) => Some(template::code_reply(prompt.lang, code_lang)),
		_ => None,
	}
}

/// Markov generation followed by a closing sentence.
pub fn markov_stage(engine: &ReplyEngine, prompt: &Prompt<'_>, rng: &mut dyn RngCore) -> Option<String> {
	let model = engine.store.markov()?;
	let generated = model.generate(prompt.lang, MARKOV_MAX_TOKENS, rng)?;
	if generated.split(' ').count() < MARKOV_MIN_TOKENS {
		return None;
	}
	Some(format!("{generated} {}", lexicon::pick_closer(prompt.lang, rng)))
}

/// Best-matching knowledge sentence followed by a closing sentence.
pub fn knowledge_stage(engine: &ReplyEngine, prompt: &Prompt<'_>, rng: &mut dyn RngCore) -> Option<String> {
	let knowledge = engine.store.knowledge()?;
	let sentence = knowledge.select(prompt.text, prompt.lang)?;
	Some(format!("{sentence} {}", lexicon::pick_closer(prompt.lang, rng)))
}

/// Structured template or hashed fallback. Always answers.
pub fn template_stage(_engine: &ReplyEngine, prompt: &Prompt<'_>, _rng: &mut dyn RngCore) -> Option<String> {
	Some(template::text_reply(prompt.text, prompt.lang, prompt.intent))
}
