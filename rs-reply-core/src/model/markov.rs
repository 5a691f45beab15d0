use std::collections::HashMap;
use std::sync::LazyLock;

use rand::Rng;
use rand::seq::IndexedRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ArtifactLang;
use crate::text::Lang;

/// Separator between the two tokens of a transition key.
pub const KEY_SEPARATOR: char = '|';

/// The only model order the generator understands.
pub const MARKOV_ORDER: usize = 2;

static SPACE_BEFORE_PUNCT: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\s+([.,!?;:])") {
	Ok(regex) => regex,
	Err(err) => panic!("Punctuation regex is invalid: {err}"),
});

static SPACE_AFTER_OPEN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\(\s+") {
	Ok(regex) => regex,
	Err(err) => panic!("Parenthesis regex is invalid: {err}"),
});

static SPACE_BEFORE_CLOSE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"\s+\)") {
	Ok(regex) => regex,
	Err(err) => panic!("Parenthesis regex is invalid: {err}"),
});

/// Order-2 Markov model over word and punctuation tokens.
///
/// A transition key is two consecutive tokens joined with `|`
/// (`"the|cat"`). Its value lists every token observed right after that
/// pair; a token seen several times appears several times, which is how
/// frequency is encoded.
///
/// # Invariants
/// - The model is never modified after loading
/// - Every starter is a valid transition key shape (`tok1|tok2`)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkovModel {
	/// Model order. Anything but 2 disables generation.
	#[serde(default)]
	pub order: usize,

	/// Language the corpus was written in.
	pub lang: ArtifactLang,

	/// `"tok1|tok2"` → possible next tokens (with repetition).
	pub transitions: HashMap<String, Vec<String>>,

	/// Keys that may begin a generated text.
	pub starters: Vec<String>,
}

impl MarkovModel {
	/// Builds a key from two consecutive tokens.
	pub fn key(first: &str, second: &str) -> String {
		format!("{first}{KEY_SEPARATOR}{second}")
	}

	/// Generates a text of at most `max_tokens` tokens.
	///
	/// # Returns
	/// - `None` if the model is scoped to another language, has an order
	///   other than 2, has no starters, or the picked starter is malformed.
	/// - `Some(text)` otherwise.
	///
	/// # Behavior
	/// - Seeds the output with a uniformly random starter.
	/// - Appends a uniformly random candidate for the last two tokens until
	///   `max_tokens` is reached, the key is unknown, or a sentence-ending
	///   mark (`. ! ?`) was appended.
	/// - Joins tokens with spaces and tightens punctuation spacing.
	pub fn generate<R: Rng + ?Sized>(&self, lang: Lang, max_tokens: usize, rng: &mut R) -> Option<String> {
		if !self.lang.accepts(lang) || self.order != MARKOV_ORDER {
			return None;
		}

		let starter = self.starters.choose(rng)?;
		let (first, second) = starter.split_once(KEY_SEPARATOR)?;
		let mut tokens: Vec<&str> = vec![first, second];

		while tokens.len() < max_tokens {
			let key = Self::key(tokens[tokens.len() - 2], tokens[tokens.len() - 1]);
			let Some(next) = self.transitions.get(&key).and_then(|candidates| candidates.choose(rng)) else {
				break;
			};
			tokens.push(next.as_str());
			if is_terminal(next) {
				break;
			}
		}

		Some(clean_punctuation(&tokens.join(" ")))
	}
}

/// Returns `true` for tokens that end a sentence.
fn is_terminal(token: &str) -> bool {
	matches!(token, "." | "!" | "?")
}

/// Removes the space before `. , ! ? ; :` and inside parentheses.
pub fn clean_punctuation(text: &str) -> String {
	let text = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
	let text = SPACE_AFTER_OPEN.replace_all(&text, "(");
	SPACE_BEFORE_CLOSE.replace_all(&text, ")").into_owned()
}
