use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ArtifactLang;
use crate::text::{Lang, tokenize};

/// Number of corpus sentences scanned per lookup.
pub const SCAN_LIMIT: usize = 1200;

/// Minimum number of shared tokens for a sentence to be returned.
pub const MIN_SCORE: usize = 2;

/// Tokens shorter than this are ignored when scoring.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Candidates with fewer distinct scoring tokens are skipped.
const MIN_CANDIDATE_TOKENS: usize = 3;

/// Corpus of real sentences used for nearest-match retrieval.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Knowledge {
	/// Language the sentences were written in.
	pub lang: ArtifactLang,

	/// Raw sentences, in corpus order.
	pub sentences: Vec<String>,
}

impl Knowledge {
	/// Returns the corpus sentence sharing the most tokens with `prompt`.
	///
	/// # Returns
	/// - `None` if the corpus is scoped to another language, the prompt has
	///   no scoring token, or no sentence shares at least `MIN_SCORE` tokens.
	/// - `Some(sentence)` (trimmed) otherwise.
	///
	/// # Notes
	/// - Only the first `SCAN_LIMIT` sentences are considered.
	/// - On equal scores the earliest sentence wins.
	pub fn select(&self, prompt: &str, lang: Lang) -> Option<String> {
		if !self.lang.accepts(lang) {
			return None;
		}

		let prompt_tokens = unique_tokens(prompt);
		if prompt_tokens.is_empty() {
			return None;
		}

		let mut best_score = 0;
		let mut best: Option<&str> = None;

		for sentence in self.sentences.iter().take(SCAN_LIMIT) {
			let tokens = unique_tokens(sentence);
			if tokens.len() < MIN_CANDIDATE_TOKENS {
				continue;
			}
			let score = prompt_tokens.iter().filter(|token| tokens.contains(*token)).count();
			if score > best_score {
				best_score = score;
				best = Some(sentence.as_str());
			}
		}

		if best_score < MIN_SCORE {
			return None;
		}
		best.map(|sentence| sentence.trim().to_owned())
	}
}

/// Distinct lowercase word tokens of at least `MIN_TOKEN_CHARS` characters.
pub fn unique_tokens(text: &str) -> HashSet<String> {
	tokenize(text)
		.into_iter()
		.filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn corpus(lang: ArtifactLang, sentences: &[&str]) -> Knowledge {
		Knowledge {
			lang,
			sentences: sentences.iter().map(|s| (*s).to_owned()).collect(),
		}
	}

	#[test]
	fn picks_sentence_with_most_shared_tokens() {
		let knowledge = corpus(ArtifactLang::Any, &["the cat sat on the mat", "dogs bark loudly"]);
		assert_eq!(
			knowledge.select("where is the cat", Lang::En).as_deref(),
			Some("the cat sat on the mat")
		);
	}

	#[test]
	fn low_overlap_is_no_match() {
		let knowledge = corpus(ArtifactLang::Any, &["the cat sat on the mat", "dogs bark loudly"]);
		assert!(knowledge.select("space rocket launch", Lang::En).is_none());
		assert!(knowledge.select("the dog", Lang::En).is_none());
	}

	#[test]
	fn first_sentence_wins_ties() {
		let knowledge = corpus(
			ArtifactLang::En,
			&["rust compiler checks borrows", "rust compiler emits code", "rust compiler"],
		);
		assert_eq!(
			knowledge.select("the rust compiler", Lang::En).as_deref(),
			Some("rust compiler checks borrows")
		);
	}

	#[test]
	fn result_is_trimmed() {
		let knowledge = corpus(ArtifactLang::Any, &["   tea leaves brewed slowly  "]);
		assert_eq!(knowledge.select("brewed tea", Lang::En).as_deref(), Some("tea leaves brewed slowly"));
	}

	#[test]
	fn language_scope_is_respected() {
		let knowledge = corpus(ArtifactLang::Ru, &["the cat sat on the mat"]);
		assert!(knowledge.select("the cat", Lang::En).is_none());
	}

	#[test]
	fn short_or_empty_prompts_are_no_match() {
		let knowledge = corpus(ArtifactLang::Any, &["the cat sat on the mat"]);
		assert!(knowledge.select("a b c", Lang::En).is_none());
		assert!(knowledge.select("", Lang::En).is_none());
	}

	#[test]
	fn scan_stops_at_limit() {
		let mut sentences = vec!["filler words only here"; SCAN_LIMIT];
		sentences.push("quantum physics lecture notes");
		let knowledge = corpus(ArtifactLang::Any, &sentences);
		assert!(knowledge.select("quantum physics", Lang::En).is_none());
	}

	#[test]
	fn unique_tokens_collapses_duplicates() {
		let tokens = unique_tokens("The the THE cat a");
		assert_eq!(tokens.len(), 2);
		assert!(tokens.contains("the"));
		assert!(tokens.contains("cat"));
	}
}
