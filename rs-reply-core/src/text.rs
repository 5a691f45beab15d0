use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Word tokens: Latin letters, the Cyrillic block, digits and apostrophes.
static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[A-Za-z\x{0400}-\x{04FF}0-9']+") {
	Ok(regex) => regex,
	Err(err) => panic!("Word regex is invalid: {err}"),
});

/// Word tokens plus single punctuation marks, as used by the artifact builder.
static TOKEN_REGEX: LazyLock<Regex> =
	LazyLock::new(|| match Regex::new(r"[A-Za-z\x{0400}-\x{04FF}0-9']+|[.,!?;:()]") {
		Ok(regex) => regex,
		Err(err) => panic!("Token regex is invalid: {err}"),
	});

/// Natural language of a prompt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
	Ru,
	En,
}

impl Lang {
	/// Short language code (`"ru"` / `"en"`).
	pub fn code(self) -> &'static str {
		match self {
			Lang::Ru => "ru",
			Lang::En => "en",
		}
	}
}

impl fmt::Display for Lang {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// Splits `text` into lowercase word tokens.
///
/// Punctuation is dropped. Text without any word character yields an
/// empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
	let lower = text.to_lowercase();
	WORD_REGEX
		.find_iter(&lower)
		.map(|m| m.as_str().to_owned())
		.collect()
}

/// Splits `text` into word tokens and single punctuation marks
/// (`. , ! ? ; : ( )`), preserving case.
///
/// This is the tokenization Markov artifacts are built with.
pub fn tokenize_with_punctuation(text: &str) -> Vec<String> {
	TOKEN_REGEX
		.find_iter(text)
		.map(|m| m.as_str().to_owned())
		.collect()
}

/// Returns `Lang::Ru` if any Cyrillic letter `а..я` / `ё` (any case) is
/// present, `Lang::En` otherwise.
pub fn detect_language(text: &str) -> Lang {
	let cyrillic = text
		.chars()
		.flat_map(char::to_lowercase)
		.any(|c| ('а'..='я').contains(&c) || c == 'ё');
	if cyrillic { Lang::Ru } else { Lang::En }
}
