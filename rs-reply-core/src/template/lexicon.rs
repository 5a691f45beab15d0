use rand::Rng;
use rand::seq::IndexedRandom;

use crate::text::Lang;

/// Fixed word banks of one language.
#[derive(Debug)]
pub struct Lexicon {
	pub verbs: &'static [&'static str],
	pub nouns: &'static [&'static str],
	/// Adjectives (English) or adverbs (Russian).
	pub modifiers: &'static [&'static str],
	pub objects: &'static [&'static str],
	pub preps: &'static [&'static str],
	/// Sentences appended after a generated or retrieved reply.
	pub closers: &'static [&'static str],
}

static EN: Lexicon = Lexicon {
	verbs: &["build", "explain", "analyze", "design", "debug", "summarize"],
	nouns: &["solution", "answer", "plan", "snippet", "approach"],
	modifiers: &["clear", "practical", "safe", "concise", "robust", "useful"],
	objects: &["your request", "the task", "the issue", "the requirements", "the context"],
	preps: &["for", "around", "based on", "within"],
	closers: &[
		"Share constraints and I will refine it.",
		"If you want, I can expand or add examples.",
		"Tell me the goal and I will adjust the output.",
	],
};

static RU: Lexicon = Lexicon {
	verbs: &["предлагаю", "объясняю", "разбираю", "формулирую", "показываю", "помогаю"],
	nouns: &["решение", "ответ", "план", "пример", "подход"],
	modifiers: &["четко", "кратко", "надежно", "понятно", "практично", "по делу"],
	objects: &["ваш запрос", "задачу", "проблему", "требования", "контекст"],
	preps: &["для", "по", "на основе", "в рамках"],
	closers: &[
		"Скажи ограничения, и я уточню ответ.",
		"Если нужно, добавлю примеры и детали.",
		"Опиши цель, и я подстрою решение.",
	],
};

/// Returns the word banks of `lang`.
pub fn lexicon(lang: Lang) -> &'static Lexicon {
	match lang {
		Lang::En => &EN,
		Lang::Ru => &RU,
	}
}

/// Picks a random closing sentence in `lang`.
pub fn pick_closer<R: Rng + ?Sized>(lang: Lang, rng: &mut R) -> &'static str {
	lexicon(lang).closers.choose(rng).copied().unwrap_or_default()
}
