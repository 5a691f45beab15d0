//! Keyword-driven intent classification.
//!
//! Every check is a case-insensitive substring test against a fixed keyword
//! list (English and Russian keywords live in the same list). Checks run in
//! a fixed order and the first match wins.

/// Target language of a code request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeLang {
	Python,
	CSharp,
}

/// Classified purpose of a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
	Creator,
	Code(CodeLang),
	Planner,
	Explain,
	Idea,
	HowTo,
	None,
}

const CREATOR_KEYWORDS: &[&str] = &[
	"who created you",
	"who made you",
	"who built you",
	"who are you made by",
	"кто тебя создал",
	"кто тебя сделал",
	"кто сделал тебя",
	"кем ты создан",
];

const CODE_KEYWORDS: &[&str] = &[
	"code", "snippet", "example", "function", "bug", "error", "код", "пример", "функция", "ошибка",
];

const CSHARP_KEYWORDS: &[&str] = &["c#", "csharp", "шарп", "си шарп"];

const PLANNER_KEYWORDS: &[&str] = &[
	"plan",
	"schedule",
	"routine",
	"план",
	"расписание",
	"неделю",
	"день",
	"график",
];

const EXPLAIN_KEYWORDS: &[&str] = &["explain", "what is", "meaning", "объясни", "что такое", "поясни", "смысл"];

const IDEA_KEYWORDS: &[&str] = &["idea", "ideas", "brainstorm", "идея", "идеи", "придумай", "предложи"];

const HOW_TO_KEYWORDS: &[&str] = &["how to", "steps", "guide", "как", "инструкция", "шаги", "пошагово"];

/// Returns `true` if `text` contains any of `keywords`.
pub fn has_any(text: &str, keywords: &[&str]) -> bool {
	keywords.iter().any(|keyword| text.contains(keyword))
}

/// Classifies a prompt.
///
/// Precedence: creator > code > planner > explain > idea > how-to > none.
pub fn classify(prompt: &str) -> Intent {
	let lower = prompt.to_lowercase();

	if has_any(&lower, CREATOR_KEYWORDS) {
		Intent::Creator
	} else if has_any(&lower, CODE_KEYWORDS) {
		Intent::Code(detect_code_lang(&lower))
	} else if has_any(&lower, PLANNER_KEYWORDS) {
		Intent::Planner
	} else if has_any(&lower, EXPLAIN_KEYWORDS) {
		Intent::Explain
	} else if has_any(&lower, IDEA_KEYWORDS) {
		Intent::Idea
	} else if has_any(&lower, HOW_TO_KEYWORDS) {
		Intent::HowTo
	} else {
		Intent::None
	}
}

/// Picks the snippet language of a code request, Python unless C# is named.
pub fn detect_code_lang(lower: &str) -> CodeLang {
	if has_any(lower, CSHARP_KEYWORDS) {
		CodeLang::CSharp
	} else {
		CodeLang::Python
	}
}
