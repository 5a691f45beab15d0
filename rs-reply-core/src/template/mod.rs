//! Deterministic template replies.
//!
//! Every reply here is a pure function of the prompt and its language:
//! the same input always renders the same text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::intent::{CodeLang, Intent};
use crate::text::{Lang, tokenize};

/// Per-language word banks and closing sentences.
pub mod lexicon;

/// Maximum number of words kept in an extracted topic.
const TOPIC_WORDS: usize = 6;

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"(?-u:\b)([01]?[0-9]|2[0-3])[:.][0-5][0-9](?-u:\b)") {
	Ok(regex) => regex,
	Err(err) => panic!("Time regex is invalid: {err}"),
});

const EN_STOPWORDS: &[&str] = &[
	"what", "how", "why", "the", "and", "with", "need", "make", "write", "explain", "plan", "idea", "ideas",
];

const RU_STOPWORDS: &[&str] = &[
	"что", "как", "зачем", "почему", "это", "мне", "нужно", "напиши", "объясни", "поясни", "план", "идея", "идеи",
];

const EN_FALLBACK: &[&str] = &[
	"Share the goal, constraints, and desired format, and I will tailor the answer.",
	"I can deliver a plan, explanation, or code. Tell me what result you want.",
	"Give a bit more context and I will respond with specifics.",
];

const RU_FALLBACK: &[&str] = &[
	"Опиши цель, ограничения и нужный формат ответа.",
	"Могу дать план, объяснение или код. Скажи, какой результат нужен.",
	"Дай немного контекста, и я отвечу точно и структурно.",
];

/// Fixed answer to "who created you" questions.
pub fn identity_reply(lang: Lang) -> String {
	match lang {
		Lang::Ru => "Меня создала команда OpVenTech.".to_owned(),
		Lang::En => "I was created by the OpVenTech team.".to_owned(),
	}
}

/// Renders the reply of the last stage of the chain.
///
/// Planner, explain, idea and how-to intents get their structured
/// template; anything else gets the hashed fallback reply.
pub fn text_reply(prompt: &str, lang: Lang, intent: Intent) -> String {
	match intent {
		Intent::Planner => planner_reply(prompt, lang),
		Intent::Explain => explain_reply(prompt, lang),
		Intent::Idea => idea_reply(prompt, lang),
		Intent::HowTo => how_to_reply(prompt, lang),
		Intent::Creator | Intent::Code(_) | Intent::None => fallback_reply(prompt, lang),
	}
}

/// Intro, snippet and outro separated by blank lines.
pub fn code_reply(lang: Lang, code_lang: CodeLang) -> String {
	let (intro, outro) = match lang {
		Lang::Ru => (
			"Вот минимальная заготовка кода:",
			"Если нужна конкретика по задаче, скажи условия.",
		),
		Lang::En => ("Here is a minimal code starter:", "If you share requirements, I can tailor it."),
	};
	[intro, code_block(code_lang), outro].join("\n\n")
}

fn code_block(code_lang: CodeLang) -> &'static str {
	match code_lang {
		CodeLang::CSharp => concat!(
			"using System;\n",
			"using System.Net.Http;\n",
			"using System.Threading.Tasks;\n",
			"\n",
			"class Program\n",
			"{\n",
			"    static async Task Main()\n",
			"    {\n",
			"        using var http = new HttpClient();\n",
			"        var res = await http.GetAsync(\"https://example.com/api\");\n",
			"        var body = await res.Content.ReadAsStringAsync();\n",
			"        Console.WriteLine(body);\n",
			"    }\n",
			"}",
		),
		CodeLang::Python => concat!(
			"import requests\n",
			"\n",
			"def fetch_json(url: str) -> dict:\n",
			"    res = requests.get(url, timeout=10)\n",
			"    res.raise_for_status()\n",
			"    return res.json()\n",
			"\n",
			"print(fetch_json(\"https://example.com/api\"))",
		),
	}
}

/// Day timetable when the prompt names at least two times, weekly plan
/// otherwise.
pub fn planner_reply(prompt: &str, lang: Lang) -> String {
	let times = extract_times(prompt);
	if let [wake, .., sleep] = times.as_slice() {
		return day_plan(wake, sleep, lang);
	}

	let lines: &[&str] = match lang {
		Lang::Ru => &[
			"Простой план на неделю:",
			"- Пн: главная цель + 1–2 ключевые задачи.",
			"- Вт: продвижение по проекту, рутина.",
			"- Ср: глубокая работа (2 блока).",
			"- Чт: довести начатое, мелочи.",
			"- Пт: итоги недели, план на следующую.",
			"Скажи цель и сколько времени в день доступно.",
		],
		Lang::En => &[
			"Here is a simple weekly plan:",
			"- Mon: define the main goal and 1-2 key tasks.",
			"- Tue: progress on the core tasks.",
			"- Wed: deep work block (2 focus sessions).",
			"- Thu: finish open items and admin tasks.",
			"- Fri: review and plan next week.",
			"Tell me your available hours and priorities to customize it.",
		],
	};
	lines.join("\n")
}

fn day_plan(wake: &str, sleep: &str, lang: Lang) -> String {
	match lang {
		Lang::Ru => [
			format!("Вот простой дневной план от {wake} до {sleep}:"),
			format!("- {wake} – подъем, вода, легкая разминка."),
			"- 08:00 – главная задача дня (1 блок).".to_owned(),
			"- 10:30 – перерыв 10–15 мин.".to_owned(),
			"- 10:45 – второй блок (2 часа).".to_owned(),
			"- 13:00 – обед + прогулка.".to_owned(),
			"- 14:30 – легкие задачи / рутина.".to_owned(),
			"- 18:00 – спорт / отдых.".to_owned(),
			"- 21:30 – разгрузка, без экранов.".to_owned(),
			format!("- {sleep} – сон."),
			"Если нужен недельный план, скажи цели и занятость.".to_owned(),
		]
		.join("\n"),
		Lang::En => [
			format!("Here is a simple day plan from {wake} to {sleep}:"),
			format!("- {wake} – wake up, water, light stretching."),
			"- 08:00 – the main task of the day (1 block).".to_owned(),
			"- 10:30 – 10-15 min break.".to_owned(),
			"- 10:45 – second block (2 hours).".to_owned(),
			"- 13:00 – lunch + a walk.".to_owned(),
			"- 14:30 – light tasks / routine.".to_owned(),
			"- 18:00 – sport / rest.".to_owned(),
			"- 21:30 – wind down, no screens.".to_owned(),
			format!("- {sleep} – sleep."),
			"If you need a weekly plan, tell me your goals and workload.".to_owned(),
		]
		.join("\n"),
	}
}

/// Definition / key points / example skeleton around the prompt topic.
pub fn explain_reply(prompt: &str, lang: Lang) -> String {
	let topic = extract_topic(prompt, lang);
	match lang {
		Lang::Ru => [
			format!("Кратко о теме: {}.", or_default(&topic, "это")),
			"Определение: что это такое и зачем нужно.".to_owned(),
			"Ключевые идеи: 3–4 пункта по сути.".to_owned(),
			"Пример: короткий кейс из жизни.".to_owned(),
			"Хочешь подробнее или с примером кода?".to_owned(),
		]
		.join("\n"),
		Lang::En => [
			format!("Quick explanation of {}:", or_default(&topic, "the topic")),
			"Definition: what it is and why it matters.".to_owned(),
			"Key points: 3-4 essential ideas.".to_owned(),
			"Example: a short real-world case.".to_owned(),
			"Want a deeper dive or a code example?".to_owned(),
		]
		.join("\n"),
	}
}

/// Numbered list of five ideas around the prompt topic.
pub fn idea_reply(prompt: &str, lang: Lang) -> String {
	let topic = extract_topic(prompt, lang);
	let header = match lang {
		Lang::Ru => format!("Вот 5 идей по теме: {}", or_default(&topic, "твой запрос")),
		Lang::En => format!("Here are 5 ideas for: {}", or_default(&topic, "your request")),
	};
	let items: &[&str] = match lang {
		Lang::Ru => &[
			"Легкий MVP с одной главной функцией.",
			"Автоматизация рутины через шаблоны и пресеты.",
			"Фокус на одну аудиторию и боль.",
			"Чеклист + отчет в один клик.",
			"Игровой механизм для вовлечения.",
		],
		Lang::En => &[
			"A lightweight MVP with one core feature.",
			"Automate the routine with templates and presets.",
			"Focus on a single audience and pain point.",
			"Checklist + one-click report.",
			"Gamified flow to boost engagement.",
		],
	};

	let mut lines = vec![header];
	lines.extend(items.iter().enumerate().map(|(i, item)| format!("{}. {item}", i + 1)));
	lines.join("\n")
}

/// Five numbered steps around the prompt topic.
pub fn how_to_reply(prompt: &str, lang: Lang) -> String {
	let topic = extract_topic(prompt, lang);
	match lang {
		Lang::Ru => [
			format!("Пошагово по теме: {}", or_default(&topic, "задача")),
			"1. Определи цель и критерии успеха.".to_owned(),
			"2. Разбей задачу на 3–5 шагов.".to_owned(),
			"3. Отметь ограничения и риски.".to_owned(),
			"4. Сделай минимальный вариант и проверь.".to_owned(),
			"5. Доведи до результата и зафиксируй шаблон.".to_owned(),
			"Скажи ограничения, и я адаптирую шаги.".to_owned(),
		]
		.join("\n"),
		Lang::En => [
			format!("Step-by-step for: {}", or_default(&topic, "your task")),
			"1. Define the goal and success criteria.".to_owned(),
			"2. Break it into 3-5 steps.".to_owned(),
			"3. Note constraints and risks.".to_owned(),
			"4. Build a minimal version and validate.".to_owned(),
			"5. Iterate and document a repeatable flow.".to_owned(),
			"Share constraints and I will tailor the steps.".to_owned(),
		]
		.join("\n"),
	}
}

/// Picks a reply from the fixed pool of `lang`, keyed by the prompt hash.
///
/// The same prompt always gets the same reply.
pub fn fallback_reply(prompt: &str, lang: Lang) -> String {
	let pool = match lang {
		Lang::Ru => RU_FALLBACK,
		Lang::En => EN_FALLBACK,
	};
	pool[seeded_index(prompt, pool.len())].to_owned()
}

/// Index in `0..len` derived from `prompt_hash`. `len` must be non-zero.
pub fn seeded_index(seed: &str, len: usize) -> usize {
	prompt_hash(seed).unsigned_abs() as usize % len
}

/// Rolling hash `hash * 31 + unit` over UTF-16 code units, wrapping at
/// 32 bits.
pub fn prompt_hash(value: &str) -> i32 {
	value
		.encode_utf16()
		.fold(0_i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Extracts `HH:MM` / `HH.MM` times in order of appearance.
pub fn extract_times(text: &str) -> Vec<String> {
	TIME_REGEX.find_iter(text).map(|m| m.as_str().to_owned()).collect()
}

/// First six meaningful words of the prompt (longer than two characters,
/// not a stop-word), joined by spaces. May be empty.
pub fn extract_topic(text: &str, lang: Lang) -> String {
	let stopwords: HashSet<&str> = match lang {
		Lang::Ru => RU_STOPWORDS.iter().copied().collect(),
		Lang::En => EN_STOPWORDS.iter().copied().collect(),
	};
	tokenize(text)
		.into_iter()
		.filter(|token| token.chars().count() > 2 && !stopwords.contains(token.as_str()))
		.take(TOPIC_WORDS)
		.collect::<Vec<_>>()
		.join(" ")
}

fn or_default<'a>(topic: &'a str, default: &'a str) -> &'a str {
	if topic.is_empty() { default } else { topic }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_matches_rolling_definition() {
		assert_eq!(prompt_hash(""), 0);
		assert_eq!(prompt_hash("a"), 97);
		assert_eq!(prompt_hash("hello"), 99_162_322);
		assert_eq!(prompt_hash("hello world"), 1_794_106_052);
	}

	#[test]
	fn seeded_index_handles_minimum_hash() {
		assert_eq!(prompt_hash("polygenelubricants"), i32::MIN);
		assert_eq!(seeded_index("polygenelubricants", 3), 2);
		assert_eq!(seeded_index("", 3), 0);
	}

	#[test]
	fn fallback_is_stable_per_prompt() {
		let prompt = "Nice weather we are having";
		let first = fallback_reply(prompt, Lang::En);
		for _ in 0..10 {
			assert_eq!(fallback_reply(prompt, Lang::En), first);
		}
		assert!(EN_FALLBACK.contains(&first.as_str()));
		assert!(RU_FALLBACK.contains(&fallback_reply("Хорошая погода", Lang::Ru).as_str()));
	}

	#[test]
	fn fallback_spreads_over_the_pool() {
		let picked: HashSet<String> = (0..30).map(|i| fallback_reply(&format!("prompt {i}"), Lang::En)).collect();
		assert_eq!(picked.len(), EN_FALLBACK.len());
	}

	#[test]
	fn times_are_extracted_in_order() {
		assert_eq!(extract_times("wake at 6:30, sleep at 23.15"), vec!["6:30", "23.15"]);
		assert!(extract_times("at 25:00 or 7:61").is_empty());
	}

	#[test]
	fn time_boundaries_are_ascii() {
		// Cyrillic letters are not word characters for the boundary
		assert_eq!(extract_times("подъем в7:00, сон в23:30"), vec!["7:00", "23:30"]);
		// Only ASCII digits form a time
		assert!(extract_times("٠٧:٣٠").is_empty());
		assert!(extract_times("a7:00").is_empty());
	}

	#[test]
	fn planner_builds_timetable_from_first_and_last_time() {
		let reply = planner_reply("plan my day: 06:30, 12:00 and 22:45", Lang::En);
		assert!(reply.starts_with("Here is a simple day plan from 06:30 to 22:45:"));
		assert!(reply.contains("- 22:45 – sleep."));

		let reply = planner_reply("план на день с 7:00 до 23:00", Lang::Ru);
		assert!(reply.starts_with("Вот простой дневной план от 7:00 до 23:00:"));
	}

	#[test]
	fn planner_without_times_is_weekly() {
		assert!(planner_reply("plan my week", Lang::En).starts_with("Here is a simple weekly plan:"));
		assert!(planner_reply("план в 9:00", Lang::Ru).starts_with("Простой план на неделю:"));
	}

	#[test]
	fn topic_drops_short_and_stop_words() {
		assert_eq!(extract_topic("Explain how the borrow checker works in Rust", Lang::En), "borrow checker works rust");
		assert_eq!(extract_topic("объясни что такое замыкание", Lang::Ru), "такое замыкание");
		assert_eq!(
			extract_topic("one two three four five six seven eight", Lang::En),
			"one two three four five six"
		);
		assert_eq!(extract_topic("how to do it", Lang::En), "");
	}

	#[test]
	fn empty_topic_uses_generic_phrase() {
		assert!(explain_reply("explain", Lang::En).starts_with("Quick explanation of the topic:"));
		assert!(how_to_reply("how to", Lang::En).starts_with("Step-by-step for: your task"));
		assert!(idea_reply("идеи", Lang::Ru).starts_with("Вот 5 идей по теме: твой запрос"));
	}

	#[test]
	fn idea_reply_numbers_items() {
		let reply = idea_reply("ideas for a coffee shop", Lang::En);
		let lines: Vec<&str> = reply.lines().collect();
		assert_eq!(lines[0], "Here are 5 ideas for: for coffee shop");
		assert_eq!(lines.len(), 6);
		assert!(lines[5].starts_with("5. "));
	}

	#[test]
	fn code_reply_wraps_snippet() {
		let reply = code_reply(Lang::En, CodeLang::Python);
		assert!(reply.starts_with("Here is a minimal code starter:\n\nimport requests"));
		assert!(reply.ends_with("\n\nIf you share requirements, I can tailor it."));

		let reply = code_reply(Lang::Ru, CodeLang::CSharp);
		assert!(reply.contains("class Program"));
		assert!(reply.starts_with("Вот минимальная заготовка кода:"));
	}

	#[test]
	fn text_reply_routes_by_intent() {
		assert!(text_reply("how to cook", Lang::En, Intent::HowTo).starts_with("Step-by-step for: cook"));
		assert!(EN_FALLBACK.contains(&text_reply("hmm", Lang::En, Intent::None).as_str()));
	}
}
