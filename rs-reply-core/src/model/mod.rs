//! Runtime artifacts consumed by the reply engine.
//!
//! Both artifacts are produced offline and are read-only at runtime:
//! - Order-2 token Markov model (`MarkovModel`)
//! - Knowledge corpus of raw sentences (`Knowledge`)
//! - A per-engine lazy cache for both (`ArtifactStore`)

use serde::{Deserialize, Serialize};

use crate::text::Lang;

/// Order-2 Markov model and its generation algorithm.
pub mod markov;

/// Knowledge corpus and nearest-sentence retrieval.
pub mod knowledge;

/// Load-once cache of the artifacts.
pub mod store;

/// Language scope of an artifact.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactLang {
	Ru,
	En,
	Any,
}

impl ArtifactLang {
	/// Returns `true` if an artifact with this scope may answer in `lang`.
	pub fn accepts(self, lang: Lang) -> bool {
		match self {
			ArtifactLang::Any => true,
			ArtifactLang::Ru => lang == Lang::Ru,
			ArtifactLang::En => lang == Lang::En,
		}
	}
}
