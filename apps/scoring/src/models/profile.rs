use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;

/// Keyword signals pulled out of one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    /// Canonical skill terms, deduplicated, in lexicon order.
    pub skills: Vec<String>,
    pub education_signals: Vec<String>,
    pub experience_signals: Vec<String>,
}

impl ExtractedProfile {
    /// Skills compare by normalized form, so `NodeJS` matches `node.js`.
    pub fn has_skill(&self, skill: &str) -> bool {
        let needle = normalize(skill);
        !needle.is_empty() && self.skills.iter().any(|s| normalize(s) == needle)
    }
}
