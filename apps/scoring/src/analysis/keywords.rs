//! Keyword extractor: skill lexicon matching plus education/experience signals.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::errors::ConfigError;
use crate::models::job::JobPosting;
use crate::models::profile::ExtractedProfile;

pub const EDUCATION_MARKER: &str = "Education mention detected";
pub const EXPERIENCE_MARKER: &str = "Experience mention detected";

const BUILTIN_LEXICON: &str = include_str!("../../assets/lexicon_v1.json");

/// Versioned keyword asset. Swapping the file changes scoring behaviour without
/// a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordLexicon {
    pub version: String,
    /// Canonical skill terms, in the order recommendations are emitted.
    pub skills: Vec<String>,
    pub education_pattern: String,
    pub experience_pattern: String,
}

impl KeywordLexicon {
    /// The lexicon compiled into the binary (`assets/lexicon_v1.json`).
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(BUILTIN_LEXICON)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::LexiconIo {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, Clone)]
struct Term {
    canonical: String,
    needle: String,
}

impl Term {
    fn new(canonical: &str) -> Option<Self> {
        let needle = normalize(canonical);
        if needle.is_empty() {
            return None;
        }
        Some(Term {
            canonical: canonical.trim().to_lowercase(),
            needle,
        })
    }
}

/// Compiled form of a [`KeywordLexicon`]. Deterministic and side-effect free.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    terms: Vec<Term>,
    education: Regex,
    experience: Regex,
}

impl KeywordExtractor {
    pub fn new(lexicon: &KeywordLexicon) -> Result<Self, ConfigError> {
        let education = compile("education", &lexicon.education_pattern)?;
        let experience = compile("experience", &lexicon.experience_pattern)?;
        let terms = lexicon.skills.iter().filter_map(|s| Term::new(s)).collect();

        Ok(Self {
            terms,
            education,
            experience,
        })
    }

    pub fn extract(&self, text: &str) -> ExtractedProfile {
        self.extract_with_terms(text, &[])
    }

    /// Like [`extract`](Self::extract), with `extra_terms` appended to the
    /// lexicon for this call only.
    ///
    /// Skills are matched against the normalized text. The education and
    /// experience patterns run on the lowercased raw text, where punctuation
    /// still separates tokens (`developer,5 years`).
    pub fn extract_with_terms(&self, text: &str, extra_terms: &[String]) -> ExtractedProfile {
        let raw = text.to_lowercase();
        let text = normalize(&raw);
        let mut profile = ExtractedProfile::default();

        if text.is_empty() {
            return profile;
        }

        let extra: Vec<Term> = extra_terms.iter().filter_map(|s| Term::new(s)).collect();
        let mut seen: Vec<&str> = Vec::new();
        for term in self.terms.iter().chain(extra.iter()) {
            if seen.contains(&term.needle.as_str()) {
                continue;
            }
            if text.contains(&term.needle) {
                seen.push(&term.needle);
                profile.skills.push(term.canonical.clone());
            }
        }

        if self.education.is_match(&raw) {
            profile.education_signals.push(EDUCATION_MARKER.to_string());
        }
        if self.experience.is_match(&raw) {
            profile.experience_signals.push(EXPERIENCE_MARKER.to_string());
        }

        profile
    }

    /// Job-side profile: skills found in the description, followed by every
    /// declared required skill, deduplicated.
    pub fn job_profile(&self, job: &JobPosting) -> ExtractedProfile {
        let mut profile = self.extract_with_terms(&job.description, &job.required_skills);

        for declared in job.required_skills.iter().filter_map(|s| Term::new(s)) {
            let already_listed = profile
                .skills
                .iter()
                .any(|s| normalize(s) == declared.needle);
            if !already_listed {
                profile.skills.push(declared.canonical);
            }
        }

        profile
    }

    pub fn lexicon_len(&self) -> usize {
        self.terms.len()
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern { name, source })
}
