//! Compatibility aggregator: blends semantic, skill and experience signals into
//! one 0 – 100 score and lists the skill gaps.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::compatibility::CompatibilityResult;
use crate::models::profile::ExtractedProfile;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight triple for the blended score. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic: f64,
    pub skills: f64,
    pub experience: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: 0.4,
            skills: 0.4,
            experience: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Semantic similarity only: `(1.0, 0.0, 0.0)`.
    pub fn semantic_only() -> Self {
        Self {
            semantic: 1.0,
            skills: 0.0,
            experience: 0.0,
        }
    }

    /// Weights must be finite, non-negative and sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [self.semantic, self.skills, self.experience];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must be finite and non-negative, got {all:?}"
            )));
        }
        let sum: f64 = all.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Combines résumé and job signals into a [`CompatibilityResult`].
///
/// `semantic_similarity` is the raw cosine in [-1, 1]; negative values are
/// floored to 0 before weighting.
pub fn compute_compatibility(
    resume: &ExtractedProfile,
    job: &ExtractedProfile,
    semantic_similarity: f32,
    weights: &ScoreWeights,
) -> CompatibilityResult {
    let semantic = (semantic_similarity as f64).clamp(0.0, 1.0);
    let skills = skills_match(resume, job);
    let experience = experience_match(resume);

    let blended =
        semantic * weights.semantic + skills * weights.skills + experience * weights.experience;

    CompatibilityResult {
        overall_score: to_percent(blended),
        skills_match: to_percent(skills),
        experience_match: to_percent(experience),
        semantic_similarity: to_percent(semantic),
        recommendations: build_recommendations(resume, job),
    }
}

/// Share of job skills present in the résumé. 0 when the job lists none.
pub fn skills_match(resume: &ExtractedProfile, job: &ExtractedProfile) -> f64 {
    if job.skills.is_empty() {
        return 0.0;
    }
    let covered = job.skills.iter().filter(|s| resume.has_skill(s)).count();
    covered as f64 / job.skills.len() as f64
}

/// `min(1, signals / 2)` over the résumé's experience signals.
///
/// A job description without an experience mention states no requirement, so
/// only the résumé side can zero this term.
pub fn experience_match(resume: &ExtractedProfile) -> f64 {
    let signals = resume.experience_signals.len();
    if signals == 0 {
        return 0.0;
    }
    (signals as f64 / 2.0).min(1.0)
}

/// One suggestion per job skill the résumé lacks, in job skill order.
fn build_recommendations(resume: &ExtractedProfile, job: &ExtractedProfile) -> Vec<String> {
    job.skills
        .iter()
        .filter(|skill| !resume.has_skill(skill))
        .map(|skill| format!("Add or highlight '{skill}' in the résumé if it is relevant."))
        .collect()
}

/// Fraction → percentage clamped to [0, 100], rounded to 2 decimals.
fn to_percent(fraction: f64) -> f64 {
    let pct = (fraction * 100.0).clamp(0.0, 100.0);
    (pct * 100.0).round() / 100.0
}
