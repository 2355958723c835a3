use serde::{Deserialize, Serialize};

use crate::errors::ScoringIssue;
use crate::models::profile::ExtractedProfile;

/// Blended résumé-to-job fit. Every score is a percentage in 0 – 100 rounded
/// to two decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub overall_score: f64,
    pub skills_match: f64,
    pub experience_match: f64,
    pub semantic_similarity: f64,
    /// One suggestion per job skill missing from the résumé.
    pub recommendations: Vec<String>,
}

/// Everything one scoring call produces. The caller persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub compatibility: CompatibilityResult,
    /// Signals extracted from the résumé.
    pub profile: ExtractedProfile,
    pub excerpt: String,
    /// Stages that degraded to zero during this call. Empty on a clean run.
    pub issues: Vec<ScoringIssue>,
}

impl AnalysisReport {
    pub fn is_degraded(&self) -> bool {
        !self.issues.is_empty()
    }
}
