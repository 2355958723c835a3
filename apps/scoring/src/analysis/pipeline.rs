//! Scoring pipeline: extract → normalize → {keywords, semantic} → aggregate.
//!
//! `ScoringEngine` is the only entry point callers need. It never returns an
//! error: a failed stage contributes zero and is reported as a `ScoringIssue`
//! so the caller can still persist a record.

use tracing::{debug, info, warn};

use crate::analysis::compatibility::compute_compatibility;
use crate::analysis::extractor::extract_text;
use crate::analysis::keywords::KeywordExtractor;
use crate::analysis::normalizer::normalize;
use crate::analysis::semantic::SemanticScorer;
use crate::analysis::status::ApplicationStatus;
use crate::config::ScoringConfig;
use crate::errors::{ConfigError, ScoringError, ScoringIssue};
use crate::models::compatibility::AnalysisReport;
use crate::models::document::ResumeDocument;
use crate::models::job::JobPosting;

const EXCERPT_CHARS: usize = 500;

/// Long-lived scorer: the compiled lexicon plus the injected semantic model.
///
/// Read-only after construction, so one engine can be shared behind an `Arc`.
#[derive(Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    keywords: KeywordExtractor,
    semantic: SemanticScorer,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, semantic: SemanticScorer) -> Result<Self, ConfigError> {
        config.validate()?;
        let keywords = KeywordExtractor::new(&config.lexicon)?;

        info!(
            "Scoring engine ready (lexicon v{}, {} skills, weights {:?}, semantic model {})",
            config.lexicon.version,
            keywords.lexicon_len(),
            config.weights,
            if semantic.is_available() { "loaded" } else { "unavailable" }
        );

        Ok(Self {
            config,
            keywords,
            semantic,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Full pipeline over an uploaded résumé.
    pub fn analyze(&self, document: &ResumeDocument<'_>, job: &JobPosting) -> AnalysisReport {
        let text = extract_text(document);

        let mut issues = Vec::new();
        if text.trim().is_empty() {
            let error = ScoringError::DocumentUnreadable(document.filename.to_string());
            warn!("{error}");
            issues.push(ScoringIssue::from(&error));
        }

        self.score_with_issues(&text, job, issues)
    }

    /// Second half of the two-stage variant: score text the caller already
    /// extracted with [`extract_text`].
    pub fn score_text(&self, resume_text: &str, job: &JobPosting) -> AnalysisReport {
        self.score_with_issues(resume_text, job, Vec::new())
    }

    /// Status bucket for an overall score under the configured thresholds.
    pub fn classify(&self, overall_score: f64) -> ApplicationStatus {
        self.config.thresholds.classify(overall_score)
    }

    fn score_with_issues(
        &self,
        resume_text: &str,
        job: &JobPosting,
        mut issues: Vec<ScoringIssue>,
    ) -> AnalysisReport {
        let resume_clean = normalize(resume_text);
        let job_clean = normalize(&job.description);

        let similarity = match self.semantic.similarity(&resume_clean, &job_clean) {
            Ok(similarity) => similarity,
            Err(error) => {
                warn!("Semantic similarity degraded to 0: {error}");
                issues.push(ScoringIssue::from(&error));
                0.0
            }
        };

        let resume_profile = self
            .keywords
            .extract_with_terms(resume_text, &job.required_skills);
        let job_profile = self.keywords.job_profile(job);

        let compatibility = compute_compatibility(
            &resume_profile,
            &job_profile,
            similarity,
            &self.config.weights,
        );

        debug!(
            "Scored résumé: overall={} skills={} experience={} semantic={} issues={}",
            compatibility.overall_score,
            compatibility.skills_match,
            compatibility.experience_match,
            compatibility.semantic_similarity,
            issues.len()
        );

        AnalysisReport {
            compatibility,
            profile: resume_profile,
            excerpt: excerpt(resume_text),
            issues,
        }
    }
}

/// First `EXCERPT_CHARS` characters of the trimmed text, with `...` appended
/// when something was cut.
fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::keywords::{EDUCATION_MARKER, EXPERIENCE_MARKER};
    use crate::analysis::testing::BagOfWordsEmbedder;
    use crate::errors::IssueCode;

    fn engine_with(config: ScoringConfig) -> ScoringEngine {
        let semantic = SemanticScorer::new(Arc::new(BagOfWordsEmbedder::default()));
        ScoringEngine::new(config, semantic).unwrap()
    }

    fn engine() -> ScoringEngine {
        engine_with(ScoringConfig::builtin().unwrap())
    }

    const RESUME: &str = "Experienced Python developer, 5 years, Django and Docker";
    const JOB: &str = "Looking for Python and Docker engineer";

    #[test]
    fn test_python_docker_scenario() {
        let report = engine().score_text(RESUME, &JobPosting::new(JOB));
        let c = &report.compatibility;

        assert_eq!(c.skills_match, 100.0);
        assert!(c.experience_match > 0.0, "experience was {}", c.experience_match);
        assert!(c.semantic_similarity > 0.0);
        assert!(c.overall_score > 50.0, "overall was {}", c.overall_score);
        assert!(c.recommendations.is_empty());
        assert_eq!(report.profile.skills, vec!["python", "django", "docker"]);
        assert_eq!(report.profile.experience_signals, vec![EXPERIENCE_MARKER]);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_empty_resume_scores_zero_without_failing() {
        let report = engine().score_text("", &JobPosting::new(JOB));
        let c = &report.compatibility;

        assert_eq!(c.skills_match, 0.0);
        assert_eq!(c.semantic_similarity, 0.0);
        assert_eq!(c.overall_score, 0.0);
        assert_eq!(c.recommendations.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].code, IssueCode::EmptyInput);
    }

    #[test]
    fn test_empty_lexicon_drops_skill_term() {
        let mut config = ScoringConfig::builtin().unwrap();
        config.lexicon.skills.clear();
        let report = engine_with(config).score_text(RESUME, &JobPosting::new(JOB));
        let c = &report.compatibility;

        assert_eq!(c.skills_match, 0.0);
        assert!(c.recommendations.is_empty());
        // 0.4 * semantic + 0.2 * 0.5
        let expected = 0.4 * c.semantic_similarity + 0.2 * c.experience_match;
        assert!((c.overall_score - expected).abs() < 0.02, "{} vs {expected}", c.overall_score);
        assert!(c.overall_score > 0.0);
    }

    #[test]
    fn test_unavailable_model_degrades_semantic_only() {
        let engine = ScoringEngine::new(
            ScoringConfig::builtin().unwrap(),
            SemanticScorer::unavailable("no network"),
        )
        .unwrap();
        let report = engine.score_text(RESUME, &JobPosting::new(JOB));
        let c = &report.compatibility;

        assert_eq!(c.semantic_similarity, 0.0);
        assert_eq!(c.skills_match, 100.0);
        // 0.4 * 1.0 + 0.2 * 0.5
        assert_eq!(c.overall_score, 50.0);
        assert_eq!(report.issues[0].code, IssueCode::ModelUnavailable);
        assert!(report.is_degraded());
    }

    #[test]
    fn test_declared_skills_produce_recommendations() {
        let job = JobPosting::new(JOB).with_required_skills(["Kafka"]);
        let report = engine().score_text(RESUME, &job);
        let c = &report.compatibility;

        assert!((c.skills_match - 66.67).abs() < 0.001);
        assert_eq!(c.recommendations.len(), 1);
        assert!(c.recommendations[0].contains("'kafka'"));
    }

    #[test]
    fn test_declared_alias_of_lexicon_skill_counts_as_match() {
        let job = JobPosting::new("Backend role").with_required_skills(["NodeJS"]);
        let report = engine().score_text("Built services in Node.js", &job);
        let c = &report.compatibility;

        assert_eq!(report.profile.skills, vec!["node.js"]);
        assert_eq!(c.skills_match, 100.0);
        assert!(c.recommendations.is_empty());
    }

    #[test]
    fn test_experience_glued_to_punctuation_is_detected() {
        let report = engine().score_text("Python developer,5 years", &JobPosting::new("python"));
        assert_eq!(report.profile.experience_signals, vec![EXPERIENCE_MARKER]);
        assert_eq!(report.compatibility.experience_match, 50.0);
    }

    #[test]
    fn test_analyze_plain_text_document() {
        let document = ResumeDocument::new(RESUME.as_bytes(), "cv.txt");
        let report = engine().analyze(&document, &JobPosting::new(JOB));
        assert!(report.issues.is_empty());
        assert_eq!(report.compatibility.skills_match, 100.0);
        assert_eq!(report.excerpt, RESUME);
    }

    #[test]
    fn test_analyze_unreadable_document_reports_issue() {
        let document = ResumeDocument::new(b"%PDF-garbage", "cv.pdf");
        let report = engine().analyze(&document, &JobPosting::new(JOB));

        assert_eq!(report.compatibility.overall_score, 0.0);
        let codes: Vec<_> = report.issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, vec![IssueCode::DocumentUnreadable, IssueCode::EmptyInput]);
        assert!(report.issues[0].message.contains("cv.pdf"));
    }

    #[test]
    fn test_education_signal_is_reported_in_profile() {
        let report = engine().score_text("Master in computer science", &JobPosting::new(JOB));
        assert_eq!(report.profile.education_signals, vec![EDUCATION_MARKER]);
    }

    #[test]
    fn test_classify_uses_configured_thresholds() {
        let mut config = ScoringConfig::builtin().unwrap();
        config.thresholds.shortlist = 90.0;
        let engine = engine_with(config);
        assert_eq!(engine.classify(85.0), ApplicationStatus::Reviewing);
        assert_eq!(engine.classify(90.0), ApplicationStatus::Shortlisted);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = ScoringConfig::builtin().unwrap();
        config.weights.semantic = 0.9;
        let result = ScoringEngine::new(config, SemanticScorer::unavailable("unused"));
        assert!(matches!(result, Err(ConfigError::InvalidWeights(_))));
    }

    #[test]
    fn test_excerpt_truncates_long_text() {
        let long = "é".repeat(EXCERPT_CHARS + 10);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), EXCERPT_CHARS + 3);
        assert_eq!(excerpt("  short  "), "short");
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    engine
                        .score_text(RESUME, &JobPosting::new(JOB))
                        .compatibility
                        .overall_score
                })
            })
            .collect();

        let scores: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }
}
