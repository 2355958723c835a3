//! Résumé-to-job compatibility scoring for the HRMS applicant tracker.
//!
//! The crate is a synchronous library: hand a [`ScoringEngine`] an uploaded
//! résumé and a [`JobPosting`] and it returns an [`AnalysisReport`]. Storage,
//! transport and the task queue that calls it belong to the host application.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;

pub use analysis::extractor::extract_text;
pub use analysis::pipeline::ScoringEngine;
pub use analysis::semantic::{Embedder, FastEmbedder, SemanticScorer};
pub use analysis::status::{ApplicationStatus, StatusThresholds};
pub use config::{Config, ScoringConfig};
pub use errors::{ConfigError, IssueCode, ScoringError, ScoringIssue};
pub use models::compatibility::{AnalysisReport, CompatibilityResult};
pub use models::document::ResumeDocument;
pub use models::job::JobPosting;
pub use models::profile::ExtractedProfile;
