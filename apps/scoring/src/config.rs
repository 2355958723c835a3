use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::compatibility::ScoreWeights;
use crate::analysis::keywords::{KeywordExtractor, KeywordLexicon};
use crate::analysis::status::StatusThresholds;
use crate::errors::ConfigError;

pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Everything that shapes a score. Validated once at startup and then fixed
/// for the lifetime of the engine.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringConfig {
    pub embedding_model_name: String,
    pub lexicon: KeywordLexicon,
    pub weights: ScoreWeights,
    pub thresholds: StatusThresholds,
}

impl ScoringConfig {
    /// Built-in lexicon, default model, `(0.4, 0.4, 0.2)` weights and `80/60`
    /// thresholds.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            embedding_model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            lexicon: KeywordLexicon::builtin()?,
            weights: ScoreWeights::default(),
            thresholds: StatusThresholds::default(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedding_model_name.trim().is_empty() {
            return Err(ConfigError::MissingModelName);
        }
        self.weights.validate()?;
        self.thresholds.validate()?;
        KeywordExtractor::new(&self.lexicon)?;
        Ok(())
    }
}

/// Process configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub embedding_cache_dir: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lexicon = match lookup("KEYWORD_LEXICON_PATH") {
            Some(path) => KeywordLexicon::from_path(Path::new(&path)).with_context(|| {
                format!("KEYWORD_LEXICON_PATH '{path}' is not a valid lexicon")
            })?,
            None => KeywordLexicon::builtin().context("Built-in keyword lexicon is invalid")?,
        };

        let weights = match lookup("SCORE_WEIGHTS") {
            Some(raw) => parse_weights(&raw)
                .context("SCORE_WEIGHTS must be 'semantic,skills,experience'")?,
            None => ScoreWeights::default(),
        };

        let thresholds = match lookup("STATUS_THRESHOLDS") {
            Some(raw) => {
                parse_thresholds(&raw).context("STATUS_THRESHOLDS must be 'shortlist,review'")?
            }
            None => StatusThresholds::default(),
        };

        let scoring = ScoringConfig {
            embedding_model_name: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            lexicon,
            weights,
            thresholds,
        };
        scoring.validate().context("Invalid scoring configuration")?;

        Ok(Config {
            scoring,
            embedding_cache_dir: lookup("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_floats<const N: usize>(raw: &str) -> Result<[f64; N]> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    values
        .try_into()
        .map_err(|values: Vec<f64>| anyhow::anyhow!("expected {N} values, got {}", values.len()))
}

fn parse_weights(raw: &str) -> Result<ScoreWeights> {
    let [semantic, skills, experience] = parse_floats::<3>(raw)?;
    Ok(ScoreWeights {
        semantic,
        skills,
        experience,
    })
}

fn parse_thresholds(raw: &str) -> Result<StatusThresholds> {
    let [shortlist, review] = parse_floats::<2>(raw)?;
    Ok(StatusThresholds { shortlist, review })
}
