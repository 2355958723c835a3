use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hrms_scoring::{
    extract_text, AnalysisReport, ApplicationStatus, Config, JobPosting, ResumeDocument,
    ScoringEngine, SemanticScorer,
};

#[derive(Parser)]
#[command(name = "hrms-score", version)]
#[command(about = "Score a résumé against a job description", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and print the report as JSON
    Score {
        /// Résumé file (.pdf, .docx or plain text)
        #[arg(short, long)]
        resume: PathBuf,
        /// File holding the job description
        #[arg(short, long)]
        job: PathBuf,
        /// Skills declared on the posting, comma separated
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,
        /// MIME type to use when the résumé has no recognised extension
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print the text extracted from a résumé
    Extract {
        #[arg(short, long)]
        resume: PathBuf,
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print the validated scoring configuration
    Config,
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    status: ApplicationStatus,
    reviewer_notes: &'static [&'static str],
    report: &'a AnalysisReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on an invalid lexicon, weights or thresholds)
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "hrms_scoring={level},hrms_score={level}",
                level = config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting hrms-score v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Score {
            resume,
            job,
            skills,
            content_type,
        } => {
            let bytes = read_resume(&resume)?;
            let description = fs::read_to_string(&job)
                .with_context(|| format!("Failed to read job description '{}'", job.display()))?;
            let posting = JobPosting::new(description).with_required_skills(
                skills
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );

            // Model is loaded once here and injected into the engine
            let semantic = SemanticScorer::load(
                &config.scoring.embedding_model_name,
                config.embedding_cache_dir.as_deref(),
            );
            let engine = ScoringEngine::new(config.scoring.clone(), semantic)
                .context("Invalid scoring configuration")?;

            let filename = file_name(&resume);
            let mut document = ResumeDocument::new(&bytes, &filename);
            if let Some(ct) = content_type.as_deref() {
                document = document.with_content_type(ct);
            }

            let report = engine.analyze(&document, &posting);
            let status = engine.classify(report.compatibility.overall_score);
            info!(
                "Scored '{}': {} ({status})",
                filename, report.compatibility.overall_score
            );

            let output = ScoreOutput {
                status,
                reviewer_notes: status.reviewer_notes(),
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Extract {
            resume,
            content_type,
        } => {
            let bytes = read_resume(&resume)?;
            let filename = file_name(&resume);
            let mut document = ResumeDocument::new(&bytes, &filename);
            if let Some(ct) = content_type.as_deref() {
                document = document.with_content_type(ct);
            }
            println!("{}", extract_text(&document));
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.scoring)?);
        }
    }

    Ok(())
}

fn read_resume(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read résumé '{}'", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
