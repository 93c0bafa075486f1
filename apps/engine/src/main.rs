mod config;
mod dictionaries;
mod embedding;
mod errors;
mod jd;
mod normalize;
mod parser;
mod recommend;
mod scoring;
mod text_source;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::Embedder;
use crate::recommend::RoleRecommender;
use crate::scoring::ResumeScorer;
use crate::text_source::{PlainTextSource, TextSource};

#[derive(Parser)]
#[command(name = "resumatch", about = "Resume / job-description relevance engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a resume into structured JSON.
    Parse {
        #[arg(long)]
        resume: PathBuf,
    },
    /// Score a resume against a job description.
    Score {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        jd: PathBuf,
    },
    /// Recommend roles for a resume.
    Recommend {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long, default_value_t = 3)]
        top_k: usize,
    },
}

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumatch v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let source = PlainTextSource;
    // The embedding provider lives here: constructed once, shared by the
    // scorer and the recommender.
    let embedder = build_embedder();

    match cli.command {
        Command::Parse { resume } => {
            let parsed = parser::parse_text(&read(&source, &resume)?);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Score { resume, jd } => {
            let parsed = parser::parse_text(&read(&source, &resume)?);
            let jd_set = jd::parse_jd(&read(&source, &jd)?);
            let scorer = ResumeScorer::new(config.scoring(), embedder);
            let result = scorer.score(&parsed.skills, &jd_set, &parsed.sentences);
            let output = serde_json::json!({
                "score_details": result,
                "resume_data": parsed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Recommend { resume, top_k } => {
            let text = read(&source, &resume)?;
            let recommender = RoleRecommender::new(embedder);
            let roles = recommender.recommend(&text, top_k);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "recommended_roles": roles }))?
            );
        }
    }

    Ok(())
}

fn read(source: &dyn TextSource, path: &Path) -> Result<String> {
    Ok(source.extract_text(path)?)
}

#[cfg(feature = "model")]
fn build_embedder() -> Option<Arc<dyn Embedder>> {
    Some(Arc::new(embedding::minilm::MiniLmEmbedder::new()))
}

#[cfg(not(feature = "model"))]
fn build_embedder() -> Option<Arc<dyn Embedder>> {
    tracing::warn!("built without the 'model' feature; semantic matching degrades to exact/textual");
    None
}
