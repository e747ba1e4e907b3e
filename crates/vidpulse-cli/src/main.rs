use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use vidpulse_core::RetryPolicy;
use vidpulse_nlp::AnalysisPipeline;
use vidpulse_youtube::YouTubeClient;

#[derive(Debug, Parser)]
#[command(name = "vidpulse-cli")]
#[command(about = "VidPulse command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a video's comments and print a full analysis report.
    Report {
        /// Video URL (watch, youtu.be, shorts, or embed form).
        #[arg(long)]
        url: String,
        /// Maximum number of comments to fetch.
        #[arg(long)]
        max_comments: Option<usize>,
        /// Also write the analysis to disk in this format.
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,
        /// Directory for exported files.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vidpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report {
            url,
            max_comments,
            export,
            output_dir,
        } => {
            run_report(
                &config,
                &url,
                max_comments.unwrap_or(config.max_comments),
                export,
                output_dir.unwrap_or_else(|| config.export_dir.clone()),
            )
            .await
        }
    }
}

async fn run_report(
    config: &vidpulse_core::AppConfig,
    url: &str,
    max_comments: usize,
    export: Option<ExportFormat>,
    output_dir: PathBuf,
) -> anyhow::Result<()> {
    let video_id = vidpulse_youtube::extract_video_id(url)
        .with_context(|| format!("could not extract a video id from '{url}'"))?;

    let youtube = YouTubeClient::new(
        &config.youtube_api_key,
        config.request_timeout_secs,
        RetryPolicy::new(config.max_retries, config.retry_backoff_base_ms, 2),
    )?;
    let pipeline = AnalysisPipeline::from_config(config)?;

    let (metadata, comments, transcript) = tokio::join!(
        youtube.get_metadata(&video_id),
        youtube.fetch_comments(&video_id, max_comments),
        youtube.fetch_transcript(&video_id),
    );
    let metadata = metadata.context("fetching video metadata")?;
    let comments = comments.context("fetching comments")?;

    tracing::info!(video_id, comments = comments.len(), "running analysis");
    let analysis = pipeline
        .run(
            &comments,
            &transcript,
            metadata.like_count,
            metadata.dislike_count,
        )
        .await?;

    let report = &analysis.report;
    println!("{}", metadata.title);
    println!(
        "{} views, {} likes, {} comments analyzed",
        metadata.view_count,
        metadata.like_count,
        comments.len()
    );
    println!();
    println!("Summary: {}", report.summary);
    println!();
    println!(
        "Sentiment: {:.1}% positive, {:.1}% neutral, {:.1}% negative",
        report.sentiment_summary.positive,
        report.sentiment_summary.neutral,
        report.sentiment_summary.negative
    );

    let buckets = &report.categorized_comments;
    for (title, comments) in [
        ("Most interesting", &buckets.most_interesting),
        ("Hot takes", &buckets.hot_takes),
        ("Questions", &buckets.questions),
    ] {
        if comments.is_empty() {
            continue;
        }
        println!();
        println!("{title}:");
        for comment in comments {
            println!("  - {comment}");
        }
    }

    println!();
    println!("Actionable insights:");
    for insight in &report.actionable_insights {
        println!("  - {insight}");
    }

    if let Some(format) = export {
        let path = match format {
            ExportFormat::Json => vidpulse_export::export_json(&analysis, &output_dir)?,
            ExportFormat::Csv => vidpulse_export::export_csv(&analysis, &output_dir)?,
            ExportFormat::Pdf => vidpulse_export::export_pdf(&analysis, &output_dir)?,
        };
        println!();
        println!("Exported to {}", path.display());
    }

    Ok(())
}
