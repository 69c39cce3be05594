use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use wordsift::analyzer;

#[derive(Parser, Debug)]
#[command(name = "wordsift")]
#[command(about = "Count bounded occurrences of a word per sentence in a text file")]
#[command(version)]
struct Args {
    /// Text file to analyze
    source: PathBuf,

    /// Word to count (matched literally, case-insensitive)
    word: String,

    /// Stats output file path (JSON); no stats are written when omitted
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).json().init();

    let args = Args::parse();

    info!("Starting wordsift");
    info!(?args, "Parsed CLI arguments");

    // Validate the source early to fail with a clear error.
    if !args.source.exists() {
        anyhow::bail!("Source file does not exist: {}", args.source.display());
    }
    if !args.source.is_file() {
        anyhow::bail!("Source path is not a file: {}", args.source.display());
    }

    let started = std::time::Instant::now();
    let analysis = analyzer::analyze_file(&args.source, &args.word).await?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    print!("{}", analysis.render_report());

    info!(
        "Analysis completed: {} sentence(s) scanned, {} matched, {} occurrence(s) in {}ms",
        analysis.sentences_seen,
        analysis.entries.len(),
        analysis.total,
        elapsed_ms
    );

    if let Some(stats_path) = args.stats_out {
        let stats = analyzer::RunStats::from_analysis(&analysis, elapsed_ms);
        let json = serde_json::to_string_pretty(&stats)?;
        tokio::fs::write(&stats_path, json).await?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    Ok(())
}
