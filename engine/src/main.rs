// signal-screener [config.json] [data_dir]
use engine::config::EngineSettings;
use engine::data::{JsonlAnalysisSink, MarketDataStore};
use engine::services::AnalysisOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "config.json";
const DEFAULT_DATA_DIR: &str = "data";
const ANALYSIS_FILE: &str = "analysis.jsonl";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string()));
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));

    info!("Starting signal screener...");

    let settings = if config_path.exists() {
        EngineSettings::load(&config_path)?
    } else {
        info!(path = %config_path.display(), "No config file, using defaults");
        EngineSettings::default()
    };

    let store = Arc::new(MarketDataStore::from_csv_dir(&data_dir)?);
    let sink = Arc::new(JsonlAnalysisSink::new(data_dir.join(ANALYSIS_FILE))?);
    let orchestrator = AnalysisOrchestrator::new(&settings, store, sink);

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl-C, finishing symbols in flight");
            ctrl_c_token.cancel();
        }
    });

    let ranking = orchestrator.rank_symbols(&cancel).await;
    let candidates = ranking.candidates(settings.screen.min_score, settings.screen.min_volume_ratio);
    info!(ranked = ranking.len(), candidates = candidates.len(), "Screening complete");

    let report = serde_json::json!({
        "ranking": ranking,
        "candidates": candidates,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
