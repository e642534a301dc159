use std::sync::Arc;

use coverage_core::constants::{INPUT_ENV_VAR, OUTPUT_DIR_ENV_VAR};
use coverage_core::{
    classify_content, map_to_schema, profile_structure, render_summary,
    AnalysisResult, AnalysisService, CoreConfig,
};
use coverage_types::Corpus;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Batch entry point for the report coverage analysis.
///
/// Loads the corpus, runs the structural, content and schema stages concurrently on blocking
/// tasks, then writes the JSON analysis and markdown summary and prints the summary.
///
/// # Environment Variables
/// - `COVERAGE_INPUT`: line-delimited JSON source (default: "data/PARROT_v1_0.jsonl")
/// - `COVERAGE_OUTPUT_DIR`: directory for outputs (default: "output")
/// - `RUST_LOG`: log filter, in addition to the default `coverage=info`
///
/// # Returns
/// * `Ok(())` - If the analysis ran and both outputs were written
/// * `Err(anyhow::Error)` - If the source could not be read or an output failed to write
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coverage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::from_env_values(
        std::env::var(INPUT_ENV_VAR).ok(),
        std::env::var(OUTPUT_DIR_ENV_VAR).ok(),
    )?;
    let service = AnalysisService::new(config);
    let source = service.config().input_path().to_path_buf();

    tracing::info!("++ Starting coverage analysis of {}", source.display());

    let loaded = {
        let service = service.clone();
        tokio::task::spawn_blocking(move || service.load()).await??
    };
    if !loaded.diagnostics.is_empty() {
        tracing::warn!("{} source lines were skipped", loaded.diagnostics.len());
    }
    let corpus = Arc::new(loaded.corpus);

    let (structure, content, mapping) = tokio::try_join!(
        spawn_stage(&corpus, profile_structure),
        spawn_stage(&corpus, classify_content),
        spawn_stage(&corpus, map_to_schema),
    )?;

    let result = AnalysisResult::compile(
        source.display().to_string(),
        corpus.len(),
        structure,
        content,
        mapping,
    );

    let written = service.write_outputs(&result);
    match &written.analysis_json {
        Ok(path) => tracing::info!("results saved to: {}", path.display()),
        Err(e) => tracing::error!("failed to write analysis JSON: {}", e),
    }
    match &written.summary_md {
        Ok(path) => tracing::info!("summary saved to: {}", path.display()),
        Err(e) => tracing::error!("failed to write summary: {}", e),
    }

    println!("\n{}", render_summary(&result));

    if !written.all_ok() {
        anyhow::bail!("analysis completed but not every output could be written");
    }

    Ok(())
}

/// Runs one read-only stage over the shared corpus on the blocking pool.
fn spawn_stage<T, F>(corpus: &Arc<Corpus>, stage: F) -> JoinHandle<T>
where
    T: Send + 'static,
    F: FnOnce(&Corpus) -> T + Send + 'static,
{
    let corpus = Arc::clone(corpus);
    tokio::task::spawn_blocking(move || stage(&corpus))
}
