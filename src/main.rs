use clap::Parser;
use crisiswatch::app;
use crisiswatch::config::catalog::Catalog;
use crisiswatch::core::loader::{self, CancelGuard, LoadSlot, LoadState};
use crisiswatch::core::pipeline::DatasetPipeline;
use crisiswatch::domain::model::{CrisisReport, SeriesSet};
use crisiswatch::domain::ports::{ConfigProvider, RenderSink};
use crisiswatch::utils::{logger, validation::Validate};
use crisiswatch::{adapters, CliConfig, JsonSink};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting crisiswatch");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let catalog = match config.catalog_path() {
        Some(path) => Catalog::from_file(path)?,
        None => app::builtin_catalog(),
    };
    let fetcher = adapters::fetcher_for_root(config.data_root())?;
    let sink = JsonSink::stdout();

    // One independent loader per dataset; a failing source only darkens its
    // own card.
    let mut series_loads: Vec<(String, LoadSlot<SeriesSet>)> = Vec::new();
    let mut handles = Vec::new();

    for spec in catalog.datasets.iter().cloned() {
        let slot: LoadSlot<SeriesSet> = LoadSlot::new();
        let guard = CancelGuard::new();
        let pipeline = DatasetPipeline::new(Arc::clone(&fetcher), spec.clone());
        handles.push(tokio::spawn(loader::drive(
            slot.clone(),
            guard,
            async move { pipeline.run().await },
        )));
        series_loads.push((spec.key, slot));
    }

    let report_slot: LoadSlot<CrisisReport> = LoadSlot::new();
    {
        let fetcher = Arc::clone(&fetcher);
        let resource = catalog.prediction.resource.clone();
        let cutoff = config.ranking_cutoff();
        handles.push(tokio::spawn(loader::drive(
            report_slot.clone(),
            CancelGuard::new(),
            async move { app::prediction::load(fetcher, &resource, cutoff).await },
        )));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!("loader task panicked: {}", e);
        }
    }

    let mut ready = 0usize;
    let mut failed = 0usize;

    for (key, slot) in &series_loads {
        match slot.snapshot() {
            LoadState::Ready(set) => {
                ready += 1;
                sink.chart(key, &set);
            }
            LoadState::Failed(message) => {
                failed += 1;
                tracing::error!("{}: {}", key, message);
            }
            other => tracing::warn!("{}: finished in state {:?}", key, other),
        }
    }

    match report_slot.snapshot() {
        LoadState::Ready(report) => {
            ready += 1;
            sink.report("prediction", &report);
            sink.table("prediction_regions", &report.regional_summary);
        }
        LoadState::Failed(message) => {
            failed += 1;
            tracing::error!("prediction: {}", message);
        }
        other => tracing::warn!("prediction: finished in state {:?}", other),
    }

    // Compiled-in payloads render unconditionally; they have no fetch step.
    sink.chart("crosscutting_gdp", &app::crosscutting::gdp_series());
    sink.chart("food_indices_sample", &app::food::sample_indices());
    sink.chart("finance_inflation_sample", &app::finance::sample_inflation());
    println!(
        "{}",
        serde_json::json!({
            "dataset": "finance_rates_sample",
            "kind": "rows",
            "payload": app::finance::sample_exchange_rates(),
        })
    );

    tracing::info!("{} datasets ready, {} failed", ready, failed);
    if ready == 0 {
        tracing::error!("every dataset failed to load");
        std::process::exit(1);
    }

    Ok(())
}
