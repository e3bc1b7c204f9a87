//! liftmap - click a body model to find out which muscle you touched
//!
//! Headless driver: loads configuration, region catalog, model and machine
//! directory, replays a scripted click session and writes a JSONL event log.

mod click_script;
mod config;
mod event_log;
mod machines;
mod session;

use anyhow::{Context, Result};
use click_script::{ClickScript, ClickStep};
use config::AdvisorConfig;
use event_log::{EventRecord, JsonlSink};
use liftmap_catalog::{catalog_from_file, RegionCatalog};
use liftmap_scene::{mannequin, scene_from_file, SceneNode};
use machines::MachineDirectory;
use serde_json::json;
use session::AdvisorSession;
use std::{
    env,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{error, info};

const DEFAULT_CLICKS_PATH: &str = "config/clicks.json";

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting liftmap v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let mut config = match &cli.config {
        Some(path) => AdvisorConfig::load_from_path(path),
        None => AdvisorConfig::load(),
    };
    if cli.regions.is_some() {
        config.data.regions = cli.regions.clone();
    }
    if cli.model.is_some() {
        config.model.path = cli.model.clone();
    }
    if cli.machines.is_some() {
        config.data.machines = cli.machines.clone();
    }

    if let Some(path) = &cli.write_config {
        config
            .save_to_path(path)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        info!("Wrote effective configuration to {}", path.display());
        return Ok(());
    }

    let catalog = Arc::new(load_catalog(config.data.regions.as_deref()));
    let machines = match &config.data.machines {
        Some(path) => MachineDirectory::load_lenient(path),
        None => MachineDirectory::default(),
    };
    let model = load_model(config.model.path.as_deref());
    info!(
        regions = catalog.len(),
        machines = machines.count(),
        model_loaded = model.is_some(),
        "Advisor data loaded"
    );

    let clicks_path = cli
        .clicks
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLICKS_PATH));
    let script = ClickScript::from_path(&clicks_path)
        .with_context(|| format!("Failed to load click script {}", clicks_path.display()))?;

    let mut sink = match &cli.events {
        Some(path) => Some(JsonlSink::create(path)?),
        None => None,
    };

    let mut session = AdvisorSession::new(&config, catalog, machines, model);
    let mut record = |kind: &str, payload: serde_json::Value| -> Result<()> {
        match sink.as_mut() {
            Some(sink) => sink.write(&EventRecord::now(kind, payload)),
            None => {
                println!("{}", json!({ "kind": kind, "payload": payload }));
                Ok(())
            }
        }
    };

    if !script.controls_model_load() {
        let event = session.model_ready();
        record(event.kind, event.payload)?;
    }
    for step in script.steps() {
        let event = session.apply(step);
        record(event.kind, event.payload)?;
    }

    let summary = json!({
        "steps": script.steps().len(),
        "clicks": script
            .steps()
            .iter()
            .filter(|step| matches!(step, ClickStep::Click { .. } | ClickStep::ClickPoint { .. }))
            .count(),
        "region": session.state().region().map(|region| region.name.clone()),
        "suggested_machine": session.detail().and_then(|detail| detail.suggested_machine.clone()),
        "highlights": session.scene().overlay_count(),
    });
    record("session_end", summary)?;

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    Ok(())
}

fn load_catalog(path: Option<&Path>) -> RegionCatalog {
    let Some(path) = path else {
        return RegionCatalog::builtin();
    };
    match catalog_from_file(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(
                "Failed to load region catalog {}: {err}. Using built-in regions",
                path.display()
            );
            RegionCatalog::builtin()
        }
    }
}

/// `None` when the configured model cannot be loaded; the session then runs
/// without geometry.
fn load_model(path: Option<&Path>) -> Option<SceneNode> {
    let Some(path) = path else {
        return Some(mannequin());
    };
    match scene_from_file(path) {
        Ok(model) => Some(model),
        Err(err) => {
            error!("Failed to load model {}: {err}", path.display());
            None
        }
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    regions: Option<PathBuf>,
    model: Option<PathBuf>,
    machines: Option<PathBuf>,
    clicks: Option<PathBuf>,
    events: Option<PathBuf>,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I>(mut args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut opts.config,
                "--regions" => &mut opts.regions,
                "--model" => &mut opts.model,
                "--machines" => &mut opts.machines,
                "--clicks" => &mut opts.clicks,
                "--events" => &mut opts.events,
                "--write-config" => &mut opts.write_config,
                other => {
                    tracing::warn!(arg = %other, "Ignoring unknown argument");
                    continue;
                }
            };
            match args.next() {
                Some(path) => *slot = Some(PathBuf::from(path)),
                None => tracing::error!("{arg} requires a file path"),
            }
        }

        opts
    }
}
