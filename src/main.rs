//! Dungeon Legends - headless frame driver
//!
//! Runs the demo scene for a fixed number of frames against the ECS registry.
//! Reaching the frame limit, or an empty world, plays the role of the quit signal.

mod scene;
mod settings;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scene::Scene;
use settings::Settings;

fn main() -> Result<()> {
    // Initialize logging, honouring RUST_LOG when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Dungeon Legends...");

    let settings = Settings::load();
    if !Settings::file_exists() {
        if let Err(e) = settings.save() {
            warn!("Could not write default settings: {}", e);
        }
    }

    let demo = settings.demo.clone();
    let mut scene = Scene::new(demo.clone(), settings.registry.clone());
    scene.populate();

    let mut frames_run = 0;
    for _ in 0..demo.frames {
        let report = scene.step(demo.time_step);
        frames_run = report.frame;
        debug!(
            "Frame {}: moved {}, despawned {}, alive {}",
            report.frame, report.moved, report.despawned, report.alive
        );

        if report.alive == 0 {
            info!("World emptied after {} frames", report.frame);
            break;
        }
    }

    info!(
        "Stopped after {} frames with {} entities alive ({} mounts)",
        frames_run,
        scene.registry().len(),
        scene.mounts().len()
    );
    Ok(())
}
