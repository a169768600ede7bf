use std::env;

use particle_spray::{
    utils::FrameStats, BoundsProbe, ParticleSystem, SimulationConfig, SimulationResult,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEMO_FRAMES: u64 = 600;
const REPORT_INTERVAL: u64 = 60;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        error!("particle spray demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> SimulationResult<()> {
    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::from_toml_file(path)?,
        None => SimulationConfig::default(),
    };
    config.print_info();

    let mut system = ParticleSystem::new(config)?;
    let mut stats = FrameStats::new(REPORT_INTERVAL as usize);
    let mut probe = BoundsProbe::default();

    for frame in 1..=DEMO_FRAMES {
        let report = system.tick();
        system.render(&mut probe)?;
        stats.record(&report);

        if frame % REPORT_INTERVAL == 0 {
            info!(
                frame,
                fps = %format!("{:.1}", stats.fps()),
                compute_us = stats.average_compute().as_micros() as u64,
                respawned = stats.total_respawned(),
                min = ?probe.min,
                max = ?probe.max,
                "frame stats"
            );
        }
    }

    info!(
        frames = stats.total_frames(),
        respawned = stats.total_respawned(),
        emitter = ?system.emitter_position(),
        "demo finished"
    );
    system.release();
    Ok(())
}
