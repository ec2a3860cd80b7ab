//! Headless bot simulation
//!
//! Run with: cargo run -p steer_sim
//!   config: STEER_SIM_CONFIG=path/to/sim.toml (or ./steer_sim.toml)
//!   logs:   RUST_LOG=debug for every transition

use steer_sim::{SimConfig, Simulation};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match SimConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    config.print_summary();

    let mut simulation = match Simulation::from_config(&config) {
        Ok(simulation) => simulation,
        Err(e) => {
            log::error!("Failed to start simulation: {}", e);
            std::process::exit(1);
        }
    };

    let summary = simulation.run(config.sim.ticks);
    log::info!("Markers applied: {}", simulation.markers().changes());
    print!("{}", summary);
}
