//! `dicty` command-line runner.
//!
//! Starts a fresh arena from flags (or resumes one from a snapshot with
//! `-i`), runs it for `-s` steps and writes a snapshot every `-S` steps
//! to `{output}_{step:04}.{cells,camp,playground}`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dicty_core::ModelParameters;
use dicty_engine::{Arena, ArenaConfig, Simulation, SimulationConfig};
use dicty_snapshot::{Snapshot, SnapshotWriter};

#[derive(Parser)]
#[command(name = "dicty")]
#[command(about = "Simulate cAMP signalling and chemotaxis of Dictyostelium cells")]
struct Cli {
    /// Lattice spacing of the cAMP field
    #[arg(short = 'a', long, default_value_t = 1.0)]
    lattice: f64,

    /// Decay constant of cAMP
    #[arg(short = 'g', long, default_value_t = 0.5)]
    gamma: f64,

    /// Density of cells per agent-lattice site
    #[arg(short = 'r', long, default_value_t = 0.2)]
    rho: f64,

    /// Concentration that excites a dormant cell
    #[arg(short = 'c', long, default_value_t = 20.0)]
    threshold: f64,

    /// cAMP released by an excited cell over its excited period
    #[arg(short = 'd', long, default_value_t = 6000.0)]
    camp: f64,

    /// Time a cell stays excited
    #[arg(short = 't', long, default_value_t = 2.0)]
    tau: f64,

    /// Time a cell stays refractory
    #[arg(short = 'R', long, default_value_t = 20.0)]
    recovery: f64,

    /// Side length of the square arena
    #[arg(short = 'm', long, default_value_t = 10)]
    mesh: u32,

    /// Field steps to run
    #[arg(short = 's', long)]
    steps: u64,

    /// Resume from the snapshot with this prefix
    #[arg(short = 'i', long)]
    import: Option<PathBuf>,

    /// Base path for snapshot files
    #[arg(short = 'o', long)]
    output: String,

    /// Steps between snapshots
    #[arg(short = 'S', long, default_value_t = 10)]
    sampling: u64,

    /// Seed for initial cell placement
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Field steps between cell updates
    #[arg(long, default_value_t = 10)]
    sync_interval: u64,

    /// Output multiplier of the central beacon
    #[arg(long, default_value_t = 10.0)]
    beacon_multiplier: f64,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            output_base: self.output.clone(),
            model: ModelParameters {
                excitation_threshold: self.threshold,
                release_amount: self.camp,
                excited_duration: self.tau,
                refractory_duration: self.recovery,
                lattice_spacing: self.lattice,
                decay_rate: self.gamma,
            },
            width: self.mesh,
            height: self.mesh,
            density: self.rho,
            beacon_multiplier: self.beacon_multiplier,
            sync_interval: self.sync_interval,
            seed: self.seed,
            dt: None,
        }
    }

    fn build_arena(&self) -> Result<Arena> {
        let config = self.arena_config();
        match &self.import {
            Some(prefix) => {
                let mut snapshot = Snapshot::load(prefix)
                    .with_context(|| format!("failed to import {}", prefix.display()))?;
                snapshot.params.output_base = self.output.clone();
                info!(prefix = %prefix.display(), "resuming from snapshot");
                Ok(snapshot.into_arena(config)?)
            }
            None => Arena::new(config).context("invalid arena configuration"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let arena = cli.build_arena()?;
    let mut sim = Simulation::new(
        arena,
        SimulationConfig {
            max_steps: cli.steps,
            sampling: cli.sampling,
        },
    )?;

    info!(
        steps = cli.steps,
        sampling = cli.sampling,
        output = %cli.output,
        "starting run"
    );

    let mut writer = SnapshotWriter::new(&cli.output);
    let summary = sim.run(|step, arena| {
        let paths = writer.write(arena)?;
        let counts = arena.state_counts();
        info!(
            %step,
            dormant = counts.dormant,
            active = counts.active,
            refractory = counts.refractory,
            prefix = %paths.roster.with_extension("").display(),
            "snapshot written"
        );
        Ok::<(), anyhow::Error>(())
    })?;

    let counts = sim.arena().state_counts();
    info!(
        steps = summary.steps,
        snapshots = writer.snapshots_written(),
        syncs = summary.syncs,
        moves = summary.moves_committed,
        occupancy_violations = summary.occupancy_violations,
        dormant = counts.dormant,
        active = counts.active,
        refractory = counts.refractory,
        "run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_and_steps_are_required() {
        assert!(Cli::try_parse_from(["dicty", "-s", "10"]).is_err());
        assert!(Cli::try_parse_from(["dicty", "-o", "run"]).is_err());
    }

    #[test]
    fn defaults_match_model_defaults() {
        let cli = Cli::try_parse_from(["dicty", "-s", "100", "-o", "run"]).unwrap();
        let config = cli.arena_config();
        assert_eq!(config.model, ModelParameters::default());
        assert_eq!(config.width, 10);
        assert_eq!(config.density, 0.2);
        assert_eq!(cli.sampling, 10);
        assert_eq!(config.output_base, "run");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "dicty", "-a", "0.5", "-g", "0.1", "-r", "0.3", "-c", "15", "-d", "5000", "-t", "3",
            "-R", "25", "-m", "20", "-s", "50", "-S", "5", "-o", "out/x",
        ])
        .unwrap();
        let config = cli.arena_config();
        assert_eq!(config.model.lattice_spacing, 0.5);
        assert_eq!(config.model.decay_rate, 0.1);
        assert_eq!(config.model.excitation_threshold, 15.0);
        assert_eq!(config.model.release_amount, 5000.0);
        assert_eq!(config.model.excited_duration, 3.0);
        assert_eq!(config.model.refractory_duration, 25.0);
        assert_eq!(config.density, 0.3);
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 20);
        assert_eq!(cli.sampling, 5);
    }
}
