//! # Satchel Sandbox
//!
//! Headless driver for the Satchel inventory core.
//!
//! Runs a scripted pickup/swap/eject session followed by a seeded random
//! pointer walk, logging everything the panel does.
//!
//! Usage: `satchel-sandbox [config.toml] [seed] [drags]`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod headless;
mod script;

use anyhow::{Context, Result};
use satchel_inventory::InventoryConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Seed used when none is given.
const DEFAULT_SEED: u64 = 0x5A7C_4E1D;
/// Random drags run when no count is given.
const DEFAULT_DRAGS: usize = 200;

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("satchel=info".parse()?))
        .init();

    info!("Satchel sandbox starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => InventoryConfig::load_from(path),
        None => InventoryConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed {s:?}"))?,
        None => DEFAULT_SEED,
    };
    let drags = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid drag count {s:?}"))?,
        None => DEFAULT_DRAGS,
    };

    let mut panel = script::build_panel(config)?;
    script::run_scripted(&mut panel)?;

    panel.reset_session();
    let random = script::run_random(&mut panel, seed, drags)?;
    info!(
        drags = random.drags,
        moves = random.moves,
        swaps = random.swaps,
        restores = random.restores,
        ejections = random.ejections,
        aborts = random.aborts,
        "Random walk outcomes"
    );

    panel.close();
    info!(
        occupied = panel.store().occupied_count(),
        spawned = panel.host().spawned().len(),
        redraws = panel.host().redraws(),
        "Satchel sandbox shutdown complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_session_ejects_once() {
        let mut panel = script::build_panel(InventoryConfig::default()).expect("panel builds");
        let summary = script::run_scripted(&mut panel).expect("scripted session succeeds");

        assert_eq!(summary.pickups, 3);
        assert_eq!(summary.ejections, 1);
        assert_eq!(panel.store().occupied_count(), 2);

        // slot 0 held kind 2 after the live swap; its pose survives the round trip
        let (_, spawned) = &panel.host().spawned()[0];
        assert_eq!(spawned.kind.raw(), 2);
        assert_eq!(spawned.transform.rotation, glam::Quat::from_rotation_y(1.0));
        assert_eq!(spawned.transform.translation, glam::Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_random_walk_keeps_invariants() {
        for seed in [1, 7, 42] {
            let mut panel = script::build_panel(InventoryConfig::default()).expect("panel builds");
            let summary = script::run_random(&mut panel, seed, 150).expect("random walk succeeds");
            assert!(summary.pickups > 0);
        }
    }

    #[test]
    fn test_random_walk_with_threshold_rule() {
        let config = InventoryConfig::from_toml("pop_out = \"threshold\"\nrows = 2\ncolumns = 5\n")
            .expect("valid toml");
        let mut panel = script::build_panel(config).expect("panel builds");
        script::run_random(&mut panel, 99, 150).expect("random walk succeeds");
    }
}
