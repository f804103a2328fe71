//! Inspect a generated Tidewater world from the command line.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p tidewater-probe -- --seed 42 --x 100 --y -30` to survey
//! a different spot.

mod report;

use std::path::PathBuf;

use clap::Parser;
use glam::IVec2;
use tidewater_config::{CliArgs, Config};
use tidewater_worldgen::World;
use tidewater_worldgen::debug_viz::{render_biome_map, render_glyph_map};
use tracing::{error, info, warn};

use crate::report::ProbeReport;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(Config::default_dir)
        .unwrap_or_else(|| PathBuf::from(".tidewater"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    tidewater_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(2);
    }

    let world = World::new(&config.world);
    info!(seed = world.seed(), "world ready");

    let report = ProbeReport::collect(&world, &config.survey);

    let survey = &config.survey;
    let map_origin = IVec2::new(
        survey
            .origin_x
            .saturating_sub((survey.map_width / 2) as i32),
        survey
            .origin_y
            .saturating_sub((survey.map_height / 2) as i32),
    );
    print!(
        "{}",
        render_glyph_map(
            &world,
            map_origin,
            survey.map_width,
            survey.map_height,
            &report.markers(),
        )
    );

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to encode report: {e}"),
    }

    if let Some(path) = &args.image {
        let image = render_biome_map(&world, map_origin, survey.map_width, survey.map_height);
        let written = std::fs::File::create(path)
            .map_err(|e| e.to_string())
            .and_then(|file| {
                image
                    .write_png(std::io::BufWriter::new(file))
                    .map_err(|e| e.to_string())
            });
        match written {
            Ok(()) => info!("Wrote biome image to {}", path.display()),
            Err(e) => warn!("Failed to write {}: {e}", path.display()),
        }
    }

    info!(cached_tiles = world.cached_tile_count(), "probe finished");
}
