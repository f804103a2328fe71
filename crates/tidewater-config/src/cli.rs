//! Command-line argument parsing for Tidewater tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Tidewater probe command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tidewater", about = "Inspect a generated Tidewater world")]
pub struct CliArgs {
    /// World seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Survey centre, x.
    #[arg(long, allow_negative_numbers = true)]
    pub x: Option<i32>,

    /// Survey centre, y.
    #[arg(long, allow_negative_numbers = true)]
    pub y: Option<i32>,

    /// Coastal survey radius in tiles.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Tile cap for landmass analysis.
    #[arg(long)]
    pub landmass_cap: Option<usize>,

    /// Glyph map size as WIDTHxHEIGHT, e.g. 80x40.
    #[arg(long, value_parser = parse_map_size)]
    pub map_size: Option<(u32, u32)>,

    /// Also write the map region as a PNG biome image.
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Parse a `WIDTHxHEIGHT` map size. Both sides must be positive.
pub fn parse_map_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let parse = |part: &str| match part.trim().parse::<u32>() {
        Ok(0) => Err(format!("map dimensions must be positive, got `{s}`")),
        Ok(v) => Ok(v),
        Err(e) => Err(format!("invalid map dimension `{part}`: {e}")),
    };
    Ok((parse(w)?, parse(h)?))
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(x) = args.x {
            self.survey.origin_x = x;
        }
        if let Some(y) = args.y {
            self.survey.origin_y = y;
        }
        if let Some(radius) = args.radius {
            self.survey.radius = radius;
        }
        if let Some(cap) = args.landmass_cap {
            self.survey.landmass_cap = cap;
        }
        if let Some((width, height)) = args.map_size {
            self.survey.map_width = width;
            self.survey.map_height = height;
        }
    }
}
