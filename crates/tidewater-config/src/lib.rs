//! Configuration for Tidewater world generation tools.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Unknown fields are ignored and missing ones fall
//! back to defaults, so older files keep loading.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_map_size};
pub use config::{CONFIG_FILE, Config, DebugConfig, SurveyConfig};
pub use error::ConfigError;
