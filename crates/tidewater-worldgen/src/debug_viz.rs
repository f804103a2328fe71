//! Debug rendering of generated regions as images or text.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{
    biome_color, elevation_to_color, render_biome_map, render_elevation_map, render_glyph_map,
};
