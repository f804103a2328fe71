//! Map renderers: biome colors, elevation shading and text glyphs.

use glam::IVec2;

use super::image::DebugImage;
use crate::World;
use crate::biome::Biome;

/// RGB color of a biome from the descriptor table.
pub fn biome_color(biome: Biome) -> [u8; 3] {
    biome.descriptor().color
}

/// Map an elevation in `[0, 1]` to a grey-blue ramp. Ocean-range values
/// stay blue, everything above brightens toward white.
pub fn elevation_to_color(elevation: f64) -> [u8; 3] {
    let e = elevation.clamp(0.0, 1.0);
    if e < 0.4 {
        let t = e / 0.4;
        [0, (40.0 + t * 60.0) as u8, (120.0 + t * 100.0) as u8]
    } else {
        let base = (80.0 + (e - 0.4) / 0.6 * 175.0) as u8;
        [base, base, base]
    }
}

/// Render the biome of every tile in a `width` x `height` window whose
/// minimum corner is `origin`. One pixel per tile.
pub fn render_biome_map(world: &World, origin: IVec2, width: u32, height: u32) -> DebugImage {
    render_with(world, origin, width, height, |tile| biome_color(tile.biome))
}

/// Render the elevation of every tile in the window.
pub fn render_elevation_map(world: &World, origin: IVec2, width: u32, height: u32) -> DebugImage {
    render_with(world, origin, width, height, |tile| {
        elevation_to_color(tile.elevation)
    })
}

fn render_with(
    world: &World,
    origin: IVec2,
    width: u32,
    height: u32,
    color: impl Fn(&crate::Tile) -> [u8; 3],
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let tiles = world.tiles_in_rect(origin.x, origin.y, width, height);
    for (i, tile) in tiles.iter().enumerate() {
        let px = (i % width as usize) as u32;
        let py = (i / width as usize) as u32;
        image.set_pixel(px, py, color(tile));
    }
    image
}

/// Text map of the window, one glyph per tile and one line per row.
///
/// `marker` glyphs override the biome glyph at their coordinates.
pub fn render_glyph_map(
    world: &World,
    origin: IVec2,
    width: u32,
    height: u32,
    markers: &[(IVec2, char)],
) -> String {
    let tiles = world.tiles_in_rect(origin.x, origin.y, width, height);
    let mut out = String::with_capacity(tiles.len() + height as usize);
    for row in tiles.chunks(width.max(1) as usize) {
        for tile in row {
            let glyph = markers
                .iter()
                .find(|(coord, _)| *coord == tile.coord())
                .map_or(tile.descriptor().glyph, |&(_, glyph)| glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
