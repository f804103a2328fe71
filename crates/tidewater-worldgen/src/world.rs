//! The world-generation context: field source, classifier, tile cache and
//! random stream for one seed.

use glam::IVec2;
use tracing::{debug, trace};

use crate::biome::{Biome, BiomeClassifier};
use crate::config::{SuppressionLimits, WorldGenConfig};
use crate::landmass;
use crate::seed::{SeededStream, positional_random};
use crate::source::{NoiseTerrain, TerrainSource};
use crate::tile::{ChunkStore, Tile};

/// A lazily generated, infinite tile world.
///
/// Queries take `&self`; tiles are generated on first access and cached.
/// Generation is a pure function of the seed and coordinate, so the cached
/// content of a tile never depends on query order.
pub struct World {
    seed: i64,
    source: Box<dyn TerrainSource>,
    classifier: Box<dyn BiomeClassifier>,
    suppression: SuppressionLimits,
    store: ChunkStore,
    stream: SeededStream,
}

impl World {
    /// Build a noise-driven world from configuration.
    pub fn new(config: &WorldGenConfig) -> Self {
        let source = NoiseTerrain::new(
            config.seed,
            config.elevation.clone(),
            config.climate.clone(),
        );
        Self::from_parts(
            config.seed,
            source,
            config.thresholds.clone(),
            config.suppression.clone(),
        )
    }

    /// Build a world from explicit collaborators.
    pub fn from_parts(
        seed: i64,
        source: impl TerrainSource + 'static,
        classifier: impl BiomeClassifier + 'static,
        suppression: SuppressionLimits,
    ) -> Self {
        let mut source: Box<dyn TerrainSource> = Box::new(source);
        source.reseed(seed);
        Self {
            seed,
            source,
            classifier: Box::new(classifier),
            suppression,
            store: ChunkStore::new(),
            stream: SeededStream::new(seed),
        }
    }

    /// Current world seed.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Switch to a new seed: drops every cached tile and reseeds the field
    /// source and random stream. Previously returned tiles are stale.
    pub fn set_seed(&mut self, seed: i64) {
        debug!(
            old = self.seed,
            new = seed,
            dropped = self.store.len(),
            "reseeding world"
        );
        self.seed = seed;
        self.source.reseed(seed);
        self.stream.reseed(seed);
        self.store.clear();
    }

    /// Tile at `(x, y)`, generating it on first access.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.tile(IVec2::new(x, y))
    }

    /// Tile at `coord`, generating it on first access.
    pub fn tile(&self, coord: IVec2) -> Tile {
        self.store.get_or_generate(coord, || self.generate(coord))
    }

    fn generate(&self, coord: IVec2) -> Tile {
        let climate = self.source.sample(coord.x, coord.y);
        let mut biome = self.classifier.classify(climate);

        if biome.is_land()
            && landmass::is_small_landmass(
                self.source.as_ref(),
                self.classifier.as_ref(),
                coord,
                &self.suppression,
            )
        {
            trace!(x = coord.x, y = coord.y, %biome, "suppressed small landmass tile");
            biome = Biome::Ocean;
        }

        Tile::new(coord, biome, climate)
    }

    /// Biome at `(x, y)`.
    pub fn biome_at(&self, x: i32, y: i32) -> Biome {
        self.tile_at(x, y).biome
    }

    /// Whether a unit can occupy `(x, y)`, on foot or aboard a ship.
    pub fn is_walkable(&self, x: i32, y: i32, on_ship: bool) -> bool {
        self.tile_at(x, y).is_walkable(on_ship)
    }

    /// Deterministic per-tile value in `[0, 1)` for variant selection.
    /// Independent of query order and of the sequential stream.
    pub fn positional_random(&self, x: i32, y: i32, offset: i64) -> f64 {
        positional_random(self.seed, x, y, offset)
    }

    /// Next value in `[0, 1)` from the world's sequential stream.
    pub fn next_random(&mut self) -> f64 {
        self.stream.next_f64()
    }

    /// The world's sequential stream, for driving `rand` helpers.
    pub fn stream_mut(&mut self) -> &mut SeededStream {
        &mut self.stream
    }

    /// Set the fog-of-war visibility flag of a tile. Marks it explored when
    /// it becomes visible.
    pub fn set_visible(&self, x: i32, y: i32, visible: bool) {
        let coord = IVec2::new(x, y);
        self.tile(coord);
        self.store.update(coord, |tile| {
            tile.visible = visible;
            tile.explored |= visible;
        });
    }

    /// Mark a tile as explored without changing its visibility.
    pub fn mark_explored(&self, x: i32, y: i32) {
        let coord = IVec2::new(x, y);
        self.tile(coord);
        self.store.update(coord, |tile| tile.explored = true);
    }

    /// Tiles in the `width` x `height` rectangle whose minimum corner is
    /// `(x, y)`, row-major.
    pub fn tiles_in_rect(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                tiles.push(self.tile_at(x.wrapping_add(dx), y.wrapping_add(dy)));
            }
        }
        tiles
    }

    /// Number of tiles currently cached.
    pub fn cached_tile_count(&self) -> usize {
        self.store.len()
    }

    /// Active suppression limits.
    pub fn suppression(&self) -> &SuppressionLimits {
        &self.suppression
    }
}
