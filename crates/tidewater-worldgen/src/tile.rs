//! Generated tiles and the sparse cache that holds them.

use dashmap::DashMap;
use glam::IVec2;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::biome::{Biome, BiomeDescriptor};
use crate::source::Climate;

/// The atomic generated unit of the world at one integer coordinate.
///
/// Everything except `visible` and `explored` is fixed at generation time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub biome: Biome,
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
    /// Currently in view. Owned by fog of war.
    pub visible: bool,
    /// Seen at least once. Owned by fog of war.
    pub explored: bool,
}

impl Tile {
    /// A freshly generated, unseen tile.
    pub fn new(coord: IVec2, biome: Biome, climate: Climate) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            biome,
            elevation: climate.elevation,
            moisture: climate.moisture,
            temperature: climate.temperature,
            visible: false,
            explored: false,
        }
    }

    pub fn coord(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    pub fn climate(&self) -> Climate {
        Climate::new(self.elevation, self.moisture, self.temperature)
    }

    pub fn descriptor(&self) -> &'static BiomeDescriptor {
        self.biome.descriptor()
    }

    pub fn is_walkable(&self, on_ship: bool) -> bool {
        self.biome.is_walkable(on_ship)
    }

    /// Compare generated content bit-for-bit, ignoring the fog-of-war flags.
    pub fn same_terrain(&self, other: &Tile) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.biome == other.biome
            && self.elevation.to_bits() == other.elevation.to_bits()
            && self.moisture.to_bits() == other.moisture.to_bits()
            && self.temperature.to_bits() == other.temperature.to_bits()
    }
}

/// Sparse coordinate-keyed cache of generated tiles.
///
/// Inserts follow compute-then-insert-if-absent: a tile is generated outside
/// any lock and only stored if no other writer got there first, so racing
/// first queries never lose or replace an entry.
#[derive(Default)]
pub struct ChunkStore {
    tiles: DashMap<IVec2, Tile, FxBuildHasher>,
}

impl ChunkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached tile at `coord`, if it has been generated.
    pub fn get(&self, coord: IVec2) -> Option<Tile> {
        self.tiles.get(&coord).map(|entry| *entry)
    }

    /// Cached tile at `coord`, generating and caching it on a miss.
    ///
    /// `generate` runs without holding any map lock and may itself read the
    /// store.
    pub fn get_or_generate(&self, coord: IVec2, generate: impl FnOnce() -> Tile) -> Tile {
        if let Some(tile) = self.get(coord) {
            return tile;
        }
        let tile = generate();
        *self.tiles.entry(coord).or_insert(tile)
    }

    /// Apply `update` to a cached tile. Returns `false` if it is not cached.
    pub fn update(&self, coord: IVec2, update: impl FnOnce(&mut Tile)) -> bool {
        match self.tiles.get_mut(&coord) {
            Some(mut entry) => {
                update(entry.value_mut());
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, coord: IVec2) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Number of cached tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Drop every cached tile.
    pub fn clear(&self) {
        self.tiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest_tile(x: i32, y: i32) -> Tile {
        Tile::new(IVec2::new(x, y), Biome::Forest, Climate::new(0.6, 0.5, 0.5))
    }

    #[test]
    fn test_generates_once_per_key() {
        let store = ChunkStore::new();
        let mut calls = 0;
        let a = store.get_or_generate(IVec2::new(1, 2), || {
            calls += 1;
            forest_tile(1, 2)
        });
        let b = store.get_or_generate(IVec2::new(1, 2), || {
            calls += 1;
            forest_tile(9, 9)
        });
        assert_eq!(calls, 1, "Second query must be served from the cache");
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_generator_may_read_store() {
        let store = ChunkStore::new();
        store.get_or_generate(IVec2::ZERO, || forest_tile(0, 0));
        let tile = store.get_or_generate(IVec2::X, || {
            assert!(store.contains(IVec2::ZERO));
            forest_tile(1, 0)
        });
        assert_eq!(tile.coord(), IVec2::X);
    }

    #[test]
    fn test_first_insert_wins() {
        let store = ChunkStore::new();
        let coord = IVec2::new(4, 4);
        let stored = store.get_or_generate(coord, || {
            // a concurrent writer lands first
            store.get_or_generate(coord, || forest_tile(4, 4));
            Tile {
                biome: Biome::Desert,
                ..forest_tile(4, 4)
            }
        });
        assert_eq!(stored.biome, Biome::Forest);
        assert_eq!(store.get(coord).map(|t| t.biome), Some(Biome::Forest));
    }

    #[test]
    fn test_concurrent_first_queries_keep_every_entry() {
        let store = ChunkStore::new();
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let store = &store;
                scope.spawn(move || {
                    for i in 0..256 {
                        let coord = IVec2::new(i % 16, i / 16);
                        let tile =
                            store.get_or_generate(coord, || forest_tile(coord.x, coord.y));
                        assert_eq!(tile.coord(), coord, "worker {worker} saw a wrong tile");
                    }
                });
            }
        });
        assert_eq!(store.len(), 256);
    }

    #[test]
    fn test_update_touches_only_cached_tiles() {
        let store = ChunkStore::new();
        assert!(!store.update(IVec2::ZERO, |t| t.visible = true));
        store.get_or_generate(IVec2::ZERO, || forest_tile(0, 0));
        assert!(store.update(IVec2::ZERO, |t| t.visible = true));
        let tile = store.get(IVec2::ZERO).unwrap();
        assert!(tile.visible);
        assert!(tile.same_terrain(&forest_tile(0, 0)));
    }

    #[test]
    fn test_clear_empties_store() {
        let store = ChunkStore::new();
        for x in 0..10 {
            store.get_or_generate(IVec2::new(x, 0), || forest_tile(x, 0));
        }
        assert_eq!(store.len(), 10);
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(IVec2::new(3, 0)).is_none());
    }
}
