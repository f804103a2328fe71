//! Bounded connectivity analysis over the 4-neighbourhood.
//!
//! Every traversal here is an explicit breadth-first queue with a hard cap
//! on visited tiles, so the cost of a query is bounded no matter how large
//! (or infinite) the connected region is. A result whose size equals the cap
//! is a lower bound on the true region.

use std::collections::{BTreeMap, VecDeque};

use glam::IVec2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::World;
use crate::biome::{Biome, BiomeClassifier};
use crate::config::SuppressionLimits;
use crate::source::TerrainSource;

/// The four edge-adjacent neighbour offsets.
pub(crate) const NEIGHBORS_4: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Raw result of a bounded fill: the visited members and their biomes.
#[derive(Debug, Default)]
pub(crate) struct BoundedFill {
    visited: FxHashSet<IVec2>,
    histogram: [usize; Biome::COUNT],
    capped: bool,
}

impl BoundedFill {
    pub(crate) fn size(&self) -> usize {
        self.visited.len()
    }
}

/// Breadth-first fill from `origin` over tiles for which `member` returns a
/// biome, visiting at most `cap` tiles.
///
/// `member` is evaluated at most once per coordinate.
pub(crate) fn bounded_fill(
    origin: IVec2,
    cap: usize,
    mut member: impl FnMut(IVec2) -> Option<Biome>,
) -> BoundedFill {
    let mut fill = BoundedFill::default();
    if cap == 0 {
        return fill;
    }
    let Some(origin_biome) = member(origin) else {
        return fill;
    };

    let mut rejected: FxHashSet<IVec2> = FxHashSet::default();
    let mut frontier = VecDeque::new();
    fill.visited.insert(origin);
    fill.histogram[origin_biome.index()] += 1;
    frontier.push_back(origin);

    'search: while let Some(current) = frontier.pop_front() {
        for offset in NEIGHBORS_4 {
            if fill.visited.len() >= cap {
                fill.capped = true;
                break 'search;
            }
            let next = current.wrapping_add(offset);
            if fill.visited.contains(&next) || rejected.contains(&next) {
                continue;
            }
            match member(next) {
                Some(biome) => {
                    fill.visited.insert(next);
                    fill.histogram[biome.index()] += 1;
                    frontier.push_back(next);
                }
                None => {
                    rejected.insert(next);
                }
            }
        }
    }

    if fill.visited.len() >= cap {
        fill.capped = true;
    }
    fill
}

/// Size of the raw land component around `origin`, capped at
/// `limits.probe_cap`.
///
/// Fields are recomputed straight from `source` and classified with
/// `classifier`; the tile cache is never read, so the answer does not depend
/// on which tiles happen to be generated already.
pub(crate) fn probe_land_component(
    source: &dyn TerrainSource,
    classifier: &dyn BiomeClassifier,
    origin: IVec2,
    limits: &SuppressionLimits,
) -> usize {
    bounded_fill(origin, limits.probe_cap, |coord| {
        let biome = classifier.classify(source.sample(coord.x, coord.y));
        biome.is_land().then_some(biome)
    })
    .size()
}

/// Returns `true` if the land tile at `origin` belongs to a component smaller
/// than `limits.min_landmass` and should be generated as ocean.
///
/// The probe sees `min(component, probe_cap)` tiles from any member, so with
/// `probe_cap >= min_landmass` every member of a component gets the same
/// answer.
pub(crate) fn is_small_landmass(
    source: &dyn TerrainSource,
    classifier: &dyn BiomeClassifier,
    origin: IVec2,
    limits: &SuppressionLimits,
) -> bool {
    limits.is_enabled()
        && probe_land_component(source, classifier, origin, limits) < limits.min_landmass
}

/// Statistics for a landmass, as consumed by naming and port placement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmassReport {
    /// Tiles visited. Saturates at the cap.
    pub size: usize,
    /// Tile count per biome.
    pub biomes: BTreeMap<Biome, usize>,
    /// Number of distinct biomes.
    pub diversity: usize,
    /// Mean per-tile richness value; `0.0` for an empty report.
    pub richness: f64,
    /// `size` reached the cap; the landmass may be larger.
    pub truncated: bool,
}

impl LandmassReport {
    fn from_fill(fill: &BoundedFill) -> Self {
        let size = fill.size();
        let biomes: BTreeMap<Biome, usize> = Biome::ALL
            .into_iter()
            .filter_map(|b| {
                let count = fill.histogram[b.index()];
                (count > 0).then_some((b, count))
            })
            .collect();
        let weighted: usize = biomes
            .iter()
            .map(|(biome, count)| biome.richness() as usize * count)
            .sum();

        Self {
            size,
            diversity: biomes.len(),
            richness: if size == 0 {
                0.0
            } else {
                weighted as f64 / size as f64
            },
            biomes,
            truncated: fill.capped,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The most common biome; ties go to the earlier biome in [`Biome::ALL`].
    pub fn dominant_biome(&self) -> Option<Biome> {
        self.biomes
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(biome, _)| *biome)
    }
}

impl World {
    fn land_fill(&self, origin: IVec2, cap: usize) -> BoundedFill {
        let fill = bounded_fill(origin, cap, |coord| {
            let biome = self.tile(coord).biome;
            biome.is_land().then_some(biome)
        });
        if fill.capped {
            debug!(x = origin.x, y = origin.y, cap, "landmass analysis hit its cap");
        }
        fill
    }

    /// Number of tiles in the landmass containing `(x, y)`, at most `cap`.
    ///
    /// Returns `0` for an ocean tile.
    pub fn landmass_size(&self, x: i32, y: i32, cap: usize) -> usize {
        self.land_fill(IVec2::new(x, y), cap).size()
    }

    /// Size, biome histogram, diversity and richness of the landmass
    /// containing `(x, y)`, visiting at most `cap` tiles.
    ///
    /// Visited tiles are generated and cached. An ocean tile yields an empty
    /// report.
    pub fn analyze_landmass(&self, x: i32, y: i32, cap: usize) -> LandmassReport {
        LandmassReport::from_fill(&self.land_fill(IVec2::new(x, y), cap))
    }

    /// Number of tiles in the body of water containing `(x, y)`, at most `cap`.
    ///
    /// Returns `0` for a land tile.
    pub fn water_body_size(&self, x: i32, y: i32, cap: usize) -> usize {
        let origin = IVec2::new(x, y);
        let fill = bounded_fill(origin, cap, |coord| {
            let biome = self.tile(coord).biome;
            (!biome.is_land()).then_some(biome)
        });
        if fill.capped {
            debug!(x, y, cap, "water body sizing hit its cap");
        }
        fill.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::ClassifierThresholds;
    use crate::source::StampedTerrain;

    fn world_with(terrain: StampedTerrain) -> World {
        World::from_parts(
            0,
            terrain,
            ClassifierThresholds::default(),
            SuppressionLimits::default(),
        )
    }

    #[test]
    fn test_fill_respects_cap_on_unbounded_region() {
        let fill = bounded_fill(IVec2::ZERO, 37, |_| Some(Biome::Forest));
        assert_eq!(fill.size(), 37);
        assert!(fill.capped);
    }

    #[test]
    fn test_fill_zero_cap_visits_nothing() {
        let fill = bounded_fill(IVec2::ZERO, 0, |_| Some(Biome::Forest));
        assert_eq!(fill.size(), 0);
    }

    #[test]
    fn test_fill_evaluates_each_coordinate_once() {
        let mut seen = FxHashSet::default();
        let fill = bounded_fill(IVec2::ZERO, 100, |coord| {
            assert!(seen.insert(coord), "{coord} evaluated twice");
            (coord.x.abs() <= 2 && coord.y.abs() <= 2).then_some(Biome::Beach)
        });
        assert_eq!(fill.size(), 25);
        assert!(!fill.capped);
    }

    #[test]
    fn test_fill_ignores_diagonal_contact() {
        let diagonal: FxHashSet<IVec2> = (0..8).map(|i| IVec2::new(i, i)).collect();
        let fill = bounded_fill(IVec2::ZERO, 100, |coord| {
            diagonal.contains(&coord).then_some(Biome::Forest)
        });
        assert_eq!(fill.size(), 1);
    }

    #[test]
    fn test_eight_tile_island_is_suppressed() {
        let mut terrain = StampedTerrain::ocean();
        terrain.stamp_rect(0, 0, 4, 2, StampedTerrain::FOREST);
        let world = world_with(terrain);

        for x in 0..4 {
            for y in 0..2 {
                assert_eq!(world.tile_at(x, y).biome, Biome::Ocean, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_nine_tile_island_survives() {
        let mut terrain = StampedTerrain::ocean();
        terrain.stamp_rect(0, 0, 3, 3, StampedTerrain::FOREST);
        let world = world_with(terrain);

        for x in 0..3 {
            for y in 0..3 {
                assert_eq!(world.tile_at(x, y).biome, Biome::Forest, "({x}, {y})");
            }
        }
        assert_eq!(world.landmass_size(1, 1, 100), 9);
    }

    #[test]
    fn test_suppression_same_from_every_member() {
        // An L-shaped island: 6 tiles along x, 3 up the side = 9 tiles.
        let mut terrain = StampedTerrain::ocean();
        terrain
            .stamp_rect(0, 0, 6, 1, StampedTerrain::BEACH)
            .stamp_rect(0, 1, 1, 3, StampedTerrain::FOREST);
        let members: Vec<IVec2> = (0..6)
            .map(|x| IVec2::new(x, 0))
            .chain((1..4).map(|y| IVec2::new(0, y)))
            .collect();

        // Query in two different orders on fresh worlds.
        let forward = world_with(terrain.clone());
        let backward = world_with(terrain);
        let a: Vec<Biome> = members.iter().map(|c| forward.tile(*c).biome).collect();
        let mut b: Vec<Biome> = members.iter().rev().map(|c| backward.tile(*c).biome).collect();
        b.reverse();

        assert_eq!(a, b);
        assert!(a.iter().all(|biome| biome.is_land()));
    }

    #[test]
    fn test_probe_does_not_populate_cache() {
        let mut terrain = StampedTerrain::ocean();
        terrain.stamp_rect(0, 0, 5, 5, StampedTerrain::FOREST);
        let world = world_with(terrain);
        world.tile_at(2, 2);
        assert_eq!(world.cached_tile_count(), 1);
    }

    #[test]
    fn test_disabled_suppression_keeps_single_tiles() {
        let mut terrain = StampedTerrain::ocean();
        terrain.stamp(0, 0, StampedTerrain::FOREST);
        let world = World::from_parts(
            0,
            terrain,
            ClassifierThresholds::default(),
            SuppressionLimits::DISABLED,
        );
        assert_eq!(world.tile_at(0, 0).biome, Biome::Forest);
    }

    #[test]
    fn test_landmass_size_capped_on_endless_land() {
        let world = world_with(StampedTerrain::land());
        assert_eq!(world.landmass_size(0, 0, 150), 150);
        assert_eq!(world.landmass_size(1_000, -1_000, 500), 500);
    }

    #[test]
    fn test_water_body_capped_on_endless_ocean() {
        let world = world_with(StampedTerrain::ocean());
        assert_eq!(world.water_body_size(0, 0, 150), 150);
        assert_eq!(world.water_body_size(0, 0, 1), 1);
    }

    #[test]
    fn test_ocean_origin_yields_empty_report() {
        let world = world_with(StampedTerrain::ocean());
        let report = world.analyze_landmass(5, 5, 200);
        assert_eq!(report, LandmassReport::default());
        assert!(report.is_empty());
        assert_eq!(report.dominant_biome(), None);
        assert_eq!(world.landmass_size(5, 5, 200), 0);
    }

    #[test]
    fn test_land_origin_has_no_water_body() {
        let world = world_with(StampedTerrain::land());
        assert_eq!(world.water_body_size(0, 0, 100), 0);
    }

    #[test]
    fn test_landmass_statistics() {
        // 4x3 island: top row beach, the rest forest except one desert tile.
        let mut terrain = StampedTerrain::ocean();
        terrain
            .stamp_rect(0, 0, 4, 3, StampedTerrain::FOREST)
            .stamp_rect(0, 0, 4, 1, StampedTerrain::BEACH)
            .stamp(3, 2, crate::source::Climate::new(0.6, 0.1, 0.9));
        let world = world_with(terrain);

        let report = world.analyze_landmass(1, 1, 150);
        assert_eq!(report.size, 12);
        assert!(!report.truncated);
        assert_eq!(report.biomes.get(&Biome::Beach), Some(&4));
        assert_eq!(report.biomes.get(&Biome::Forest), Some(&7));
        assert_eq!(report.biomes.get(&Biome::Desert), Some(&1));
        assert_eq!(report.diversity, 3);
        let expected = (4.0 * 2.0 + 7.0 * 3.0 + 1.0) / 12.0;
        assert!((report.richness - expected).abs() < 1e-12);
        assert_eq!(report.dominant_biome(), Some(Biome::Forest));
    }

    #[test]
    fn test_truncated_report_is_lower_bound() {
        let world = world_with(StampedTerrain::land());
        let report = world.analyze_landmass(0, 0, 150);
        assert_eq!(report.size, 150);
        assert!(report.truncated);
        assert_eq!(report.diversity, 1);
        assert_eq!(report.richness, 3.0);
    }
}
