//! Coastal geometry: navigability, ship placement and landing points.
//!
//! All queries look at the 8-tile Moore neighbourhood or scan a square
//! window around a point. None of them carry state between calls.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::World;
use crate::biome::Biome;

/// The eight Moore neighbour offsets.
const NEIGHBORS_8: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Fewest ocean neighbours for navigable water.
const NAVIGABLE_MIN_WATER: u8 = 4;
/// Most non-beach land neighbours for navigable water.
const NAVIGABLE_MAX_LAND: u8 = 3;
/// Fewest ocean neighbours for bulk ship placement.
const PLACEMENT_MIN_WATER: u8 = 3;

/// Moore-neighbourhood census of a tile.
///
/// `land` counts non-ocean neighbours other than beach; `beach` is counted
/// separately. `water + land + beach == 8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCounts {
    pub water: u8,
    pub land: u8,
    pub beach: u8,
}

impl NeighborCounts {
    /// Every non-ocean neighbour, beach included.
    pub fn shore(&self) -> u8 {
        self.land + self.beach
    }
}

/// An ocean tile inside a coastal survey.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterSample {
    pub coord: IVec2,
    /// Euclidean distance from the survey centre.
    pub distance: f64,
    pub navigable: bool,
}

/// A land tile inside a coastal survey.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandSample {
    pub coord: IVec2,
    /// Euclidean distance from the survey centre.
    pub distance: f64,
    /// Passable on foot.
    pub walkable: bool,
    pub beach: bool,
    /// Touches ocean in the Moore neighbourhood.
    pub coastal: bool,
}

/// Result of [`World::analyze_coastal_area`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoastalSurvey {
    pub center: IVec2,
    pub radius: u32,
    pub water_tiles: Vec<WaterSample>,
    pub land_tiles: Vec<LandSample>,
    pub beach_tiles: Vec<IVec2>,
    /// Navigable water, nearest first.
    pub best_embark_points: Vec<WaterSample>,
    /// Walkable land, beaches first, then nearest first.
    pub best_disembark_points: Vec<LandSample>,
}

fn distance(from: IVec2, to: IVec2) -> f64 {
    let dx = f64::from(to.x) - f64::from(from.x);
    let dy = f64::from(to.y) - f64::from(from.y);
    (dx * dx + dy * dy).sqrt()
}

impl World {
    /// Count ocean, beach and other land among the 8 neighbours of `coord`.
    pub fn neighbor_counts(&self, coord: IVec2) -> NeighborCounts {
        let mut counts = NeighborCounts::default();
        for offset in NEIGHBORS_8 {
            match self.tile(coord.wrapping_add(offset)).biome {
                Biome::Ocean => counts.water += 1,
                Biome::Beach => counts.beach += 1,
                _ => counts.land += 1,
            }
        }
        counts
    }

    /// Ocean near a coast but not boxed into a cove.
    ///
    /// Requires at least 4 ocean neighbours, at least one shore neighbour
    /// (beach or land) and at most 3 non-beach land neighbours.
    pub fn is_navigable_water(&self, x: i32, y: i32) -> bool {
        let coord = IVec2::new(x, y);
        if self.tile(coord).biome != Biome::Ocean {
            return false;
        }
        let counts = self.neighbor_counts(coord);
        counts.water >= NAVIGABLE_MIN_WATER
            && counts.shore() >= 1
            && counts.land <= NAVIGABLE_MAX_LAND
    }

    /// Looser check for bulk ship spawning: ocean with at least 3 ocean
    /// neighbours, anywhere.
    pub fn is_ship_placement_valid(&self, x: i32, y: i32) -> bool {
        let coord = IVec2::new(x, y);
        self.tile(coord).biome == Biome::Ocean
            && self.neighbor_counts(coord).water >= PLACEMENT_MIN_WATER
    }

    /// Scan the square of side `2 * radius + 1` around `(x, y)` and rank
    /// embark and disembark candidates.
    pub fn analyze_coastal_area(&self, x: i32, y: i32, radius: u32) -> CoastalSurvey {
        let center = IVec2::new(x, y);
        let r = radius.min(i32::MAX as u32) as i32;
        let mut survey = CoastalSurvey {
            center,
            radius,
            ..Default::default()
        };

        for dy in -r..=r {
            for dx in -r..=r {
                let coord = center.wrapping_add(IVec2::new(dx, dy));
                let tile = self.tile(coord);
                let dist = distance(center, coord);

                if tile.biome == Biome::Ocean {
                    survey.water_tiles.push(WaterSample {
                        coord,
                        distance: dist,
                        navigable: self.is_navigable_water(coord.x, coord.y),
                    });
                } else {
                    let beach = tile.biome == Biome::Beach;
                    if beach {
                        survey.beach_tiles.push(coord);
                    }
                    survey.land_tiles.push(LandSample {
                        coord,
                        distance: dist,
                        walkable: tile.is_walkable(false),
                        beach,
                        coastal: self.neighbor_counts(coord).water > 0,
                    });
                }
            }
        }

        let mut embark: Vec<WaterSample> = survey
            .water_tiles
            .iter()
            .filter(|w| w.navigable)
            .copied()
            .collect();
        embark.sort_by(|a, b| {
            b.navigable
                .cmp(&a.navigable)
                .then(a.distance.total_cmp(&b.distance))
        });
        survey.best_embark_points = embark;

        let mut disembark: Vec<LandSample> = survey
            .land_tiles
            .iter()
            .filter(|l| l.walkable)
            .copied()
            .collect();
        disembark.sort_by(|a, b| {
            b.beach
                .cmp(&a.beach)
                .then(a.distance.total_cmp(&b.distance))
        });
        survey.best_disembark_points = disembark;

        survey
    }

    /// Best spot to put a ship near `(x, y)`.
    ///
    /// Prefers the nearest navigable water; otherwise the nearest ocean tile
    /// that passes [`World::is_ship_placement_valid`]; otherwise `None`.
    pub fn find_best_ship_placement(&self, x: i32, y: i32, radius: u32) -> Option<IVec2> {
        let survey = self.analyze_coastal_area(x, y, radius);
        if let Some(best) = survey.best_embark_points.first() {
            return Some(best.coord);
        }

        let mut water = survey.water_tiles;
        water.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        water
            .into_iter()
            .find(|w| self.is_ship_placement_valid(w.coord.x, w.coord.y))
            .map(|w| w.coord)
    }

    /// Best spot to land a party near `(x, y)`.
    ///
    /// The nearest beach if the survey square holds one; otherwise the
    /// nearest walkable land; otherwise `None`.
    pub fn find_best_disembark_location(&self, x: i32, y: i32, radius: u32) -> Option<IVec2> {
        self.analyze_coastal_area(x, y, radius)
            .best_disembark_points
            .first()
            .map(|best| best.coord)
    }

    /// Nearest tile (Euclidean) walkable on foot within Chebyshev distance
    /// `max_radius` of `(x, y)`.
    ///
    /// Searches outward ring by ring and stops once no unexplored ring can
    /// hold anything closer than the best hit.
    pub fn find_nearest_walkable_land(&self, x: i32, y: i32, max_radius: u32) -> Option<IVec2> {
        let center = IVec2::new(x, y);
        let max_radius = max_radius.min(i32::MAX as u32) as i32;
        let mut best: Option<(f64, IVec2)> = None;

        for ring in 0..=max_radius {
            if let Some((best_dist, _)) = best
                && f64::from(ring) > best_dist
            {
                break;
            }
            for offset in ring_offsets(ring) {
                let coord = center.wrapping_add(offset);
                if !self.tile(coord).is_walkable(false) {
                    continue;
                }
                let dist = distance(center, coord);
                if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                    best = Some((dist, coord));
                }
            }
        }

        best.map(|(_, coord)| coord)
    }
}

/// Offsets on the square ring at Chebyshev distance `ring`: the top and
/// bottom rows, then the left and right columns between them.
fn ring_offsets(ring: i32) -> impl Iterator<Item = IVec2> {
    let rows = (-ring..=ring).flat_map(move |dx| {
        std::iter::once(IVec2::new(dx, -ring)).chain((ring > 0).then_some(IVec2::new(dx, ring)))
    });
    let sides =
        (1 - ring..ring).flat_map(move |dy| [IVec2::new(-ring, dy), IVec2::new(ring, dy)]);
    rows.chain(sides)
}
