//! Serializable summary of one probe run.

use glam::IVec2;
use serde::Serialize;
use tidewater_config::SurveyConfig;
use tidewater_worldgen::{Biome, CoastalSurvey, LandmassReport, World};

/// Search radius multiplier when looking for land from the survey centre.
const LAND_SEARCH_FACTOR: u32 = 4;

/// Counts drawn from a [`CoastalSurvey`].
#[derive(Debug, Serialize, PartialEq)]
pub struct CoastalSummary {
    pub center: IVec2,
    pub radius: u32,
    pub water_tiles: usize,
    pub navigable_tiles: usize,
    pub land_tiles: usize,
    pub beach_tiles: usize,
    pub embark_candidates: usize,
    pub disembark_candidates: usize,
}

impl CoastalSummary {
    pub fn from_survey(survey: &CoastalSurvey) -> Self {
        Self {
            center: survey.center,
            radius: survey.radius,
            water_tiles: survey.water_tiles.len(),
            navigable_tiles: survey.water_tiles.iter().filter(|w| w.navigable).count(),
            land_tiles: survey.land_tiles.len(),
            beach_tiles: survey.beach_tiles.len(),
            embark_candidates: survey.best_embark_points.len(),
            disembark_candidates: survey.best_disembark_points.len(),
        }
    }
}

/// Everything the probe prints besides the map.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub seed: i64,
    pub center: IVec2,
    pub center_biome: Biome,
    pub nearest_land: Option<IVec2>,
    pub landmass: LandmassReport,
    pub water_body_size: usize,
    pub coastal: CoastalSummary,
    pub ship_placement: Option<IVec2>,
    pub disembark: Option<IVec2>,
    pub cached_tiles: usize,
}

impl ProbeReport {
    /// Run every analysis around the configured survey centre.
    pub fn collect(world: &World, survey: &SurveyConfig) -> Self {
        let (x, y) = (survey.origin_x, survey.origin_y);
        let center = IVec2::new(x, y);
        let radius = survey.radius;

        let nearest_land =
            world.find_nearest_walkable_land(x, y, radius.saturating_mul(LAND_SEARCH_FACTOR));
        let landmass = nearest_land
            .map(|land| world.analyze_landmass(land.x, land.y, survey.landmass_cap))
            .unwrap_or_default();

        let ship_placement = world.find_best_ship_placement(x, y, radius);
        let water_body_size = ship_placement
            .map(|ship| world.water_body_size(ship.x, ship.y, survey.water_cap))
            .unwrap_or(0);

        let coastal = CoastalSummary::from_survey(&world.analyze_coastal_area(x, y, radius));
        let disembark = world.find_best_disembark_location(x, y, radius);

        Self {
            seed: world.seed(),
            center,
            center_biome: world.biome_at(x, y),
            nearest_land,
            landmass,
            water_body_size,
            coastal,
            ship_placement,
            disembark,
            cached_tiles: world.cached_tile_count(),
        }
    }

    /// Map markers for the survey centre, ship and landing points.
    pub fn markers(&self) -> Vec<(IVec2, char)> {
        let mut markers = vec![(self.center, '+')];
        markers.extend(self.ship_placement.map(|c| (c, 'S')));
        markers.extend(self.disembark.map(|c| (c, 'L')));
        markers
    }
}
