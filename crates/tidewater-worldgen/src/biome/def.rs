//! Biome tags and the static descriptor table shared with renderers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categorical terrain classification of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Ocean,
    Beach,
    Desert,
    Savanna,
    Jungle,
    Swamp,
    Taiga,
    Tropical,
    Forest,
    Mountain,
    Snow,
}

impl Biome {
    /// Number of biome variants.
    pub const COUNT: usize = 11;

    /// Every biome, in descriptor-table order.
    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::Ocean,
        Biome::Beach,
        Biome::Desert,
        Biome::Savanna,
        Biome::Jungle,
        Biome::Swamp,
        Biome::Taiga,
        Biome::Tropical,
        Biome::Forest,
        Biome::Mountain,
        Biome::Snow,
    ];

    /// Position of this biome in [`Biome::ALL`] and [`BIOME_DESCRIPTORS`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static rendering/movement properties of this biome.
    #[inline]
    pub fn descriptor(self) -> &'static BiomeDescriptor {
        &BIOME_DESCRIPTORS[self.index()]
    }

    /// Lowercase identifier, e.g. `"tropical"`.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Everything except ocean counts as land for connectivity purposes.
    #[inline]
    pub fn is_land(self) -> bool {
        self != Biome::Ocean
    }

    /// Whether a unit can stand here, on foot or aboard a ship.
    pub fn is_walkable(self, on_ship: bool) -> bool {
        let d = self.descriptor();
        if on_ship { d.ship_walkable } else { d.walkable }
    }

    /// Value used when averaging a landmass's richness.
    pub fn richness(self) -> u32 {
        self.descriptor().richness
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing a biome name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown biome name: {0}")]
pub struct UnknownBiome(pub String);

impl FromStr for Biome {
    type Err = UnknownBiome;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Biome::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBiome(s.to_string()))
    }
}

/// Full static descriptor for a biome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BiomeDescriptor {
    /// The biome this entry describes.
    pub biome: Biome,
    /// Lowercase identifier.
    pub name: &'static str,
    /// Single-character map glyph.
    pub glyph: char,
    /// Display color as RGB.
    pub color: [u8; 3],
    /// Passable on foot.
    pub walkable: bool,
    /// Passable by ship.
    pub ship_walkable: bool,
    /// Weight in landmass richness.
    pub richness: u32,
}

const fn entry(
    biome: Biome,
    name: &'static str,
    glyph: char,
    color: [u8; 3],
    walkable: bool,
    ship_walkable: bool,
    richness: u32,
) -> BiomeDescriptor {
    BiomeDescriptor {
        biome,
        name,
        glyph,
        color,
        walkable,
        ship_walkable,
        richness,
    }
}

/// Read-only descriptor table, indexed by [`Biome::index`].
pub static BIOME_DESCRIPTORS: [BiomeDescriptor; Biome::COUNT] = [
    entry(Biome::Ocean, "ocean", '~', [30, 80, 200], false, true, 1),
    entry(Biome::Beach, "beach", '.', [220, 200, 130], true, false, 2),
    entry(Biome::Desert, "desert", ':', [230, 190, 90], true, false, 1),
    entry(Biome::Savanna, "savanna", '"', [180, 170, 70], true, false, 2),
    entry(Biome::Jungle, "jungle", '&', [20, 110, 40], true, false, 3),
    entry(Biome::Swamp, "swamp", ',', [70, 90, 60], false, false, 1),
    entry(Biome::Taiga, "taiga", 'A', [60, 110, 90], true, false, 2),
    entry(Biome::Tropical, "tropical", 'P', [60, 170, 70], true, false, 3),
    entry(Biome::Forest, "forest", 'T', [40, 140, 50], true, false, 3),
    entry(Biome::Mountain, "mountain", '^', [130, 110, 90], false, false, 1),
    entry(Biome::Snow, "snow", '*', [240, 240, 245], false, false, 1),
];
