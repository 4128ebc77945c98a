//! Entity categories and their level-data names
//!
//! Level files name fish and bombs as strings. Every name is resolved
//! through an explicit table when the level file is loaded, so a typo fails
//! the load instead of silently spawning nothing.

use std::fmt;
use std::str::FromStr;

/// Errors resolving a level-data name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Name not in the fish table
    #[error("Unknown small fish type: {0:?}")]
    UnknownFish(String),

    /// Name not in the bomb table
    #[error("Unknown bomb type: {0:?}")]
    UnknownBomb(String),
}

/// Small fish species the shark hunts; one pool category each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SmallFishType {
    /// Golden small fish
    GoldenSmallFish,
    /// Collared butterflyfish
    ChaetodonCollare,
    /// Copperband butterflyfish
    ChelmonRostratus,
    /// Coral beauty angelfish
    CoralBeauty,
}

const FISH_NAMES: &[(&str, SmallFishType)] = &[
    ("GoldenSmallFish", SmallFishType::GoldenSmallFish),
    ("Chaetodon_Collare", SmallFishType::ChaetodonCollare),
    ("Chelmon_Rostratus", SmallFishType::ChelmonRostratus),
    ("CoralBeauty", SmallFishType::CoralBeauty),
];

/// Bomb kinds placed at a level's bomb spawn points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BombType {
    /// Floating sea mine
    SeaMine,
    /// Mine with contact spikes
    SpikedMine,
    /// Sinking depth charge
    DepthCharge,
}

const BOMB_NAMES: &[(&str, BombType)] = &[
    ("SeaMine", BombType::SeaMine),
    ("SpikedMine", BombType::SpikedMine),
    ("DepthCharge", BombType::DepthCharge),
];

/// Case-insensitive lookup in a name table
fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    let name = name.trim();
    table
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

fn name_of<T: Copy + PartialEq>(table: &[(&'static str, T)], value: T) -> &'static str {
    table
        .iter()
        .find(|(_, candidate)| *candidate == value)
        .map_or("?", |(name, _)| name)
}

impl SmallFishType {
    /// Every fish type, in declaration order
    pub const ALL: [Self; 4] = [
        Self::GoldenSmallFish,
        Self::ChaetodonCollare,
        Self::ChelmonRostratus,
        Self::CoralBeauty,
    ];

    /// Name used in level data
    pub fn name(self) -> &'static str {
        name_of(FISH_NAMES, self)
    }
}

impl FromStr for SmallFishType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(FISH_NAMES, s).ok_or_else(|| CatalogError::UnknownFish(s.to_string()))
    }
}

impl fmt::Display for SmallFishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl BombType {
    /// Name used in level data
    pub fn name(self) -> &'static str {
        name_of(BOMB_NAMES, self)
    }
}

impl FromStr for BombType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(BOMB_NAMES, s).ok_or_else(|| CatalogError::UnknownBomb(s.to_string()))
    }
}

impl fmt::Display for BombType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
