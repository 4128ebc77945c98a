//! Level configuration
//!
//! The level file lists, per level, the fish to pre-allocate, the bombs to
//! place, the eat targets and the coin reward. [`LevelCatalog`] validates the
//! file once at load time and then answers [`LevelConfigProvider`] queries.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shoal_engine::config::{Config, ConfigError, ConfigFormat};
use shoal_engine::pool::{plan_entries, PoolEntry};

use crate::catalog::{BombType, CatalogError, SmallFishType};
use crate::scene::PrototypeId;

/// Errors loading or querying level data
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// Reading or parsing the level file failed
    #[error("Level config error: {0}")]
    Config(#[from] ConfigError),

    /// A fish or bomb name is not in the catalog
    #[error("Level {level}: {source}")]
    Catalog {
        /// Level the bad name appeared in
        level: u32,
        /// Underlying lookup failure
        #[source]
        source: CatalogError,
    },

    /// Two levels share a number
    #[error("Level {0} is defined more than once")]
    DuplicateLevel(u32),

    /// Level numbers must run from 1 without gaps
    #[error("Level {0} is missing")]
    MissingLevel(u32),

    /// No level with that number
    #[error("Unknown level {0}")]
    UnknownLevel(u32),

    /// No prototype bound for a fish type the level needs
    #[error("No prototype bound for {0}")]
    UnboundPrototype(SmallFishType),
}

/// Root of the level file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// Every level, in any order
    pub levels: Vec<LevelData>,
}

impl Config for LevelConfig {}

/// One level as written in the level file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelData {
    /// 1-based level number
    pub level_number: u32,
    /// Eat targets; their amounts add up to the level target
    pub targets: Vec<TargetData>,
    /// Fish to pre-allocate
    pub small_objects: Vec<ObjectData>,
    /// Bombs to place
    pub enemies: Vec<ObjectData>,
    /// Extra instances per fish type on top of the listed quantity
    pub buffer_amount: usize,
    /// Coins paid on completion
    pub reward_coins: RewardData,
}

/// Eat target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetData {
    /// Text shown to the player
    pub description: String,
    /// Kind of target, e.g. "Eat"
    pub target_type: String,
    /// Fish to eat
    pub amount: u32,
    /// Per-type requirements
    pub requirements: Vec<RequirementData>,
    /// Seconds allowed; zero means unlimited
    pub time_limit: f32,
}

/// Per-type part of a target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementData {
    /// Fish type name
    #[serde(rename = "type")]
    pub kind: String,
    /// How many of that type
    pub count: u32,
}

/// A named object row, used for both fish and bombs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectData {
    /// Catalog name
    #[serde(alias = "bomb")]
    pub name: String,
    /// Display scale
    pub size: f32,
    /// Instances wanted
    pub quantity: usize,
}

/// Coin reward block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardData {
    /// Coins
    pub amount: u32,
}

/// Fish type to scene prototype binding
pub type PrototypeTable = HashMap<SmallFishType, PrototypeId>;

/// Source of per-level pool sizing and goals
pub trait LevelConfigProvider {
    /// Number of the highest level
    fn last_level(&self) -> u32;

    /// Pool rows for a level: one per fish type, quantity plus buffer
    fn pool_entries(
        &self,
        level: u32,
        prototypes: &PrototypeTable,
    ) -> Result<Vec<PoolEntry<SmallFishType, PrototypeId>>, LevelError>;

    /// Fish to eat to finish a level
    fn target_amount(&self, level: u32) -> Result<u32, LevelError>;

    /// Coins paid for finishing a level; level 0 or unknown pays nothing
    fn reward_coins(&self, level: u32) -> u32;

    /// Bombs placed in a level
    fn bombs(&self, level: u32) -> Result<Vec<(BombType, usize)>, LevelError>;

    /// Seconds allowed for a level, if limited
    fn time_limit(&self, level: u32) -> Result<Option<f32>, LevelError>;
}

/// A level with every name resolved
#[derive(Debug, Clone, PartialEq)]
pub struct LevelPlan {
    /// 1-based level number
    pub number: u32,
    /// Fish rows in file order
    pub fish: Vec<(SmallFishType, usize)>,
    /// Bomb rows in file order
    pub bombs: Vec<(BombType, usize)>,
    /// Added once per fish type
    pub buffer: usize,
    /// Sum of target amounts
    pub target: u32,
    /// Longest target time limit, if any
    pub time_limit: Option<f32>,
    /// Coins for finishing
    pub reward_coins: u32,
}

impl LevelPlan {
    fn resolve(data: &LevelData) -> Result<Self, LevelError> {
        let level = data.level_number;
        let catalog = |source: CatalogError| LevelError::Catalog { level, source };

        let fish = data
            .small_objects
            .iter()
            .map(|row| -> Result<_, LevelError> {
                Ok((row.name.parse::<SmallFishType>().map_err(catalog)?, row.quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let bombs = data
            .enemies
            .iter()
            .map(|row| -> Result<_, LevelError> {
                Ok((row.name.parse::<BombType>().map_err(catalog)?, row.quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for target in &data.targets {
            for requirement in &target.requirements {
                requirement.kind.parse::<SmallFishType>().map_err(catalog)?;
            }
        }

        let time_limit = data
            .targets
            .iter()
            .map(|target| target.time_limit)
            .filter(|limit| *limit > 0.0)
            .reduce(f32::max);

        Ok(Self {
            number: level,
            fish,
            bombs,
            buffer: data.buffer_amount,
            target: data.targets.iter().map(|target| target.amount).sum(),
            time_limit,
            reward_coins: data.reward_coins.amount,
        })
    }
}

/// Validated level table
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: HashMap<u32, LevelPlan>,
}

impl LevelCatalog {
    /// Validate a parsed level file
    pub fn from_config(config: &LevelConfig) -> Result<Self, LevelError> {
        let mut levels = HashMap::with_capacity(config.levels.len());
        for data in &config.levels {
            let plan = LevelPlan::resolve(data)?;
            if levels.insert(plan.number, plan).is_some() {
                return Err(LevelError::DuplicateLevel(data.level_number));
            }
        }
        let last = levels.keys().copied().max().unwrap_or(0);
        if let Some(missing) = (1..=last).find(|level| !levels.contains_key(level)) {
            return Err(LevelError::MissingLevel(missing));
        }
        log::info!("Loaded {} levels", levels.len());
        Ok(Self { levels })
    }

    /// Load and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        Self::from_config(&LevelConfig::load_from_file(path)?)
    }

    /// Parse and validate level JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Self::from_config(&LevelConfig::from_str_as(json, ConfigFormat::Json)?)
    }

    /// Resolved level by number
    pub fn plan(&self, level: u32) -> Result<&LevelPlan, LevelError> {
        self.levels.get(&level).ok_or(LevelError::UnknownLevel(level))
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// No levels loaded
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelConfigProvider for LevelCatalog {
    fn last_level(&self) -> u32 {
        self.levels.keys().copied().max().unwrap_or(0)
    }

    fn pool_entries(
        &self,
        level: u32,
        prototypes: &PrototypeTable,
    ) -> Result<Vec<PoolEntry<SmallFishType, PrototypeId>>, LevelError> {
        let plan = self.plan(level)?;
        if let Some((missing, _)) = plan.fish.iter().find(|(fish, _)| !prototypes.contains_key(fish)) {
            return Err(LevelError::UnboundPrototype(*missing));
        }
        Ok(plan_entries(plan.fish.iter().copied(), plan.buffer, |fish| {
            prototypes.get(fish).copied().unwrap_or_default()
        }))
    }

    fn target_amount(&self, level: u32) -> Result<u32, LevelError> {
        Ok(self.plan(level)?.target)
    }

    fn reward_coins(&self, level: u32) -> u32 {
        self.levels.get(&level).map_or(0, |plan| plan.reward_coins)
    }

    fn bombs(&self, level: u32) -> Result<Vec<(BombType, usize)>, LevelError> {
        Ok(self.plan(level)?.bombs.clone())
    }

    fn time_limit(&self, level: u32) -> Result<Option<f32>, LevelError> {
        Ok(self.plan(level)?.time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneWorld;

    const LEVELS: &str = r#"{
        "levels": [
            {
                "levelNumber": 1,
                "targets": [
                    { "description": "Eat fish", "targetType": "Eat", "amount": 5,
                      "requirements": [ { "type": "GoldenSmallFish", "count": 5 } ], "timeLimit": 60 },
                    { "description": "Eat more", "targetType": "Eat", "amount": 3, "timeLimit": 90 }
                ],
                "smallObjects": [
                    { "name": "GoldenSmallFish", "size": 1.0, "quantity": 4 },
                    { "name": "CoralBeauty", "size": 0.8, "quantity": 2 },
                    { "name": "GoldenSmallFish", "size": 1.0, "quantity": 1 }
                ],
                "enemies": [ { "bomb": "SeaMine", "size": 1.5, "quantity": 2 } ],
                "bufferAmount": 3,
                "rewardCoins": { "amount": 50 }
            },
            {
                "levelNumber": 2,
                "targets": [ { "amount": 10 } ],
                "smallObjects": [ { "name": "Chelmon_Rostratus", "size": 1.0, "quantity": 6 } ]
            }
        ]
    }"#;

    fn bound_prototypes() -> PrototypeTable {
        let mut scene = SceneWorld::new();
        SmallFishType::ALL
            .iter()
            .map(|fish| (*fish, scene.register_prototype(fish.name())))
            .collect()
    }

    #[test]
    fn test_load_resolves_names() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.last_level(), 2);

        let plan = catalog.plan(1).unwrap();
        assert_eq!(plan.fish[1], (SmallFishType::CoralBeauty, 2));
        assert_eq!(plan.bombs, vec![(BombType::SeaMine, 2)]);
        assert_eq!(plan.time_limit, Some(90.0));
    }

    #[test]
    fn test_pool_entries_add_buffer_and_merge() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        let prototypes = bound_prototypes();
        let entries = catalog.pool_entries(1, &prototypes).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, SmallFishType::GoldenSmallFish);
        assert_eq!(entries[0].capacity, 8);
        assert_eq!(entries[0].prototype, prototypes[&SmallFishType::GoldenSmallFish]);
        assert_eq!(entries[1].capacity, 5);
    }

    #[test]
    fn test_missing_fields_default() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert_eq!(catalog.target_amount(2).unwrap(), 10);
        assert_eq!(catalog.reward_coins(2), 0);
        assert!(catalog.bombs(2).unwrap().is_empty());
        assert_eq!(catalog.time_limit(2).unwrap(), None);

        let entries = catalog.pool_entries(2, &bound_prototypes()).unwrap();
        assert_eq!(entries[0].capacity, 6);
    }

    #[test]
    fn test_target_and_reward() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert_eq!(catalog.target_amount(1).unwrap(), 8);
        assert_eq!(catalog.reward_coins(1), 50);
        assert_eq!(catalog.reward_coins(0), 0);
    }

    #[test]
    fn test_unknown_level() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        assert!(matches!(catalog.target_amount(7), Err(LevelError::UnknownLevel(7))));
        assert!(matches!(
            catalog.pool_entries(0, &bound_prototypes()),
            Err(LevelError::UnknownLevel(0))
        ));
    }

    #[test]
    fn test_unknown_fish_name_fails_load() {
        let json = r#"{ "levels": [ { "levelNumber": 3,
            "smallObjects": [ { "name": "Clownfish", "quantity": 2 } ] } ] }"#;
        let err = LevelCatalog::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            LevelError::Catalog { level: 3, source: CatalogError::UnknownFish(_) }
        ));
    }

    #[test]
    fn test_unknown_bomb_name_fails_load() {
        let json = r#"{ "levels": [ { "levelNumber": 1,
            "enemies": [ { "name": "None", "quantity": 1 } ] } ] }"#;
        assert!(matches!(
            LevelCatalog::from_json(json),
            Err(LevelError::Catalog { source: CatalogError::UnknownBomb(_), .. })
        ));
    }

    #[test]
    fn test_level_gap_fails_load() {
        let json = r#"{ "levels": [ { "levelNumber": 1 }, { "levelNumber": 3 }, { "levelNumber": 4 } ] }"#;
        assert!(matches!(LevelCatalog::from_json(json), Err(LevelError::MissingLevel(2))));

        let json = r#"{ "levels": [ { "levelNumber": 2 } ] }"#;
        assert!(matches!(LevelCatalog::from_json(json), Err(LevelError::MissingLevel(1))));
    }

    #[test]
    fn test_duplicate_level_fails_load() {
        let json = r#"{ "levels": [ { "levelNumber": 1 }, { "levelNumber": 1 } ] }"#;
        assert!(matches!(LevelCatalog::from_json(json), Err(LevelError::DuplicateLevel(1))));
    }

    #[test]
    fn test_bundled_levels_load() {
        let catalog = LevelCatalog::from_json(include_str!("../assets/levels.json")).unwrap();
        assert_eq!(catalog.last_level(), 3);
        assert_eq!(catalog.target_amount(3).unwrap(), 20);
        assert_eq!(catalog.bombs(3).unwrap().len(), 2);
    }

    #[test]
    fn test_unbound_prototype() {
        let catalog = LevelCatalog::from_json(LEVELS).unwrap();
        let mut prototypes = bound_prototypes();
        prototypes.remove(&SmallFishType::CoralBeauty);
        assert!(matches!(
            catalog.pool_entries(1, &prototypes),
            Err(LevelError::UnboundPrototype(SmallFishType::CoralBeauty))
        ));
    }
}
