use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThingCategory {
    AmmoLarge,
    AmmoSmall,
    Armor,
    Health,
    MonstersEasy,
    MonstersAverage,
    MonstersHard,
    MonstersVeryHard,
    PowerUps,
    WeaponsHigh,
    WeaponsLow,
}

/// How a category's skill flags are distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkillVariation {
    #[default]
    None,
    MoreInEasyMode,
    MoreInHardMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThingSpawn {
    pub types: Vec<u16>,
    /// `[min, max]` things per 1000 free tiles.
    pub count: [u32; 2],
    pub skill_variation: SkillVariation,
}

impl Default for ThingSpawn {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            count: [0, 0],
            skill_variation: SkillVariation::None,
        }
    }
}

impl ThingSpawn {
    fn new(types: &[u16], min: u32, max: u32, skill_variation: SkillVariation) -> Self {
        Self {
            types: types.to_vec(),
            count: [min, max],
            skill_variation,
        }
    }

    /// Count range scaled by map size, `min <= max` guaranteed.
    pub fn scaled_range(&self, multiplier: f32) -> (u32, u32) {
        let [a, b] = self.count;
        let lo = (a.min(b) as f32 * multiplier) as u32;
        let hi = (a.max(b) as f32 * multiplier) as u32;
        (lo, hi)
    }
}

/// Stock Doom II type codes.
pub fn default_things() -> BTreeMap<ThingCategory, ThingSpawn> {
    use SkillVariation::*;
    use ThingCategory::*;

    BTreeMap::from([
        (AmmoLarge, ThingSpawn::new(&[2046, 2048, 2049, 17], 10, 20, MoreInEasyMode)),
        (AmmoSmall, ThingSpawn::new(&[2007, 2008, 2010, 2047], 20, 40, MoreInEasyMode)),
        (Armor, ThingSpawn::new(&[2015, 2018, 2019], 5, 10, MoreInEasyMode)),
        (Health, ThingSpawn::new(&[2011, 2012, 2014], 15, 30, MoreInEasyMode)),
        (MonstersEasy, ThingSpawn::new(&[3004, 9, 3001], 30, 50, None)),
        (MonstersAverage, ThingSpawn::new(&[3002, 58, 3006, 65], 15, 30, None)),
        (MonstersHard, ThingSpawn::new(&[3005, 69, 66, 67], 5, 15, MoreInHardMode)),
        (MonstersVeryHard, ThingSpawn::new(&[3003, 64, 71], 0, 5, MoreInHardMode)),
        (PowerUps, ThingSpawn::new(&[2013, 2022, 2023, 2024, 2045], 1, 4, None)),
        (WeaponsHigh, ThingSpawn::new(&[2003, 2004, 2006], 1, 3, None)),
        (WeaponsLow, ThingSpawn::new(&[2001, 82, 2002, 2005], 2, 6, None)),
    ])
}
