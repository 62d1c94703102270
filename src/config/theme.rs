//! Themes: per-sector-kind heights/light/special and per-slot texture lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sector kinds that carry their own height/light/special in a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThemeSector {
    Default,
    DoorSide,
    Entrance,
    Exit,
    Exterior,
    SpecialCeiling,
    SpecialFloor,
}

/// Texture slots a theme provides candidate names for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThemeTexture {
    Ceiling,
    CeilingSpecial,
    Door,
    DoorSide,
    Floor,
    FloorEntrance,
    FloorExit,
    FloorExterior,
    FloorSpecial,
    Wall,
    WallExterior,
}

impl ThemeTexture {
    pub const ALL: [ThemeTexture; 11] = [
        ThemeTexture::Ceiling,
        ThemeTexture::CeilingSpecial,
        ThemeTexture::Door,
        ThemeTexture::DoorSide,
        ThemeTexture::Floor,
        ThemeTexture::FloorEntrance,
        ThemeTexture::FloorExit,
        ThemeTexture::FloorExterior,
        ThemeTexture::FloorSpecial,
        ThemeTexture::Wall,
        ThemeTexture::WallExterior,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorSettings {
    /// `[floor, ceiling]`
    pub height: [i32; 2],
    pub light_level: i32,
    pub sector_special: i32,
}

impl Default for SectorSettings {
    fn default() -> Self {
        Self {
            height: [0, 128],
            light_level: 160,
            sector_special: 0,
        }
    }
}

impl SectorSettings {
    fn new(floor: i32, ceiling: i32, light_level: i32, sector_special: i32) -> Self {
        Self {
            height: [floor, ceiling],
            light_level,
            sector_special,
        }
    }

    pub fn floor(&self) -> i32 {
        self.height[0]
    }

    pub fn ceiling(&self) -> i32 {
        self.height[1]
    }

    /// Order the heights, clamp light to 0..=255, forbid negative specials.
    pub fn normalise(&mut self) {
        let [a, b] = self.height;
        self.height = [a.min(b), a.max(b)];
        self.light_level = self.light_level.clamp(0, 255);
        self.sector_special = self.sector_special.max(0);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub sectors: BTreeMap<ThemeSector, SectorSettings>,
    pub textures: BTreeMap<ThemeTexture, Vec<String>>,
}

impl Theme {
    /// Settings for `kind`, falling back to the theme's `Default` entry.
    pub fn sector(&self, kind: ThemeSector) -> SectorSettings {
        self.sectors
            .get(&kind)
            .or_else(|| self.sectors.get(&ThemeSector::Default))
            .cloned()
            .unwrap_or_default()
    }

    pub fn textures(&self, slot: ThemeTexture) -> &[String] {
        self.textures.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn normalise(&mut self) {
        for settings in self.sectors.values_mut() {
            settings.normalise();
        }
    }
}

impl Default for Theme {
    /// A tech-base look built from stock textures.
    fn default() -> Self {
        let sectors = BTreeMap::from([
            (ThemeSector::Default, SectorSettings::new(0, 128, 160, 0)),
            (ThemeSector::DoorSide, SectorSettings::new(0, 128, 160, 0)),
            (ThemeSector::Entrance, SectorSettings::new(0, 128, 192, 0)),
            (ThemeSector::Exit, SectorSettings::new(0, 128, 192, 0)),
            (ThemeSector::Exterior, SectorSettings::new(0, 256, 224, 0)),
            (ThemeSector::SpecialCeiling, SectorSettings::new(0, 160, 208, 0)),
            (ThemeSector::SpecialFloor, SectorSettings::new(-16, 128, 176, 7)),
        ]);

        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let textures = BTreeMap::from([
            (ThemeTexture::Ceiling, names(&["CEIL3_5", "CEIL5_1", "FLAT4"])),
            (ThemeTexture::CeilingSpecial, names(&["TLITE6_4", "TLITE6_5", "CEIL1_2"])),
            (ThemeTexture::Door, names(&["BIGDOOR2", "BIGDOOR4", "DOOR3"])),
            (ThemeTexture::DoorSide, names(&["DOORSTOP", "LITE3"])),
            (ThemeTexture::Floor, names(&["FLOOR4_8", "FLOOR5_1", "FLAT14"])),
            (ThemeTexture::FloorEntrance, names(&["FLOOR7_2"])),
            (ThemeTexture::FloorExit, names(&["GATE1"])),
            (ThemeTexture::FloorExterior, names(&["GRASS1", "FLAT10"])),
            (ThemeTexture::FloorSpecial, names(&["NUKAGE1", "FWATER1"])),
            (ThemeTexture::Wall, names(&["STARTAN2", "STARG3", "TEKWALL4", "BROWN1"])),
            (ThemeTexture::WallExterior, names(&["BROWN144", "STONE2"])),
        ]);

        Self { sectors, textures }
    }
}
