//! Attribute resolution: tile classification + theme → sector attributes
//! and sidedef texture choices.

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::TileType;
use crate::config::{Theme, ThemeSector, ThemeTexture};
use crate::model::{NO_TEXTURE, Sector, Sidedef};

/// DR door open-wait-close.
pub const SPECIAL_DOOR: i32 = 1;
/// D1 door open-stay, used for secret walls.
pub const SPECIAL_SECRET_DOOR: i32 = 31;
/// W1 exit level.
pub const SPECIAL_EXIT: i32 = 52;
/// Sector special flagging a secret area.
pub const SECTOR_SECRET: i32 = 9;

const DOOR_TRACK: &str = "DOORTRAK";
const DOOR_CEILING: &str = "CRATOP1";
const SKY: &str = "F_SKY1";

/// One random pick per theme texture slot, fixed for a whole map.
#[derive(Debug, Clone)]
pub struct ThemeTextures {
    picks: Vec<(ThemeTexture, String)>,
}

impl ThemeTextures {
    pub fn pick<R: Rng + ?Sized>(theme: &Theme, rng: &mut R) -> Self {
        let picks = ThemeTexture::ALL
            .iter()
            .map(|&slot| (slot, random_name(theme.textures(slot), rng)))
            .collect();
        Self { picks }
    }

    pub fn get(&self, slot: ThemeTexture) -> &str {
        self.picks
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, name)| name.as_str())
            .unwrap_or(NO_TEXTURE)
    }
}

fn random_name<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> String {
    names
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| NO_TEXTURE.to_string())
}

/// Everything synthesis needs to know about a sector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorInfo {
    pub kind: TileType,
    pub floor_height: i32,
    pub ceiling_height: i32,
    pub floor_texture: String,
    pub ceiling_texture: String,
    pub light_level: i32,
    pub sector_special: i32,
    pub linedef_special: i32,
    pub wall_texture: String,
    pub wall_texture_upper: String,
    pub wall_texture_lower: String,
}

impl SectorInfo {
    /// Resolve the attributes of a sector of the given classification.
    pub fn resolve<R: Rng + ?Sized>(
        kind: TileType,
        theme: &Theme,
        textures: &ThemeTextures,
        rng: &mut R,
    ) -> Self {
        let base = theme.sector(ThemeSector::Default);
        let mut floor_height = base.floor();
        let mut ceiling_height = base.ceiling();
        let mut light_level = base.light_level;
        let mut sector_special = 0;
        let mut linedef_special = 0;

        let mut floor_texture = textures.get(ThemeTexture::Floor).to_string();
        let mut ceiling_texture = textures.get(ThemeTexture::Ceiling).to_string();
        let mut wall_texture = random_name(theme.textures(ThemeTexture::Wall), rng);
        let mut wall_texture_upper = None;

        let themed = |s: ThemeSector| {
            let t = theme.sector(s);
            (t.floor(), t.ceiling(), t.light_level, t.sector_special)
        };

        match kind {
            TileType::Door => {
                ceiling_height = floor_height;
                linedef_special = SPECIAL_DOOR;
                ceiling_texture = DOOR_CEILING.to_string();
                wall_texture = DOOR_TRACK.to_string();
                wall_texture_upper = Some(textures.get(ThemeTexture::Door).to_string());
            }
            TileType::DoorSide => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::DoorSide);
                wall_texture = textures.get(ThemeTexture::DoorSide).to_string();
            }
            TileType::Entrance => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::Entrance);
                floor_texture = textures.get(ThemeTexture::FloorEntrance).to_string();
            }
            TileType::Exit => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::Exit);
                linedef_special = SPECIAL_EXIT;
                floor_texture = textures.get(ThemeTexture::FloorExit).to_string();
            }
            TileType::RoomExterior => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::Exterior);
                ceiling_texture = SKY.to_string();
                if !theme.textures(ThemeTexture::FloorExterior).is_empty() {
                    floor_texture = textures.get(ThemeTexture::FloorExterior).to_string();
                }
                if !theme.textures(ThemeTexture::WallExterior).is_empty() {
                    wall_texture = random_name(theme.textures(ThemeTexture::WallExterior), rng);
                }
            }
            TileType::RoomSpecialCeiling => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::SpecialCeiling);
                ceiling_texture = textures.get(ThemeTexture::CeilingSpecial).to_string();
            }
            TileType::RoomSpecialFloor => {
                (floor_height, ceiling_height, light_level, sector_special) =
                    themed(ThemeSector::SpecialFloor);
                floor_texture = textures.get(ThemeTexture::FloorSpecial).to_string();
            }
            TileType::Secret => {
                ceiling_height = floor_height;
                linedef_special = SPECIAL_SECRET_DOOR;
                sector_special = SECTOR_SECRET;
                wall_texture = DOOR_TRACK.to_string();
            }
            TileType::Room | TileType::Wall => {}
        }

        Self {
            kind,
            floor_height,
            ceiling_height: ceiling_height.max(floor_height),
            floor_texture,
            ceiling_texture,
            light_level,
            sector_special,
            linedef_special,
            wall_texture_upper: wall_texture_upper.unwrap_or_else(|| wall_texture.clone()),
            wall_texture_lower: wall_texture.clone(),
            wall_texture,
        }
    }

    pub fn to_sector(&self) -> Sector {
        Sector::new(
            self.floor_height,
            self.ceiling_height,
            &self.floor_texture,
            &self.ceiling_texture,
            self.light_level,
            self.sector_special,
            0,
        )
    }
}

/// Sidedef on a two-sided line, facing `sector` with `neighbor` behind it.
/// Upper/lower bands only get a texture where the neighbour's ceiling is
/// lower or its floor is higher.
pub fn two_sided_sidedef(sector_id: usize, sector: &SectorInfo, neighbor: &SectorInfo) -> Sidedef {
    let (upper_source, lower_source) = if neighbor.kind == TileType::Door {
        (&neighbor.wall_texture_upper, &neighbor.wall_texture_lower)
    } else {
        (&sector.wall_texture, &sector.wall_texture)
    };

    let upper = if neighbor.ceiling_height < sector.ceiling_height {
        upper_source.as_str()
    } else {
        NO_TEXTURE
    };
    let lower = if neighbor.floor_height > sector.floor_height {
        lower_source.as_str()
    } else {
        NO_TEXTURE
    };

    Sidedef::new(upper, lower, NO_TEXTURE, sector_id)
}

/// Sidedef on a one-sided wall: only the middle band is drawn.
pub fn one_sided_sidedef(sector_id: usize, sector: &SectorInfo) -> Sidedef {
    Sidedef::new(NO_TEXTURE, NO_TEXTURE, &sector.wall_texture, sector_id)
}
