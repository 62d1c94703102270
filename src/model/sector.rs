use binrw::binrw;

use super::{Record, clamp_i16};
use crate::wad::lump::clamp_name;
use crate::wad::{NAME_LEN, decode_name, encode_name};

/// A flat-floor, flat-ceiling region.
///
/// Built only through [`Sector::new`], which clamps every field, so a
/// `Sector` always satisfies `floor_height <= ceiling_height` and
/// `light_level <= 255`. Decoding enforces the same bounds.
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Sector {
    floor_height: i16,
    #[br(map = |raw: i16| raw.max(floor_height))]
    ceiling_height: i16,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    floor_texture: String,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    ceiling_texture: String,
    #[br(map = |raw: i16| raw.clamp(0, 255) as u8)]
    #[bw(map = |light: &u8| *light as i16)]
    light_level: u8,
    #[br(map = |raw: i16| raw.max(0))]
    special: i16,
    #[br(map = |raw: i16| raw.max(0))]
    tag: i16,
}

impl Sector {
    pub fn new(
        floor_height: i32,
        ceiling_height: i32,
        floor_texture: &str,
        ceiling_texture: &str,
        light_level: i32,
        special: i32,
        tag: i32,
    ) -> Self {
        let floor_height = clamp_i16(floor_height as i64);
        let ceiling_height = clamp_i16(ceiling_height as i64).max(floor_height);
        Self {
            floor_height,
            ceiling_height,
            floor_texture: clamp_name(floor_texture),
            ceiling_texture: clamp_name(ceiling_texture),
            light_level: light_level.clamp(0, 255) as u8,
            special: clamp_i16(special.max(0) as i64),
            tag: clamp_i16(tag.max(0) as i64),
        }
    }

    pub fn floor_height(&self) -> i16 {
        self.floor_height
    }

    pub fn ceiling_height(&self) -> i16 {
        self.ceiling_height
    }

    pub fn floor_texture(&self) -> &str {
        &self.floor_texture
    }

    pub fn ceiling_texture(&self) -> &str {
        &self.ceiling_texture
    }

    pub fn light_level(&self) -> u8 {
        self.light_level
    }

    pub fn special(&self) -> i16 {
        self.special
    }

    pub fn tag(&self) -> i16 {
        self.tag
    }
}

impl Record for Sector {
    const SIZE: usize = 26;
}
