use binrw::binrw;
use bitflags::bitflags;

use super::{Record, clamp_i16};

bitflags! {
    /// Which skill levels / modes a thing appears in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ThingOptions: u16 {
        const SKILL_12         = 1;
        const SKILL_3          = 2;
        const SKILL_45         = 4;
        const DEAF             = 8;
        const MULTIPLAYER_ONLY = 16;

        const ALL_SKILLS = Self::SKILL_12.bits() | Self::SKILL_3.bits() | Self::SKILL_45.bits();
    }
}

/// A placed point entity: player start, monster, pickup.
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Thing {
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |x: &i32| clamp_i16(*x as i64))]
    pub x: i32,
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |y: &i32| clamp_i16(*y as i64))]
    pub y: i32,
    /// Degrees, 0 = east, counter-clockwise.
    #[br(map = |raw: i16| (raw as i32).rem_euclid(360))]
    #[bw(map = |angle: &i32| clamp_i16(*angle as i64))]
    pub angle: i32,
    pub kind: u16,
    #[br(map = |bits: u16| ThingOptions::from_bits_retain(bits))]
    #[bw(map = |options: &ThingOptions| options.bits())]
    pub options: ThingOptions,
}

impl Thing {
    pub fn new(x: i32, y: i32, kind: u16, angle: i32, options: ThingOptions) -> Self {
        Self {
            x,
            y,
            angle: angle.rem_euclid(360),
            kind,
            options,
        }
    }
}

impl Record for Thing {
    const SIZE: usize = 10;
}
