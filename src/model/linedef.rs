use binrw::binrw;
use bitflags::bitflags;

use super::{Record, clamp_i16, index_from_u16, index_to_u16};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LinedefFlags: u16 {
        const IMPASSABLE      = 1;
        const BLOCKS_MONSTERS = 2;
        const TWO_SIDED       = 4;
        const UPPER_UNPEGGED  = 8;
        const LOWER_UNPEGGED  = 16;
        const SECRET          = 32;
        const BLOCKS_SOUND    = 64;
        const NOT_ON_MAP      = 128;
        const ALREADY_ON_MAP  = 256;
    }
}

/// A directed wall segment. The right sidedef is the front face: it is on
/// the right when walking from `v1` to `v2`.
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Linedef {
    #[br(map = |raw: u16| index_from_u16(raw).unwrap_or(0))]
    #[bw(map = |v: &usize| index_to_u16(Some(*v)))]
    pub v1: usize,
    #[br(map = |raw: u16| index_from_u16(raw).unwrap_or(0))]
    #[bw(map = |v: &usize| index_to_u16(Some(*v)))]
    pub v2: usize,
    #[br(map = |bits: u16| LinedefFlags::from_bits_retain(bits))]
    #[bw(map = |flags: &LinedefFlags| flags.bits())]
    pub flags: LinedefFlags,
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |special: &i32| clamp_i16(*special as i64))]
    pub special: i32,
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |tag: &i32| clamp_i16(*tag as i64))]
    pub tag: i32,
    #[br(map = |raw: u16| index_from_u16(raw).unwrap_or(0))]
    #[bw(map = |side: &usize| index_to_u16(Some(*side)))]
    pub right: usize,
    #[br(map = |raw: u16| index_from_u16(raw))]
    #[bw(map = |side: &Option<usize>| index_to_u16(*side))]
    pub left: Option<usize>,
}

impl Linedef {
    /// Wall against solid rock: impassable, one sidedef.
    pub fn one_sided(v1: usize, v2: usize, flags: LinedefFlags, right: usize) -> Self {
        Self {
            v1,
            v2,
            flags,
            special: 0,
            tag: 0,
            right,
            left: None,
        }
    }

    pub fn two_sided(v1: usize, v2: usize, special: i32, right: usize, left: usize) -> Self {
        Self {
            v1,
            v2,
            flags: LinedefFlags::TWO_SIDED,
            special,
            tag: 0,
            right,
            left: Some(left),
        }
    }
}

impl Record for Linedef {
    const SIZE: usize = 14;
}
