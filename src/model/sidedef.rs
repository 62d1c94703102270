use binrw::binrw;

use super::{Record, clamp_i16, index_from_u16, index_to_u16};
use crate::wad::lump::clamp_name;
use crate::wad::{NAME_LEN, decode_name, encode_name};

#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Sidedef {
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |offset: &i32| clamp_i16(*offset as i64))]
    pub x_offset: i32,
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |offset: &i32| clamp_i16(*offset as i64))]
    pub y_offset: i32,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    pub upper: String,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    pub lower: String,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    pub middle: String,
    #[br(map = |raw: u16| index_from_u16(raw).unwrap_or(0))]
    #[bw(map = |sector: &usize| index_to_u16(Some(*sector)))]
    pub sector: usize,
}

impl Sidedef {
    pub fn new(upper: &str, lower: &str, middle: &str, sector: usize) -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            upper: clamp_name(upper),
            lower: clamp_name(lower),
            middle: clamp_name(middle),
            sector,
        }
    }
}

impl Record for Sidedef {
    const SIZE: usize = 30;
}
