use binrw::binrw;

use super::{Record, clamp_i16};

/// A map-space corner, in map units.
#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct Vertex {
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |x: &i32| clamp_i16(*x as i64))]
    pub x: i32,
    #[br(map = |raw: i16| raw as i32)]
    #[bw(map = |y: &i32| clamp_i16(*y as i64))]
    pub y: i32,
}

impl Vertex {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Record for Vertex {
    const SIZE: usize = 4;
}
