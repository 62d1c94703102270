//! Pixel colours → tile classifications, and colour strings from the config.

use crate::processor::grid::TileType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }
}

/// Fixed palette. Anything not listed is a plain room.
const PALETTE: [(Rgb, TileType); 9] = [
    (Rgb::WHITE, TileType::Wall),
    (Rgb::new(0, 0, 255), TileType::RoomExterior),
    (Rgb::new(0, 128, 0), TileType::RoomSpecialCeiling),
    (Rgb::new(255, 0, 0), TileType::RoomSpecialFloor),
    (Rgb::new(128, 128, 0), TileType::Door),
    (Rgb::new(255, 0, 255), TileType::Secret),
    (Rgb::new(255, 255, 0), TileType::Entrance),
    (Rgb::new(0, 255, 0), TileType::Exit),
    (Rgb::new(0, 0, 0), TileType::Room),
];

pub fn classify(pixel: Rgb) -> TileType {
    PALETTE
        .iter()
        .find(|(c, _)| *c == pixel)
        .map(|(_, t)| *t)
        .unwrap_or(TileType::Room)
}

const NAMED_COLORS: [(&str, Rgb); 14] = [
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::WHITE),
    ("red", Rgb::new(255, 0, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("olive", Rgb::new(128, 128, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("gray", Rgb::new(128, 128, 128)),
    ("brown", Rgb::new(165, 42, 42)),
];

/// Parse `#RRGGBB`, `#RGB`, `r,g,b` or a colour name (case-insensitive).
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim();

    if let Some(hex) = s.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        return match digits.as_slice() {
            [r1, r2, g1, g2, b1, b2] => Some(Rgb::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
            [r, g, b] => Some(Rgb::new(r * 17, g * 17, b * 17)),
            _ => None,
        };
    }

    if s.contains(',') {
        let parts: Vec<u8> = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        return match parts.as_slice() {
            [r, g, b] => Some(Rgb::new(*r, *g, *b)),
            _ => None,
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, c)| *c)
}
