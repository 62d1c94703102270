//! The tile grid the synthesis passes run over.
//!
//! One source pixel becomes a `divisions × divisions` block of cells so
//! that doors can be carved out of a single pixel. Grid Y grows downward.

use crate::parser::SourceImage;
use crate::parser::palette::classify;

/// Map units per source pixel.
pub const TILE_SIZE: i32 = 64;

/// Cells per source pixel along each axis.
pub const SUBTILE_DIVISIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Wall,
    Room,
    RoomExterior,
    RoomSpecialCeiling,
    RoomSpecialFloor,
    Door,
    DoorSide,
    Secret,
    Entrance,
    Exit,
}

impl TileType {
    pub fn is_wall(self) -> bool {
        self == TileType::Wall
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    divisions: usize,
    cells: Vec<TileType>,
}

impl Grid {
    /// A grid with one cell per tile.
    pub fn new(width: usize, height: usize, cells: Vec<TileType>) -> Self {
        assert_eq!(cells.len(), width * height, "cell buffer size mismatch");
        Self {
            width,
            height,
            divisions: 1,
            cells,
        }
    }

    /// Classify every pixel and subdivide it.
    ///
    /// The top-left pixel is the theme marker and is read as wall. With
    /// `entrance_and_exit` off, entrance and exit pixels become rooms.
    pub fn from_image(image: &SourceImage, entrance_and_exit: bool) -> Self {
        let div = SUBTILE_DIVISIONS;
        let (w, h) = (image.width(), image.height());

        let tile_at = |x: i64, y: i64| -> Option<TileType> {
            if x == 0 && y == 0 {
                return Some(TileType::Wall);
            }
            let tile = classify(image.get(x, y)?);
            Some(match tile {
                TileType::Entrance | TileType::Exit if !entrance_and_exit => TileType::Room,
                t => t,
            })
        };

        let mut cells = vec![TileType::Wall; w * div * h * div];
        let stride = w * div;

        for y in 0..h {
            for x in 0..w {
                let (xi, yi) = (x as i64, y as i64);
                let Some(tile) = tile_at(xi, yi) else { continue };

                // Door stripe runs across the passage: if both horizontal
                // neighbours are solid, the passage is north-south.
                // Any wall-like tile counts as solid, and so does the outside of the image.
                let stripe_rows = tile == TileType::Door
                    && tile_at(xi - 1, yi).is_none_or(TileType::is_wall)
                    && tile_at(xi + 1, yi).is_none_or(TileType::is_wall);

                for sy in 0..div {
                    for sx in 0..div {
                        let sub = if tile == TileType::Door {
                            let along = if stripe_rows { sy } else { sx };
                            if along == div / 2 - 1 || along == div / 2 {
                                TileType::Door
                            } else {
                                TileType::DoorSide
                            }
                        } else {
                            tile
                        };
                        cells[(y * div + sy) * stride + x * div + sx] = sub;
                    }
                }
            }
        }

        Self {
            width: w * div,
            height: h * div,
            divisions: div,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Map units per cell edge.
    pub fn cell_size(&self) -> i32 {
        TILE_SIZE / self.divisions as i32
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> TileType {
        self.cells[self.index(x, y)]
    }

    pub fn cells(&self) -> &[TileType] {
        &self.cells
    }
}
