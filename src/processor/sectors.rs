//! Pass A: group cells into sectors by 4-connected flood fill.

use super::grid::{Grid, TileType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLabel {
    /// Not reached yet; never survives past `label_sectors`.
    Unvisited,
    Wall,
    Sector(usize),
}

impl CellLabel {
    pub fn sector(self) -> Option<usize> {
        match self {
            CellLabel::Sector(s) => Some(s),
            _ => None,
        }
    }
}

/// Result of Pass A: a definite label per cell plus the classification
/// of each sector, indexed by sector id.
#[derive(Debug, Clone)]
pub struct SectorLabels {
    width: usize,
    height: usize,
    labels: Vec<CellLabel>,
    pub kinds: Vec<TileType>,
}

impl SectorLabels {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn sector_count(&self) -> usize {
        self.kinds.len()
    }

    /// Label at `(x, y)`; everything outside the grid is wall.
    pub fn get(&self, x: i64, y: i64) -> CellLabel {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return CellLabel::Wall;
        }
        self.labels[y as usize * self.width + x as usize]
    }

    pub fn labels(&self) -> &[CellLabel] {
        &self.labels
    }
}

/// Label every cell. Cells are scanned row-major; the first unvisited
/// non-wall cell starts a new sector. The fill uses an explicit stack so
/// large rooms cannot overflow the call stack.
pub fn label_sectors(grid: &Grid) -> SectorLabels {
    let (w, h) = (grid.width(), grid.height());
    let mut labels = vec![CellLabel::Unvisited; w * h];
    let mut kinds = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let i = grid.index(x, y);
            if labels[i] != CellLabel::Unvisited {
                continue;
            }

            let kind = grid.get(x, y);
            if kind.is_wall() {
                labels[i] = CellLabel::Wall;
                continue;
            }

            let id = kinds.len();
            kinds.push(kind);

            stack.push((x, y));
            while let Some((cx, cy)) = stack.pop() {
                let ci = grid.index(cx, cy);
                if labels[ci] != CellLabel::Unvisited || grid.get(cx, cy) != kind {
                    continue;
                }
                labels[ci] = CellLabel::Sector(id);

                if cx > 0 {
                    stack.push((cx - 1, cy));
                }
                if cx + 1 < w {
                    stack.push((cx + 1, cy));
                }
                if cy > 0 {
                    stack.push((cx, cy - 1));
                }
                if cy + 1 < h {
                    stack.push((cx, cy + 1));
                }
            }
        }
    }

    SectorLabels {
        width: w,
        height: h,
        labels,
        kinds,
    }
}
