//! Pass B: trace sector boundaries into merged linedef runs.
//!
//! Every cell edge between two different labels is covered by exactly one
//! linedef. Runs along north/south edges walk east, runs along east/west
//! edges walk south, so a row-major scan always starts a run at its first
//! cell and the run comes out maximal.

use log::trace;

use super::attributes::{SectorInfo, one_sided_sidedef, two_sided_sidedef};
use super::sectors::{CellLabel, SectorLabels};
use crate::model::{DoomMap, Linedef, LinedefFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Offset to the neighbouring cell, grid Y down.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Step between consecutive cells of a run along this edge.
    fn walk(self) -> (i64, i64) {
        match self {
            Direction::North | Direction::South => (1, 0),
            Direction::East | Direction::West => (0, 1),
        }
    }

    /// Corner of the cell the edge starts at, relative to its top-left.
    fn corner(self) -> (i64, i64) {
        match self {
            Direction::North | Direction::West => (0, 0),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
        }
    }

    /// Whether start→end has the cell on its left and must be reversed so
    /// the right side faces the cell.
    fn flips(self) -> bool {
        matches!(self, Direction::South | Direction::West)
    }

    /// Two-sided edges are only traced from these.
    fn is_primary(self) -> bool {
        matches!(self, Direction::North | Direction::West)
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Emit every boundary linedef of `labels` into `map`. `sectors` is
/// indexed by sector id; corners are scaled by `cell_size` with Y negated.
pub fn trace_lines(
    labels: &SectorLabels,
    sectors: &[SectorInfo],
    cell_size: i32,
    map: &mut DoomMap,
) {
    let (w, h) = (labels.width(), labels.height());
    let mut covered = vec![0u8; w * h];

    for y in 0..h {
        for x in 0..w {
            let Some(own) = labels.get(x as i64, y as i64).sector() else {
                continue;
            };

            for dir in Direction::ALL {
                if covered[y * w + x] & dir.bit() != 0 {
                    continue;
                }

                let (dx, dy) = dir.delta();
                let across = labels.get(x as i64 + dx, y as i64 + dy);
                if across == CellLabel::Sector(own) {
                    continue;
                }
                if across.sector().is_some() && !dir.is_primary() {
                    continue;
                }

                let length = trace_run(labels, &mut covered, x, y, dir, own, across);
                let (cx, cy) = dir.corner();
                let (wx, wy) = dir.walk();
                let start = (x as i64 + cx, y as i64 + cy);
                let end = (start.0 + wx * length, start.1 + wy * length);

                let mut v1 = add_corner(map, start, cell_size);
                let mut v2 = add_corner(map, end, cell_size);
                if dir.flips() {
                    std::mem::swap(&mut v1, &mut v2);
                }

                match across.sector() {
                    None => emit_one_sided(map, v1, v2, own, &sectors[own]),
                    Some(other) => emit_two_sided(map, v1, v2, own, other, sectors),
                }
            }
        }
    }

    trace!(
        "{}: traced {} linedefs over {} vertices",
        map.name,
        map.linedefs.len(),
        map.vertices().len()
    );
}

/// Walk from `(x, y)` while both sides keep their labels, marking each
/// unit edge covered. Returns the run length in cells.
fn trace_run(
    labels: &SectorLabels,
    covered: &mut [u8],
    x: usize,
    y: usize,
    dir: Direction,
    own: usize,
    across: CellLabel,
) -> i64 {
    let w = labels.width();
    let (dx, dy) = dir.delta();
    let (wx, wy) = dir.walk();

    let mut length = 0;
    let (mut cx, mut cy) = (x as i64, y as i64);
    loop {
        if labels.get(cx, cy) != CellLabel::Sector(own) || labels.get(cx + dx, cy + dy) != across {
            break;
        }
        let i = cy as usize * w + cx as usize;
        if covered[i] & dir.bit() != 0 {
            break;
        }
        covered[i] |= dir.bit();

        length += 1;
        cx += wx;
        cy += wy;
    }
    length
}

fn add_corner(map: &mut DoomMap, (x, y): (i64, i64), cell_size: i32) -> usize {
    map.add_vertex(x as i32 * cell_size, -(y as i32) * cell_size)
}

fn emit_one_sided(map: &mut DoomMap, v1: usize, v2: usize, sector: usize, info: &SectorInfo) {
    let side = map.add_sidedef(one_sided_sidedef(sector, info));
    map.linedefs.push(Linedef::one_sided(
        v1,
        v2,
        LinedefFlags::IMPASSABLE | LinedefFlags::LOWER_UNPEGGED,
        side,
    ));
}

/// `v1 → v2` has `own` on its right. A sector with an action special
/// gets the back side so the front, the activating side, faces out.
fn emit_two_sided(
    map: &mut DoomMap,
    mut v1: usize,
    mut v2: usize,
    own: usize,
    other: usize,
    sectors: &[SectorInfo],
) {
    let (mut front, mut back) = (own, other);
    if sectors[own].linedef_special > 0 {
        std::mem::swap(&mut v1, &mut v2);
        std::mem::swap(&mut front, &mut back);
    }

    let special = sectors[own]
        .linedef_special
        .max(sectors[other].linedef_special);
    let right = map.add_sidedef(two_sided_sidedef(front, &sectors[front], &sectors[back]));
    let left = map.add_sidedef(two_sided_sidedef(back, &sectors[back], &sectors[front]));
    map.linedefs
        .push(Linedef::two_sided(v1, v2, special, right, left));
}
