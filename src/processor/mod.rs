//! Map synthesis from a classified tile grid.
//!
//! Grid → sectors (Pass A) → linedefs (Pass B) → things. Nothing in here
//! touches the filesystem; every random decision goes through the `rng`
//! the caller passes in.
pub mod attributes;
pub mod grid;
pub mod lines;
pub mod sectors;
pub mod things;

pub use grid::{Grid, TileType};

use log::info;
use rand::Rng;

use crate::config::{Preferences, Theme};
use crate::model::DoomMap;
use crate::parser::SourceImage;
use attributes::{SectorInfo, ThemeTextures};

/// Build the geometry of one map: sectors, sidedefs, linedefs, vertices.
pub fn synthesize<R: Rng + ?Sized>(name: &str, grid: &Grid, theme: &Theme, rng: &mut R) -> DoomMap {
    let labels = sectors::label_sectors(grid);

    let textures = ThemeTextures::pick(theme, rng);
    let infos: Vec<SectorInfo> = labels
        .kinds
        .iter()
        .map(|&kind| SectorInfo::resolve(kind, theme, &textures, rng))
        .collect();

    let mut map = DoomMap::new(name);
    map.sectors = infos.iter().map(SectorInfo::to_sector).collect();
    lines::trace_lines(&labels, &infos, grid.cell_size(), &mut map);
    map
}

/// Full pipeline for one source image: pick the theme from the marker
/// pixel, subdivide, synthesise and place things.
pub fn generate<R: Rng + ?Sized>(
    name: &str,
    image: &SourceImage,
    prefs: &Preferences,
    rng: &mut R,
) -> DoomMap {
    let theme = image
        .get(0, 0)
        .map(|marker| prefs.theme_for(marker))
        .unwrap_or(&prefs.default_theme);

    let grid = Grid::from_image(image, prefs.generate_entrance_and_exit);
    let mut map = synthesize(name, &grid, theme, rng);
    map.things = things::place_things(&grid, prefs, rng);

    info!(
        "{name}: {} sectors, {} linedefs, {} sidedefs, {} vertices, {} things",
        map.sectors.len(),
        map.linedefs.len(),
        map.sidedefs.len(),
        map.vertices().len(),
        map.things.len()
    );
    map
}
