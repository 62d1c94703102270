//! Placement pass: player starts, deathmatch starts and themed things on
//! free source tiles.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Grid, TILE_SIZE, TileType};
use crate::config::{Preferences, SkillVariation};
use crate::model::{Thing, ThingOptions};

const PLAYER_COUNT: u16 = 4;
const DEATHMATCH_START: u16 = 11;
const DEATHMATCH_STARTS: usize = 8;
/// Facing when no neighbouring tile is open.
const DEFAULT_ANGLE: i32 = 90;

type Tile = (usize, usize);

/// Classification of a source tile, read from its top-left cell.
fn tile_type(grid: &Grid, (tx, ty): Tile) -> Option<TileType> {
    let div = grid.divisions();
    let (x, y) = (tx * div, ty * div);
    grid.contains(x as i64, y as i64).then(|| grid.get(x, y))
}

fn tiles(grid: &Grid) -> impl Iterator<Item = Tile> + '_ {
    let div = grid.divisions();
    let (w, h) = (grid.width() / div, grid.height() / div);
    (0..h).flat_map(move |y| (0..w).map(move |x| (x, y)))
}

fn is_free(tile: TileType) -> bool {
    !matches!(
        tile,
        TileType::Wall
            | TileType::Door
            | TileType::DoorSide
            | TileType::Entrance
            | TileType::Exit
            | TileType::Secret
    )
}

fn thing_at((x, y): Tile, kind: u16, angle: i32, options: ThingOptions) -> Thing {
    let half = TILE_SIZE / 2;
    Thing::new(
        x as i32 * TILE_SIZE + half,
        -(y as i32 * TILE_SIZE + half),
        kind,
        angle,
        options,
    )
}

/// Draws tiles out of the free pool; each tile holds at most one thing.
struct Placer<'a, R: Rng + ?Sized> {
    grid: &'a Grid,
    free: Vec<Tile>,
    rng: &'a mut R,
    things: Vec<Thing>,
}

impl<'a, R: Rng + ?Sized> Placer<'a, R> {
    fn take_free(&mut self) -> Option<Tile> {
        if self.free.is_empty() {
            return None;
        }
        let i = self.rng.gen_range(0..self.free.len());
        Some(self.free.swap_remove(i))
    }

    /// Random angle towards an open neighbouring tile.
    fn facing(&mut self, (x, y): Tile) -> i32 {
        let (x, y) = (x as i64, y as i64);
        let open: Vec<i32> = [(1, 0, 0), (0, -1, 90), (-1, 0, 180), (0, 1, 270)]
            .into_iter()
            .filter(|&(dx, dy, _)| {
                x + dx >= 0
                    && y + dy >= 0
                    && tile_type(self.grid, ((x + dx) as usize, (y + dy) as usize))
                        .is_some_and(|t| !t.is_wall())
            })
            .map(|(_, _, angle)| angle)
            .collect();
        open.choose(&mut *self.rng).copied().unwrap_or(DEFAULT_ANGLE)
    }

    fn player_starts(&mut self) {
        let entrances: Vec<Tile> = tiles(self.grid)
            .filter(|&t| tile_type(self.grid, t) == Some(TileType::Entrance))
            .collect();

        for player in 1..=PLAYER_COUNT {
            let slot = usize::from(player - 1);
            let tile = match entrances.get(slot) {
                Some(&t) => t,
                None => self.take_free().unwrap_or((slot, 0)),
            };
            let angle = self.facing(tile);
            self.things
                .push(thing_at(tile, player, angle, ThingOptions::ALL_SKILLS));
        }
    }

    fn scatter(&mut self, count: usize, types: &[u16], variation: SkillVariation) {
        for _ in 0..count {
            let Some(&kind) = types.choose(&mut *self.rng) else {
                return;
            };
            let Some(tile) = self.take_free() else {
                return;
            };
            let options = skill_options(variation, &mut *self.rng);
            let angle = self.rng.gen_range(0..360);
            self.things.push(thing_at(tile, kind, angle, options));
        }
    }
}

fn skill_options<R: Rng + ?Sized>(variation: SkillVariation, rng: &mut R) -> ThingOptions {
    match variation {
        SkillVariation::None => ThingOptions::ALL_SKILLS,
        SkillVariation::MoreInEasyMode => {
            if rng.gen_ratio(1, 4) {
                ThingOptions::SKILL_12 | ThingOptions::SKILL_3
            } else if rng.gen_ratio(1, 3) {
                ThingOptions::SKILL_12
            } else {
                ThingOptions::ALL_SKILLS
            }
        }
        SkillVariation::MoreInHardMode => {
            if rng.gen_ratio(1, 3) {
                ThingOptions::SKILL_3 | ThingOptions::SKILL_45
            } else if rng.gen_ratio(1, 2) {
                ThingOptions::SKILL_45
            } else {
                ThingOptions::ALL_SKILLS
            }
        }
    }
}

/// Place every thing for one map.
pub fn place_things<R: Rng + ?Sized>(grid: &Grid, prefs: &Preferences, rng: &mut R) -> Vec<Thing> {
    let free: Vec<Tile> = tiles(grid)
        .filter(|&t| tile_type(grid, t).is_some_and(is_free))
        .collect();
    let mut placer = Placer {
        grid,
        free,
        rng,
        things: Vec::new(),
    };

    if prefs.generate_entrance_and_exit {
        placer.player_starts();
        placer.scatter(DEATHMATCH_STARTS, &[DEATHMATCH_START], SkillVariation::None);
    }

    if prefs.generate_things {
        // bigger maps get more things
        let multiplier = placer.free.len() as f32 / 1000.0;
        for (category, spawn) in &prefs.things {
            let (min, max) = spawn.scaled_range(multiplier);
            let count = placer.rng.gen_range(min..=max) as usize;
            debug!("{category:?}: placing {count} of {min}..={max}");
            placer.scatter(count, &spawn.types, spawn.skill_variation);
        }
    }

    placer.things
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceImage;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn prefs(entrance: bool, things: bool) -> Preferences {
        let mut p = Preferences::default();
        p.generate_entrance_and_exit = entrance;
        p.generate_things = things;
        p
    }

    fn players(things: &[Thing]) -> Vec<&Thing> {
        things.iter().filter(|t| (1..=4).contains(&t.kind)).collect()
    }

    #[test]
    fn test_players_start_on_entrances() {
        let img = SourceImage::from_ascii(&["#####", "#E.E#", "#####"]);
        let grid = Grid::from_image(&img, true);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let things = place_things(&grid, &prefs(true, false), &mut rng);

        let starts = players(&things);
        assert_eq!(starts.len(), 4);
        assert_eq!((starts[0].x, starts[0].y), (96, -96), "first entrance");
        assert_eq!((starts[1].x, starts[1].y), (224, -96), "second entrance");
        // only one free tile left for players 3 and 4
        assert_eq!((starts[2].x, starts[2].y), (160, -96));
        assert_eq!((starts[3].x, starts[3].y), (3 * 64 + 32, -32), "corner fallback");

        assert_eq!(starts[0].angle, 0, "faces the only open neighbour");
        assert_eq!(
            things.iter().filter(|t| t.kind == DEATHMATCH_START).count(),
            0,
            "no free tiles left"
        );
    }

    #[test]
    fn test_no_things_when_disabled() {
        let img = SourceImage::from_ascii(&["#...", "....", "...."]);
        let grid = Grid::from_image(&img, true);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(place_things(&grid, &prefs(false, false), &mut rng).is_empty());
    }

    #[test]
    fn test_things_occupy_distinct_free_tiles() {
        let rows: Vec<String> = (0..40).map(|_| ".".repeat(40)).collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        let grid = Grid::from_image(&SourceImage::from_ascii(&rows), true);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let things = place_things(&grid, &prefs(true, true), &mut rng);

        assert_eq!(players(&things).len(), 4);
        assert_eq!(things.iter().filter(|t| t.kind == DEATHMATCH_START).count(), 8);
        assert!(things.len() > 12, "1599 free tiles should get some items");

        let mut spots: Vec<(i32, i32)> = things.iter().map(|t| (t.x, t.y)).collect();
        spots.sort();
        spots.dedup();
        assert_eq!(spots.len(), things.len());

        // never on the theme marker
        assert!(things.iter().all(|t| (t.x, t.y) != (32, -32)));
        assert!(things.iter().all(|t| t.x % 64 == 32 && t.y % 64 == -32));
    }

    #[test]
    fn test_placement_is_deterministic_per_seed() {
        let grid = Grid::from_image(&SourceImage::from_ascii(&["#....", "....."]), true);
        let a = place_things(&grid, &prefs(true, true), &mut ChaCha8Rng::seed_from_u64(9));
        let b = place_things(&grid, &prefs(true, true), &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_skill_options() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(
            skill_options(SkillVariation::None, &mut rng),
            ThingOptions::ALL_SKILLS
        );
        for _ in 0..100 {
            let easy = skill_options(SkillVariation::MoreInEasyMode, &mut rng);
            assert!(easy.contains(ThingOptions::SKILL_12));
            let hard = skill_options(SkillVariation::MoreInHardMode, &mut rng);
            assert!(hard.contains(ThingOptions::SKILL_45));
        }
    }
}
