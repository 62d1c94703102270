//! Preferences: everything the generator reads from the JSON config file.
//!
//! Every field has a default, so an empty `{}` (or no file at all) is a
//! valid configuration.

pub mod theme;
pub mod things;

pub use theme::{SectorSettings, Theme, ThemeSector, ThemeTexture};
pub use things::{SkillVariation, ThingCategory, ThingSpawn};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::palette::{Rgb, parse_color};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeBuilderConfig {
    pub program: PathBuf,
    /// `{wad}` is replaced by the archive path.
    pub args: Vec<String>,
}

impl Default for NodeBuilderConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("bsp"),
            args: vec!["{wad}".into(), "-o".into(), "{wad}".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    /// `#RRGGBB`, `#RGB`, `r,g,b` or a colour name.
    pub color: String,
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub build_nodes: bool,
    pub node_builder: NodeBuilderConfig,
    pub doom1_format: bool,
    pub episode: u8,
    pub generate_entrance_and_exit: bool,
    pub generate_things: bool,
    pub things: BTreeMap<ThingCategory, ThingSpawn>,
    pub default_theme: Theme,
    pub themes: Vec<ThemeEntry>,

    /// Theme colours parsed once by `normalise`.
    #[serde(skip)]
    resolved_themes: Vec<(Rgb, Theme)>,
}

impl Default for Preferences {
    fn default() -> Self {
        let mut prefs = Self {
            build_nodes: false,
            node_builder: NodeBuilderConfig::default(),
            doom1_format: false,
            episode: 1,
            generate_entrance_and_exit: true,
            generate_things: true,
            things: things::default_things(),
            default_theme: Theme::default(),
            themes: Vec::new(),
            resolved_themes: Vec::new(),
        };
        prefs.normalise();
        prefs
    }
}

impl Preferences {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut prefs: Preferences = serde_json::from_str(json)?;
        prefs.normalise();
        Ok(prefs)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let prefs = Self::from_json(&json)?;
        debug!(
            "loaded preferences from {} ({} extra themes)",
            path.display(),
            prefs.resolved_themes.len()
        );
        Ok(prefs)
    }

    /// Clamp the episode, tidy theme values and resolve theme colours.
    /// The white default theme comes first and cannot be overridden.
    fn normalise(&mut self) {
        self.episode = self.episode.clamp(1, 9);
        self.default_theme.normalise();

        self.resolved_themes.clear();
        let mut taken = vec![Rgb::WHITE];
        for entry in &self.themes {
            let Some(color) = parse_color(&entry.color) else {
                warn!("ignoring theme with unreadable colour `{}`", entry.color);
                continue;
            };
            if taken.contains(&color) {
                warn!("ignoring duplicate theme colour `{}`", entry.color);
                continue;
            }
            taken.push(color);

            let mut theme = entry.theme.clone();
            theme.normalise();
            self.resolved_themes.push((color, theme));
        }
    }

    /// Theme selected by a marker pixel colour.
    pub fn theme_for(&self, color: Rgb) -> &Theme {
        self.resolved_themes
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, t)| t)
            .unwrap_or(&self.default_theme)
    }

    /// Highest map number the naming scheme allows.
    pub fn max_maps(&self) -> usize {
        if self.doom1_format { 9 } else { 99 }
    }

    /// Marker name for the 1-based map number.
    pub fn map_name(&self, number: usize) -> String {
        if self.doom1_format {
            format!("E{}M{}", self.episode, number)
        } else {
            format!("MAP{number:02}")
        }
    }
}
