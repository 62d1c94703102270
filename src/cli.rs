use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "preferences.json";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Source .png images, one map each, in level order
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// Archive to write (default: <first input>.wad)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Preferences JSON file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Seed for every random choice; omit for a fresh layout each run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write an IWAD instead of a PWAD
    #[arg(long)]
    pub iwad: bool,
    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        if let Some(out) = &self.output {
            return out.clone();
        }
        let stem = self
            .inputs
            .first()
            .and_then(|p| p.file_stem())
            .map(Path::new)
            .unwrap_or(Path::new("output"));
        stem.with_extension("wad")
    }

    /// Explicit `--config`, else `preferences.json` if it exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG);
            default.is_file().then_some(default)
        })
    }
}
