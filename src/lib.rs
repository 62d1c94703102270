pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod wad;
pub mod writer;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use config::Preferences;
use model::DoomMap;
use wad::WadKind;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);
    convert(&args).map(|_| ())
}

/// `RUST_LOG` wins; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // a second init (tests, embedding) is harmless
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Convert every input and write the archive; returns its path.
pub fn convert(args: &cli::Cli) -> anyhow::Result<PathBuf> {
    // 1. ── Configure ──────────────────────────────────────────────────
    let prefs = match args.config_path() {
        Some(path) => Preferences::load(&path)
            .with_context(|| format!("Reading preferences {}", path.display()))?,
        None => Preferences::default(),
    };
    let inputs = parser::filter_inputs(&args.inputs).with_context(|| "Checking inputs")?;
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    // 2. ── Generate ───────────────────────────────────────────────────
    let maps = generate_maps(&inputs, &prefs, &mut rng);

    // 3. ── Write outputs ──────────────────────────────────────────────
    let output = args.output_path();
    let kind = if args.iwad { WadKind::Iwad } else { WadKind::Pwad };
    let archive = writer::wad::assemble(&maps, kind).with_context(|| "Encoding maps")?;
    writer::wad::emit(&archive, &output)
        .with_context(|| format!("Writing {}", output.display()))?;

    if prefs.build_nodes {
        if let Err(e) = writer::nodes::build(&prefs.node_builder, &output) {
            error!("node build failed, archive left without nodes: {e}");
        }
    }

    Ok(output)
}

/// One map per input, numbered by input position. A map that fails is
/// logged and skipped; its number is not reused.
pub fn generate_maps(inputs: &[PathBuf], prefs: &Preferences, rng: &mut ChaCha8Rng) -> Vec<DoomMap> {
    let mut maps = Vec::new();

    for (i, path) in inputs.iter().enumerate() {
        let number = i + 1;
        if number > prefs.max_maps() {
            warn!(
                "only {} maps fit the naming scheme, ignoring {} remaining input(s)",
                prefs.max_maps(),
                inputs.len() - i
            );
            break;
        }

        let name = prefs.map_name(number);
        match generate_one(&name, path, prefs, rng) {
            Ok(map) => maps.push(map),
            Err(e) => error!("skipping {name} ({}): {e}", path.display()),
        }
    }

    info!("generated {} of {} map(s)", maps.len(), inputs.len());
    maps
}

fn generate_one(
    name: &str,
    path: &Path,
    prefs: &Preferences,
    rng: &mut ChaCha8Rng,
) -> error::Result<DoomMap> {
    let image = parser::load_image(path)?;
    Ok(processor::generate(name, &image, prefs, rng))
}
