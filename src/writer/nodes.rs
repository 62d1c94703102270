//! Run the external node builder over a written archive.

use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::config::NodeBuilderConfig;
use crate::error::{Error, Result};

const WAD_PLACEHOLDER: &str = "{wad}";

fn expand_args(config: &NodeBuilderConfig, wad: &Path) -> Vec<String> {
    let wad = wad.to_string_lossy();
    config
        .args
        .iter()
        .map(|a| a.replace(WAD_PLACEHOLDER, &wad))
        .collect()
}

/// Blocks until the tool exits. A spawn failure or nonzero exit is an
/// `ExternalToolFailure`.
pub fn build(config: &NodeBuilderConfig, wad: &Path) -> Result<()> {
    let args = expand_args(config, wad);
    debug!("running {} {:?}", config.program.display(), args);

    let status = Command::new(&config.program)
        .args(&args)
        .status()
        .map_err(|e| Error::ExternalToolFailure {
            tool: config.program.clone(),
            status: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::ExternalToolFailure {
            tool: config.program.clone(),
            status: status.to_string(),
        });
    }

    info!("built nodes for {}", wad.display());
    Ok(())
}
