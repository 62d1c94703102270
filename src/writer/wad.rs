//! Assemble generated maps into one archive and write it out.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::model::DoomMap;
use crate::wad::{WadFile, WadKind};

/// Maps are appended in the order given; that order is the level order.
pub fn assemble(maps: &[DoomMap], kind: WadKind) -> Result<WadFile> {
    let mut wad = WadFile::new(kind);
    for map in maps {
        map.add_to_wad(&mut wad)?;
    }
    Ok(wad)
}

pub fn emit(wad: &WadFile, path: &Path) -> Result<()> {
    wad.save_to_file(path)?;
    info!(
        "wrote {} ({} lumps, {:?})",
        path.display(),
        wad.len(),
        wad.kind
    );
    Ok(())
}
