//! Output stage: the archive written to disk and the external node
//! builder run over it.
pub mod nodes;
pub mod wad;
