//! Map entities and their fixed-size little-endian records.
//!
//! Every record type is a `binrw` struct implementing [`Record`]; a map
//! lump is nothing more than the records of one collection laid end to end.

pub mod linedef;
pub mod map;
pub mod sector;
pub mod sidedef;
pub mod thing;
pub mod vertex;

pub use linedef::{Linedef, LinedefFlags};
pub use map::DoomMap;
pub use sector::Sector;
pub use sidedef::Sidedef;
pub use thing::{Thing, ThingOptions};
pub use vertex::Vertex;

use std::io::Cursor;

use binrw::{BinRead, BinWrite, Endian};
use log::debug;

use crate::error::{Error, Result};

/// Texture name meaning "nothing drawn here".
pub const NO_TEXTURE: &str = "-";

/// A fixed-size binary record.
pub trait Record {
    /// Encoded size in bytes.
    const SIZE: usize;
}

/// Encode a whole collection into one lump payload.
pub fn encode_all<T>(items: &[T]) -> Result<Vec<u8>>
where
    T: Record + for<'a> BinWrite<Args<'a> = ()>,
{
    let mut cursor = Cursor::new(Vec::with_capacity(items.len() * T::SIZE));
    for item in items {
        item.write_options(&mut cursor, Endian::Little, ())?;
    }
    Ok(cursor.into_inner())
}

/// Decode a lump payload back into records.
pub fn decode_all<T>(bytes: &[u8]) -> Result<Vec<T>>
where
    T: Record + for<'a> BinRead<Args<'a> = ()>,
{
    if bytes.len() % T::SIZE != 0 {
        return Err(Error::InvalidFormat(format!(
            "{} bytes is not a whole number of {}-byte records",
            bytes.len(),
            T::SIZE
        )));
    }
    let mut cursor = Cursor::new(bytes);
    (0..bytes.len() / T::SIZE)
        .map(|_| T::read_options(&mut cursor, Endian::Little, ()).map_err(Error::from))
        .collect()
}

// ─────────────────────────────────────────────────────
//  Field maps shared by the record types
// ─────────────────────────────────────────────────────

/// Clamp into the int16 range used by every numeric record field.
pub fn clamp_i16(value: i64) -> i16 {
    let clamped = value.clamp(i16::MIN as i64, i16::MAX as i64);
    if clamped != value {
        debug!("value {value} out of int16 range, clamped to {clamped}");
    }
    clamped as i16
}

/// Largest index a record can reference; 0xFFFF is the "none" sentinel.
pub const MAX_INDEX: usize = 0xFFFE;

/// Index fields are unsigned 16-bit on disk, `None` is 0xFFFF.
pub(crate) fn index_to_u16(index: Option<usize>) -> u16 {
    match index {
        Some(i) if i > MAX_INDEX => {
            debug!("index {i} out of range, clamped to {MAX_INDEX}");
            MAX_INDEX as u16
        }
        Some(i) => i as u16,
        None => 0xFFFF,
    }
}

pub(crate) fn index_from_u16(raw: u16) -> Option<usize> {
    match raw {
        0xFFFF => None,
        i => Some(i as usize),
    }
}

/// Write `value` as a standalone record, for layout tests.
#[cfg(test)]
pub(crate) fn record_bytes<T>(value: &T) -> Vec<u8>
where
    T: Record + for<'a> BinWrite<Args<'a> = ()>,
{
    encode_all(std::slice::from_ref(value)).unwrap()
}
