//! Binary archive codec.
//!
//! Layout (all integers little-endian):
//!
//!   header     "IWAD" | "PWAD", i32 lump count, i32 directory offset
//!   payloads   every lump's bytes, concatenated in directory order
//!   directory  lump count × { i32 offset, i32 length, [u8; 8] name }
//!
//! The codec knows nothing about maps; it only moves named byte blobs.

pub mod lump;

pub use lump::{Lump, NAME_LEN, decode_name, encode_name};

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use binrw::{BinRead, BinWrite, binrw};
use log::debug;

use crate::error::{Error, Result};

pub const HEADER_SIZE: usize = 12;
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
struct Header {
    magic: [u8; 4],
    lump_count: i32,
    directory_offset: i32,
}

/// One directory slot: where a lump's payload lives and what it is called.
#[binrw]
#[derive(Debug, Clone, PartialEq, Eq)]
#[brw(little)]
struct DirectoryEntry {
    offset: i32,
    length: i32,
    #[br(map = |raw: [u8; NAME_LEN]| decode_name(&raw))]
    #[bw(map = |name: &String| encode_name(name))]
    name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WadKind {
    Iwad,
    #[default]
    Pwad,
}

impl WadKind {
    pub fn magic(self) -> &'static [u8; 4] {
        match self {
            WadKind::Iwad => b"IWAD",
            WadKind::Pwad => b"PWAD",
        }
    }

    fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"IWAD" => Some(WadKind::Iwad),
            b"PWAD" => Some(WadKind::Pwad),
            _ => None,
        }
    }
}

/// An ordered list of lumps. Duplicate names are allowed; each map
/// contributes its own LINEDEFS, SECTORS, … and position disambiguates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WadFile {
    pub kind: WadKind,
    lumps: Vec<Lump>,
}

impl WadFile {
    pub fn new(kind: WadKind) -> Self {
        Self {
            kind,
            lumps: Vec::new(),
        }
    }

    pub fn add_lump(&mut self, name: &str, data: Vec<u8>) {
        self.lumps.push(Lump::new(name, data));
    }

    pub fn lumps(&self) -> &[Lump] {
        &self.lumps
    }

    pub fn len(&self) -> usize {
        self.lumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lumps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Lump> {
        self.lumps.get(index)
    }

    /// First lump with the given name.
    pub fn find(&self, name: &str) -> Option<&Lump> {
        self.lumps.iter().find(|l| l.is_named(name))
    }

    /// Every position holding a lump with the given name.
    pub fn indices_of(&self, name: &str) -> Vec<usize> {
        self.lumps
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_named(name))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn remove(&mut self, index: usize) -> Option<Lump> {
        (index < self.lumps.len()).then(|| self.lumps.remove(index))
    }

    /// Remove every lump with the given name; returns how many were removed.
    pub fn remove_named(&mut self, name: &str) -> usize {
        let before = self.lumps.len();
        self.lumps.retain(|l| !l.is_named(name));
        before - self.lumps.len()
    }

    // ──────────────────────────────────────────────────────────────
    //  Encoding
    // ──────────────────────────────────────────────────────────────

    /// Serialise to bytes. Same lumps in, same bytes out.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload_len: usize = self.lumps.iter().map(|l| l.data.len()).sum();
        let directory_offset = HEADER_SIZE + payload_len;
        let total = directory_offset + self.lumps.len() * DIRECTORY_ENTRY_SIZE;

        let mut out = Cursor::new(Vec::with_capacity(total));
        Header {
            magic: *self.kind.magic(),
            lump_count: self.lumps.len() as i32,
            directory_offset: directory_offset as i32,
        }
        .write_le(&mut out)?;

        for lump in &self.lumps {
            out.write_all(&lump.data)?;
        }

        let mut offset = HEADER_SIZE;
        for lump in &self.lumps {
            DirectoryEntry {
                offset: offset as i32,
                length: lump.data.len() as i32,
                name: lump.name().to_string(),
            }
            .write_le(&mut out)?;
            offset += lump.data.len();
        }

        Ok(out.into_inner())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        debug!(
            "wrote {} lumps ({} bytes) to {}",
            self.lumps.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    // ──────────────────────────────────────────────────────────────
    //  Decoding
    // ──────────────────────────────────────────────────────────────

    /// Parse an archive. Directory offsets are authoritative: payloads may
    /// sit anywhere in the data, in any order.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::InvalidFormat(format!(
                "{} bytes is too short for a header",
                data.len()
            )));
        }

        let mut cursor = Cursor::new(data);
        let header = Header::read_le(&mut cursor)?;

        let kind = WadKind::from_magic(&header.magic).ok_or_else(|| {
            Error::InvalidFormat(format!(
                "bad magic {:?}",
                String::from_utf8_lossy(&header.magic)
            ))
        })?;

        let lump_count = header.lump_count;
        if lump_count <= 0 {
            return Err(Error::InvalidFormat(format!(
                "lump count {lump_count} must be positive"
            )));
        }

        let directory_offset = header.directory_offset;
        if directory_offset < HEADER_SIZE as i32 {
            return Err(Error::InvalidFormat(format!(
                "directory offset {directory_offset} overlaps the header"
            )));
        }

        let directory_offset = directory_offset as usize;
        let directory_end = directory_offset + lump_count as usize * DIRECTORY_ENTRY_SIZE;
        if directory_end > data.len() {
            return Err(Error::InvalidFormat(format!(
                "directory ({lump_count} entries at {directory_offset}) runs past end of data ({} bytes)",
                data.len()
            )));
        }

        cursor.set_position(directory_offset as u64);
        let mut lumps = Vec::with_capacity(lump_count as usize);
        for _ in 0..lump_count {
            let DirectoryEntry {
                offset,
                length,
                name,
            } = DirectoryEntry::read_le(&mut cursor)?;
            let (offset, length) = (offset as i64, length as i64);

            if offset < 0 || length < 0 || (offset + length) as usize > data.len() {
                return Err(Error::TruncatedLump {
                    name,
                    offset,
                    length,
                    data_len: data.len(),
                });
            }

            let start = offset as usize;
            let payload = data[start..start + length as usize].to_vec();
            lumps.push(Lump::new(&name, payload));
        }

        Ok(Self { kind, lumps })
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_of(bytes: &[u8]) -> Header {
        Header::read_le(&mut Cursor::new(bytes)).unwrap()
    }

    fn entry_at(bytes: &[u8], at: usize) -> DirectoryEntry {
        DirectoryEntry::read_le(&mut Cursor::new(&bytes[at..])).unwrap()
    }

    #[test]
    fn test_single_empty_lump_is_28_bytes() {
        for kind in [WadKind::Iwad, WadKind::Pwad] {
            let mut wad = WadFile::new(kind);
            wad.add_lump("TEST", vec![]);
            let bytes = wad.to_bytes().unwrap();

            assert_eq!(bytes.len(), 28);
            assert_eq!(
                header_of(&bytes),
                Header {
                    magic: *kind.magic(),
                    lump_count: 1,
                    directory_offset: 12,
                }
            );
            let entry = entry_at(&bytes, 12);
            assert_eq!((entry.offset, entry.length), (12, 0));
            assert_eq!(&bytes[20..28], b"TEST\0\0\0\0");
        }
    }

    #[test]
    fn test_layout_of_two_lumps() {
        let mut wad = WadFile::new(WadKind::Pwad);
        wad.add_lump("A", vec![1, 2, 3]);
        wad.add_lump("B", vec![4, 5]);
        let bytes = wad.to_bytes().unwrap();

        // header + payloads + 2 directory entries
        assert_eq!(bytes.len(), 12 + 5 + 32);
        assert_eq!(&bytes[12..17], &[1, 2, 3, 4, 5]);
        assert_eq!(header_of(&bytes).directory_offset, 17);
        let (a, b) = (entry_at(&bytes, 17), entry_at(&bytes, 33));
        assert_eq!((a.offset, a.length, a.name.as_str()), (12, 3, "A"));
        assert_eq!((b.offset, b.length, b.name.as_str()), (15, 2, "B"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let mut wad = WadFile::new(WadKind::Pwad);
        wad.add_lump("MAP01", vec![]);
        wad.add_lump("THINGS", vec![9; 20]);
        assert_eq!(wad.to_bytes().unwrap(), wad.clone().to_bytes().unwrap());
    }

    #[test]
    fn test_round_trip() {
        let mut wad = WadFile::new(WadKind::Iwad);
        wad.add_lump("MAP01", vec![]);
        wad.add_lump("LINEDEFS", vec![1; 14]);
        wad.add_lump("LINEDEFS", vec![2; 28]);
        wad.add_lump("AVERYLONGNAME", vec![3]);

        let parsed = WadFile::from_bytes(&wad.to_bytes().unwrap()).expect("valid archive");
        assert_eq!(parsed, wad);
        assert_eq!(parsed.get(3).unwrap().name(), "AVERYLON");
    }

    #[test]
    fn test_reads_out_of_order_payloads() {
        // Directory before payloads, and payloads listed in reverse order.
        let mut data = Vec::new();
        data.extend_from_slice(b"PWAD");
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(&12i32.to_le_bytes());
        // entry 0 -> "SECOND" payload at 46
        data.extend_from_slice(&46i32.to_le_bytes());
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(b"SECOND\0\0");
        // entry 1 -> "FIRST" payload at 44
        data.extend_from_slice(&44i32.to_le_bytes());
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(b"FIRST\0\0\0");
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

        let wad = WadFile::from_bytes(&data).expect("valid archive");
        assert_eq!(wad.len(), 2);
        assert_eq!(wad.get(0).unwrap().name(), "SECOND");
        assert_eq!(wad.get(0).unwrap().data, vec![0xCC, 0xDD]);
        assert_eq!(wad.get(1).unwrap().data, vec![0xAA, 0xBB]);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = b"JUNK".to_vec();
        data.extend_from_slice(&[0; 8]);
        assert!(matches!(
            WadFile::from_bytes(&data),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_bad_header_values() {
        let header = |count: i32, offset: i32| {
            let mut d = b"IWAD".to_vec();
            d.extend_from_slice(&count.to_le_bytes());
            d.extend_from_slice(&offset.to_le_bytes());
            d.extend_from_slice(&[0; 32]);
            d
        };

        assert!(matches!(
            WadFile::from_bytes(&header(0, 12)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            WadFile::from_bytes(&header(-3, 12)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            WadFile::from_bytes(&header(1, 4)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            WadFile::from_bytes(&header(10, 12)),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            WadFile::from_bytes(b"PWAD"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_detects_truncated_payload() {
        let mut wad = WadFile::new(WadKind::Pwad);
        wad.add_lump("DATA", vec![7; 10]);
        let mut bytes = wad.to_bytes().unwrap();

        // Claim 100 bytes of payload instead of 10.
        let dir = header_of(&bytes).directory_offset as usize;
        bytes[dir + 4..dir + 8].copy_from_slice(&100i32.to_le_bytes());

        match WadFile::from_bytes(&bytes) {
            Err(Error::TruncatedLump { name, length, .. }) => {
                assert_eq!(name, "DATA");
                assert_eq!(length, 100);
            }
            other => panic!("expected truncation error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_spaces_are_not_part_of_the_name() {
        let mut wad = WadFile::new(WadKind::Pwad);
        wad.add_lump("AB ", vec![1]);
        assert_eq!(wad.get(0).unwrap().name(), "AB");

        let parsed = WadFile::from_bytes(&wad.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, wad);
        assert_eq!(parsed.get(0).unwrap().name(), "AB");
    }

    #[test]
    fn test_lookup_and_removal() {
        let mut wad = WadFile::new(WadKind::Pwad);
        wad.add_lump("MAP01", vec![]);
        wad.add_lump("THINGS", vec![1]);
        wad.add_lump("MAP02", vec![]);
        wad.add_lump("things", vec![2]);

        assert_eq!(wad.indices_of("THINGS"), vec![1, 3]);
        assert_eq!(wad.find("Things").unwrap().data, vec![1]);
        assert!(wad.find("SECTORS").is_none());

        assert_eq!(wad.remove_named("THINGS"), 2);
        assert_eq!(wad.len(), 2);
        assert!(wad.remove(5).is_none());
        assert_eq!(wad.remove(0).unwrap().name(), "MAP01");
    }
}
