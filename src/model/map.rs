use std::collections::HashMap;

use log::{debug, warn};

use super::{
    Linedef, MAX_INDEX, Record, Sector, Sidedef, Thing, Vertex, decode_all, encode_all,
};
use crate::error::{Error, Result};
use crate::wad::WadFile;

/// Lumps written after the marker, in this order.
pub const MAP_LUMPS: [&str; 5] = ["LINEDEFS", "SECTORS", "SIDEDEFS", "THINGS", "VERTEXES"];

/// One level: every entity collection plus the marker name (MAP01, E1M1…).
#[derive(Debug, Clone, Default)]
pub struct DoomMap {
    pub name: String,
    pub linedefs: Vec<Linedef>,
    pub sectors: Vec<Sector>,
    pub sidedefs: Vec<Sidedef>,
    pub things: Vec<Thing>,
    vertices: Vec<Vertex>,
    vertex_index: HashMap<Vertex, usize>,
}

impl DoomMap {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index of the vertex at `(x, y)`, created on first request.
    /// Two vertices never share a coordinate.
    pub fn add_vertex(&mut self, x: i32, y: i32) -> usize {
        let v = Vertex::new(x, y);
        if let Some(&i) = self.vertex_index.get(&v) {
            return i;
        }
        self.vertices.push(v);
        self.vertex_index.insert(v, self.vertices.len() - 1);
        self.vertices.len() - 1
    }

    pub fn add_sidedef(&mut self, side: Sidedef) -> usize {
        self.sidedefs.push(side);
        self.sidedefs.len() - 1
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)`, all zero for an empty map.
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        let Some(first) = self.vertices.first() else {
            return (0, 0, 0, 0);
        };
        self.vertices.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), v| {
                (min_x.min(v.x), min_y.min(v.y), max_x.max(v.x), max_y.max(v.y))
            },
        )
    }

    /// Append the marker and the five entity lumps.
    pub fn add_to_wad(&self, wad: &mut WadFile) -> Result<()> {
        let limit = MAX_INDEX + 1;
        if self.vertices.len() > limit || self.sidedefs.len() > limit || self.sectors.len() > limit
        {
            warn!(
                "{}: {} vertices / {} sidedefs / {} sectors exceed the 16-bit index range, references will be clamped",
                self.name,
                self.vertices.len(),
                self.sidedefs.len(),
                self.sectors.len()
            );
        }

        wad.add_lump(&self.name, Vec::new());
        wad.add_lump("LINEDEFS", encode_all(&self.linedefs)?);
        wad.add_lump("SECTORS", encode_all(&self.sectors)?);
        wad.add_lump("SIDEDEFS", encode_all(&self.sidedefs)?);
        wad.add_lump("THINGS", encode_all(&self.things)?);
        wad.add_lump("VERTEXES", encode_all(&self.vertices)?);
        debug!("{}: {} bytes of map lumps", self.name, self.encoded_len());
        Ok(())
    }

    /// Decode the map whose marker is `name`. Lumps are taken from the run
    /// of recognised map lumps that follows the marker.
    pub fn from_wad(wad: &WadFile, name: &str) -> Result<Self> {
        let marker = wad
            .indices_of(name)
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidFormat(format!("no map marker `{name}`")))?;

        let mut map = DoomMap::new(wad.lumps()[marker].name());

        for lump in wad.lumps()[marker + 1..]
            .iter()
            .take_while(|l| MAP_LUMPS.iter().any(|n| l.is_named(n)))
        {
            match lump.name().to_ascii_uppercase().as_str() {
                "LINEDEFS" => map.linedefs = decode_all(&lump.data)?,
                "SECTORS" => map.sectors = decode_all(&lump.data)?,
                "SIDEDEFS" => map.sidedefs = decode_all(&lump.data)?,
                "THINGS" => map.things = decode_all(&lump.data)?,
                "VERTEXES" => {
                    for v in decode_all::<Vertex>(&lump.data)? {
                        // keep file order; duplicates in foreign files stay distinct
                        map.vertex_index.entry(v).or_insert(map.vertices.len());
                        map.vertices.push(v);
                    }
                }
                _ => unreachable!("filtered by take_while"),
            }
        }

        Ok(map)
    }

    /// Size of the encoded lumps.
    pub fn encoded_len(&self) -> usize {
        self.linedefs.len() * Linedef::SIZE
            + self.sectors.len() * Sector::SIZE
            + self.sidedefs.len() * Sidedef::SIZE
            + self.things.len() * Thing::SIZE
            + self.vertices.len() * Vertex::SIZE
    }
}
