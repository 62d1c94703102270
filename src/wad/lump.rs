//! Named lumps and the fixed 8-byte name field shared by lumps and textures.

/// Width of every name field in the archive (lump names, texture names).
pub const NAME_LEN: usize = 8;

/// A named, opaque binary record inside the archive.
///
/// The name is normalised once on construction (ASCII only, at most
/// `NAME_LEN` bytes) so what is stored is exactly what will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lump {
    name: String,
    pub data: Vec<u8>,
}

impl Lump {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: clamp_name(name),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lump names compare case-insensitively.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(&clamp_name(name))
    }
}

/// Drop non-ASCII characters and NULs, truncate to `NAME_LEN` bytes, then
/// trim trailing spaces (decoding treats them as padding).
pub fn clamp_name(name: &str) -> String {
    let clamped: String = name
        .chars()
        .filter(|c| c.is_ascii() && *c != '\0')
        .take(NAME_LEN)
        .collect();
    clamped.trim_end_matches(' ').to_string()
}

/// Encode a name into its fixed-width, NUL-padded field.
pub fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let mut out = [0u8; NAME_LEN];
    for (slot, b) in out.iter_mut().zip(clamp_name(name).bytes()) {
        *slot = b;
    }
    out
}

/// Decode a fixed-width name field. Reading stops at the first NUL and
/// trailing space padding is trimmed.
pub fn decode_name(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    field[..end]
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end_matches(' ')
        .to_string()
}
