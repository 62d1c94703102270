//! Image source: reads a PNG and exposes it as a plain RGB pixel grid.

pub mod palette;

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::{Error, Result};
use palette::Rgb;

/// Decoded source image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl SourceImage {
    /// `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        assert_eq!(pixels.len(), width * height, "pixel buffer size mismatch");
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from rows of text, for tests and fixtures: `#` white,
    /// `.` room, `D` door, `S` secret, `E` entrance, `X` exit, `O`
    /// exterior, `F` special floor, `C` special ceiling.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let pixels = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '#' => Rgb::WHITE,
                'D' => Rgb::new(128, 128, 0),
                'S' => Rgb::new(255, 0, 255),
                'E' => Rgb::new(255, 255, 0),
                'X' => Rgb::new(0, 255, 0),
                'O' => Rgb::new(0, 0, 255),
                'F' => Rgb::new(255, 0, 0),
                'C' => Rgb::new(0, 128, 0),
                _ => Rgb::new(0, 0, 0),
            })
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`; `None` outside the image.
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width + x as usize])
    }
}

impl From<image::RgbImage> for SourceImage {
    fn from(img: image::RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img.pixels().map(|p| Rgb(p.0)).collect();
        Self::from_pixels(w as usize, h as usize, pixels)
    }
}

pub fn load_image(path: &Path) -> Result<SourceImage> {
    let img = image::open(path)?.to_rgb8();
    info!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img.into())
}

/// Keep only existing `.png` files, in the given order.
pub fn filter_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let valid: Vec<PathBuf> = inputs
        .iter()
        .filter(|p| {
            let is_png = p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            let ok = is_png && p.is_file();
            if !ok {
                warn!("skipping {}: not an existing PNG file", p.display());
            }
            ok
        })
        .cloned()
        .collect();

    if valid.is_empty() {
        return Err(Error::MissingInput);
    }
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii() {
        let img = SourceImage::from_ascii(&["#.", "DE"]);
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(img.get(1, 1), Some(Rgb::new(255, 255, 0)));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, -1), None);
    }

    #[test]
    fn test_filter_inputs_rejects_missing_and_non_png() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("level.PNG");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&png, b"").unwrap();
        std::fs::write(&txt, b"").unwrap();
        let missing = dir.path().join("gone.png");

        let kept = filter_inputs(&[txt.clone(), png.clone(), missing]).unwrap();
        assert_eq!(kept, vec![png]);

        assert!(matches!(filter_inputs(&[txt]), Err(Error::MissingInput)));
        assert!(matches!(filter_inputs(&[]), Err(Error::MissingInput)));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = image::RgbImage::new(3, 2);
        img.put_pixel(2, 1, image::Rgb([255, 0, 255]));
        img.save(&path).unwrap();

        let src = load_image(&path).unwrap();
        assert_eq!((src.width(), src.height()), (3, 2));
        assert_eq!(src.get(2, 1), Some(Rgb::new(255, 0, 255)));
        assert_eq!(src.get(0, 0), Some(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn test_load_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(load_image(&path).is_err());
    }
}
