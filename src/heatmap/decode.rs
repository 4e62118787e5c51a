use image::{ImageError, RgbaImage};
use std::fmt;
use std::path::Path;

/// A decoded bitmap, RGBA8, row-major.
///
/// Equality is bitwise over dimensions and pixel bytes so refresh results
/// can be compared for exact repeatability.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn from_rgba(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Decode seam for the refresh path.
///
/// The refresh handler only ever calls this after the file-existence check
/// has passed; tests substitute counting decoders to verify that gating.
pub trait BitmapDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<Bitmap, ImageError>;
}

/// Default decoder: the platform bitmap decoder, with format auto-detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileDecoder;

impl BitmapDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<Bitmap, ImageError> {
        let img = image::open(path)?;
        Ok(Bitmap::from_rgba(img.to_rgba8()))
    }
}
