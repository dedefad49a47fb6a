//! FaceLock - Perceptual Hash Engine
//!
//! Average hash over a small luminance grid. Visually similar images give
//! hashes a few bits apart; this is a fingerprint, not a secret.

use std::fmt;

use image::{imageops::FilterType, DynamicImage, RgbaImage};

use crate::codec::{bits_to_hex, hex_to_bits};
use crate::error::{FaceLockError, FaceLockResult};

/// Default grid edge (16×16 = 256 bits)
pub const DEFAULT_GRID_SIZE: u32 = 16;

/// Luminance weights for R, G, B
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Fixed-length bit vector fingerprint of one image
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PerceptualHash {
    bits: Vec<bool>,
}

impl PerceptualHash {
    /// Wrap an existing bit vector
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parse the stored hex form
    pub fn from_hex(text: &str) -> FaceLockResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FaceLockError::InvalidHash("empty hash".into()));
        }
        Ok(Self {
            bits: hex_to_bits(text)?,
        })
    }

    /// Hex form, 4 bits per digit
    pub fn to_hex(&self) -> String {
        bits_to_hex(&self.bits)
    }

    /// Bits in row-major grid order
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the hash holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Short prefix for display and logs
    pub fn preview(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(16);
        hex
    }
}

impl fmt::Debug for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PerceptualHash({} bits, {}…)", self.len(), self.preview())
    }
}

impl fmt::Display for PerceptualHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Perceptual hasher with a fixed grid size
#[derive(Debug, Clone, Copy)]
pub struct HashEngine {
    grid_size: u32,
}

impl Default for HashEngine {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl HashEngine {
    /// Create a hasher for a `grid_size × grid_size` grid
    pub fn new(grid_size: u32) -> FaceLockResult<Self> {
        // grid² must be a whole number of hex digits
        if grid_size == 0 || grid_size % 2 != 0 {
            return Err(FaceLockError::InvalidConfig(format!(
                "grid size must be a non-zero even number, got {}",
                grid_size
            )));
        }
        Ok(Self { grid_size })
    }

    /// Grid edge length
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Hash encoded image bytes (PNG, JPEG, ... anything `image` decodes)
    pub fn hash_bytes(&self, image_data: &[u8]) -> FaceLockResult<PerceptualHash> {
        let img = image::load_from_memory(image_data)?;
        Ok(self.hash_image(&img))
    }

    /// Hash a raw RGBA8 pixel buffer
    pub fn hash_rgba(&self, width: u32, height: u32, pixels: Vec<u8>) -> FaceLockResult<PerceptualHash> {
        if width == 0 || height == 0 {
            return Err(FaceLockError::ImageDecode(format!("empty {}x{} pixel buffer", width, height)));
        }
        let buffer = RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            FaceLockError::ImageDecode(format!("pixel buffer does not match {}x{} RGBA", width, height))
        })?;
        Ok(self.hash_image(&DynamicImage::ImageRgba8(buffer)))
    }

    /// Hash a decoded image
    pub fn hash_image(&self, img: &DynamicImage) -> PerceptualHash {
        let grid = img
            .resize_exact(self.grid_size, self.grid_size, FilterType::Triangle)
            .to_rgb8();

        let luma: Vec<f64> = grid
            .pixels()
            .map(|p| {
                LUMA_WEIGHTS[0] * f64::from(p[0])
                    + LUMA_WEIGHTS[1] * f64::from(p[1])
                    + LUMA_WEIGHTS[2] * f64::from(p[2])
            })
            .collect();

        let mean = luma.iter().sum::<f64>() / luma.len() as f64;
        PerceptualHash::from_bits(luma.iter().map(|&l| l >= mean).collect())
    }
}

/// Hash encoded image bytes on the default 16×16 grid
pub fn compute_hash(image_data: &[u8]) -> FaceLockResult<PerceptualHash> {
    HashEngine::default().hash_bytes(image_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn gradient_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / (width - 1)) as u8;
            Rgb([v, v, v])
        });
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_hash_is_256_bits_by_default() {
        let hash = compute_hash(&gradient_png(64, 48)).unwrap();
        assert_eq!(hash.len(), 256);
        assert_eq!(hash.to_hex().len(), 64);
    }

    #[test]
    fn test_hash_deterministic() {
        let png = gradient_png(80, 60);
        assert_eq!(compute_hash(&png).unwrap(), compute_hash(&png).unwrap());
    }

    #[test]
    fn test_left_dark_right_bright() {
        let hash = compute_hash(&gradient_png(160, 160)).unwrap();
        let bits = hash.bits();
        // each row: dark half below the mean, bright half at or above it
        for row in 0..16 {
            assert!(!bits[row * 16]);
            assert!(bits[row * 16 + 15]);
        }
    }

    #[test]
    fn test_uniform_image_sets_every_bit() {
        let engine = HashEngine::new(8).unwrap();
        let hash = engine.hash_rgba(4, 4, vec![0u8; 4 * 4 * 4]).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.bits().iter().all(|&b| b));
    }

    #[test]
    fn test_resized_copy_stays_close() {
        let big = compute_hash(&gradient_png(200, 200)).unwrap();
        let small = compute_hash(&gradient_png(50, 50)).unwrap();
        let differing = big.bits().iter().zip(small.bits()).filter(|(a, b)| a != b).count();
        assert!(differing <= 32, "distance {}", differing);
    }

    #[test]
    fn test_hex_roundtrip_and_errors() {
        let hash = compute_hash(&gradient_png(32, 32)).unwrap();
        assert_eq!(PerceptualHash::from_hex(&hash.to_hex()).unwrap(), hash);
        assert!(PerceptualHash::from_hex("").is_err());
        assert!(PerceptualHash::from_hex("xyz").is_err());
    }

    #[test]
    fn test_bad_inputs() {
        assert!(matches!(compute_hash(b"not an image"), Err(FaceLockError::ImageDecode(_))));
        assert!(HashEngine::default().hash_rgba(2, 2, vec![0; 3]).is_err());
        assert!(HashEngine::new(0).is_err());
    }

    #[test]
    fn test_odd_grid_rejected() {
        assert!(matches!(HashEngine::new(3), Err(FaceLockError::InvalidConfig(_))));
        assert!(matches!(HashEngine::new(15), Err(FaceLockError::InvalidConfig(_))));

        let engine = HashEngine::new(2).unwrap();
        let hash = engine.hash_rgba(3, 3, vec![0x40; 3 * 3 * 4]).unwrap();
        assert_eq!(hash.to_hex().len(), 1);
        assert_eq!(PerceptualHash::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    #[test]
    fn test_empty_pixel_buffer_rejected() {
        let engine = HashEngine::default();
        assert!(matches!(engine.hash_rgba(0, 0, vec![]), Err(FaceLockError::ImageDecode(_))));
        assert!(matches!(engine.hash_rgba(0, 4, vec![]), Err(FaceLockError::ImageDecode(_))));
        assert!(matches!(engine.hash_rgba(4, 0, vec![]), Err(FaceLockError::ImageDecode(_))));
    }
}
