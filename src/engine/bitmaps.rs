//! Background bitmaps, rescaled once per surface size

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, info, warn};
use std::path::Path;
use thiserror::Error;

/// Luminance weights applied by a zero-saturation color matrix
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to open image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image {path} has no pixels")]
    Empty { path: String },
}

pub fn load_bitmap(path: &Path) -> Result<RgbaImage, AssetError> {
    let decoded = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.display().to_string(),
            source,
        })?
        .to_rgba8();

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(AssetError::Empty {
            path: path.display().to_string(),
        });
    }

    debug!(
        "Loaded bitmap {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(decoded)
}

pub struct BitmapSet {
    source_normal: RgbaImage,
    source_ambient: RgbaImage,
    normal: RgbaImage,
    ambient: RgbaImage,
    gray_ambient: Option<RgbaImage>,
}

impl BitmapSet {
    pub fn new(normal: RgbaImage, ambient: RgbaImage) -> Self {
        Self {
            source_normal: normal.clone(),
            source_ambient: ambient.clone(),
            normal,
            ambient,
            gray_ambient: None,
        }
    }

    pub fn load(normal: &Path, ambient: &Path) -> Result<Self, AssetError> {
        Ok(Self::new(load_bitmap(normal)?, load_bitmap(ambient)?))
    }

    pub fn normal(&self) -> &RgbaImage {
        &self.normal
    }

    pub fn ambient(&self) -> &RgbaImage {
        &self.ambient
    }

    pub fn gray_ambient(&self) -> Option<&RgbaImage> {
        self.gray_ambient.as_ref()
    }

    /// Scale both backgrounds so the normal one spans `target_width`.
    ///
    /// One factor, `target_width / source_normal.width`, applies to every
    /// dimension of both decoded originals, so sizes and pixels always come
    /// from the same source and repeated surface changes keep its aspect
    /// ratio. The gray
    /// ambient variant is rebuilt when `build_gray` is set and dropped
    /// otherwise. Returns the applied factor, or `None` for a zero width.
    pub fn rescale(&mut self, target_width: u32, build_gray: bool) -> Option<f32> {
        if target_width == 0 {
            warn!("Ignoring rescale to zero width");
            return None;
        }

        let scale = target_width as f32 / self.source_normal.width() as f32;

        let (width, height) = scaled_dimensions(self.source_normal.dimensions(), scale);
        self.normal = imageops::resize(&self.source_normal, width, height, FilterType::Triangle);

        let (width, height) = scaled_dimensions(self.source_ambient.dimensions(), scale);
        self.ambient = imageops::resize(&self.source_ambient, width, height, FilterType::Triangle);

        self.gray_ambient = if build_gray {
            Some(desaturate(&self.ambient))
        } else {
            None
        };

        info!(
            "Rescaled backgrounds by {:.3}: normal {}x{}, ambient {}x{}, gray ambient {}",
            scale,
            self.normal.width(),
            self.normal.height(),
            self.ambient.width(),
            self.ambient.height(),
            if self.gray_ambient.is_some() { "built" } else { "skipped" }
        );

        Some(scale)
    }
}

/// Scale both sides by the same factor, rounding to the nearest pixel
pub fn scaled_dimensions((width, height): (u32, u32), scale: f32) -> (u32, u32) {
    let scale_side = |side: u32| ((side as f32 * scale).round() as u32).max(1);
    (scale_side(width), scale_side(height))
}

/// Zero-saturation copy: every channel becomes the pixel's luminance, alpha
/// is kept
pub fn desaturate(source: &RgbaImage) -> RgbaImage {
    let mut gray = RgbaImage::new(source.width(), source.height());
    for (x, y, pixel) in source.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let luma = (LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32)
            .round()
            .clamp(0.0, 255.0) as u8;
        gray.put_pixel(x, y, Rgba([luma, luma, luma, a]));
    }
    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn rescale_matches_target_width_and_keeps_aspect() {
        let mut set = BitmapSet::new(
            solid(400, 300, [10, 20, 30, 255]),
            solid(400, 300, [200, 100, 50, 255]),
        );

        let scale = set.rescale(454, false).unwrap();
        assert!((scale - 1.135).abs() < 1e-4);
        assert_eq!(set.normal().width(), 454);

        let expected_height = 300.0 * 454.0 / 400.0;
        assert!((set.normal().height() as f32 - expected_height).abs() <= 1.0);
        assert_eq!(set.ambient().dimensions(), set.normal().dimensions());
    }

    #[test]
    fn ambient_uses_the_normal_bitmap_factor() {
        let mut set = BitmapSet::new(
            solid(200, 200, [0, 0, 0, 255]),
            solid(100, 50, [0, 0, 0, 255]),
        );
        set.rescale(300, false);
        assert_eq!(set.normal().dimensions(), (300, 300));
        assert_eq!(set.ambient().dimensions(), (150, 75));
    }

    #[test]
    fn repeated_rescale_follows_current_width() {
        let mut set = BitmapSet::new(
            solid(320, 240, [0, 0, 0, 255]),
            solid(320, 240, [0, 0, 0, 255]),
        );
        set.rescale(160, false);
        set.rescale(480, false);
        assert_eq!(set.normal().dimensions(), (480, 360));
    }

    #[test]
    fn shrinking_then_growing_keeps_source_aspect() {
        let mut set = BitmapSet::new(
            solid(454, 300, [0, 0, 0, 255]),
            solid(454, 300, [0, 0, 0, 255]),
        );
        set.rescale(20, false);
        assert_eq!(set.normal().width(), 20);

        set.rescale(454, false);
        assert_eq!(set.normal().dimensions(), (454, 300));
        assert_eq!(set.ambient().dimensions(), (454, 300));
    }

    #[test]
    fn zero_width_is_ignored() {
        let mut set = BitmapSet::new(solid(8, 8, [0; 4]), solid(8, 8, [0; 4]));
        assert!(set.rescale(0, true).is_none());
        assert_eq!(set.normal().dimensions(), (8, 8));
        assert!(set.gray_ambient().is_none());
    }

    #[test]
    fn gray_ambient_built_only_on_request() {
        let mut set = BitmapSet::new(
            solid(16, 16, [255, 0, 0, 255]),
            solid(16, 16, [0, 255, 0, 128]),
        );

        set.rescale(32, true);
        let gray = set.gray_ambient().expect("gray ambient");
        assert_eq!(gray.dimensions(), set.ambient().dimensions());

        set.rescale(32, false);
        assert!(set.gray_ambient().is_none());
    }

    #[test]
    fn desaturate_uses_luminance_and_keeps_alpha() {
        let source = solid(2, 2, [0, 255, 0, 128]);
        let gray = desaturate(&source);
        let [r, g, b, a] = gray.get_pixel(1, 1).0;
        assert_eq!((r, g, b), (182, 182, 182));
        assert_eq!(a, 128);

        let white = desaturate(&solid(1, 1, [255, 255, 255, 255]));
        assert_eq!(white.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn load_reports_missing_and_decodes_png() {
        let dir = std::env::temp_dir().join(format!("ventus-bitmaps-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.png");
        match load_bitmap(&missing) {
            Err(AssetError::Decode { path, .. }) => assert!(path.ends_with("missing.png")),
            other => panic!("unexpected result {:?}", other.map(|image| image.dimensions())),
        }

        let path = dir.join("solid.png");
        solid(6, 4, [1, 2, 3, 255]).save(&path).unwrap();
        let loaded = load_bitmap(&path).unwrap();
        assert_eq!(loaded.dimensions(), (6, 4));
        assert_eq!(loaded.get_pixel(5, 3).0, [1, 2, 3, 255]);

        let set = BitmapSet::load(&path, &path).unwrap();
        assert_eq!(set.ambient().dimensions(), (6, 4));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
