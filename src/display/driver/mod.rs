use image::{ImageFormat, Rgb, RgbImage};
use std::fmt::Debug;
use std::io::Cursor;

// Core trait every drawing surface implements
pub trait FaceCanvas: Debug + Send {
    fn set_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8);
    fn get_pixel(&self, x: usize, y: usize) -> [u8; 3];
    fn fill(&mut self, r: u8, g: u8, b: u8);
    fn size(&self) -> (i32, i32); // (width, height)
}

/// In-memory RGB surface the simulated host paints into
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: RgbImage,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Cursor::new(Vec::new());
        self.pixels.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

impl FaceCanvas for Framebuffer {
    fn set_pixel(&mut self, x: usize, y: usize, r: u8, g: u8, b: u8) {
        if x < self.pixels.width() as usize && y < self.pixels.height() as usize {
            self.pixels.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }

    fn get_pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels
            .get_pixel_checked(x as u32, y as u32)
            .map(|pixel| pixel.0)
            .unwrap_or([0, 0, 0])
    }

    fn fill(&mut self, r: u8, g: u8, b: u8) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgb([r, g, b]);
        }
    }

    fn size(&self) -> (i32, i32) {
        (self.pixels.width() as i32, self.pixels.height() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut canvas = Framebuffer::new(4, 3);
        canvas.set_pixel(4, 0, 255, 0, 0);
        canvas.set_pixel(0, 3, 255, 0, 0);
        canvas.set_pixel(3, 2, 1, 2, 3);

        assert_eq!(canvas.get_pixel(3, 2), [1, 2, 3]);
        assert_eq!(canvas.get_pixel(9, 9), [0, 0, 0]);
        assert_eq!(canvas.size(), (4, 3));
    }

    #[test]
    fn encodes_png() {
        let mut canvas = Framebuffer::new(2, 2);
        canvas.fill(157, 200, 109);
        let png = canvas.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(1, 1).0, [157, 200, 109]);
    }
}
