use crate::display::driver::FaceCanvas;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Size,
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};

pub struct EmbeddedGraphicsCanvas<'a> {
    canvas: &'a mut dyn FaceCanvas,
}

impl<'a> EmbeddedGraphicsCanvas<'a> {
    pub fn new(canvas: &'a mut dyn FaceCanvas) -> Self {
        Self { canvas }
    }
}

impl<'a> DrawTarget for EmbeddedGraphicsCanvas<'a> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.canvas.size();
        for Pixel(point, color) in pixels.into_iter() {
            // Only draw pixels within bounds
            if point.x >= 0 && point.y >= 0 && point.x < width && point.y < height {
                self.canvas
                    .set_pixel(point.x as usize, point.y as usize, color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.canvas.fill(color.r(), color.g(), color.b());
        Ok(())
    }
}

impl<'a> embedded_graphics::prelude::OriginDimensions for EmbeddedGraphicsCanvas<'a> {
    fn size(&self) -> Size {
        let (width, height) = self.canvas.size();
        Size::new(width.max(0) as u32, height.max(0) as u32)
    }
}
