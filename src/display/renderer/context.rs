use embedded_graphics::geometry::{Point, Size};

/// Surface geometry shared by the background and time renderers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderContext {
    /// Surface width in pixels
    pub surface_width: i32,

    /// Surface height in pixels
    pub surface_height: i32,
}

impl RenderContext {
    pub fn new(bounds: Size) -> Self {
        Self {
            surface_width: bounds.width as i32,
            surface_height: bounds.height as i32,
        }
    }

    /// Baseline anchor of the time readout.
    ///
    /// The horizontal position follows the surface height and the vertical
    /// one the width; on the round, square-buffered screens this face
    /// targets both sides are equal.
    pub fn time_anchor(&self) -> Point {
        let x = self.surface_height as f32 / 9.5;
        let y = self.surface_width as f32 / 2.25;
        Point::new(x as i32, y as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_scales_with_surface() {
        let ctx = RenderContext::new(Size::new(454, 454));
        assert_eq!(ctx.time_anchor(), Point::new(47, 201));

        let ctx = RenderContext::new(Size::new(320, 190));
        assert_eq!(ctx.time_anchor(), Point::new(20, 142));
    }
}
