use crate::display::driver::FaceCanvas;
use crate::display::graphics::embedded_graphics_support::EmbeddedGraphicsCanvas;
use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;
use embedded_graphics::text::Text;
use embedded_graphics::Drawable;
use profont::PROFONT_24_POINT;

/// Outline width of the stroke pass, in pixels
pub const STROKE_WIDTH: u32 = 6;

/// Accent used for the outline in interactive mode
pub const ACCENT: Rgb888 = Rgb888::new(157, 200, 109);

/// Fill and outline colors of the time readout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimePalette {
    pub fill: Rgb888,
    pub stroke: Rgb888,
}

impl TimePalette {
    pub fn for_mode(ambient: bool) -> Self {
        if ambient {
            Self {
                fill: Rgb888::BLACK,
                stroke: Rgb888::WHITE,
            }
        } else {
            Self {
                fill: Rgb888::BLACK,
                stroke: ACCENT,
            }
        }
    }
}

/// Draw the text as an outline: the glyphs are stamped at every offset within
/// half the stroke width
pub fn draw_stroked_text(
    canvas: &mut dyn FaceCanvas,
    text: &str,
    anchor: Point,
    color: Rgb888,
    width: u32,
) {
    let mut eg_canvas = EmbeddedGraphicsCanvas::new(canvas);
    let style = MonoTextStyle::new(&PROFONT_24_POINT, color);
    let radius = (width / 2) as i32;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let _ = Text::new(text, anchor + Point::new(dx, dy), style).draw(&mut eg_canvas);
        }
    }
}

pub fn draw_filled_text(canvas: &mut dyn FaceCanvas, text: &str, anchor: Point, color: Rgb888) {
    let mut eg_canvas = EmbeddedGraphicsCanvas::new(canvas);
    let style = MonoTextStyle::new(&PROFONT_24_POINT, color);
    let _ = Text::new(text, anchor, style).draw(&mut eg_canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::driver::Framebuffer;

    #[test]
    fn palette_follows_mode() {
        let ambient = TimePalette::for_mode(true);
        assert_eq!(ambient.fill, Rgb888::BLACK);
        assert_eq!(ambient.stroke, Rgb888::new(255, 255, 255));

        let active = TimePalette::for_mode(false);
        assert_eq!(active.fill, Rgb888::BLACK);
        assert_eq!(active.stroke, Rgb888::new(157, 200, 109));
    }

    #[test]
    fn outline_extends_past_the_fill() {
        let anchor = Point::new(10, 40);

        let mut filled = Framebuffer::new(120, 60);
        filled.fill(255, 255, 255);
        draw_filled_text(&mut filled, "12:34", anchor, Rgb888::BLACK);

        let mut stroked = Framebuffer::new(120, 60);
        stroked.fill(255, 255, 255);
        draw_stroked_text(&mut stroked, "12:34", anchor, Rgb888::BLACK, STROKE_WIDTH);

        let count = |canvas: &Framebuffer| {
            canvas
                .image()
                .pixels()
                .filter(|pixel| pixel.0 == [0, 0, 0])
                .count()
        };
        assert!(count(&filled) > 0);
        assert!(count(&stroked) > count(&filled));
    }
}
