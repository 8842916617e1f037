mod background;
mod context;
mod time_text;

pub use context::RenderContext;
pub use time_text::TimePalette;

use background::draw_bitmap;
use time_text::{draw_filled_text, draw_stroked_text, STROKE_WIDTH};

use crate::display::driver::FaceCanvas;
use crate::engine::bitmaps::BitmapSet;
use crate::engine::clock::format_clock;
use crate::models::face_state::RenderState;
use chrono::{DateTime, FixedOffset};
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::RgbColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundLayer {
    Normal,
    Ambient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextPaint {
    Stroke { width: u32 },
    Fill,
}

/// One step of a painted frame
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb888),
    Background {
        layer: BackgroundLayer,
        origin: Point,
    },
    Text {
        text: String,
        anchor: Point,
        color: Rgb888,
        paint: TextPaint,
    },
}

/// Pick the background for the current mode.
///
/// Ambient mode always shows the ambient bitmap, whatever the low-bit and
/// burn-in flags say. The desaturated variant built by `BitmapSet::rescale`
/// is never selected here.
pub fn select_background(state: &RenderState) -> BackgroundLayer {
    if state.ambient() {
        BackgroundLayer::Ambient
    } else {
        BackgroundLayer::Normal
    }
}

/// Describe a frame without touching a canvas
pub fn plan_frame(
    bounds: Size,
    state: &RenderState,
    palette: &TimePalette,
    now: &DateTime<FixedOffset>,
) -> Vec<DrawCommand> {
    let ctx = RenderContext::new(bounds);
    let text = format_clock(now);
    let anchor = ctx.time_anchor();

    vec![
        DrawCommand::Clear(Rgb888::BLACK),
        DrawCommand::Background {
            layer: select_background(state),
            origin: Point::zero(),
        },
        DrawCommand::Text {
            text: text.clone(),
            anchor,
            color: palette.stroke,
            paint: TextPaint::Stroke {
                width: STROKE_WIDTH,
            },
        },
        DrawCommand::Text {
            text,
            anchor,
            color: palette.fill,
            paint: TextPaint::Fill,
        },
    ]
}

/// Paint background and time readout onto `canvas`
pub fn render(
    canvas: &mut dyn FaceCanvas,
    bounds: Size,
    state: &RenderState,
    bitmaps: &BitmapSet,
    palette: &TimePalette,
    now: &DateTime<FixedOffset>,
) {
    for command in plan_frame(bounds, state, palette, now) {
        match command {
            DrawCommand::Clear(color) => canvas.fill(color.r(), color.g(), color.b()),
            DrawCommand::Background { layer, origin } => {
                let bitmap = match layer {
                    BackgroundLayer::Normal => bitmaps.normal(),
                    BackgroundLayer::Ambient => bitmaps.ambient(),
                };
                draw_bitmap(canvas, bitmap, origin.x, origin.y);
            }
            DrawCommand::Text {
                text,
                anchor,
                color,
                paint,
            } => match paint {
                TextPaint::Stroke { width } => {
                    draw_stroked_text(canvas, &text, anchor, color, width)
                }
                TextPaint::Fill => draw_filled_text(canvas, &text, anchor, color),
            },
        }
    }
}
