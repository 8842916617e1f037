use crate::display::driver::FaceCanvas;
use image::RgbaImage;

/// Blend `bitmap` onto the canvas with its top-left corner at `(x, y)`.
/// Pixels falling outside the canvas are clipped.
pub fn draw_bitmap(canvas: &mut dyn FaceCanvas, bitmap: &RgbaImage, x: i32, y: i32) {
    let (width, height) = canvas.size();

    for (src_x, src_y, pixel) in bitmap.enumerate_pixels() {
        let dst_x = x + src_x as i32;
        let dst_y = y + src_y as i32;
        if dst_x < 0 || dst_y < 0 || dst_x >= width || dst_y >= height {
            continue;
        }

        let [r, g, b, a] = pixel.0;
        let (dst_x, dst_y) = (dst_x as usize, dst_y as usize);
        match a {
            0 => {}
            255 => canvas.set_pixel(dst_x, dst_y, r, g, b),
            alpha => {
                let [dr, dg, db] = canvas.get_pixel(dst_x, dst_y);
                canvas.set_pixel(
                    dst_x,
                    dst_y,
                    blend(r, dr, alpha),
                    blend(g, dg, alpha),
                    blend(b, db, alpha),
                );
            }
        }
    }
}

fn blend(src: u8, dst: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    ((src as u32 * alpha + dst as u32 * (255 - alpha) + 127) / 255) as u8
}
