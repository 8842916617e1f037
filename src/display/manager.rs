use crate::display::driver::{FaceCanvas, Framebuffer};
use crate::engine::clock::format_clock;
use crate::engine::WatchFaceEngine;
use crate::models::status::FrameUpdate;
use crate::web::api::events::EventState;
use bytes::Bytes;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

/// Owns the simulated screen: paints the engine into a framebuffer and
/// publishes every finished frame
pub struct DisplayManager {
    framebuffer: Option<Framebuffer>,
    frame_count: u64,
    frames_since_stats: u32,
    last_stats_time: Instant,
    event_state: Arc<EventState>,
}

impl DisplayManager {
    pub fn new(event_state: Arc<EventState>) -> Self {
        Self {
            framebuffer: None,
            frame_count: 0,
            frames_since_stats: 0,
            last_stats_time: Instant::now(),
            event_state,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Run the engine's draw hook and publish the result
    pub fn update_display(&mut self, engine: &WatchFaceEngine) {
        let Some(surface) = engine.surface() else {
            debug!("Redraw requested before the surface size is known");
            return;
        };

        let size = (surface.width as i32, surface.height as i32);
        if self.framebuffer.as_ref().map(|canvas| canvas.size()) != Some(size) {
            debug!("Allocating {}x{} framebuffer", surface.width, surface.height);
            self.framebuffer = None;
        }
        let canvas = self
            .framebuffer
            .get_or_insert_with(|| Framebuffer::new(surface.width, surface.height));

        engine.draw(canvas);
        self.frame_count += 1;

        match canvas.encode_png() {
            Ok(png) => self.event_state.publish_frame(Bytes::from(png)),
            Err(e) => error!("Failed to encode frame {}: {}", self.frame_count, e),
        }

        self.event_state.broadcast_redraw(FrameUpdate {
            frame: self.frame_count,
            time: format_clock(&engine.local_now()),
            ambient: engine.state().ambient(),
            muted: engine.state().muted(),
        });

        self.log_stats();
    }

    /// Blank the screen before the process exits
    pub fn shutdown(&mut self) {
        info!("Shutting down display manager");
        if let Some(canvas) = self.framebuffer.as_mut() {
            canvas.fill(0, 0, 0);
            match canvas.encode_png() {
                Ok(png) => self.event_state.publish_frame(Bytes::from(png)),
                Err(e) => error!("Failed to encode blank frame: {}", e),
            }
        }
    }

    fn log_stats(&mut self) {
        self.frames_since_stats += 1;
        let elapsed = self.last_stats_time.elapsed();
        if elapsed.as_secs() >= 60 {
            info!(
                "Display performance: {} frames in {:.0}s",
                self.frames_since_stats,
                elapsed.as_secs_f32()
            );
            self.frames_since_stats = 0;
            self.last_stats_time = Instant::now();
        }
    }
}
