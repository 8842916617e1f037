pub mod bitmaps;
pub mod clock;
pub mod host;
pub mod scheduler;

use crate::display::driver::FaceCanvas;
use crate::display::renderer::{render, TimePalette};
use crate::models::events::HostEvent;
use crate::models::face_state::{InterruptionFilter, RenderState, TapType};
use crate::models::status::EngineStatus;
use bitmaps::BitmapSet;
use chrono::{DateTime, FixedOffset};
use clock::{local_time, system_time_zone, Clock};
use embedded_graphics::geometry::Size;
use host::WatchFaceHost;
use log::{debug, info, warn};
use scheduler::{FireToken, PendingFire, RedrawScheduler};

/// The watch face component.
///
/// Owns render state, bitmaps and the redraw timer. The host drives it
/// through the `on_*` notifications and paints by calling [`draw`].
///
/// [`draw`]: WatchFaceEngine::draw
pub struct WatchFaceEngine {
    state: RenderState,
    bitmaps: BitmapSet,
    scheduler: RedrawScheduler,
    palette: TimePalette,
    surface: Option<Size>,
    host: Box<dyn WatchFaceHost>,
    clock: Box<dyn Clock>,
    time_zone_receiver_registered: bool,
    started: bool,
    destroyed: bool,
}

impl WatchFaceEngine {
    pub fn new(bitmaps: BitmapSet, host: Box<dyn WatchFaceHost>, clock: Box<dyn Clock>) -> Self {
        Self {
            state: RenderState::new(system_time_zone()),
            bitmaps,
            scheduler: RedrawScheduler::new(),
            palette: TimePalette::for_mode(false),
            surface: None,
            host,
            clock,
            time_zone_receiver_registered: false,
            started: false,
            destroyed: false,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn bitmaps(&self) -> &BitmapSet {
        &self.bitmaps
    }

    pub fn palette(&self) -> &TimePalette {
        &self.palette
    }

    pub fn surface(&self) -> Option<Size> {
        self.surface
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn pending_fire(&self) -> Option<PendingFire> {
        self.scheduler.pending()
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn local_now(&self) -> DateTime<FixedOffset> {
        local_time(self.clock.now_millis(), self.state.time_zone())
    }

    /// Dispatch a host notification to its handler
    pub fn handle_event(&mut self, event: HostEvent) {
        if self.destroyed {
            warn!("Ignoring {} notification after destroy", event.name());
            return;
        }

        match event {
            HostEvent::Start => self.on_start(),
            HostEvent::Destroy => self.on_destroy(),
            HostEvent::PropertiesChanged {
                low_bit_ambient,
                burn_in_protection,
            } => self.on_properties_changed(low_bit_ambient, burn_in_protection),
            HostEvent::TimeTick => self.on_time_tick(),
            HostEvent::AmbientModeChanged(ambient) => self.on_ambient_mode_changed(ambient),
            HostEvent::InterruptionFilterChanged(filter) => {
                self.on_interruption_filter_changed(filter)
            }
            HostEvent::SurfaceSizeChanged { width, height } => {
                self.on_surface_size_changed(width, height)
            }
            HostEvent::Tap {
                tap_type,
                x,
                y,
                event_time,
            } => self.on_tap_event(tap_type, x, y, event_time),
            HostEvent::VisibilityChanged(visible) => self.on_visibility_changed(visible),
            HostEvent::TimeZoneChanged(time_zone) => self.on_time_zone_changed(time_zone),
        }
    }

    pub fn on_start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.state.set_time_zone(system_time_zone());
        info!("Watch face started (accepts tap events)");
    }

    /// Tear down: the pending fire is cancelled before anything else is
    /// released
    pub fn on_destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.scheduler.shutdown();
        self.unregister_time_zone_receiver();
        self.destroyed = true;
        info!("Watch face destroyed");
    }

    pub fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        if self.state.set_properties(low_bit_ambient, burn_in_protection) {
            info!(
                "Device properties: low-bit ambient {}, burn-in protection {}",
                low_bit_ambient, burn_in_protection
            );
        } else if self.state.low_bit_ambient() != low_bit_ambient
            || self.state.burn_in_protection() != burn_in_protection
        {
            warn!("Ignoring changed device properties; they are fixed after the first notification");
        }
    }

    pub fn on_time_tick(&mut self) {
        self.invalidate();
    }

    pub fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if !self.state.set_ambient(ambient) {
            return;
        }
        debug!("Ambient mode {}", if ambient { "entered" } else { "left" });

        self.palette = TimePalette::for_mode(ambient);
        self.update_timer();
    }

    pub fn on_interruption_filter_changed(&mut self, filter: InterruptionFilter) {
        if self.state.set_muted(filter.mutes_display()) {
            debug!("Mute mode {}", self.state.muted());
            self.invalidate();
        }
    }

    pub fn on_surface_size_changed(&mut self, width: u32, height: u32) {
        let size = Size::new(width, height);
        if self.surface == Some(size) {
            return;
        }
        info!("Surface size changed to {}x{}", width, height);

        self.surface = Some(size);
        self.bitmaps.rescale(width, self.state.wants_gray_ambient());
        self.invalidate();
    }

    pub fn on_tap_event(&mut self, tap_type: TapType, x: i32, y: i32, event_time: i64) {
        debug!("Tap {:?} at ({}, {}) t={}", tap_type, x, y, event_time);
        self.invalidate();
    }

    pub fn on_visibility_changed(&mut self, visible: bool) {
        if !self.state.set_visible(visible) {
            return;
        }
        debug!("Visibility changed to {}", visible);

        if visible {
            self.register_time_zone_receiver();
            // The zone may have changed while nobody was listening
            self.state.set_time_zone(system_time_zone());
            self.invalidate();
        } else {
            self.unregister_time_zone_receiver();
        }

        self.update_timer();
    }

    /// Time-zone broadcast; only honoured while the receiver is registered
    pub fn on_time_zone_changed(&mut self, time_zone: FixedOffset) {
        if !self.time_zone_receiver_registered {
            debug!("Dropping time-zone broadcast while receiver is unregistered");
            return;
        }
        if self.state.set_time_zone(time_zone) {
            info!("Time zone changed to {}", time_zone);
            self.invalidate();
        }
    }

    /// Deliver a scheduler fire. Stale tokens and fires after teardown are
    /// silently dropped.
    pub fn handle_fire(&mut self, token: FireToken) {
        let now = self.clock.now_millis();
        let should_run = self.state.should_redraw_every_second();
        if self.scheduler.fire(token, now, should_run) {
            self.invalidate();
        }
    }

    /// Draw hook: paint the current frame onto `canvas`
    pub fn draw(&self, canvas: &mut dyn FaceCanvas) {
        if self.destroyed {
            return;
        }
        let (width, height) = canvas.size();
        let bounds = Size::new(width.max(0) as u32, height.max(0) as u32);
        render(
            canvas,
            bounds,
            &self.state,
            &self.bitmaps,
            &self.palette,
            &self.local_now(),
        );
    }

    pub fn status(&self) -> EngineStatus {
        let pending = self.scheduler.pending();
        EngineStatus {
            started: self.started,
            destroyed: self.destroyed,
            ambient: self.state.ambient(),
            low_bit_ambient: self.state.low_bit_ambient(),
            burn_in_protection: self.state.burn_in_protection(),
            muted: self.state.muted(),
            visible: self.state.visible(),
            utc_offset_seconds: self.state.time_zone().local_minus_utc(),
            scheduler: self.scheduler.state(),
            next_fire_at_ms: pending.map(|fire| fire.fire_at),
            surface: self.surface.map(|size| [size.width, size.height]),
            gray_ambient_available: self.bitmaps.gray_ambient().is_some(),
            time_zone_receiver: self.time_zone_receiver_registered,
        }
    }

    fn invalidate(&mut self) {
        self.host.request_redraw();
    }

    /// Cancel any pending fire and restart the timer if it should run
    fn update_timer(&mut self) {
        let now = self.clock.now_millis();
        if self
            .scheduler
            .update(self.state.should_redraw_every_second(), now)
        {
            self.invalidate();
        }
    }

    fn register_time_zone_receiver(&mut self) {
        if self.time_zone_receiver_registered {
            return;
        }
        self.time_zone_receiver_registered = true;
        self.host.register_time_zone_receiver();
    }

    fn unregister_time_zone_receiver(&mut self) {
        if !self.time_zone_receiver_registered {
            return;
        }
        self.time_zone_receiver_registered = false;
        self.host.unregister_time_zone_receiver();
    }
}
