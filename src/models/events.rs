use crate::models::face_state::{InterruptionFilter, TapType};
use chrono::FixedOffset;

/// Notifications the host delivers to the watch face
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Start,
    Destroy,
    PropertiesChanged {
        low_bit_ambient: bool,
        burn_in_protection: bool,
    },
    TimeTick,
    AmbientModeChanged(bool),
    InterruptionFilterChanged(InterruptionFilter),
    SurfaceSizeChanged {
        width: u32,
        height: u32,
    },
    Tap {
        tap_type: TapType,
        x: i32,
        y: i32,
        event_time: i64,
    },
    VisibilityChanged(bool),
    /// System time-zone broadcast
    TimeZoneChanged(FixedOffset),
}

impl HostEvent {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::Start => "start",
            HostEvent::Destroy => "destroy",
            HostEvent::PropertiesChanged { .. } => "properties-changed",
            HostEvent::TimeTick => "time-tick",
            HostEvent::AmbientModeChanged(_) => "ambient-mode-changed",
            HostEvent::InterruptionFilterChanged(_) => "interruption-filter-changed",
            HostEvent::SurfaceSizeChanged { .. } => "surface-size-changed",
            HostEvent::Tap { .. } => "tap",
            HostEvent::VisibilityChanged(_) => "visibility-changed",
            HostEvent::TimeZoneChanged(_) => "time-zone-changed",
        }
    }
}
