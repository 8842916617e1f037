use crate::models::face_state::{InterruptionFilter, TapType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct AmbientRequest {
    pub ambient: bool,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct VisibilityRequest {
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct InterruptionFilterRequest {
    pub filter: InterruptionFilter,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct TapRequest {
    #[serde(default = "default_tap_type")]
    pub tap_type: TapType,
    pub x: i32,
    pub y: i32,
}

fn default_tap_type() -> TapType {
    TapType::Tap
}

// Offset east of UTC, in minutes
#[derive(Serialize, Deserialize, Clone)]
pub struct TimeZoneRequest {
    pub utc_offset_minutes: i32,
}
