use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Snapshot of the engine published after every notification
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineStatus {
    pub started: bool,
    pub destroyed: bool,
    pub ambient: bool,
    pub low_bit_ambient: bool,
    pub burn_in_protection: bool,
    pub muted: bool,
    pub visible: bool,
    pub utc_offset_seconds: i32,
    pub scheduler: SchedulerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_fire_at_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<[u32; 2]>,
    pub gray_ambient_available: bool,
    pub time_zone_receiver: bool,
}

/// Broadcast every time a frame is painted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub frame: u64,
    pub time: String,
    pub ambient: bool,
    pub muted: bool,
}
