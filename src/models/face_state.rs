use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// System-wide notification suppression mode reported by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptionFilter {
    Unknown,
    All,
    Priority,
    None,
    Alarms,
}

impl InterruptionFilter {
    /// The face dims itself only when every interruption is suppressed
    pub fn mutes_display(self) -> bool {
        matches!(self, InterruptionFilter::None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapType {
    /// The user has started touching the screen
    Touch,
    /// The user started a different gesture or otherwise cancelled the tap
    TouchCancel,
    /// The user completed the tap gesture
    Tap,
}

/// Flags the host toggles through lifecycle notifications.
///
/// Every setter reports whether the stored value actually changed so the
/// engine can skip redraws and timer re-evaluation for repeated input.
#[derive(Clone, Debug)]
pub struct RenderState {
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    properties_known: bool,
    muted: bool,
    visible: bool,
    time_zone: FixedOffset,
}

impl RenderState {
    pub fn new(time_zone: FixedOffset) -> Self {
        Self {
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            properties_known: false,
            muted: false,
            visible: false,
            time_zone,
        }
    }

    pub fn ambient(&self) -> bool {
        self.ambient
    }

    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    pub fn set_ambient(&mut self, ambient: bool) -> bool {
        replace_if_changed(&mut self.ambient, ambient)
    }

    pub fn set_muted(&mut self, muted: bool) -> bool {
        replace_if_changed(&mut self.muted, muted)
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        replace_if_changed(&mut self.visible, visible)
    }

    pub fn set_time_zone(&mut self, time_zone: FixedOffset) -> bool {
        replace_if_changed(&mut self.time_zone, time_zone)
    }

    /// Device properties are latched by the first notification.
    ///
    /// Returns `false` when the properties were already known; a later
    /// notification never overrides them.
    pub fn set_properties(&mut self, low_bit_ambient: bool, burn_in_protection: bool) -> bool {
        if self.properties_known {
            return false;
        }
        self.low_bit_ambient = low_bit_ambient;
        self.burn_in_protection = burn_in_protection;
        self.properties_known = true;
        true
    }

    /// The once-per-second redraw only runs while the face is on screen in
    /// interactive mode
    pub fn should_redraw_every_second(&self) -> bool {
        self.visible && !self.ambient
    }

    /// A grayscale ambient background only looks right on devices without
    /// pixel shifting or reduced color depth
    pub fn wants_gray_ambient(&self) -> bool {
        !self.burn_in_protection && !self.low_bit_ambient
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
