//! Control endpoints that play the part of the platform: each request is
//! turned into a host notification for the engine task.

use crate::models::events::HostEvent;
use crate::models::requests::{
    AmbientRequest, InterruptionFilterRequest, TapRequest, TimeZoneRequest, VisibilityRequest,
};
use crate::web::api::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{FixedOffset, Utc};
use log::{debug, warn};

fn dispatch(state: &AppState, event: HostEvent) -> StatusCode {
    let name = event.name();
    match state.notifications.send(event) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(_) => {
            warn!("Dropping {} notification: watch face is gone", name);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn set_ambient(
    State(state): State<AppState>,
    Json(request): Json<AmbientRequest>,
) -> StatusCode {
    dispatch(&state, HostEvent::AmbientModeChanged(request.ambient))
}

pub async fn set_visibility(
    State(state): State<AppState>,
    Json(request): Json<VisibilityRequest>,
) -> StatusCode {
    dispatch(&state, HostEvent::VisibilityChanged(request.visible))
}

pub async fn set_interruption_filter(
    State(state): State<AppState>,
    Json(request): Json<InterruptionFilterRequest>,
) -> StatusCode {
    dispatch(&state, HostEvent::InterruptionFilterChanged(request.filter))
}

pub async fn tap(State(state): State<AppState>, Json(request): Json<TapRequest>) -> StatusCode {
    dispatch(
        &state,
        HostEvent::Tap {
            tap_type: request.tap_type,
            x: request.x,
            y: request.y,
            event_time: Utc::now().timestamp_millis(),
        },
    )
}

/// Time-zone broadcast. Like the platform, the shell only delivers it while
/// the face has its receiver registered.
pub async fn change_time_zone(
    State(state): State<AppState>,
    Json(request): Json<TimeZoneRequest>,
) -> StatusCode {
    let Some(offset) = request
        .utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
    else {
        return StatusCode::BAD_REQUEST;
    };

    if !state.signals.time_zone_receiver_registered() {
        debug!("No time-zone receiver registered, broadcast not delivered");
        return StatusCode::ACCEPTED;
    }
    dispatch(&state, HostEvent::TimeZoneChanged(offset))
}
