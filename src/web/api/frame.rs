use crate::models::status::EngineStatus;
use crate::web::api::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Latest painted frame as PNG
pub async fn get_frame(State(state): State<AppState>) -> Response {
    let png = state.event_state.latest_frame();
    if png.is_empty() {
        return (StatusCode::NOT_FOUND, "no frame has been drawn yet").into_response();
    }
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        png,
    )
        .into_response()
}

pub async fn get_state(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.event_state.latest_status())
}
