use crate::models::status::{EngineStatus, FrameUpdate};
use crate::web::api::AppState;
use axum::{
    extract::State,
    response::{sse::Event, Sse},
};
use bytes::Bytes;
use futures::stream::{self, Stream};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tokio::sync::watch;
use tokio_stream::StreamExt as _;

// Everything the engine task publishes for the control API
pub struct EventState {
    redraw_tx: Sender<FrameUpdate>,
    frame_tx: watch::Sender<Bytes>,
    status_tx: watch::Sender<EngineStatus>,
}

impl EventState {
    pub fn new(initial_status: EngineStatus) -> Arc<Self> {
        let (redraw_tx, _) = broadcast::channel(100);
        let (frame_tx, _) = watch::channel(Bytes::new());
        let (status_tx, _) = watch::channel(initial_status);

        Arc::new(Self {
            redraw_tx,
            frame_tx,
            status_tx,
        })
    }

    pub fn broadcast_redraw(&self, update: FrameUpdate) {
        let _ = self.redraw_tx.send(update);
    }

    pub fn subscribe_redraws(&self) -> Receiver<FrameUpdate> {
        self.redraw_tx.subscribe()
    }

    pub fn publish_frame(&self, png: Bytes) {
        self.frame_tx.send_replace(png);
    }

    /// PNG of the most recent frame; empty until the first paint
    pub fn latest_frame(&self) -> Bytes {
        self.frame_tx.borrow().clone()
    }

    pub fn publish_status(&self, status: EngineStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }

    pub fn latest_status(&self) -> EngineStatus {
        self.status_tx.borrow().clone()
    }
}

// Handler for redraw SSE events
pub async fn redraw_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let redraw_rx = state.event_state.subscribe_redraws();

    let stream = stream::unfold(redraw_rx, |mut rx| async move {
        match rx.recv().await {
            Ok(update) => {
                let event = match serde_json::to_string(&update) {
                    Ok(payload) => Event::default().data(payload),
                    Err(_) => Event::default().event("ping").data(""),
                };
                Some((Ok(event), rx))
            }
            Err(broadcast::error::RecvError::Lagged(_)) => {
                // Keep connection alive with a comment
                let event = Event::default().event("ping").data("");
                Some((Ok(event), rx))
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    });

    // Add keepalive logic
    let keepalive = stream::repeat_with(|| Event::default().event("ping").data(""))
        .map(Ok)
        .throttle(Duration::from_secs(30));

    Sse::new(stream.merge(keepalive)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive-text"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::SchedulerState;

    fn status() -> EngineStatus {
        EngineStatus {
            started: true,
            destroyed: false,
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            muted: false,
            visible: true,
            utc_offset_seconds: 0,
            scheduler: SchedulerState::Running,
            next_fire_at_ms: Some(1000),
            surface: Some([454, 454]),
            gray_ambient_available: true,
            time_zone_receiver: true,
        }
    }

    #[test]
    fn latest_values_replace_previous_ones() {
        let state = EventState::new(status());
        assert!(state.latest_frame().is_empty());

        state.publish_frame(Bytes::from_static(b"one"));
        state.publish_frame(Bytes::from_static(b"two"));
        assert_eq!(state.latest_frame(), Bytes::from_static(b"two"));

        let mut ambient = status();
        ambient.ambient = true;
        ambient.scheduler = SchedulerState::Idle;
        state.publish_status(ambient.clone());
        assert_eq!(state.latest_status(), ambient);
    }

    #[test]
    fn redraws_reach_subscribers() {
        let state = EventState::new(status());
        let mut rx = state.subscribe_redraws();

        state.broadcast_redraw(FrameUpdate {
            frame: 7,
            time: "10:42".to_string(),
            ambient: false,
            muted: false,
        });

        let update = rx.try_recv().unwrap();
        assert_eq!(update.frame, 7);
        assert_eq!(update.time, "10:42");
    }
}
