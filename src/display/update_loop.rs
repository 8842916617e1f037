use crate::display::manager::DisplayManager;
use crate::engine::host::HostSignals;
use crate::engine::WatchFaceEngine;
use crate::models::events::HostEvent;
use crate::web::api::events::EventState;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep_until, Instant};

/// The platform's minute tick
const TIME_TICK_PERIOD_MS: i64 = 60_000;

/// Milliseconds until the next whole wall-clock minute, in `(0, 60_000]`
pub fn delay_until_next_minute(now_millis: i64) -> i64 {
    TIME_TICK_PERIOD_MS - now_millis.rem_euclid(TIME_TICK_PERIOD_MS)
}

fn next_time_tick(engine: &WatchFaceEngine) -> Instant {
    Instant::now() + Duration::from_millis(delay_until_next_minute(engine.now_millis()) as u64)
}

// Single owner of the engine: notifications, timer fires and draws are all
// handled one at a time on this task
pub async fn display_loop(
    mut engine: WatchFaceEngine,
    mut events: UnboundedReceiver<HostEvent>,
    signals: Arc<HostSignals>,
    mut display: DisplayManager,
    event_state: Arc<EventState>,
) {
    info!("Starting watch face event loop");

    let mut time_tick_at = next_time_tick(&engine);

    event_state.publish_status(engine.status());

    loop {
        let pending = engine.pending_fire();
        let fire_deadline = match pending {
            Some(fire) => {
                let delay = (fire.fire_at - engine.now_millis()).max(0) as u64;
                Instant::now() + Duration::from_millis(delay)
            }
            None => Instant::now(),
        };

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => {
                    debug!("Host notification: {:?}", event);
                    engine.handle_event(event);
                }
                None => {
                    info!("Notification channel closed, tearing down watch face");
                    engine.on_destroy();
                }
            },
            _ = sleep_until(fire_deadline), if pending.is_some() => {
                if let Some(fire) = pending {
                    engine.handle_fire(fire.token);
                }
            }
            _ = sleep_until(time_tick_at) => {
                engine.on_time_tick();
                time_tick_at = next_time_tick(&engine);
            }
        }

        if signals.take_redraw() {
            display.update_display(&engine);
        }
        event_state.publish_status(engine.status());

        if engine.is_destroyed() {
            display.shutdown();
            break;
        }
    }

    info!(
        "Watch face event loop stopped after {} frames",
        display.frame_count()
    );
}
