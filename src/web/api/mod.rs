use crate::engine::host::HostSignals;
use crate::models::events::HostEvent;
use crate::web::api::events::EventState;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub mod events;
pub mod frame;
pub mod notifications;

// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub notifications: UnboundedSender<HostEvent>,
    pub signals: Arc<HostSignals>,
    pub event_state: Arc<EventState>,
}
