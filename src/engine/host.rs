use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Calls the watch face makes back into its host
pub trait WatchFaceHost: Send {
    /// Ask the host to invoke the draw hook
    fn request_redraw(&mut self);

    /// Start delivering time-zone broadcasts to the face
    fn register_time_zone_receiver(&mut self);

    /// Stop delivering time-zone broadcasts to the face
    fn unregister_time_zone_receiver(&mut self);
}

/// Flags the simulated host shares with its event loop and control API
#[derive(Debug, Default)]
pub struct HostSignals {
    redraw_requested: AtomicBool,
    time_zone_receiver: AtomicBool,
}

impl HostSignals {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Consume a pending redraw request
    pub fn take_redraw(&self) -> bool {
        self.redraw_requested.swap(false, Ordering::SeqCst)
    }

    pub fn time_zone_receiver_registered(&self) -> bool {
        self.time_zone_receiver.load(Ordering::SeqCst)
    }
}

/// Host used by the desktop shell. Redraw requests coalesce into a single
/// flag the event loop consumes after each message.
pub struct SimulatedHost {
    signals: Arc<HostSignals>,
}

impl SimulatedHost {
    pub fn new(signals: Arc<HostSignals>) -> Self {
        Self { signals }
    }
}

impl WatchFaceHost for SimulatedHost {
    fn request_redraw(&mut self) {
        self.signals.redraw_requested.store(true, Ordering::SeqCst);
    }

    fn register_time_zone_receiver(&mut self) {
        debug!("Time-zone receiver registered");
        self.signals.time_zone_receiver.store(true, Ordering::SeqCst);
    }

    fn unregister_time_zone_receiver(&mut self) {
        debug!("Time-zone receiver unregistered");
        self.signals.time_zone_receiver.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_requests_coalesce() {
        let signals = HostSignals::new();
        let mut host = SimulatedHost::new(signals.clone());

        assert!(!signals.take_redraw());
        host.request_redraw();
        host.request_redraw();
        assert!(signals.take_redraw());
        assert!(!signals.take_redraw());
    }

    #[test]
    fn receiver_registration_is_visible_to_shell() {
        let signals = HostSignals::new();
        let mut host = SimulatedHost::new(signals.clone());

        host.register_time_zone_receiver();
        assert!(signals.time_zone_receiver_registered());
        host.unregister_time_zone_receiver();
        assert!(!signals.time_zone_receiver_registered());
    }
}
