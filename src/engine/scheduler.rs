//! Once-per-second redraw timer for interactive mode

use crate::models::status::SchedulerState;
use log::debug;

/// Interactive mode advances the readout once a second
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1000;

/// Identifies one armed fire. A fire is only honoured when its token still
/// matches the pending one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireToken(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingFire {
    pub token: FireToken,
    /// Wall-clock deadline in epoch milliseconds
    pub fire_at: i64,
}

/// Milliseconds until the next whole second, in `(0, 1000]`.
///
/// Aligning every re-arm to the wall clock keeps the cadence from drifting.
pub fn delay_until_next_second(now_millis: i64) -> i64 {
    INTERACTIVE_UPDATE_RATE_MS - now_millis.rem_euclid(INTERACTIVE_UPDATE_RATE_MS)
}

pub struct RedrawScheduler {
    pending: Option<PendingFire>,
    next_token: u64,
    alive: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self {
            pending: None,
            next_token: 0,
            alive: true,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.pending.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    pub fn pending(&self) -> Option<PendingFire> {
        self.pending
    }

    /// Re-evaluate the run predicate.
    ///
    /// Any pending fire is cancelled first. Returns `true` when the timer
    /// (re)started and a redraw should be requested right away.
    pub fn update(&mut self, should_run: bool, now_millis: i64) -> bool {
        self.cancel();
        if !self.alive || !should_run {
            return false;
        }
        self.arm(now_millis);
        true
    }

    /// Handle a fire delivered by the host loop.
    ///
    /// Stale tokens and fires after shutdown are ignored. Returns `true` when
    /// a redraw should be requested.
    pub fn fire(&mut self, token: FireToken, now_millis: i64, should_run: bool) -> bool {
        if !self.alive {
            debug!("Ignoring redraw fire after shutdown");
            return false;
        }
        match self.pending {
            Some(pending) if pending.token == token => {}
            _ => {
                debug!("Ignoring stale redraw fire {:?}", token);
                return false;
            }
        }

        self.pending = None;
        if should_run {
            self.arm(now_millis);
        }
        true
    }

    /// Cancel the pending fire and refuse to arm again
    pub fn shutdown(&mut self) {
        self.cancel();
        self.alive = false;
    }

    fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!("Cancelled redraw fire {:?}", pending.token);
        }
    }

    fn arm(&mut self, now_millis: i64) {
        let token = FireToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(PendingFire {
            token,
            fire_at: now_millis + delay_until_next_second(now_millis),
        });
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_lands_on_second_boundary() {
        for now in [0_i64, 1, 499, 999, 1000, 1_709_288_100_123, 1_709_288_100_999] {
            let delay = delay_until_next_second(now);
            assert!(delay > 0 && delay <= 1000, "delay {delay} for {now}");
            assert_eq!((now + delay) % 1000, 0);
        }
        assert_eq!(delay_until_next_second(5_000), 1000);
        assert_eq!(delay_until_next_second(5_250), 750);
    }

    #[test]
    fn predicate_drives_state() {
        let mut scheduler = RedrawScheduler::new();
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        assert!(!scheduler.update(false, 0));
        assert_eq!(scheduler.state(), SchedulerState::Idle);

        assert!(scheduler.update(true, 250));
        assert_eq!(scheduler.state(), SchedulerState::Running);
        assert_eq!(scheduler.pending().unwrap().fire_at, 1000);

        assert!(!scheduler.update(false, 400));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn re_evaluation_replaces_pending_fire() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.update(true, 100);
        let first = scheduler.pending().unwrap();

        scheduler.update(true, 200);
        let second = scheduler.pending().unwrap();
        assert_ne!(first.token, second.token);

        // The replaced fire is dead; only one can ever be honoured.
        assert!(!scheduler.fire(first.token, 1000, true));
        assert_eq!(scheduler.pending(), Some(second));
        assert!(scheduler.fire(second.token, 1000, true));
    }

    #[test]
    fn fire_rearms_while_predicate_holds() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.update(true, 10);
        let pending = scheduler.pending().unwrap();

        assert!(scheduler.fire(pending.token, 1003, true));
        let next = scheduler.pending().unwrap();
        assert_eq!(next.fire_at, 2000);

        assert!(scheduler.fire(next.token, 2000, false));
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn shutdown_cancels_and_blocks_rearm() {
        let mut scheduler = RedrawScheduler::new();
        scheduler.update(true, 0);
        let pending = scheduler.pending().unwrap();

        scheduler.shutdown();
        assert!(scheduler.pending().is_none());
        assert!(!scheduler.fire(pending.token, 1000, true));
        assert!(!scheduler.update(true, 1000));
        assert!(scheduler.pending().is_none());
    }
}
