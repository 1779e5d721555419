//! Redraw timer governor
//!
//! The once-a-second redraw runs only while the face is visible and
//! interactive. Each scheduled tick carries a fresh [`TickToken`]; a tick
//! whose token is not the pending one is stale and ignored, so a cancel
//! that loses a race with delivery is harmless.

use crate::traits::TickScheduler;

/// Interactive redraw period
pub const TICK_PERIOD_MS: i64 = 1000;

/// Governor run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    Stopped,
    Running,
}

impl TimerState {
    /// Running iff visible and not ambient
    pub fn target(visible: bool, ambient: bool) -> Self {
        if visible && !ambient {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }
}

/// Identity of one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickToken(u32);

impl TickToken {
    pub fn generation(self) -> u32 {
        self.0
    }
}

/// Delay until the next whole-second boundary, in `1..=1000`
pub fn tick_delay_ms(now_ms: i64) -> u32 {
    (TICK_PERIOD_MS - now_ms.rem_euclid(TICK_PERIOD_MS)) as u32
}

/// Result of delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Redraw; the next tick is already scheduled if still running
    Redraw,
    /// Not the pending tick; nothing to do
    Stale,
}

#[derive(Debug, Clone)]
pub struct TimerGovernor {
    state: TimerState,
    pending: Option<TickToken>,
    next_generation: u32,
}

impl Default for TimerGovernor {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerGovernor {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            pending: None,
            next_generation: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    /// Re-evaluate after a visibility or ambient change.
    ///
    /// Returns true if the run state changed. An unchanged state touches
    /// nothing, so repeated calls never stack ticks.
    pub fn evaluate<S: TickScheduler>(
        &mut self,
        visible: bool,
        ambient: bool,
        now_ms: i64,
        scheduler: &mut S,
    ) -> bool {
        let target = TimerState::target(visible, ambient);
        if target == self.state {
            return false;
        }

        self.state = target;
        match target {
            TimerState::Running => self.arm(now_ms, scheduler),
            TimerState::Stopped => self.disarm(scheduler),
        }
        true
    }

    /// Deliver a tick. A live tick requests a redraw and re-arms if the
    /// governor should still be running.
    pub fn on_tick<S: TickScheduler>(
        &mut self,
        token: TickToken,
        visible: bool,
        ambient: bool,
        now_ms: i64,
        scheduler: &mut S,
    ) -> TickOutcome {
        if self.pending != Some(token) {
            return TickOutcome::Stale;
        }
        self.pending = None;

        self.state = TimerState::target(visible, ambient);
        if self.state == TimerState::Running {
            self.arm(now_ms, scheduler);
        }
        TickOutcome::Redraw
    }

    /// Stop and cancel any pending tick
    pub fn shutdown<S: TickScheduler>(&mut self, scheduler: &mut S) {
        self.state = TimerState::Stopped;
        self.disarm(scheduler);
    }

    fn arm<S: TickScheduler>(&mut self, now_ms: i64, scheduler: &mut S) {
        self.disarm(scheduler);

        let token = TickToken(self.next_generation);
        self.next_generation = self.next_generation.wrapping_add(1);
        self.pending = Some(token);
        scheduler.schedule(token, tick_delay_ms(now_ms));
    }

    fn disarm<S: TickScheduler>(&mut self, scheduler: &mut S) {
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Scheduler that keeps the set of live ticks
    #[derive(Debug, Default)]
    pub(crate) struct RecordingScheduler {
        pub live: std::vec::Vec<(TickToken, u32)>,
        pub scheduled: usize,
        pub cancelled: usize,
    }

    impl RecordingScheduler {
        /// The host fired `token`; it is no longer live
        pub fn deliver(&mut self, token: TickToken) {
            self.live.retain(|(t, _)| *t != token);
        }
    }

    impl TickScheduler for RecordingScheduler {
        fn schedule(&mut self, token: TickToken, delay_ms: u32) {
            self.scheduled += 1;
            self.live.push((token, delay_ms));
        }

        fn cancel(&mut self, token: TickToken) {
            self.cancelled += 1;
            self.live.retain(|(t, _)| *t != token);
        }
    }

    #[test]
    fn test_starts_stopped() {
        let governor = TimerGovernor::new();
        assert_eq!(governor.state(), TimerState::Stopped);
        assert_eq!(governor.pending(), None);
    }

    #[test]
    fn test_visible_interactive_runs() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();

        assert!(governor.evaluate(true, false, 5_250, &mut scheduler));
        assert_eq!(governor.state(), TimerState::Running);
        assert_eq!(scheduler.live.len(), 1);
        assert_eq!(scheduler.live[0].1, 750);
    }

    #[test]
    fn test_ambient_stops_without_tick() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();
        governor.evaluate(true, false, 0, &mut scheduler);

        assert!(governor.evaluate(true, true, 10, &mut scheduler));
        assert_eq!(governor.state(), TimerState::Stopped);
        assert!(scheduler.live.is_empty());
        assert_eq!(governor.pending(), None);
    }

    #[test]
    fn test_tick_rearms_while_running() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();
        governor.evaluate(true, false, 400, &mut scheduler);
        let first = governor.pending().unwrap();
        scheduler.live.clear();

        let outcome = governor.on_tick(first, true, false, 1_003, &mut scheduler);

        assert_eq!(outcome, TickOutcome::Redraw);
        assert_eq!(scheduler.live.len(), 1);
        assert_eq!(scheduler.live[0].1, 997);
        assert_ne!(governor.pending(), Some(first));
    }

    #[test]
    fn test_stale_tick_ignored() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();
        governor.evaluate(true, false, 0, &mut scheduler);
        let old = governor.pending().unwrap();
        governor.evaluate(false, false, 100, &mut scheduler);
        governor.evaluate(true, false, 200, &mut scheduler);

        let outcome = governor.on_tick(old, true, false, 1_000, &mut scheduler);
        assert_eq!(outcome, TickOutcome::Stale);
        assert_eq!(scheduler.live.len(), 1);
    }

    #[test]
    fn test_invisible_then_visible_scenario() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();
        governor.evaluate(true, false, 0, &mut scheduler);

        governor.evaluate(false, false, 300, &mut scheduler);
        assert_eq!(governor.state(), TimerState::Stopped);
        assert!(scheduler.live.is_empty());

        governor.evaluate(true, false, 600, &mut scheduler);
        assert_eq!(governor.state(), TimerState::Running);
        assert_eq!(scheduler.live.len(), 1);
    }

    #[test]
    fn test_shutdown_cancels_pending() {
        let mut governor = TimerGovernor::new();
        let mut scheduler = RecordingScheduler::default();
        governor.evaluate(true, false, 0, &mut scheduler);

        governor.shutdown(&mut scheduler);
        assert!(scheduler.live.is_empty());
        assert_eq!(governor.state(), TimerState::Stopped);
    }

    #[test]
    fn test_delay_at_exact_boundary_is_full_period() {
        assert_eq!(tick_delay_ms(3_000), 1000);
        assert_eq!(tick_delay_ms(3_999), 1);
        assert_eq!(tick_delay_ms(-1), 1);
    }

    proptest! {
        #[test]
        fn run_state_follows_inputs(
            steps in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..20),
            start in 0i64..1_000_000_000,
        ) {
            let mut governor = TimerGovernor::new();
            let mut scheduler = RecordingScheduler::default();
            let mut now = start;

            for (visible, ambient) in steps {
                governor.evaluate(visible, ambient, now, &mut scheduler);
                let running = visible && !ambient;

                prop_assert_eq!(governor.state() == TimerState::Running, running);
                prop_assert_eq!(scheduler.live.len(), usize::from(running));

                let scheduled = scheduler.scheduled;
                governor.evaluate(visible, ambient, now + 1, &mut scheduler);
                prop_assert_eq!(scheduler.scheduled, scheduled);

                now += 137;
            }
        }

        #[test]
        fn delay_lands_on_second_boundary(now in any::<i64>().prop_map(|n| n / 4)) {
            let delay = tick_delay_ms(now);
            prop_assert!((1..=1000).contains(&delay));
            prop_assert_eq!((now + i64::from(delay)).rem_euclid(TICK_PERIOD_MS), 0);
            prop_assert_eq!(i64::from(delay), 1000 - now.rem_euclid(1000));
        }
    }
}
