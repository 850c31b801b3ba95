// Copyright 2026 The Apogee Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Minimum-duration progress clock gated on an external readiness signal.
//!
//! A [`ReadinessGate`] runs a deterministic progress counter from 0 to 100
//! over a configured minimum duration, while a [`ReadySignal`] reports the
//! completion of some heavyweight asynchronous work. Only when both have
//! happened, plus a short settle delay for exit animation, does the gate
//! emit its single [`GateEvent::Completed`]. If the signal never arrives the
//! gate never completes; revealing early is the one thing it must not do.
//!
//! The gate itself is a pure state machine advanced by elapsed time. Pacing
//! it in real time (and tearing the timer down) is the caller's concern,
//! which keeps every timing property testable without sleeping.

use crate::signal::ReadySignal;
use std::time::Duration;

/// Timing parameters for a [`ReadinessGate`].
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Minimum time the progress clock runs before the gate may complete.
    pub min_duration: Duration,
    /// Interval between progress ticks.
    pub tick_interval: Duration,
    /// Pause between both conditions holding and completion, reserved for
    /// exit animation.
    pub settle_delay: Duration,
}

impl Default for GateConfig {
    /// The canonical loading-screen timing: a 2200 ms minimum at 20 ms
    /// ticks, with a 350 ms settle delay.
    fn default() -> Self {
        Self {
            min_duration: Duration::from_millis(2200),
            tick_interval: Duration::from_millis(20),
            settle_delay: Duration::from_millis(350),
        }
    }
}

/// Observable output of [`ReadinessGate::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateEvent {
    /// The progress clock ticked; carries the new percentage (0 to 100).
    Progress(f32),
    /// Both conditions held and the settle delay elapsed. Emitted exactly
    /// once per gate.
    Completed,
}

/// Combines the minimum-duration progress clock with the ready signal.
///
/// Drive the gate by calling [`advance`](Self::advance) with the elapsed
/// time since the previous call; emitted [`GateEvent`]s report progress
/// ticks and the final completion. `percent` is monotonically
/// non-decreasing and clamped to 100.
#[derive(Debug)]
pub struct ReadinessGate {
    config: GateConfig,
    ready: ReadySignal,
    /// Percent gained per tick: `100 / (min_duration / tick_interval)`.
    step: f32,
    ticks: u32,
    percent: f32,
    timer_done: bool,
    completed: bool,
    /// Elapsed time not yet consumed as whole ticks.
    tick_debt: Duration,
    /// Time accumulated toward the settle delay; `None` until both
    /// conditions hold.
    settle_elapsed: Option<Duration>,
}

impl ReadinessGate {
    /// Creates a gate observing `ready` with the given timing.
    ///
    /// # Panics
    /// Panics if `config.tick_interval` is zero.
    pub fn new(config: GateConfig, ready: ReadySignal) -> Self {
        assert!(
            !config.tick_interval.is_zero(),
            "gate tick interval must be non-zero"
        );
        let ticks_to_finish =
            config.min_duration.as_secs_f32() / config.tick_interval.as_secs_f32();
        Self {
            step: 100.0 / ticks_to_finish,
            config,
            ready,
            ticks: 0,
            percent: 0.0,
            timer_done: false,
            completed: false,
            tick_debt: Duration::ZERO,
            settle_elapsed: None,
        }
    }

    /// The timing this gate was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// The current progress percentage, 0 to 100.
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Whether the progress clock has finished.
    pub fn timer_done(&self) -> bool {
        self.timer_done
    }

    /// Whether [`GateEvent::Completed`] has been emitted.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The signal this gate observes.
    pub fn ready(&self) -> &ReadySignal {
        &self.ready
    }

    /// Advances the gate by `dt` of elapsed time, appending any resulting
    /// events to `events`.
    ///
    /// Whole ticks are consumed out of the accumulated time, each raising
    /// `percent` by the per-tick step and emitting
    /// [`GateEvent::Progress`]. Once the clock reaches 100 it stops ticking;
    /// from then on elapsed time counts toward the settle delay, but only
    /// while the ready signal is set. Time spent waiting on the signal is
    /// discarded, and the call that first observes the signal starts the
    /// settle count at zero rather than back-crediting its own `dt`, so
    /// completion never lands earlier than signal plus settle. After
    /// completion, `advance` is a no-op.
    pub fn advance(&mut self, dt: Duration, events: &mut Vec<GateEvent>) {
        if self.completed {
            return;
        }

        let mut budget = dt;
        let mut armed_by_tick = false;

        if !self.timer_done {
            self.tick_debt += budget;
            budget = Duration::ZERO;
            while self.tick_debt >= self.config.tick_interval {
                self.tick_debt -= self.config.tick_interval;
                self.step_tick(events);
                if self.timer_done {
                    // The remainder of this call happened after the final
                    // tick, so it may count toward the settle delay.
                    budget = self.tick_debt;
                    self.tick_debt = Duration::ZERO;
                    armed_by_tick = true;
                    break;
                }
            }
            if !self.timer_done {
                return;
            }
        }

        if self.settle_elapsed.is_none() {
            if !self.ready.is_set() {
                return;
            }
            if !armed_by_tick {
                budget = Duration::ZERO;
            }
            self.settle_elapsed = Some(Duration::ZERO);
            log::trace!(
                "gate settle armed at {:.1}% (delay {:?})",
                self.percent,
                self.config.settle_delay
            );
        }

        if let Some(elapsed) = self.settle_elapsed.as_mut() {
            *elapsed += budget;
            if *elapsed >= self.config.settle_delay {
                self.completed = true;
                events.push(GateEvent::Completed);
                log::debug!("gate completed after {} ticks", self.ticks);
            }
        }
    }

    fn step_tick(&mut self, events: &mut Vec<GateEvent>) {
        self.ticks += 1;
        // Deriving from the tick count rather than summing steps keeps the
        // sequence monotone under floating-point rounding.
        self.percent = (self.step * self.ticks as f32).min(100.0);
        events.push(GateEvent::Progress(self.percent));
        if self.percent >= 100.0 {
            self.timer_done = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// A short test configuration: 200 ms minimum, 20 ms ticks, 60 ms settle.
    fn quick_config() -> GateConfig {
        GateConfig {
            min_duration: ms(200),
            tick_interval: ms(20),
            settle_delay: ms(60),
        }
    }

    fn advance_collect(gate: &mut ReadinessGate, dt: Duration) -> Vec<GateEvent> {
        let mut events = Vec::new();
        gate.advance(dt, &mut events);
        events
    }

    fn progress_values(events: &[GateEvent]) -> Vec<f32> {
        events
            .iter()
            .filter_map(|event| match event {
                GateEvent::Progress(percent) => Some(*percent),
                GateEvent::Completed => None,
            })
            .collect()
    }

    fn completed_count(events: &[GateEvent]) -> usize {
        events
            .iter()
            .filter(|event| matches!(event, GateEvent::Completed))
            .count()
    }

    #[test]
    fn default_config_is_canonical() {
        let config = GateConfig::default();
        assert_eq!(config.min_duration, ms(2200));
        assert_eq!(config.tick_interval, ms(20));
        assert_eq!(config.settle_delay, ms(350));
    }

    #[test]
    fn progress_is_monotone_and_clamped() {
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(quick_config(), signal);

        let mut all = Vec::new();
        for _ in 0..30 {
            gate.advance(ms(20), &mut all);
        }

        let values = progress_values(&all);
        assert_eq!(values.len(), 10, "clock stops ticking at 100");
        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "percent must never decrease");
        }
        assert!(values.iter().all(|percent| *percent <= 100.0));
        assert_eq!(*values.last().unwrap(), 100.0);
        assert!(gate.timer_done());
    }

    #[test]
    fn overshooting_final_tick_clamps_to_hundred() {
        // 50 ms over 20 ms ticks is 2.5 steps of 40%; the third tick would
        // overshoot and must clamp.
        let config = GateConfig {
            min_duration: ms(50),
            tick_interval: ms(20),
            settle_delay: ms(60),
        };
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(config, signal);

        let mut events = Vec::new();
        for _ in 0..5 {
            gate.advance(ms(20), &mut events);
        }
        assert_eq!(progress_values(&events), vec![40.0, 80.0, 100.0]);
    }

    #[test]
    fn no_completion_without_ready_signal() {
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(quick_config(), signal.clone());

        // Run far beyond the minimum duration plus the settle delay.
        for _ in 0..100 {
            let events = advance_collect(&mut gate, ms(20));
            assert_eq!(completed_count(&events), 0);
        }
        assert!(gate.timer_done());
        assert!(!gate.is_complete());

        // Only once the signal arrives can the settle delay start.
        signal.notify();
        assert_eq!(completed_count(&advance_collect(&mut gate, ms(20))), 0);
        let events = advance_collect(&mut gate, ms(60));
        assert_eq!(completed_count(&events), 1);
        assert!(gate.is_complete());
    }

    #[test]
    fn ready_before_timer_defers_to_timer_end() {
        let signal = ReadySignal::new();
        signal.notify();
        let mut gate = ReadinessGate::new(quick_config(), signal);

        // 10 ticks finish the clock; the settle delay starts at that tick.
        let mut events = advance_collect(&mut gate, ms(200));
        assert!(gate.timer_done());
        assert_eq!(completed_count(&events), 0);

        events = advance_collect(&mut gate, ms(59));
        assert_eq!(completed_count(&events), 0, "still inside settle delay");

        events = advance_collect(&mut gate, ms(1));
        assert_eq!(completed_count(&events), 1);
    }

    #[test]
    fn final_tick_remainder_counts_toward_settle() {
        let signal = ReadySignal::new();
        signal.notify();
        let mut gate = ReadinessGate::new(quick_config(), signal);

        // 260 ms = 200 ms of ticks + 60 ms remainder = exactly the settle
        // delay; one oversized advance must complete in a single call.
        let events = advance_collect(&mut gate, ms(260));
        assert_eq!(completed_count(&events), 1);
        assert_eq!(gate.percent(), 100.0);
    }

    #[test]
    fn settle_starts_at_observation_when_ready_arrives_late() {
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(quick_config(), signal.clone());

        advance_collect(&mut gate, ms(200));
        assert!(gate.timer_done());

        // The signal arrived somewhere between advances; the observing call
        // must not back-credit its own dt to the settle count.
        signal.notify();
        let events = advance_collect(&mut gate, ms(60));
        assert_eq!(completed_count(&events), 0);

        let events = advance_collect(&mut gate, ms(60));
        assert_eq!(completed_count(&events), 1);
    }

    #[test]
    fn waiting_time_before_signal_is_discarded() {
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(quick_config(), signal.clone());

        advance_collect(&mut gate, ms(200));
        // A long idle stretch with no signal must not bank settle time.
        advance_collect(&mut gate, ms(500));
        signal.notify();
        let events = advance_collect(&mut gate, ms(59));
        assert_eq!(completed_count(&events), 0);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let signal = ReadySignal::new();
        signal.notify();
        let mut gate = ReadinessGate::new(quick_config(), signal);

        let mut total_completed = 0;
        for _ in 0..50 {
            let events = advance_collect(&mut gate, ms(20));
            total_completed += completed_count(&events);
        }
        assert_eq!(total_completed, 1);
        assert!(gate.is_complete());

        // After completion the gate goes quiet entirely.
        let events = advance_collect(&mut gate, ms(1000));
        assert!(events.is_empty());
        assert_eq!(gate.percent(), 100.0);
    }

    #[test]
    fn repeated_notify_equals_single_notify() {
        let signal = ReadySignal::new();
        let mut gate = ReadinessGate::new(quick_config(), signal.clone());

        assert!(signal.notify());
        assert!(!signal.notify());
        assert!(!signal.notify());

        let mut completed = 0;
        for _ in 0..20 {
            completed += completed_count(&advance_collect(&mut gate, ms(20)));
        }
        assert_eq!(completed, 1);
    }

    #[test]
    fn full_canonical_run_takes_min_duration_plus_settle() {
        let signal = ReadySignal::new();
        signal.notify();
        let mut gate = ReadinessGate::new(GateConfig::default(), signal);

        // 2200 ms of 20 ms ticks.
        let mut elapsed = ms(0);
        let mut completed_at = None;
        while completed_at.is_none() && elapsed < ms(4000) {
            let events = advance_collect(&mut gate, ms(20));
            elapsed += ms(20);
            if completed_count(&events) > 0 {
                completed_at = Some(elapsed);
            }
        }

        let completed_at = completed_at.expect("gate must complete");
        assert!(
            completed_at >= ms(2200) + ms(350),
            "completed too early: {completed_at:?}"
        );
        // One tick of slack on top of the exact bound.
        assert!(completed_at <= ms(2200) + ms(350) + ms(40));
    }
}
