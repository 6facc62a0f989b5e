//! Animated counter: an eased integer sequence that climbs to a target.
//!
//! The counter is a small state machine driven by a monotonic clock. It never
//! schedules anything itself; a driver calls [`AnimatedCounter::begin`] once
//! and then [`AnimatedCounter::tick`] on every display frame until it
//! reports completion.
//!
//! ```text
//! Idle --begin--> Delaying --delay elapsed--> Running --progress >= 1--> Done
//!   ^                                                                      |
//!   +-------------------------- reconfigure / reset ----------------------+
//! ```

use std::time::{Duration, Instant};

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

/// Parameters for one counter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterConfig {
    /// Final value shown when the animation completes.
    pub target: i64,
    /// Time from the first frame to the target.
    pub duration: Duration,
    /// Wait before the first frame is sampled.
    pub start_delay: Duration,
    /// When false the counter holds at zero and never animates.
    pub enabled: bool,
}

impl CounterConfig {
    /// Enabled counter for `target` with the default duration and no delay.
    #[must_use]
    pub const fn new(target: i64) -> Self {
        Self {
            target,
            duration: DEFAULT_DURATION,
            start_delay: Duration::ZERO,
            enabled: true,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub const fn with_start_delay(mut self, start_delay: Duration) -> Self {
        self.start_delay = start_delay;
        self
    }

    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Where a counter is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    /// Not started, or disabled.
    Idle,
    /// Waiting for the start delay to pass.
    Delaying { until: Instant },
    /// Animating. `start` is recorded by the first frame.
    Running { start: Option<Instant> },
    /// Reached the target; no more frames.
    Done,
}

/// Quartic ease-out: fast at first, settling into the target.
///
/// `progress` is clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_quart(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Value displayed at `progress` for a run toward `target`.
#[must_use]
// Display counters stay far below 2^53.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn interpolate(target: i64, progress: f64) -> i64 {
    (ease_out_quart(progress) * target as f64).floor() as i64
}

/// One counter instance and its exclusively owned run state.
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    config: CounterConfig,
    phase: CounterPhase,
    value: i64,
}

impl AnimatedCounter {
    #[must_use]
    pub const fn new(config: CounterConfig) -> Self {
        Self {
            config,
            phase: CounterPhase::Idle,
            value: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &CounterConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> CounterPhase {
        self.phase
    }

    /// The value to display right now.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self.phase, CounterPhase::Done)
    }

    /// Start a run at `now`.
    ///
    /// A disabled counter stays idle at zero.
    pub fn begin(&mut self, now: Instant) {
        self.value = 0;
        self.phase = if !self.config.enabled {
            CounterPhase::Idle
        } else if self.config.start_delay.is_zero() {
            CounterPhase::Running { start: None }
        } else {
            CounterPhase::Delaying {
                until: now + self.config.start_delay,
            }
        };
    }

    /// Sample the clock for one frame.
    ///
    /// Returns the new value, or `None` when the counter is idle, still
    /// delaying, or already done.
    pub fn tick(&mut self, now: Instant) -> Option<i64> {
        let start = match self.phase {
            CounterPhase::Idle | CounterPhase::Done => return None,
            CounterPhase::Delaying { until } if now < until => return None,
            CounterPhase::Delaying { .. } | CounterPhase::Running { start: None } => {
                self.phase = CounterPhase::Running { start: Some(now) };
                now
            }
            CounterPhase::Running { start: Some(start) } => start,
        };

        let progress = self.progress(now.saturating_duration_since(start));
        if progress >= 1.0 {
            // Set exactly; floor() on the eased value can land one short.
            self.value = self.config.target;
            self.phase = CounterPhase::Done;
        } else {
            self.value = interpolate(self.config.target, progress);
        }
        Some(self.value)
    }

    /// Replace the configuration.
    ///
    /// Any in-flight run is discarded and the value drops back to zero.
    /// Returns false (and keeps the current run) when nothing changed.
    pub fn reconfigure(&mut self, config: CounterConfig) -> bool {
        if config == self.config {
            return false;
        }
        self.config = config;
        self.reset();
        true
    }

    /// Abandon the current run.
    pub const fn reset(&mut self) {
        self.phase = CounterPhase::Idle;
        self.value = 0;
    }

    /// Replay a whole run against a simulated clock ticking every `frame`.
    ///
    /// Yields each sampled value and ends with the target.
    #[must_use]
    pub fn frames(config: CounterConfig, frame: Duration) -> Frames {
        let now = Instant::now();
        let mut counter = Self::new(config);
        counter.begin(now);
        Frames {
            counter,
            now,
            frame: frame.max(Duration::from_millis(1)),
        }
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.config.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.config.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Iterator returned by [`AnimatedCounter::frames`].
#[derive(Debug)]
pub struct Frames {
    counter: AnimatedCounter,
    now: Instant,
    frame: Duration,
}

impl Iterator for Frames {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            match self.counter.phase() {
                CounterPhase::Idle | CounterPhase::Done => return None,
                CounterPhase::Delaying { until } if self.now < until => {
                    self.now = until;
                }
                _ => {
                    let value = self.counter.tick(self.now);
                    self.now += self.frame;
                    return value;
                }
            }
        }
    }
}
