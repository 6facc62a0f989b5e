//! Drives an [`AnimatedCounter`] on the tokio clock.
//!
//! Each run is one spawned task that owns the counter. It sleeps through the
//! start delay, then ticks on a fixed frame interval and publishes values on
//! a `watch` channel. The [`CounterHandle`] aborts the task when cancelled or
//! dropped, so a disconnected client never leaves a task behind.

use std::time::Duration;

use futures::Stream;
use questline_core::counter::{AnimatedCounter, CounterConfig};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// One published counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    /// Last frame of the run.
    pub done: bool,
}

/// Handle to a running counter task.
#[derive(Debug)]
pub struct CounterHandle {
    values: watch::Receiver<CounterFrame>,
    task: JoinHandle<()>,
}

impl CounterHandle {
    /// A receiver that observes the latest frame.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CounterFrame> {
        self.values.clone()
    }

    /// The most recently published frame.
    #[must_use]
    pub fn latest(&self) -> CounterFrame {
        *self.values.borrow()
    }

    /// Stop the run. Safe to call any number of times.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Consume the handle as a stream of frames ending with the `done` frame.
    ///
    /// Frames published faster than the consumer reads are coalesced; the
    /// final frame is always delivered. Dropping the stream cancels the run.
    pub fn values(self) -> impl Stream<Item = CounterFrame> {
        async_stream::stream! {
            let handle = self;
            let mut rx = handle.subscribe();
            let mut last = *rx.borrow_and_update();
            yield last;

            while !last.done {
                if rx.changed().await.is_err() {
                    // Task ended; deliver anything it published on the way out.
                    let tail = *rx.borrow();
                    if tail != last {
                        yield tail;
                    }
                    break;
                }
                last = *rx.borrow_and_update();
                yield last;
            }
        }
    }
}

impl Drop for CounterHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a counter run.
///
/// A disabled config publishes a single `{ value: 0, done: true }` frame and
/// schedules nothing.
#[must_use]
pub fn spawn_counter(config: CounterConfig, frame_interval: Duration) -> CounterHandle {
    let (tx, rx) = watch::channel(CounterFrame {
        value: 0,
        done: !config.enabled,
    });

    let task = if config.enabled {
        tokio::spawn(run(config, frame_interval, tx))
    } else {
        tokio::spawn(async {})
    };

    CounterHandle { values: rx, task }
}

#[tracing::instrument(level = "debug", skip(tx), fields(counter_target = config.target))]
async fn run(config: CounterConfig, frame_interval: Duration, tx: watch::Sender<CounterFrame>) {
    let mut counter = AnimatedCounter::new(config);
    counter.begin(Instant::now().into_std());

    if !config.start_delay.is_zero() {
        tokio::time::sleep(config.start_delay).await;
    }

    let mut frames = tokio::time::interval(frame_interval.max(Duration::from_millis(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let now = frames.tick().await;
        let Some(value) = counter.tick(now.into_std()) else {
            continue;
        };
        let done = counter.is_done();
        if tx.send(CounterFrame { value, done }).is_err() {
            tracing::debug!("Counter receivers gone, stopping");
            return;
        }
        if done {
            tracing::debug!(value, "Counter finished");
            return;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn config(target: i64) -> CounterConfig {
        CounterConfig::new(target).with_duration(Duration::from_millis(500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_stream_climbs_to_target() {
        let frames: Vec<CounterFrame> = spawn_counter(config(100), FRAME).values().collect().await;

        assert_eq!(frames.first().map(|f| f.value), Some(0));
        let last = frames.last().unwrap();
        assert_eq!(last.value, 100);
        assert!(last.done);
        assert!(frames.windows(2).all(|w| w[0].value <= w[1].value));
        assert_eq!(frames.iter().filter(|f| f.done).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_delay_is_respected() {
        let handle = spawn_counter(config(10).with_start_delay(Duration::from_millis(200)), FRAME);
        let rx = handle.subscribe();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(handle.latest(), CounterFrame { value: 0, done: false });

        let frames: Vec<CounterFrame> = handle.values().collect().await;
        assert_eq!(frames.last().map(|f| f.value), Some(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_counter_emits_single_zero() {
        let frames: Vec<CounterFrame> = spawn_counter(config(100).with_enabled(false), FRAME)
            .values()
            .collect()
            .await;
        assert_eq!(frames, vec![CounterFrame { value: 0, done: true }]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent_and_stops_publishing() {
        let handle = spawn_counter(config(1_000), FRAME);
        let mut rx = handle.subscribe();

        handle.cancel();
        handle.cancel();

        let closed = async { while rx.changed().await.is_ok() {} };
        tokio::time::timeout(Duration::from_millis(50), closed)
            .await
            .unwrap();
        assert!(!rx.borrow().done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let handle = spawn_counter(config(1_000), FRAME);
        let mut rx = handle.subscribe();
        drop(handle);

        let closed = async { while rx.changed().await.is_ok() {} };
        tokio::time::timeout(Duration::from_millis(50), closed)
            .await
            .unwrap();
    }
}
