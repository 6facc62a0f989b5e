//! Server-sent counter animation.
//!
//! The browser opens an `EventSource` per stat. Each connection drives its own
//! counter task; closing the connection drops the stream, which drops the
//! handle and aborts the task.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::{
        Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::{Stream, StreamExt};
use questline_core::counter::CounterConfig;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::{CounterFrame, spawn_counter};
use crate::state::AppState;

/// Query parameters for a counter stream.
#[derive(Debug, Deserialize)]
pub struct CounterQuery {
    /// `false` skips the animation: one `0`, then `done`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

/// Stream a stat's counter values.
///
/// GET /api/counters/{key}
///
/// # Errors
///
/// Returns [`AppError::NotFound`] when no stat has this key.
#[instrument(skip(state, query))]
pub async fn stream(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<CounterQuery>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let stat = state
        .catalog()
        .stat(&key)
        .ok_or_else(|| AppError::NotFound(format!("counter {key}")))?;

    let settings = &state.config().counter;
    let config = CounterConfig::new(stat.target)
        .with_duration(settings.duration)
        .with_start_delay(Duration::from_millis(stat.delay_ms))
        .with_enabled(query.enabled);

    tracing::debug!(target_value = stat.target, enabled = query.enabled, "Counter stream opened");
    let events = spawn_counter(config, settings.frame_interval)
        .values()
        .flat_map(|frame| futures::stream::iter(frame_events(frame)).map(Ok));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Every frame is a `data` event; the last is followed by a `done` event
/// repeating the final value.
fn frame_events(frame: CounterFrame) -> Vec<Event> {
    let value = frame.value.to_string();
    let mut events = vec![Event::default().data(&value)];
    if frame.done {
        events.push(Event::default().event("done").data(value));
    }
    events
}
