//! Playback sinks
//!
//! The player drives an [`AudioSink`] one buffer at a time; `play` returns
//! when the buffer has finished. Real audio output is out of scope for this
//! crate, so the provided sinks stub playback: [`TimedSink`] sleeps for the
//! buffer duration, [`MockSink`] records events for tests.

use crate::buffer::AudioBuffer;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Terminal consumer of decoded audio buffers
#[async_trait]
pub trait AudioSink: Send + 'static {
    /// Plays one buffer to completion
    ///
    /// Cancellation (pause/stop) aborts the future; the sink must not rely
    /// on running to completion.
    async fn play(&mut self, buffer: &AudioBuffer) -> Result<()>;
}

/// Sink that simulates playback by sleeping for the buffer duration
///
/// `time_scale` compresses or stretches simulated time (0.0 plays instantly,
/// 1.0 is real time).
pub struct TimedSink {
    time_scale: f64,
}

impl TimedSink {
    pub fn new(time_scale: f64) -> Self {
        Self { time_scale }
    }

    /// Real-time playback simulation
    pub fn realtime() -> Self {
        Self::new(1.0)
    }
}

#[async_trait]
impl AudioSink for TimedSink {
    async fn play(&mut self, buffer: &AudioBuffer) -> Result<()> {
        debug!(
            segment_id = %buffer.segment_id,
            duration_ms = buffer.duration.as_millis() as u64,
            "Playing buffer"
        );
        tokio::time::sleep(buffer.duration.mul_f64(self.time_scale)).await;
        Ok(())
    }
}

/// Playback event recorded by [`MockSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// `play` was entered for this segment
    Started(String),
    /// `play` ran to completion for this segment
    Finished(String),
}

/// Shared event log handed out by [`MockSink::new`]
pub type SinkEvents = Arc<Mutex<Vec<SinkEvent>>>;

/// Recording sink for tests
///
/// Each `play` takes `latency` of simulated time, so pause/stop can interrupt
/// it; an aborted play records `Started` without a matching `Finished`.
pub struct MockSink {
    events: SinkEvents,
    latency: std::time::Duration,
}

impl MockSink {
    pub fn new(latency: std::time::Duration) -> (Self, SinkEvents) {
        let events: SinkEvents = Arc::default();
        (
            Self {
                events: events.clone(),
                latency,
            },
            events,
        )
    }
}

#[async_trait]
impl AudioSink for MockSink {
    async fn play(&mut self, buffer: &AudioBuffer) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Started(buffer.segment_id.clone()));

        tokio::time::sleep(self.latency).await;

        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Finished(buffer.segment_id.clone()));
        Ok(())
    }
}
