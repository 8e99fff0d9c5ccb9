//! FIFO queue of decoded segments awaiting playback
//!
//! Owned exclusively by the player task: segments are appended on arrival and
//! popped when the previous buffer finishes. At most one buffer is ever the
//! current source; the queue only holds what has not started playing yet.

use crate::buffer::AudioBuffer;
use std::collections::VecDeque;
use std::time::Duration;

/// Ordered decoded buffers awaiting playback
#[derive(Debug, Default)]
pub struct SegmentQueue {
    items: VecDeque<AudioBuffer>,
}

impl SegmentQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn enqueue(&mut self, buffer: AudioBuffer) {
        self.items.push_back(buffer);
    }

    /// Pops the next buffer to play
    pub fn dequeue(&mut self) -> Option<AudioBuffer> {
        self.items.pop_front()
    }

    pub fn peek(&self) -> Option<&AudioBuffer> {
        self.items.front()
    }

    /// Total pending playback time (metadata/estimated durations)
    pub fn pending_duration(&self) -> Duration {
        self.items.iter().map(|b| b.duration).sum()
    }
}
