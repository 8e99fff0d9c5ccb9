//! Playback scheduler
//!
//! A single task owns the queue and the current source, so two buffers can
//! never play at once. Commands arrive over an mpsc channel; state snapshots
//! go out over a watch channel whenever something observable changes.
//!
//! Chaining is gapless: the moment the sink finishes a buffer, the next one
//! (if any) starts on the same loop turn. `pause` aborts the current source
//! and records the elapsed offset; `resume` only restarts queue draining, it
//! does not seek back into the aborted buffer. `stop` additionally clears
//! the queue and cancels the bound upstream token.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use crate::queue::SegmentQueue;
use crate::sink::AudioSink;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const COMMAND_CHANNEL_SIZE: usize = 64;

/// Snapshot of the player, published to the UI layer
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// A buffer is currently playing
    pub is_playing: bool,
    /// Content is queued, or the upstream connection is open and playback
    /// has not started
    pub is_generating: bool,
    /// Seconds into the current buffer (offset of the pause point when
    /// paused)
    pub current_time: f64,
    /// Duration of the current (or paused) buffer, in seconds
    pub duration: f64,
    /// Volume, 0.0..=1.0
    pub volume: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_generating: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
        }
    }
}

#[derive(Debug)]
enum Command {
    Enqueue(AudioBuffer),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
    UpstreamOpen(bool),
    BindUpstream(CancellationToken),
}

/// Handle to a spawned player task
#[derive(Clone)]
pub struct PlayerHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<PlayerState>,
}

impl PlayerHandle {
    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| Error::PlayerClosed)
    }

    /// Appends a decoded buffer; playback starts immediately when idle
    pub async fn enqueue(&self, buffer: AudioBuffer) -> Result<()> {
        self.send(Command::Enqueue(buffer)).await
    }

    /// Stops the current source, recording the elapsed offset
    pub async fn pause(&self) -> Result<()> {
        self.send(Command::Pause).await
    }

    /// Restarts queue draining if idle; does not seek into a paused buffer
    pub async fn resume(&self) -> Result<()> {
        self.send(Command::Resume).await
    }

    /// Halts playback, clears the queue and cancels the upstream token
    pub async fn stop(&self) -> Result<()> {
        self.send(Command::Stop).await
    }

    /// Sets the volume, clamped to 0.0..=1.0
    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        self.send(Command::SetVolume(volume)).await
    }

    /// Marks the upstream connection open or closed (drives `is_generating`)
    pub async fn set_upstream_open(&self, open: bool) -> Result<()> {
        self.send(Command::UpstreamOpen(open)).await
    }

    /// Binds the token that `stop` cancels to end the upstream stream
    pub async fn bind_upstream(&self, token: CancellationToken) -> Result<()> {
        self.send(Command::BindUpstream(token)).await
    }

    /// Current state snapshot
    pub fn state(&self) -> PlayerState {
        self.state.borrow().clone()
    }

    /// Watch receiver for state changes
    pub fn subscribe(&self) -> watch::Receiver<PlayerState> {
        self.state.clone()
    }
}

/// Playback scheduler entry point
pub struct Player;

impl Player {
    /// Spawns the scheduler task driving the given sink
    pub fn spawn<S: AudioSink>(sink: S) -> PlayerHandle {
        let (commands, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (state_tx, state) = watch::channel(PlayerState::default());

        let task = PlayerTask {
            sink: Arc::new(Mutex::new(sink)),
            queue: SegmentQueue::new(),
            current: None,
            paused: false,
            paused_offset: Duration::ZERO,
            paused_duration: Duration::ZERO,
            volume: 1.0,
            upstream_open: false,
            upstream: None,
            state: state_tx,
        };
        tokio::spawn(task.run(command_rx));

        PlayerHandle { commands, state }
    }
}

/// The buffer currently being played by the sink task
struct Playing {
    segment_id: String,
    duration: Duration,
    started: Instant,
    handle: JoinHandle<Result<()>>,
}

struct PlayerTask {
    sink: Arc<Mutex<dyn AudioSink>>,
    queue: SegmentQueue,
    current: Option<Playing>,
    paused: bool,
    paused_offset: Duration,
    paused_duration: Duration,
    volume: f32,
    upstream_open: bool,
    upstream: Option<CancellationToken>,
    state: watch::Sender<PlayerState>,
}

enum Wake {
    Command(Option<Command>),
    Ended(std::result::Result<Result<()>, JoinError>),
}

impl PlayerTask {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        loop {
            self.start_next_if_idle();

            let wake = match self.current.as_mut() {
                Some(playing) => tokio::select! {
                    command = commands.recv() => Wake::Command(command),
                    result = &mut playing.handle => Wake::Ended(result),
                },
                None => Wake::Command(commands.recv().await),
            };

            match wake {
                Wake::Command(Some(command)) => self.handle_command(command),
                Wake::Command(None) => {
                    // Every handle dropped: tear down
                    if let Some(playing) = self.current.take() {
                        playing.handle.abort();
                    }
                    break;
                }
                Wake::Ended(result) => self.handle_ended(result),
            }
        }
    }

    /// Starts the head of the queue when nothing is playing
    fn start_next_if_idle(&mut self) {
        if self.current.is_some() || self.paused {
            return;
        }
        let Some(buffer) = self.queue.dequeue() else {
            return;
        };

        let segment_id = buffer.segment_id.clone();
        let duration = buffer.duration;
        let sink = self.sink.clone();
        let handle = tokio::spawn(async move { sink.lock().await.play(&buffer).await });

        debug!(segment_id = %segment_id, "Playback started");
        self.current = Some(Playing {
            segment_id,
            duration,
            started: Instant::now(),
            handle,
        });
        self.paused_offset = Duration::ZERO;
        self.paused_duration = Duration::ZERO;
        self.publish();
    }

    fn handle_ended(&mut self, result: std::result::Result<Result<()>, JoinError>) {
        let Some(playing) = self.current.take() else {
            return;
        };
        match result {
            Ok(Ok(())) => debug!(segment_id = %playing.segment_id, "Playback finished"),
            Ok(Err(err)) => {
                warn!(segment_id = %playing.segment_id, error = %err, "Sink failed, skipping buffer")
            }
            Err(err) if err.is_cancelled() => {}
            Err(err) => warn!(error = %err, "Playback task failed"),
        }
        // The next buffer, if any, starts on the next loop turn
        self.publish();
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Enqueue(buffer) => {
                debug!(segment_id = %buffer.segment_id, queued = self.queue.len(), "Buffer enqueued");
                self.queue.enqueue(buffer);
                self.publish();
            }
            Command::Pause => {
                if let Some(playing) = self.current.take() {
                    playing.handle.abort();
                    self.paused_offset = playing.started.elapsed().min(playing.duration);
                    self.paused_duration = playing.duration;
                }
                self.paused = true;
                self.publish();
            }
            Command::Resume => {
                self.paused = false;
                self.publish();
            }
            Command::Stop => {
                if let Some(playing) = self.current.take() {
                    playing.handle.abort();
                }
                self.queue.clear();
                self.paused = false;
                self.paused_offset = Duration::ZERO;
                self.paused_duration = Duration::ZERO;
                if let Some(token) = &self.upstream {
                    token.cancel();
                }
                self.upstream_open = false;
                self.publish();
            }
            Command::SetVolume(volume) => {
                self.volume = volume.clamp(0.0, 1.0);
                self.publish();
            }
            Command::UpstreamOpen(open) => {
                self.upstream_open = open;
                self.publish();
            }
            Command::BindUpstream(token) => {
                self.upstream = Some(token);
            }
        }
    }

    /// Publishes a state snapshot, skipping no-op updates
    fn publish(&self) {
        let (is_playing, current_time, duration) = match &self.current {
            Some(playing) => (
                true,
                playing
                    .started
                    .elapsed()
                    .min(playing.duration)
                    .as_secs_f64(),
                playing.duration.as_secs_f64(),
            ),
            None if self.paused => (
                false,
                self.paused_offset.as_secs_f64(),
                self.paused_duration.as_secs_f64(),
            ),
            None => (false, 0.0, 0.0),
        };

        let state = PlayerState {
            is_playing,
            is_generating: !self.queue.is_empty() || (self.upstream_open && !is_playing),
            current_time,
            duration,
            volume: self.volume,
        };

        self.state.send_if_modified(|previous| {
            if *previous == state {
                false
            } else {
                *previous = state;
                true
            }
        });
    }
}
