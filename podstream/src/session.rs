//! Per-connection session state
//!
//! Each WebSocket connection owns exactly one `Session`, constructed when the
//! socket opens and dropped when it closes. The session tracks the listener's
//! preferences and at most one active generation task; stopping cancels the
//! task's token without tearing down the connection.

use podscript::Preferences;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// An in-flight generation task and its cancellation token
///
/// `handle` is `None` between [`Session::begin`] and [`Session::attach`],
/// while the task is being spawned.
struct ActiveStream {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ActiveStream {
    fn is_running(&self) -> bool {
        match &self.handle {
            Some(handle) => !handle.is_finished(),
            None => true,
        }
    }
}

/// State owned by one WebSocket connection
pub struct Session {
    peer: String,
    preferences: Option<Preferences>,
    genres: Vec<String>,
    artists: Vec<String>,
    active: Option<ActiveStream>,
}

impl Session {
    /// Creates the session for a freshly opened connection
    pub fn new(peer: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            preferences: None,
            genres: Vec::new(),
            artists: Vec::new(),
            active: None,
        }
    }

    /// Peer identifier, for logging
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Records the listener profile carried by a start command
    pub fn set_profile(
        &mut self,
        preferences: Preferences,
        genres: Vec<String>,
        artists: Vec<String>,
    ) {
        self.preferences = Some(preferences);
        self.genres = genres;
        self.artists = artists;
    }

    /// Preferences from the last start command, if any
    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    /// Genres from the last start command
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Artists from the last start command
    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    /// True while a generation task is running
    pub fn is_streaming(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveStream::is_running)
    }

    /// Reserves the session for a new stream
    ///
    /// Returns the cancellation token to hand to the generation task, or
    /// `None` if a stream is already running on this connection.
    pub fn begin(&mut self) -> Option<CancellationToken> {
        if self.is_streaming() {
            return None;
        }
        let token = CancellationToken::new();
        self.active = Some(ActiveStream {
            token: token.clone(),
            handle: None,
        });
        Some(token)
    }

    /// Attaches the task spawned for the stream reserved by [`begin`]
    ///
    /// [`begin`]: Session::begin
    pub fn attach(&mut self, handle: JoinHandle<()>) {
        if let Some(stream) = self.active.as_mut() {
            stream.handle = Some(handle);
        }
    }

    /// Requests cancellation of the active stream
    ///
    /// Idempotent: returns `true` only if a running stream was actually
    /// cancelled, `false` when there was nothing to stop.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(stream) if stream.is_running() => {
                stream.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Tears the session down on socket close
    ///
    /// The generation task observes the cancelled token and exits before its
    /// next provider call.
    pub fn close(&mut self) {
        if let Some(stream) = self.active.take() {
            stream.token.cancel();
        }
    }
}
