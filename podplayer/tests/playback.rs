//! Playback scheduler properties: sequential playback, gapless chaining,
//! pause/resume semantics, stop idempotence.

use podplayer::{AudioBuffer, MockSink, Player, PlayerHandle, SinkEvent, SinkEvents};
use podscript::SegmentKind;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn buffer(id: &str) -> AudioBuffer {
    AudioBuffer {
        segment_id: id.to_string(),
        kind: SegmentKind::Narration,
        data: vec![0u8; 64],
        duration: Duration::from_secs(1),
    }
}

/// Polls until the predicate holds or the test times out
async fn wait_until(mut predicate: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !predicate() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

fn events_of(events: &SinkEvents) -> Vec<SinkEvent> {
    events.lock().unwrap().clone()
}

async fn wait_for_idle(player: &PlayerHandle) {
    let handle = player.clone();
    wait_until(move || {
        let state = handle.state();
        !state.is_playing && !state.is_generating
    })
    .await;
}

#[tokio::test]
async fn buffers_play_sequentially_and_gaplessly() {
    let (sink, events) = MockSink::new(Duration::from_millis(10));
    let player = Player::spawn(sink);

    for i in 0..3 {
        player.enqueue(buffer(&format!("segment_{}", i))).await.unwrap();
    }

    wait_until(|| events.lock().unwrap().len() == 6).await;
    wait_for_idle(&player).await;

    // One start per enqueued buffer, each followed by exactly one finish
    // before the next start
    assert_eq!(
        events_of(&events),
        vec![
            SinkEvent::Started("segment_0".to_string()),
            SinkEvent::Finished("segment_0".to_string()),
            SinkEvent::Started("segment_1".to_string()),
            SinkEvent::Finished("segment_1".to_string()),
            SinkEvent::Started("segment_2".to_string()),
            SinkEvent::Finished("segment_2".to_string()),
        ]
    );
}

#[tokio::test]
async fn playback_starts_immediately_when_idle() {
    let (sink, events) = MockSink::new(Duration::from_millis(200));
    let player = Player::spawn(sink);

    player.enqueue(buffer("segment_0")).await.unwrap();
    wait_until(|| !events.lock().unwrap().is_empty()).await;

    let state = player.state();
    assert!(state.is_playing);
    assert_eq!(state.duration, 1.0);
}

#[tokio::test]
async fn pause_interrupts_and_resume_restarts_from_queue() {
    let (sink, events) = MockSink::new(Duration::from_millis(200));
    let player = Player::spawn(sink);

    player.enqueue(buffer("segment_0")).await.unwrap();
    player.enqueue(buffer("segment_1")).await.unwrap();
    wait_until(|| !events.lock().unwrap().is_empty()).await;

    player.pause().await.unwrap();
    let handle = player.clone();
    wait_until(move || !handle.state().is_playing).await;

    // The aborted buffer never finishes, and nothing new starts while paused
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        events_of(&events),
        vec![SinkEvent::Started("segment_0".to_string())]
    );

    player.resume().await.unwrap();
    wait_until(|| {
        events_of(&events).contains(&SinkEvent::Finished("segment_1".to_string()))
    })
    .await;

    // Resume drained the queue from segment_1; segment_0 was not replayed
    let all = events_of(&events);
    assert!(!all.contains(&SinkEvent::Finished("segment_0".to_string())));
    assert!(all.contains(&SinkEvent::Started("segment_1".to_string())));
}

#[tokio::test]
async fn pause_records_the_elapsed_offset() {
    let (sink, _events) = MockSink::new(Duration::from_millis(500));
    let player = Player::spawn(sink);

    player.enqueue(buffer("segment_0")).await.unwrap();
    let handle = player.clone();
    wait_until(move || handle.state().is_playing).await;

    tokio::time::sleep(Duration::from_millis(50)).await;
    player.pause().await.unwrap();
    let handle = player.clone();
    wait_until(move || !handle.state().is_playing).await;

    let state = player.state();
    assert!(state.current_time > 0.0);
    assert_eq!(state.duration, 1.0);
}

#[tokio::test]
async fn stop_clears_queue_and_cancels_upstream() {
    let (sink, events) = MockSink::new(Duration::from_millis(200));
    let player = Player::spawn(sink);
    let upstream = CancellationToken::new();
    player.bind_upstream(upstream.clone()).await.unwrap();
    player.set_upstream_open(true).await.unwrap();

    for i in 0..3 {
        player.enqueue(buffer(&format!("segment_{}", i))).await.unwrap();
    }
    wait_until(|| !events.lock().unwrap().is_empty()).await;

    player.stop().await.unwrap();
    wait_for_idle(&player).await;

    assert!(upstream.is_cancelled());

    // Nothing plays after stop
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(
        events_of(&events),
        vec![SinkEvent::Started("segment_0".to_string())]
    );
}

#[tokio::test]
async fn stop_when_already_stopped_has_no_observable_effect() {
    let (sink, _events) = MockSink::new(Duration::from_millis(10));
    let player = Player::spawn(sink);

    player.enqueue(buffer("segment_0")).await.unwrap();
    player.stop().await.unwrap();
    wait_for_idle(&player).await;

    let mut state_rx = player.subscribe();
    state_rx.borrow_and_update();

    player.stop().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(!state_rx.has_changed().unwrap());
}

#[tokio::test]
async fn volume_is_clamped() {
    let (sink, _events) = MockSink::new(Duration::from_millis(10));
    let player = Player::spawn(sink);

    player.set_volume(2.5).await.unwrap();
    let handle = player.clone();
    wait_until(move || handle.state().volume == 1.0).await;

    player.set_volume(-0.5).await.unwrap();
    let handle = player.clone();
    wait_until(move || handle.state().volume == 0.0).await;
}

#[tokio::test]
async fn is_generating_tracks_queue_and_upstream() {
    let (sink, _events) = MockSink::new(Duration::from_millis(100));
    let player = Player::spawn(sink);

    // Upstream open, nothing playing yet: generating
    player.set_upstream_open(true).await.unwrap();
    let handle = player.clone();
    wait_until(move || handle.state().is_generating).await;

    // Upstream closed and idle: not generating
    player.set_upstream_open(false).await.unwrap();
    let handle = player.clone();
    wait_until(move || !handle.state().is_generating).await;
}
