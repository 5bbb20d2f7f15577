//! Integration tests for queue resolution through a playback session
//!
//! Covers how `play` and `play_from_list` build the queue, and that rejected
//! input never disturbs what is already loaded.

use cadence_core::Track;
use cadence_playback::{PlaybackConfig, PlaybackError, PlaybackSession, SessionPhase};

// ===== Helpers =====

fn track(id: &str) -> Track {
    Track::new(id, format!("Track {}", id), "Test Artist")
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

fn queue_ids(session: &PlaybackSession) -> Vec<String> {
    session
        .snapshot()
        .queue()
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

fn session() -> PlaybackSession {
    PlaybackSession::new(PlaybackConfig::default()).unwrap()
}

// ===== Play From List =====

#[tokio::test(start_paused = true)]
async fn play_from_list_loads_whole_list() {
    let session = session();
    session
        .play_from_list(tracks(&["a", "b", "c"]), 1)
        .unwrap();

    let state = session.snapshot();
    assert_eq!(queue_ids(&session), ["a", "b", "c"]);
    assert_eq!(state.current_index(), Some(1));
    assert_eq!(state.elapsed_secs(), 0);
    assert!(state.is_playing());
}

#[tokio::test(start_paused = true)]
async fn play_from_list_rejects_empty_list() {
    let session = session();
    let err = session.play_from_list(Vec::new(), 0).unwrap_err();

    assert_eq!(err, PlaybackError::InvalidQueue { len: 0, index: 0 });
    assert_eq!(session.phase(), SessionPhase::Empty);
    assert!(!session.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn rejected_list_keeps_current_queue() {
    let session = session();
    session.play_from_list(tracks(&["a", "b"]), 0).unwrap();
    session.toggle();
    let before = session.snapshot();

    let err = session
        .play_from_list(tracks(&["x", "y"]), 5)
        .unwrap_err();

    assert_eq!(err, PlaybackError::InvalidQueue { len: 2, index: 5 });
    assert_eq!(session.snapshot(), before);
    assert!(!session.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn reloading_replaces_queue_wholesale() {
    let session = session();
    session.play_from_list(tracks(&["a", "b", "c"]), 2).unwrap();
    session.play_from_list(tracks(&["x"]), 0).unwrap();

    assert_eq!(queue_ids(&session), ["x"]);
    assert_eq!(session.snapshot().current_index(), Some(0));
    assert!(!session.snapshot().has_next());
}

// ===== Play With Seed =====

#[tokio::test(start_paused = true)]
async fn play_seed_inside_hint_keeps_context() {
    let session = session();
    session.play(track("b"), tracks(&["a", "b", "c"])).unwrap();

    assert_eq!(queue_ids(&session), ["a", "b", "c"]);
    assert_eq!(session.snapshot().current_index(), Some(1));
    assert_eq!(session.current_track().unwrap().id.as_str(), "b");
}

#[tokio::test(start_paused = true)]
async fn play_seed_outside_hint_is_prepended() {
    let session = session();
    session.play(track("d"), tracks(&["a", "b", "c"])).unwrap();

    assert_eq!(queue_ids(&session), ["d", "a", "b", "c"]);
    assert_eq!(session.snapshot().current_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn play_seed_with_empty_hint_plays_alone() {
    let session = session();
    session.play(track("solo"), Vec::new()).unwrap();

    assert_eq!(queue_ids(&session), ["solo"]);
    let state = session.snapshot();
    assert!(!state.has_next());
    assert!(!state.has_previous());
}

#[tokio::test(start_paused = true)]
async fn play_seed_then_navigate_context() {
    let session = session();
    session
        .play(track("c"), tracks(&["a", "b", "c", "d"]))
        .unwrap();

    session.prev().unwrap();
    assert_eq!(session.current_track().unwrap().id.as_str(), "b");

    session.next().unwrap();
    session.next().unwrap();
    assert_eq!(session.current_track().unwrap().id.as_str(), "d");
    assert_eq!(session.next(), Err(PlaybackError::EndOfQueue));
}

#[tokio::test(start_paused = true)]
async fn play_seed_uses_its_own_duration() {
    let session = session();
    let seed = track("d").with_duration_secs(321);
    session.play(seed, tracks(&["a", "b"])).unwrap();

    assert_eq!(session.snapshot().total_duration_secs(), 321);

    // Hint tracks without a duration fall back to the configured default
    session.next().unwrap();
    assert_eq!(
        session.snapshot().total_duration_secs(),
        PlaybackConfig::default().default_track_duration_secs
    );
}
