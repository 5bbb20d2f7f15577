//! Driver integration tests
//!
//! Scripts are fed through an in-memory reader; the paused clock keeps the
//! session from ticking between commands.

use cadence_cli::{Command, Driver};
use cadence_core::{Catalog, Track, TrackId};
use cadence_playback::{PlaybackConfig, PlaybackSession, SessionPhase};
use std::io::Write;

fn catalog() -> Catalog {
    Catalog::new(vec![
        Track::new("a", "First", "Band").with_duration_secs(100),
        Track::new("b", "Second", "Band").with_duration_secs(200),
        Track::new("c", "Third", "Band"),
    ])
    .unwrap()
}

fn driver() -> Driver {
    let session = PlaybackSession::new(PlaybackConfig::default()).unwrap();
    Driver::new(session, catalog())
}

#[tokio::test(start_paused = true)]
async fn script_drives_session() {
    let driver = driver();
    driver.start(0).unwrap();

    let script = b"toggle\nnext\nbegin-seek\nseek 50%\nend-seek\n";
    let mut out = Vec::new();
    driver.run(&script[..], &mut out).await.unwrap();

    let state = driver.session().snapshot();
    assert_eq!(state.current_index(), Some(1));
    assert_eq!(state.elapsed_secs(), 100);

    // End of input shuts the session down
    assert!(!state.is_playing());
    assert_eq!(driver.session().phase(), SessionPhase::Paused);
}

#[tokio::test(start_paused = true)]
async fn quit_stops_reading() {
    let driver = driver();
    driver.start(0).unwrap();

    let mut out = Vec::new();
    driver.run(&b"quit\nnext\n"[..], &mut out).await.unwrap();

    assert_eq!(driver.session().snapshot().current_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn bad_lines_are_skipped() {
    let driver = driver();
    driver.start(2).unwrap();

    let script = b"shuffle\n\nnext\nseek lots\nplay missing\nlist 9\nprev\nquit\n";
    let mut out = Vec::new();
    driver.run(&script[..], &mut out).await.unwrap();

    // Only `prev` took effect
    assert_eq!(driver.session().snapshot().current_index(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn state_prints_json_snapshot() {
    let driver = driver();
    driver.start(1).unwrap();

    let mut out = Vec::new();
    driver.run(&b"state\nquit\n"[..], &mut out).await.unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["current_index"], 1);
    assert_eq!(json["is_playing"], true);
    assert_eq!(json["total_duration_secs"], 200);
    assert_eq!(json["queue"][1]["id"], "b");
}

#[tokio::test(start_paused = true)]
async fn status_prints_position_and_queue() {
    let driver = driver();
    driver.start(1).unwrap();

    let mut out = Vec::new();
    driver
        .run(&b"seek 0.25\nstatus\ntoggle\nstatus\nquit\n"[..], &mut out)
        .await
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(
        lines,
        [
            "> 0:50 / 3:20 (25%) [a, *b, c]",
            "| 0:50 / 3:20 (25%) [a, *b, c]",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn play_uses_catalog_as_context() {
    let driver = driver();
    let mut out = Vec::new();

    driver
        .execute(&Command::Play(TrackId::new("c")), &mut out)
        .unwrap();

    let state = driver.session().snapshot();
    assert_eq!(state.queue().len(), 3);
    assert_eq!(state.current_index(), Some(2));
    assert_eq!(
        state.total_duration_secs(),
        PlaybackConfig::default().default_track_duration_secs
    );
}

#[tokio::test(start_paused = true)]
async fn execute_reports_errors() {
    let driver = driver();
    let mut out = Vec::new();

    assert!(driver.execute(&Command::Next, &mut out).is_err());
    assert!(driver
        .execute(&Command::Play(TrackId::new("zzz")), &mut out)
        .is_err());
    assert!(driver.execute(&Command::List(3), &mut out).is_err());
    assert_eq!(driver.session().phase(), SessionPhase::Empty);

    driver.execute(&Command::Help, &mut out).unwrap();
    out.flush().unwrap();
    assert!(String::from_utf8(out).unwrap().contains("begin-seek"));
}

#[test]
fn bundled_demo_catalog_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/catalog.json");
    let catalog = Catalog::load(path).unwrap();

    assert_eq!(catalog.len(), 3);
    assert!(catalog.get("m83-midnight-city").is_some());
    assert!(catalog.tracks()[2].duration_secs.is_none());
}
