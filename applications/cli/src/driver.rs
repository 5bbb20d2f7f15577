//! Interactive driver
//!
//! Feeds line commands into a `PlaybackSession` and logs what the session
//! publishes. Bad commands are logged and skipped; only I/O failures end the loop.

use crate::command::{Command, HELP};
use crate::error::{CliError, Result};
use cadence_core::{Catalog, Track};
use cadence_playback::{PlaybackEvent, PlaybackSession, PlaybackState};
use std::io::Write;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct Driver {
    session: PlaybackSession,
    catalog: Catalog,
}

impl Driver {
    pub fn new(session: PlaybackSession, catalog: Catalog) -> Self {
        Self { session, catalog }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start playing the catalog at `index`
    pub fn start(&self, index: usize) -> Result<()> {
        self.session
            .play_from_list(self.catalog.tracks().to_vec(), index)?;
        Ok(())
    }

    /// Read commands from `input` until `quit` or end of input
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{}", e);
                    continue;
                }
            };

            match self.execute(&command, out) {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(())) => {}
                Err(e) => warn!("{:?} rejected: {}", command, e),
            }
        }

        self.session.shutdown();
        Ok(())
    }

    /// Apply one command, writing any requested output to `out`
    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> Result<ControlFlow<()>> {
        debug!("Executing {:?}", command);

        match command {
            Command::Toggle => {
                self.session.toggle();
            }
            Command::BeginSeek => self.session.begin_seek(),
            Command::Seek(position) => self.session.seek_to(*position)?,
            Command::EndSeek => self.session.end_seek(),
            Command::Next => self.session.next()?,
            Command::Prev => self.session.prev()?,
            Command::Play(id) => {
                let track = self.catalog.require(id)?.clone();
                self.session.play(track, self.catalog.tracks().to_vec())?;
            }
            Command::List(index) => self.start(*index)?,
            Command::State => {
                let json = serde_json::to_string_pretty(&self.session.snapshot())?;
                writeln!(out, "{}", json)?;
            }
            Command::Status => writeln!(out, "{}", status_line(&self.session.snapshot()))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }
}

/// Log every session event until the session goes away
pub fn spawn_event_log(mut events: broadcast::Receiver<PlaybackEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(PlaybackEvent::PositionUpdate {
                    elapsed_secs,
                    duration_secs,
                }) => {
                    debug!(
                        "{} / {}",
                        format_duration(elapsed_secs.into()),
                        format_duration(duration_secs.into())
                    );
                }
                Ok(event) => info!("{}: {:?}", event.kind(), event),
                Err(RecvError::Lagged(missed)) => warn!("Event log lagged, {} events dropped", missed),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// `> 1:30 / 3:00 (50%) [a, *b, c]`, with `*` marking the current track
pub fn status_line(state: &PlaybackState) -> String {
    let marker = if state.is_playing() { '>' } else { '|' };
    let queue = state
        .queue()
        .ids()
        .iter()
        .enumerate()
        .map(|(index, id)| {
            if state.current_index() == Some(index) {
                format!("*{}", id)
            } else {
                id.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} {} / {} ({}%) [{}]",
        marker,
        format_duration(state.elapsed_secs().into()),
        format_duration(state.total_duration_secs().into()),
        (state.progress() * 100.0).round() as u32,
        queue
    )
}

/// Human-readable catalog listing
pub fn catalog_summary(catalog: &Catalog) -> String {
    let mut summary = format!(
        "{} tracks, {} total\n",
        catalog.len(),
        format_duration(catalog.total_duration_secs())
    );

    for (index, track) in catalog.tracks().iter().enumerate() {
        let length = track
            .duration_secs
            .map(|secs| format_duration(secs.into()))
            .unwrap_or_else(|| "--:--".to_string());
        summary.push_str(&format!(
            "{:>3}. [{}] {} ({})\n",
            index,
            track.id,
            track.display_name(),
            length
        ));
    }

    summary
}

/// Tracks used when no catalog file is given
pub fn demo_catalog() -> Result<Catalog> {
    let tracks = vec![
        Track::new("demo-1", "Warm Up", "The Placeholders")
            .with_year(2019)
            .with_duration_secs(142),
        Track::new("demo-2", "Middle Eight", "The Placeholders")
            .with_year(2019)
            .with_duration_secs(215),
        Track::new("demo-3", "Untimed Outro", "The Placeholders").with_year(2020),
    ];
    Catalog::new(tracks).map_err(CliError::from)
}

/// `m:ss`, or `h:mm:ss` past an hour
pub fn format_duration(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
