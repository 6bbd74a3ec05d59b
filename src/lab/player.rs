//! Fixed-cadence playback of a precomputed step sequence.
//!
//! The player never sleeps or spawns anything. It arms one [`Tick`] at a time
//! and the host fires it once its deadline has passed (the GUI polls every
//! frame). Each armed tick carries the generation it was armed under;
//! cancelling bumps the generation so a tick armed earlier can never reveal a
//! step afterwards.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::graph_utils::graph::NodeId;
use crate::lab::algorithms::{format_path, AlgoRun, AlgoStep, Algorithm};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Idle,
    Playing,
    Completed,
}

/// A scheduled reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
    pub due: Instant,
}

/// What the caller gets once the last step has been revealed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub algorithm: Algorithm,
    pub path: Vec<NodeId>,
    pub path_string: String,
    pub total_cost: f64,
    pub found: bool,
    pub steps: usize,
}

impl RunSummary {
    fn from_run(run: &AlgoRun) -> Self {
        Self {
            algorithm: run.algorithm,
            path: run.final_path.clone(),
            path_string: format_path(&run.final_path),
            total_cost: run.total_cost,
            found: run.found(),
            steps: run.steps.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    Revealed { index: usize, total: usize },
    Completed(RunSummary),
}

#[derive(Debug)]
pub struct StepPlayer {
    interval: Duration,
    state: PlayerState,
    generation: u64,
    run: Option<AlgoRun>,
    // number of steps revealed so far
    revealed: usize,
    pending: Option<Tick>,
    summary: Option<RunSummary>,
}

impl Default for StepPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl StepPlayer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: PlayerState::Idle,
            generation: 0,
            run: None,
            revealed: 0,
            pending: None,
            summary: None,
        }
    }

    pub fn interval(&self) -> Duration { self.interval }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Begin playing `run`. Any playback in flight is cancelled first. The
    /// first step is due immediately. Returns the new generation.
    pub fn start(&mut self, run: AlgoRun, now: Instant) -> u64 {
        self.cancel();
        log::info!("playing {} step(s) of {} (generation {})", run.steps.len(), run.algorithm, self.generation);
        self.run = Some(run);
        self.state = PlayerState::Playing;
        self.pending = Some(Tick { generation: self.generation, due: now });
        self.generation
    }

    /// Stop the timer and drop the step sequence and result. Returns whether
    /// something was playing.
    pub fn cancel(&mut self) -> bool {
        let was_playing = self.is_playing();
        self.generation += 1;
        self.pending = None;
        self.run = None;
        self.revealed = 0;
        self.summary = None;
        self.state = PlayerState::Idle;
        if was_playing {
            log::info!("playback cancelled (generation now {})", self.generation);
        }
        was_playing
    }

    pub fn pending_tick(&self) -> Option<Tick> {
        self.pending
    }

    /// Reveal the next step for `tick`. Ticks from an older generation, or any
    /// tick other than the one currently armed, are ignored.
    pub fn fire(&mut self, tick: Tick) -> Option<PlayerEvent> {
        if self.state != PlayerState::Playing || self.pending != Some(tick) {
            log::debug!("ignored stale tick (generation {}, current {})", tick.generation, self.generation);
            return None;
        }
        let total = self.run.as_ref().map_or(0, |r| r.steps.len());
        self.revealed = (self.revealed + 1).min(total);
        if self.revealed < total {
            self.pending = Some(Tick { generation: self.generation, due: tick.due + self.interval });
            return Some(PlayerEvent::Revealed { index: self.revealed - 1, total });
        }
        Some(PlayerEvent::Completed(self.finish()))
    }

    /// Fire the armed tick if its deadline has passed. Reveals at most one step.
    pub fn poll(&mut self, now: Instant) -> Option<PlayerEvent> {
        match self.pending {
            Some(tick) if tick.due <= now => self.fire(tick),
            _ => None,
        }
    }

    // Settle on the final path: the last frame always shows the complete result
    fn finish(&mut self) -> RunSummary {
        self.pending = None;
        self.state = PlayerState::Completed;
        let summary = match self.run.as_mut() {
            Some(run) => {
                let final_path = run.final_path.clone();
                if let Some(last) = run.steps.last_mut() {
                    last.path = final_path;
                }
                RunSummary::from_run(run)
            }
            None => RunSummary {
                algorithm: Algorithm::default(),
                path: Vec::new(),
                path_string: String::new(),
                total_cost: 0.0,
                found: false,
                steps: 0,
            },
        };
        log::info!("playback complete: path [{}] cost {:.2}", summary.path_string, summary.total_cost);
        self.summary = Some(summary.clone());
        summary
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|t| t.due.saturating_duration_since(now))
    }

    pub fn current_step(&self) -> Option<&AlgoStep> {
        let idx = self.revealed.checked_sub(1)?;
        self.run.as_ref()?.steps.get(idx)
    }

    /// (revealed, total)
    pub fn progress(&self) -> (usize, usize) {
        (self.revealed, self.run.as_ref().map_or(0, |r| r.steps.len()))
    }

    pub fn state(&self) -> PlayerState { self.state }
    pub fn is_playing(&self) -> bool { self.state == PlayerState::Playing }
    pub fn generation(&self) -> u64 { self.generation }
    pub fn summary(&self) -> Option<&RunSummary> { self.summary.as_ref() }
    pub fn run(&self) -> Option<&AlgoRun> { self.run.as_ref() }
}
