use serde::{Deserialize, Serialize};

use skyhop_core::game_trait::RunSummary;
use skyhop_core::storage::{ScoreStore, read_score};

/// Lifecycle of a single run. `Ended` is terminal until the next run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Running,
    Ended,
}

/// Result of the transition into `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Score the run finished with.
    pub score: u32,
    /// Best score after this run.
    pub best_score: u32,
    /// Whether this run set a new best (and it was persisted).
    pub new_best: bool,
}

/// Score counters and termination state of the current run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    pub collected: u32,
    /// Best score as read from storage when the run started.
    pub best_score: u32,
    pub phase: RunPhase,
    pub ticks: u64,
}

impl RunState {
    /// Begin a run, reading the best score once from `store`.
    pub fn begin(store: &dyn ScoreStore, key: &str) -> Self {
        Self::with_best(read_score(store, key))
    }

    /// Fresh counters against an already known best score.
    pub fn with_best(best_score: u32) -> Self {
        Self {
            score: 0,
            collected: 0,
            best_score,
            phase: RunPhase::Running,
            ticks: 0,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    /// Count a bounce. Returns the new score.
    pub fn record_bounce(&mut self) -> u32 {
        self.score = self.score.saturating_add(1);
        self.score
    }

    /// Count a pickup. Returns the new collected count.
    pub fn record_pickup(&mut self) -> u32 {
        self.collected = self.collected.saturating_add(1);
        self.collected
    }

    /// End the run: keep the better of the stored and final score, persist
    /// it only if this run beat it, and reset the score.
    ///
    /// Returns `None` if the run had already ended.
    pub fn finish(&mut self, store: &mut dyn ScoreStore, key: &str) -> Option<RunOutcome> {
        if self.is_ended() {
            return None;
        }

        let score = self.score;
        let new_best = score > self.best_score;
        if new_best {
            self.best_score = score;
            if let Err(e) = store.set(key, &score.to_string()) {
                tracing::warn!(key, score, "Failed to persist best score: {e}");
            }
        }

        self.phase = RunPhase::Ended;
        self.score = 0;
        tracing::info!(
            score,
            best_score = self.best_score,
            new_best,
            collected = self.collected,
            ticks = self.ticks,
            "Run ended"
        );

        Some(RunOutcome {
            score,
            best_score: self.best_score,
            new_best,
        })
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            collected: self.collected,
            best_score: self.best_score,
            ticks: self.ticks,
        }
    }
}

/// Whether the player has dropped more than `margin` below the lowest
/// platform.
pub fn fell_off(player_y: f32, lowest_platform_y: f32, margin: f32) -> bool {
    player_y > lowest_platform_y + margin
}
