use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::input::InputState;

/// Core trait that all Skyhop games must implement.
///
/// The host runtime owns rendering, audio, input polling and scene
/// transitions; the game only advances its simulation and reports what
/// happened as a list of [`GameEvent`]s.
pub trait ArcadeGame {
    /// Game metadata for the host's title screen.
    fn metadata(&self) -> GameMetadata;

    /// Reset the world and begin a fresh run.
    fn start_run(&mut self) -> Vec<GameEvent>;

    /// Called each simulation tick. Returns the events produced by this tick.
    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent>;

    /// Serialize the current world for the render host.
    fn serialize_state(&self) -> Vec<u8>;

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Freeze the simulation (host menu open, window unfocused).
    fn pause(&mut self);

    /// Resume after a pause.
    fn resume(&mut self);

    fn is_paused(&self) -> bool;

    /// Whether the current run has reached its terminal state.
    fn is_run_over(&self) -> bool;

    /// Counters for the host's HUD.
    fn run_summary(&self) -> RunSummary;
}

/// Game metadata for the host's title screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
}

/// HUD counters for the current (or just ended) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u32,
    pub collected: u32,
    pub best_score: u32,
    pub ticks: u64,
}

/// Generates the boilerplate `ArcadeGame` methods shared by every game:
/// `serialize_state`, `pause`, `resume`, `is_paused`, `is_run_over`.
///
/// Requires the implementing struct to have `state: $StateType` and
/// `paused: bool` fields, and `$StateType` to have a `run` field exposing
/// `is_ended()`.
#[macro_export]
macro_rules! arcade_game_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            let state: &$StateType = &self.state;
            rmp_serde::to_vec(state).expect("game state serialization must succeed")
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn resume(&mut self) {
            self.paused = false;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn is_run_over(&self) -> bool {
            self.state.run.is_ended()
        }
    };
}
