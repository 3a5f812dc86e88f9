use serde::{Deserialize, Serialize};

/// Fire-and-forget notifications a game emits for its host.
///
/// The host maps these to sound cues, sprite swaps and scene changes.
/// Nothing the host does in response feeds back into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh run began. Carries the best score read from storage.
    RunStarted { best_score: u32 },
    /// The player bounced off a platform; carries the new score.
    PlayerLanded { score: u32 },
    /// The player passed the apex of a bounce and started falling.
    PlayerFalling,
    /// A collectible was picked up; carries the new collected count.
    CollectiblePickedUp { collected: u32 },
    /// The player fell off the bottom of the world.
    RunEnded {
        score: u32,
        best_score: u32,
        new_best: bool,
    },
}

impl GameEvent {
    /// Name of the sound cue the host should play, if any.
    pub fn sound_cue(&self) -> Option<&'static str> {
        match self {
            GameEvent::RunStarted { .. } => Some("start"),
            GameEvent::PlayerLanded { .. } => Some("jump"),
            GameEvent::PlayerFalling => None,
            GameEvent::CollectiblePickedUp { .. } => Some("power"),
            GameEvent::RunEnded { .. } => Some("down"),
        }
    }

    /// Whether this event should trigger the host's game-over transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::RunEnded { .. })
    }
}
