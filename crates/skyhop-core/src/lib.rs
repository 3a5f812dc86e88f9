pub mod clock;
pub mod events;
pub mod game_trait;
pub mod geometry;
pub mod input;
pub mod pool;
pub mod storage;
pub mod viewport;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::GameEvent;
    use crate::game_trait::ArcadeGame;
    use crate::input::InputState;
    use crate::storage::{BEST_SCORE_KEY, MemoryStore};

    /// Store holding a best score, stored as text the way a browser would.
    pub fn store_with_best(best: &str) -> MemoryStore {
        MemoryStore::with_entry(BEST_SCORE_KEY, best)
    }

    /// Run N game ticks with the same input, returning all accumulated events.
    pub fn run_game_ticks(
        game: &mut dyn ArcadeGame,
        n: usize,
        dt: f32,
        input: &InputState,
    ) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(game.update(dt, input));
        }
        all_events
    }

    /// Tick until the run ends. Returns the number of ticks taken, or `None`
    /// if the run was still going after `max_ticks`.
    pub fn run_until_over(
        game: &mut dyn ArcadeGame,
        max_ticks: usize,
        dt: f32,
        input: &InputState,
    ) -> Option<usize> {
        for tick in 0..max_ticks {
            game.update(dt, input);
            if game.is_run_over() {
                return Some(tick + 1);
            }
        }
        None
    }

    /// Assert that the game's serialized state differs from `before`.
    pub fn assert_game_state_changed(game: &dyn ArcadeGame, before: &[u8]) {
        let after = game.serialize_state();
        assert_ne!(
            before,
            &after[..],
            "Game state should have changed after operation"
        );
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Generic checks every ArcadeGame implementation must pass. Game crates
    // call them from their own #[cfg(test)] modules.

    /// start_run() must emit exactly one RunStarted and leave a live run.
    pub fn contract_start_run_announces(game: &mut dyn ArcadeGame) {
        let events = game.start_run();
        let started = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RunStarted { .. }))
            .count();
        assert_eq!(started, 1, "start_run must emit one RunStarted");
        assert!(!game.is_run_over(), "A fresh run must not be over");
        assert_eq!(game.run_summary().score, 0, "A fresh run starts at 0");
    }

    /// update() with dt>0 must change the world.
    pub fn contract_update_advances_state(game: &mut dyn ArcadeGame) {
        let before = game.serialize_state();
        game.update(1.0 / 60.0, &InputState::IDLE);
        assert_game_state_changed(game, &before);
    }

    /// pause() must freeze the world, resume() must unfreeze it.
    pub fn contract_pause_stops_updates(game: &mut dyn ArcadeGame) {
        game.pause();
        assert!(game.is_paused());
        let before = game.serialize_state();
        let events = game.update(1.0 / 60.0, &InputState::IDLE);
        assert!(events.is_empty(), "No events while paused");
        assert_eq!(
            before,
            game.serialize_state(),
            "State must not change while paused"
        );

        game.resume();
        assert!(!game.is_paused());
        game.update(1.0 / 60.0, &InputState::IDLE);
        assert_game_state_changed(game, &before);
    }

    /// With no input the run must eventually end, emitting RunEnded once.
    pub fn contract_run_eventually_ends(game: &mut dyn ArcadeGame, max_ticks: usize) {
        let mut ended = 0;
        for _ in 0..max_ticks {
            ended += game
                .update(1.0 / 60.0, &InputState::IDLE)
                .iter()
                .filter(|e| e.is_terminal())
                .count();
            if game.is_run_over() {
                break;
            }
        }
        assert!(
            game.is_run_over(),
            "Run must end within {max_ticks} idle ticks"
        );
        assert_eq!(ended, 1, "RunEnded must be emitted exactly once");
    }

    /// Once over, update() must be a no-op until the next start_run().
    pub fn contract_ended_run_is_frozen(game: &mut dyn ArcadeGame) {
        assert!(game.is_run_over(), "Precondition: run must be over");
        let before = game.serialize_state();
        let events = run_game_ticks(game, 10, 1.0 / 60.0, &InputState::right());
        assert!(events.is_empty(), "Ended run must not emit events");
        assert_eq!(before, game.serialize_state(), "Ended run must not change");
    }
}
