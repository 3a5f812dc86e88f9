//! End-to-end checks of the jumper world driven through the public API.

use rand::SeedableRng;
use rand::rngs::StdRng;

use skyhop_core::events::GameEvent;
use skyhop_core::game_trait::ArcadeGame;
use skyhop_core::input::InputState;
use skyhop_core::storage::{BEST_SCORE_KEY, MemoryStore, ScoreStore};
use skyhop_core::test_helpers::{run_game_ticks, run_until_over, store_with_best};
use skyhop_jumper::EndlessJumper;
use skyhop_jumper::collectibles::CollectibleSpawner;
use skyhop_jumper::config::{JumperConfig, SpawnConfig, WorldConfig};
use skyhop_jumper::physics::MotionState;
use skyhop_jumper::platforms::{PlatformId, PlatformPool, recycle_if_offscreen};
use skyhop_jumper::run_state::RunState;

const DT: f32 = 1.0 / 60.0;

fn seeded(seed: u64) -> JumperConfig {
    JumperConfig {
        seed: Some(seed),
        ..JumperConfig::default()
    }
}

#[test]
fn seven_platform_world_first_bounce() {
    let mut game = EndlessJumper::new(seeded(17), Box::new(MemoryStore::new())).unwrap();
    game.start_run();
    assert_eq!(game.state().platforms.len(), 7);

    // Stage a platform whose top sits at y = 300 right under the player
    let ids: Vec<PlatformId> = game.state().platforms.iter().map(|p| p.id).collect();
    for id in ids {
        game.state_mut().platforms.get_mut(id).unwrap().x = 100.0;
    }
    {
        let state = game.state_mut();
        let p = state.platforms.get_mut(PlatformId(3)).unwrap();
        p.x = 640.0;
        p.y = 300.0 + p.height / 2.0;
        state.player.y = 300.0 - state.player.height / 2.0 - 2.0;
        state.player.prev_bottom = state.player.bottom();
        state.player.vy = 150.0;
    }

    let events = game.update(DT, &InputState::IDLE);
    assert!(events.contains(&GameEvent::PlayerLanded { score: 1 }));
    assert_eq!(events[0].sound_cue(), Some("jump"));
    let player = &game.state().player;
    assert_eq!(player.vy, -300.0);
    assert_eq!(player.motion.visual(), "rising");
    assert_eq!(player.motion.texture_key(), "player-up");
    assert_eq!(game.run_summary().score, 1);
}

#[test]
fn recycled_platform_lands_in_jitter_band_with_flower() {
    let world = WorldConfig::default();
    let spawn = SpawnConfig {
        initial_attach_chance: 0.0,
        recycle_attach_chance: 1.0,
        ..SpawnConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(2024);
    let mut spawner = CollectibleSpawner::new(&spawn);
    let mut pool = PlatformPool::initialize(&world, &spawn, &mut rng, &mut spawner);

    let platform = pool.get_mut(PlatformId(5)).unwrap();
    platform.y = 705.0;
    assert!(recycle_if_offscreen(platform, 0.0, &world, &spawn, &mut rng, &mut spawner));
    assert!((-80.0..=-50.0).contains(&platform.y));

    let id = spawner.attached_to(platform.id).unwrap();
    let flower = spawner.get(id).unwrap();
    assert_eq!(flower.x, platform.x);
    assert_eq!(flower.y, platform.y - platform.height);
}

#[test]
fn lower_score_leaves_stored_best_alone() {
    let mut store = store_with_best("150");
    let mut run = RunState::begin(&store, BEST_SCORE_KEY);
    run.score = 120;
    let outcome = run.finish(&mut store, BEST_SCORE_KEY).unwrap();

    assert!(!outcome.new_best);
    assert_eq!(outcome.best_score, 150);
    assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("150"));
    assert_eq!(store.writes(), 0);
}

#[test]
fn first_ever_score_is_persisted() {
    let mut store = MemoryStore::new();
    let mut run = RunState::begin(&store, BEST_SCORE_KEY);
    run.score = 40;
    run.finish(&mut store, BEST_SCORE_KEY);
    assert_eq!(store.get(BEST_SCORE_KEY).as_deref(), Some("40"));
}

#[test]
fn garbage_best_score_reads_as_zero() {
    let mut game = EndlessJumper::new(seeded(1), Box::new(store_with_best("lots"))).unwrap();
    assert_eq!(game.start_run(), vec![GameEvent::RunStarted { best_score: 0 }]);
    assert_eq!(game.run_summary().best_score, 0);
}

#[test]
fn platform_count_constant_over_a_long_run() {
    let mut game = EndlessJumper::new(seeded(77), Box::new(MemoryStore::new())).unwrap();
    game.start_run();
    for tick in 0..2_000 {
        // Alternate steering so the player drifts across the screen
        let input = if (tick / 90) % 2 == 0 {
            InputState::left()
        } else {
            InputState::right()
        };
        game.update(DT, &input);
        assert_eq!(game.state().platforms.len(), 7);
        for p in game.state().platforms.iter() {
            let attached = game
                .state()
                .collectibles
                .active()
                .filter(|(_, c)| c.attached_to == Some(p.id))
                .count();
            assert!(attached <= 1);
        }
        if game.is_run_over() {
            break;
        }
    }
}

#[test]
fn game_over_then_restart() {
    let mut config = seeded(3);
    config.world.platform_count = 1;
    let mut game = EndlessJumper::new(config, Box::new(store_with_best("9"))).unwrap();

    let started = game.start_run();
    assert_eq!(started, vec![GameEvent::RunStarted { best_score: 9 }]);
    assert_eq!(started[0].sound_cue(), Some("start"));

    let events = run_game_ticks(&mut game, 5, DT, &InputState::IDLE);
    let ended: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].sound_cue(), Some("down"));
    assert!(game.is_run_over());

    // Nothing moves until the host restarts
    assert!(run_game_ticks(&mut game, 5, DT, &InputState::right()).is_empty());

    game.start_run();
    assert!(!game.is_run_over());
    assert_eq!(game.state().player.motion, MotionState::Falling);
    assert_eq!(game.runs_started(), 2);
    assert_eq!(game.store().get(BEST_SCORE_KEY).as_deref(), Some("9"));

    // The lone platform sits above the spawn point, so the second run ends at once too
    assert_eq!(run_until_over(&mut game, 10, DT, &InputState::IDLE), Some(1));
}

#[test]
fn config_from_toml_drives_world() {
    let config = JumperConfig::from_toml_str(
        r#"
        seed = 11

        [world]
        platform_count = 4
        screen_width = 800.0

        [physics]
        gravity = 250.0
        "#,
    )
    .unwrap();
    let game = EndlessJumper::new(config, Box::new(MemoryStore::new())).unwrap();
    assert_eq!(game.state().platforms.len(), 4);
    assert_eq!(game.state().player.x, 400.0);
    assert_eq!(game.config().physics.gravity, 250.0);
}
