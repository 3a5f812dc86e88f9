pub mod collectibles;
pub mod collision;
pub mod config;
pub mod physics;
pub mod platforms;
pub mod run_state;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use skyhop_core::arcade_game_boilerplate;
use skyhop_core::events::GameEvent;
use skyhop_core::game_trait::{ArcadeGame, GameMetadata, RunSummary};
use skyhop_core::input::InputState;
use skyhop_core::storage::ScoreStore;
use skyhop_core::viewport::Viewport;

use collectibles::CollectibleSpawner;
use collision::CollisionEvent;
use config::{ConfigError, JumperConfig};
use physics::PlayerState;
use platforms::PlatformPool;
use run_state::RunState;

/// Snapshot of the world, serialized for the render host.
#[derive(Debug, Clone, Serialize)]
pub struct JumperState {
    pub player: PlayerState,
    pub platforms: PlatformPool,
    pub collectibles: CollectibleSpawner,
    pub run: RunState,
    pub viewport: Viewport,
}

/// The endless jumper.
pub struct EndlessJumper {
    config: JumperConfig,
    state: JumperState,
    rng: StdRng,
    store: Box<dyn ScoreStore>,
    paused: bool,
    runs_started: u32,
}

impl EndlessJumper {
    /// Build a game with a world laid out. The store is not read until
    /// `start_run`, so the best score shows 0 before the first run starts.
    pub fn new(config: JumperConfig, store: Box<dyn ScoreStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = build_world(&config, &mut rng, RunState::with_best(0));

        Ok(Self {
            config,
            state,
            rng,
            store,
            paused: false,
            runs_started: 0,
        })
    }

    pub fn state(&self) -> &JumperState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage a scene by hand.
    pub fn state_mut(&mut self) -> &mut JumperState {
        &mut self.state
    }

    pub fn config(&self) -> &JumperConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    /// One simulation step, in a fixed order: physics, collisions,
    /// recycling, then the termination check. Steering and wrap are applied
    /// after recycling so they take effect on the next integration.
    fn step(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let physics = &self.config.physics;
        let world = &self.config.world;

        self.state.player.integrate(dt, physics);

        let contacts = collision::resolve(
            &self.state.player,
            &self.state.platforms,
            &self.state.collectibles,
        );
        let touching_down = apply_contacts(&mut self.state, physics.bounce_velocity, &contacts, &mut events);

        if self.state.player.on_falling_edge() {
            events.push(GameEvent::PlayerFalling);
        }

        self.state
            .viewport
            .follow(self.state.player.y, world.camera_deadzone);
        self.state.platforms.recycle_offscreen(
            self.state.viewport.scroll_y,
            world,
            &self.config.spawn,
            &mut self.rng,
            &mut self.state.collectibles,
        );

        self.state
            .player
            .apply_horizontal_input(input.direction(), touching_down, physics.move_speed);
        self.state.player.wrap_horizontal(world.screen_width);

        self.state.run.ticks += 1;

        let fell = self
            .state
            .platforms
            .lowest()
            .is_some_and(|lowest| run_state::fell_off(self.state.player.y, lowest.y, world.fall_margin));
        if fell
            && let Some(outcome) = self
                .state
                .run
                .finish(self.store.as_mut(), &self.config.best_score_key)
        {
            events.push(GameEvent::RunEnded {
                score: outcome.score,
                best_score: outcome.best_score,
                new_best: outcome.new_best,
            });
        }

        events
    }
}

/// Fresh world: platforms laid out from y = 0, player centered at the spawn
/// height, camera on the player.
fn build_world(config: &JumperConfig, rng: &mut StdRng, run: RunState) -> JumperState {
    let world = &config.world;
    let mut collectibles = CollectibleSpawner::new(&config.spawn);
    let platforms = PlatformPool::initialize(world, &config.spawn, rng, &mut collectibles);

    let player = PlayerState::new(world.screen_width / 2.0, config.physics.spawn_y, &config.physics);
    let mut viewport = Viewport::new(world.screen_width, world.screen_height);
    viewport.center_on(player.y);

    JumperState {
        player,
        platforms,
        collectibles,
        run,
        viewport,
    }
}

/// Apply a collision pass: bounce on landing, collect overlapped items.
/// Returns whether the player touched down.
fn apply_contacts(
    state: &mut JumperState,
    bounce_velocity: f32,
    contacts: &[CollisionEvent],
    events: &mut Vec<GameEvent>,
) -> bool {
    let mut touching_down = false;
    for contact in contacts {
        match *contact {
            CollisionEvent::Landed { surface_y, .. } => {
                // One bounce per tick even if several platforms reported
                if touching_down {
                    continue;
                }
                touching_down = true;
                state.player.on_landed(surface_y, bounce_velocity);
                let score = state.run.record_bounce();
                events.push(GameEvent::PlayerLanded { score });
            },
            CollisionEvent::Collected { collectible } => {
                if state.collectibles.deactivate(collectible) {
                    let collected = state.run.record_pickup();
                    events.push(GameEvent::CollectiblePickedUp { collected });
                }
            },
        }
    }
    touching_down
}

impl ArcadeGame for EndlessJumper {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Skyhop".to_string(),
            description: "Bounce ever higher, grab the flowers, don't fall!".to_string(),
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn start_run(&mut self) -> Vec<GameEvent> {
        let run = RunState::begin(self.store.as_ref(), &self.config.best_score_key);
        self.state = build_world(&self.config, &mut self.rng, run);
        self.paused = false;
        self.runs_started += 1;
        tracing::info!(
            run = self.runs_started,
            best_score = self.state.run.best_score,
            "Run started"
        );
        vec![GameEvent::RunStarted {
            best_score: self.state.run.best_score,
        }]
    }

    fn update(&mut self, dt: f32, input: &InputState) -> Vec<GameEvent> {
        if self.paused || self.state.run.is_ended() {
            return Vec::new();
        }
        self.step(dt, input)
    }

    arcade_game_boilerplate!(state_type: JumperState);

    fn run_summary(&self) -> RunSummary {
        self.state.run.summary()
    }
}
