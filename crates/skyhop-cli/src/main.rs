mod autopilot;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use skyhop_core::clock::FixedStepClock;
use skyhop_core::events::GameEvent;
use skyhop_core::game_trait::ArcadeGame;
use skyhop_core::storage::JsonFileStore;
use skyhop_jumper::EndlessJumper;
use skyhop_jumper::config::JumperConfig;

use autopilot::Autopilot;

/// Options taken from `--key=value` arguments.
#[derive(Debug, Clone)]
struct Options {
    runs: u32,
    max_ticks: u64,
    frame_ms: f32,
    seed: Option<u64>,
    store: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            runs: 1,
            max_ticks: 60 * 60 * 10,
            frame_ms: 1000.0 / 60.0,
            seed: None,
            store: "skyhop-scores.json".to_string(),
        }
    }
}

fn parse_args(args: impl Iterator<Item = String>) -> Options {
    let mut opts = Options::default();
    for arg in args {
        if let Some(v) = arg.strip_prefix("--runs=")
            && let Ok(n) = v.parse()
        {
            opts.runs = n;
        } else if let Some(v) = arg.strip_prefix("--ticks=")
            && let Ok(n) = v.parse()
        {
            opts.max_ticks = n;
        } else if let Some(v) = arg.strip_prefix("--frame-ms=")
            && let Ok(ms) = v.parse::<f32>()
            && ms.is_finite()
            && ms > 0.0
        {
            opts.frame_ms = ms;
        } else if let Some(v) = arg.strip_prefix("--seed=")
            && let Ok(seed) = v.parse()
        {
            opts.seed = Some(seed);
        } else if let Some(v) = arg.strip_prefix("--store=") {
            opts.store = v.to_string();
        } else {
            tracing::warn!("Ignoring unrecognized argument {arg}");
        }
    }
    opts
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = parse_args(std::env::args().skip(1));

    let mut config = JumperConfig::load();
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }

    let store = match JsonFileStore::open(&opts.store) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open score store {}: {e}", opts.store);
            return ExitCode::FAILURE;
        },
    };

    let mut game = match EndlessJumper::new(config, Box::new(store)) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("Invalid jumper configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let meta = game.metadata();
    tracing::info!("{}: {}", meta.name, meta.description);

    let pilot = Autopilot::default();
    let mut clock = FixedStepClock::new(game.tick_rate());
    for _ in 0..opts.runs {
        for event in game.start_run() {
            log_event(&event);
        }
        clock.reset();
        play_run(&mut game, &mut clock, &pilot, &opts);

        let summary = game.run_summary();
        tracing::info!(
            collected = summary.collected,
            best_score = summary.best_score,
            ticks = summary.ticks,
            "Run summary"
        );
    }

    ExitCode::SUCCESS
}

/// Feed frames of `frame_ms` into the clock until the run ends or the tick
/// cap is reached.
fn play_run(
    game: &mut EndlessJumper,
    clock: &mut FixedStepClock,
    pilot: &Autopilot,
    opts: &Options,
) {
    let frame_dt = opts.frame_ms / 1000.0;
    while !game.is_run_over() {
        for _ in 0..clock.advance(frame_dt) {
            let input = pilot.steer(game.state());
            for event in game.update(clock.interval(), &input) {
                log_event(&event);
            }
            if game.is_run_over() {
                return;
            }
        }
        if clock.tick() >= opts.max_ticks {
            tracing::info!(ticks = clock.tick(), "Tick limit reached, abandoning run");
            return;
        }
    }
}

fn log_event(event: &GameEvent) {
    let cue = event.sound_cue().unwrap_or("-");
    match event {
        GameEvent::RunStarted { best_score } => {
            tracing::info!(best_score, cue, "Run started");
        },
        GameEvent::PlayerLanded { score } => {
            tracing::debug!(score, cue, "Bounce");
        },
        GameEvent::PlayerFalling => {
            tracing::trace!(cue, "Falling");
        },
        GameEvent::CollectiblePickedUp { collected } => {
            tracing::debug!(collected, cue, "Picked up a flower");
        },
        GameEvent::RunEnded {
            score,
            best_score,
            new_best,
        } => {
            tracing::info!(score, best_score, new_best, cue, "Game over");
        },
    }
}
