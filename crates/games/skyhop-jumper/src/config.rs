use serde::{Deserialize, Serialize};

use skyhop_core::storage::BEST_SCORE_KEY;

/// Downward acceleration (units/s^2).
pub const GRAVITY: f32 = 200.0;
/// Vertical velocity applied on every landing (negative is up).
pub const BOUNCE_VELOCITY: f32 = -300.0;
/// Horizontal speed while a direction is held.
pub const MOVE_SPEED: f32 = 400.0;
/// Terminal fall speed (units/s).
pub const MAX_FALL_SPEED: f32 = 900.0;
pub const PLAYER_WIDTH: f32 = 60.0;
pub const PLAYER_HEIGHT: f32 = 80.0;
/// Player spawn height at run start.
pub const PLAYER_SPAWN_Y: f32 = 320.0;

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;
pub const PLATFORM_COUNT: usize = 7;
/// Vertical distance between platforms at world creation.
pub const PLATFORM_SPACING: f32 = 100.0;
/// Platforms spawn at least this far from either screen edge.
pub const PLATFORM_X_INSET: f32 = 300.0;
pub const PLATFORM_WIDTH: f32 = 120.0;
pub const PLATFORM_HEIGHT: f32 = 28.0;
/// A platform this far below the top of the screen is recycled.
pub const RECYCLE_THRESHOLD: f32 = 700.0;
pub const RECYCLE_JITTER_MIN: f32 = 50.0;
pub const RECYCLE_JITTER_MAX: f32 = 80.0;
/// Falling this far below the lowest platform ends the run.
pub const FALL_MARGIN: f32 = 200.0;

pub const INITIAL_ATTACH_CHANCE: f64 = 0.3;
pub const RECYCLE_ATTACH_CHANCE: f64 = 0.5;
pub const COLLECTIBLE_WIDTH: f32 = 32.0;
pub const COLLECTIBLE_HEIGHT: f32 = 32.0;

/// Configurable player physics parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysicsConfig {
    pub gravity: f32,
    pub bounce_velocity: f32,
    pub move_speed: f32,
    pub max_fall_speed: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub spawn_y: f32,
}

impl Default for PlayerPhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            bounce_velocity: BOUNCE_VELOCITY,
            move_speed: MOVE_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            spawn_y: PLAYER_SPAWN_Y,
        }
    }
}

/// Screen and platform layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub platform_count: usize,
    pub platform_spacing: f32,
    pub platform_x_inset: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub recycle_threshold: f32,
    pub recycle_jitter_min: f32,
    pub recycle_jitter_max: f32,
    pub fall_margin: f32,
    /// Height of the band around screen center the player can move in
    /// before the camera scrolls. 0 keeps the player centered.
    pub camera_deadzone: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            platform_count: PLATFORM_COUNT,
            platform_spacing: PLATFORM_SPACING,
            platform_x_inset: PLATFORM_X_INSET,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            recycle_threshold: RECYCLE_THRESHOLD,
            recycle_jitter_min: RECYCLE_JITTER_MIN,
            recycle_jitter_max: RECYCLE_JITTER_MAX,
            fall_margin: FALL_MARGIN,
            camera_deadzone: 0.0,
        }
    }
}

/// Collectible placement odds and size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Chance a platform gets a collectible when the world is created.
    pub initial_attach_chance: f64,
    /// Chance a recycled platform gets a collectible.
    pub recycle_attach_chance: f64,
    pub collectible_width: f32,
    pub collectible_height: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_attach_chance: INITIAL_ATTACH_CHANCE,
            recycle_attach_chance: RECYCLE_ATTACH_CHANCE,
            collectible_width: COLLECTIBLE_WIDTH,
            collectible_height: COLLECTIBLE_HEIGHT,
        }
    }
}

/// Top-level jumper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JumperConfig {
    pub physics: PlayerPhysicsConfig,
    pub world: WorldConfig,
    pub spawn: SpawnConfig,
    pub tick_rate_hz: f32,
    /// Fixed RNG seed for reproducible worlds. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Storage key the best score is kept under.
    pub best_score_key: String,
}

impl Default for JumperConfig {
    fn default() -> Self {
        Self {
            physics: PlayerPhysicsConfig::default(),
            world: WorldConfig::default(),
            spawn: SpawnConfig::default(),
            tick_rate_hz: 60.0,
            seed: None,
            best_score_key: BEST_SCORE_KEY.to_string(),
        }
    }
}

/// A configuration value the simulation cannot run with.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The platform pool must hold at least one platform.
    EmptyPlatformPool,
    NonPositive { field: &'static str, value: f32 },
    NotFinite { field: &'static str, value: f32 },
    Probability { field: &'static str, value: f64 },
    JitterRange { min: f32, max: f32 },
    /// Landing must push the player up (negative velocity).
    BounceDirection { value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPlatformPool => write!(f, "world.platform_count must be at least 1"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be a positive number, got {value}")
            },
            Self::NotFinite { field, value } => write!(f, "{field} must be finite, got {value}"),
            Self::Probability { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            },
            Self::JitterRange { min, max } => write!(
                f,
                "recycle jitter range is invalid: min {min} must be >= 0 and <= max {max}"
            ),
            Self::BounceDirection { value } => write!(
                f,
                "physics.bounce_velocity must be negative (upward), got {value}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl JumperConfig {
    /// Load config from `SKYHOP_JUMPER_CONFIG` or `config/jumper.toml`.
    /// Falls back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SKYHOP_JUMPER_CONFIG")
            .unwrap_or_else(|_| "config/jumper.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded jumper configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    JumperConfig::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                JumperConfig::default()
            },
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check every value the simulation depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.platform_count == 0 {
            return Err(ConfigError::EmptyPlatformPool);
        }

        let positive = [
            ("physics.player_width", self.physics.player_width),
            ("physics.player_height", self.physics.player_height),
            ("physics.max_fall_speed", self.physics.max_fall_speed),
            ("world.screen_width", self.world.screen_width),
            ("world.screen_height", self.world.screen_height),
            ("world.platform_width", self.world.platform_width),
            ("world.platform_height", self.world.platform_height),
            ("spawn.collectible_width", self.spawn.collectible_width),
            ("spawn.collectible_height", self.spawn.collectible_height),
            ("tick_rate_hz", self.tick_rate_hz),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let finite = [
            ("physics.gravity", self.physics.gravity),
            ("physics.move_speed", self.physics.move_speed),
            ("physics.spawn_y", self.physics.spawn_y),
            ("world.platform_spacing", self.world.platform_spacing),
            ("world.platform_x_inset", self.world.platform_x_inset),
            ("world.recycle_threshold", self.world.recycle_threshold),
            ("world.fall_margin", self.world.fall_margin),
            ("world.camera_deadzone", self.world.camera_deadzone),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        if !(self.physics.bounce_velocity.is_finite() && self.physics.bounce_velocity < 0.0) {
            return Err(ConfigError::BounceDirection {
                value: self.physics.bounce_velocity,
            });
        }

        let (min, max) = (self.world.recycle_jitter_min, self.world.recycle_jitter_max);
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && min <= max) {
            return Err(ConfigError::JitterRange { min, max });
        }

        for (field, value) in [
            ("spawn.initial_attach_chance", self.spawn.initial_attach_chance),
            ("spawn.recycle_attach_chance", self.spawn.recycle_attach_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }

        Ok(())
    }
}
