use serde::{Deserialize, Serialize};

use skyhop_core::geometry::Aabb;
use skyhop_core::input::HorizontalInput;

use crate::config::PlayerPhysicsConfig;

/// Which way the player is currently heading, and which sprite shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Rising,
    Falling,
}

impl MotionState {
    /// Visual state name reported to the host.
    pub fn visual(self) -> &'static str {
        match self {
            MotionState::Rising => "rising",
            MotionState::Falling => "falling",
        }
    }

    /// Sprite the host should display for this state.
    pub fn texture_key(self) -> &'static str {
        match self {
            MotionState::Rising => "player-up",
            MotionState::Falling => "player-down",
        }
    }
}

/// State of the player sprite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub motion: MotionState,
    pub width: f32,
    pub height: f32,
    /// Bottom edge before the most recent integration step.
    pub prev_bottom: f32,
}

impl PlayerState {
    pub fn new(x: f32, y: f32, physics: &PlayerPhysicsConfig) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            motion: MotionState::Falling,
            width: physics.player_width,
            height: physics.player_height,
            prev_bottom: y + physics.player_height / 2.0,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }

    /// One arcade physics step: gravity, then motion.
    pub fn integrate(&mut self, dt: f32, physics: &PlayerPhysicsConfig) {
        self.prev_bottom = self.bottom();
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.vy = (self.vy + physics.gravity * dt).min(physics.max_fall_speed);
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// Bounce off a platform whose top surface is at `surface_y`.
    ///
    /// The new vertical velocity does not depend on the old one.
    pub fn on_landed(&mut self, surface_y: f32, bounce_velocity: f32) {
        self.y = surface_y - self.height / 2.0;
        self.vy = bounce_velocity;
        self.motion = MotionState::Rising;
    }

    /// Switch to falling once past the apex. Returns true only on the tick
    /// the state actually changes.
    pub fn on_falling_edge(&mut self) -> bool {
        if self.vy > 0.0 && self.motion != MotionState::Falling {
            self.motion = MotionState::Falling;
            true
        } else {
            false
        }
    }

    /// Set horizontal velocity from the held direction. Steering is ignored
    /// on the tick the player touches down.
    pub fn apply_horizontal_input(
        &mut self,
        direction: HorizontalInput,
        touching_down: bool,
        move_speed: f32,
    ) {
        self.vx = if touching_down {
            0.0
        } else {
            direction.sign() * move_speed
        };
    }

    /// Leave one side of the screen, come back on the other.
    pub fn wrap_horizontal(&mut self, screen_width: f32) {
        self.x = wrap_x(self.x, self.half_width(), screen_width);
    }
}

/// Toroidal horizontal wrap for a sprite of the given half width.
///
/// A sprite fully past one edge reappears just outside the other edge.
/// Positions inside `[-half_width, screen_width + half_width]` are unchanged.
pub fn wrap_x(x: f32, half_width: f32, screen_width: f32) -> f32 {
    if x < -half_width {
        screen_width + half_width
    } else if x > screen_width + half_width {
        -half_width
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PlayerPhysicsConfig {
        PlayerPhysicsConfig::default()
    }

    #[test]
    fn new_player_starts_falling() {
        let player = PlayerState::new(640.0, 320.0, &physics());
        assert_eq!(player.motion, MotionState::Falling);
        assert_eq!(player.motion.texture_key(), "player-down");
        assert_eq!(player.vx, 0.0);
        assert_eq!(player.vy, 0.0);
    }

    #[test]
    fn gravity_pulls_down() {
        let mut player = PlayerState::new(640.0, 320.0, &physics());
        let y_before = player.y;
        player.integrate(0.1, &physics());
        assert!(player.vy > 0.0, "Gravity should accelerate downward");
        assert!(player.y > y_before, "y grows downward");
        assert_eq!(player.prev_bottom, y_before + 40.0);
    }

    #[test]
    fn fall_speed_is_capped() {
        let mut player = PlayerState::new(0.0, 0.0, &physics());
        player.vy = 5000.0;
        player.integrate(0.1, &physics());
        assert_eq!(player.vy, physics().max_fall_speed);
    }

    #[test]
    fn non_finite_dt_only_records_bottom() {
        let mut player = PlayerState::new(10.0, 20.0, &physics());
        player.vy = 50.0;
        player.y = 30.0;
        player.integrate(f32::NAN, &physics());
        assert_eq!(player.y, 30.0);
        assert_eq!(player.vy, 50.0);
        assert_eq!(player.prev_bottom, player.bottom());
    }

    #[test]
    fn landing_bounces_regardless_of_prior_velocity() {
        for prior in [-120.0, 0.0, 250.0, 900.0] {
            let mut player = PlayerState::new(100.0, 100.0, &physics());
            player.vy = prior;
            player.on_landed(300.0, -300.0);
            assert_eq!(player.vy, -300.0);
            assert_eq!(player.motion, MotionState::Rising);
            assert_eq!(player.motion.visual(), "rising");
            assert_eq!(player.bottom(), 300.0, "Feet snap to the platform top");
        }
    }

    #[test]
    fn falling_edge_fires_once() {
        let mut player = PlayerState::new(0.0, 0.0, &physics());
        player.on_landed(100.0, -300.0);
        assert!(!player.on_falling_edge(), "Still rising");

        player.vy = 0.0;
        assert!(!player.on_falling_edge(), "Apex itself is not falling");

        player.vy = 1.0;
        assert!(player.on_falling_edge());
        assert_eq!(player.motion, MotionState::Falling);
        assert!(!player.on_falling_edge(), "Already falling");
    }

    #[test]
    fn horizontal_input_sets_velocity() {
        let mut player = PlayerState::new(0.0, 0.0, &physics());
        player.apply_horizontal_input(HorizontalInput::Left, false, 400.0);
        assert_eq!(player.vx, -400.0);
        player.apply_horizontal_input(HorizontalInput::Right, false, 400.0);
        assert_eq!(player.vx, 400.0);
        player.apply_horizontal_input(HorizontalInput::None, false, 400.0);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn horizontal_input_ignored_while_touching_down() {
        let mut player = PlayerState::new(0.0, 0.0, &physics());
        player.vx = 400.0;
        player.apply_horizontal_input(HorizontalInput::Right, true, 400.0);
        assert_eq!(player.vx, 0.0);
    }

    #[test]
    fn wrap_right_edge_to_left() {
        let mut player = PlayerState::new(1311.0, 0.0, &physics());
        player.wrap_horizontal(1280.0);
        assert_eq!(player.x, -30.0);
    }

    #[test]
    fn wrap_left_edge_to_right() {
        let mut player = PlayerState::new(-31.0, 0.0, &physics());
        player.wrap_horizontal(1280.0);
        assert_eq!(player.x, 1310.0);
    }

    #[test]
    fn wrap_leaves_on_screen_positions() {
        assert_eq!(wrap_x(-30.0, 30.0, 1280.0), -30.0);
        assert_eq!(wrap_x(640.0, 30.0, 1280.0), 640.0);
        assert_eq!(wrap_x(1310.0, 30.0, 1280.0), 1310.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrap_is_total_and_idempotent(
                x in -10_000.0f32..10_000.0,
                half in 1.0f32..100.0,
                width in 100.0f32..4000.0,
            ) {
                let once = wrap_x(x, half, width);
                prop_assert!(once >= -half && once <= width + half);
                prop_assert_eq!(wrap_x(once, half, width), once);
            }

            #[test]
            fn landing_always_bounces(
                vy in -2000.0f32..2000.0,
                surface in -5000.0f32..5000.0,
            ) {
                let mut player = PlayerState::new(0.0, 0.0, &PlayerPhysicsConfig::default());
                player.vy = vy;
                player.on_landed(surface, -300.0);
                prop_assert_eq!(player.vy, -300.0);
                prop_assert_eq!(player.motion, MotionState::Rising);
            }
        }
    }
}
