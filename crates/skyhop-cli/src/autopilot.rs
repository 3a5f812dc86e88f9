use skyhop_core::input::InputState;
use skyhop_jumper::JumperState;
use skyhop_jumper::physics::MotionState;
use skyhop_jumper::platforms::Platform;

/// Horizontal distance inside which the autopilot stops steering.
const DEADBAND: f32 = 8.0;

/// Scripted input standing in for a human at the keyboard.
///
/// While rising it lines up under the next platform above its feet; while
/// falling it aims for the closest platform still below them.
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    deadband: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { deadband: DEADBAND }
    }
}

impl Autopilot {
    pub fn steer(&self, state: &JumperState) -> InputState {
        let Some(target) = self.target(state) else {
            return InputState::IDLE;
        };

        let dx = target.x - state.player.x;
        if dx.abs() <= self.deadband {
            InputState::IDLE
        } else if dx < 0.0 {
            InputState::left()
        } else {
            InputState::right()
        }
    }

    fn target<'a>(&self, state: &'a JumperState) -> Option<&'a Platform> {
        let feet = state.player.bottom();
        match state.player.motion {
            MotionState::Rising => state
                .platforms
                .iter()
                .filter(|p| p.top() < feet)
                .max_by(|a, b| a.y.total_cmp(&b.y)),
            MotionState::Falling => state
                .platforms
                .iter()
                .filter(|p| p.top() >= feet)
                .min_by(|a, b| a.y.total_cmp(&b.y)),
        }
    }
}
