use serde::{Deserialize, Serialize};

/// Horizontal steering resolved from the raw direction buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalInput {
    Left,
    Right,
    #[default]
    None,
}

impl HorizontalInput {
    /// -1 (left), 0, +1 (right).
    pub fn sign(self) -> f32 {
        match self {
            HorizontalInput::Left => -1.0,
            HorizontalInput::Right => 1.0,
            HorizontalInput::None => 0.0,
        }
    }
}

/// Debounced direction buttons, sampled once per tick by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

impl InputState {
    pub const IDLE: InputState = InputState {
        left: false,
        right: false,
    };

    pub fn left() -> Self {
        Self {
            left: true,
            right: false,
        }
    }

    pub fn right() -> Self {
        Self {
            left: false,
            right: true,
        }
    }

    /// Left is checked before right, so holding both steers left.
    pub fn direction(&self) -> HorizontalInput {
        if self.left {
            HorizontalInput::Left
        } else if self.right {
            HorizontalInput::Right
        } else {
            HorizontalInput::None
        }
    }
}
