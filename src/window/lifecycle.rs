// GlTutor
// copyright gl_tutor developers 2024～2025

use crate::error::AppError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Uninitialized,
    Created,
    Running,
    Closing,
    Destroyed,
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WindowState::Uninitialized => "uninitialized",
            WindowState::Created => "created",
            WindowState::Running => "running",
            WindowState::Closing => "closing",
            WindowState::Destroyed => "destroyed",
        };
        write!(f, "{}", s)
    }
}

/// Uninitialized -> Created -> Running -> Closing -> Destroyed.
/// A created window may also be closed without ever running.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: WindowState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn can_advance(&self, to: WindowState) -> bool {
        use WindowState::*;
        matches!(
            (self.state, to),
            (Uninitialized, Created)
                | (Created, Running)
                | (Created, Closing)
                | (Running, Closing)
                | (Closing, Destroyed)
        )
    }

    /// `action` names the operation in the error message
    pub fn advance(&mut self, action: &'static str, to: WindowState) -> Result<(), AppError> {
        if !self.can_advance(to) {
            return Err(AppError::InvalidState {
                action,
                state: self.state.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }
}
