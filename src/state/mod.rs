//! Game state collaborator
//!
//! The joystick manager hands gameplay input to whatever implements
//! [`GameState`]. Button and axis meaning lives entirely on this side.

use tracing::{debug, info};

use crate::joystick::{ButtonDirection, BUTTON_HANDLED};

pub trait GameState {
    /// Handle a button from the current joystick. The returned code is
    /// relayed to the caller untouched.
    fn button(&mut self, button: u32, direction: ButtonDirection) -> i32;

    /// Handle an axis value from the current joystick.
    fn stick(&mut self, axis: u32, value: f32);
}

impl<T: GameState + ?Sized> GameState for Box<T> {
    fn button(&mut self, button: u32, direction: ButtonDirection) -> i32 {
        (**self).button(button, direction)
    }

    fn stick(&mut self, axis: u32, value: f32) {
        (**self).stick(axis, value)
    }
}

/// Collaborator that only reports what it receives.
#[derive(Debug, Default)]
pub struct TraceState {
    buttons: u64,
    sticks: u64,
}

impl TraceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons_seen(&self) -> u64 {
        self.buttons
    }

    pub fn sticks_seen(&self) -> u64 {
        self.sticks
    }
}

impl GameState for TraceState {
    fn button(&mut self, button: u32, direction: ButtonDirection) -> i32 {
        self.buttons += 1;
        info!("Button {} {:?}", button, direction);
        BUTTON_HANDLED
    }

    fn stick(&mut self, axis: u32, value: f32) {
        self.sticks += 1;
        debug!("Axis {} = {:.4}", axis, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_state_counts_and_reports_handled() {
        let mut state = TraceState::new();
        assert_eq!(state.button(0, ButtonDirection::Pressed), BUTTON_HANDLED);
        state.stick(1, -0.25);
        state.stick(1, 0.0);
        assert_eq!(state.buttons_seen(), 1);
        assert_eq!(state.sticks_seen(), 2);
    }

    #[test]
    fn boxed_state_delegates() {
        let mut state: Box<dyn GameState> = Box::new(TraceState::new());
        assert_eq!(state.button(3, ButtonDirection::Released), BUTTON_HANDLED);
        state.stick(0, 1.0);
    }
}
