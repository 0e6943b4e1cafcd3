//! Spin/stop toggle button
//!
//! `Idle --press--> Active --(timer | press)--> Settling --release--> Idle`
//!
//! The control never calls into the machine directly; `press` and `update`
//! hand back the command to run. Presses during `Settling` are ignored so a
//! new spin cannot start before the previous one has been evaluated.

use glam::Vec2;

/// What the machine should do in response to the control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinCommand {
    Start,
    Stop,
}

/// Icon drawn on the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonState {
    /// Ready for a spin
    Idle,
    /// Spin running; stops by itself when the timer runs out
    Active { remaining: f32 },
    /// Stop issued, waiting for the reels to settle
    Settling,
}

#[derive(Debug, Clone)]
pub struct SpinButton {
    pub state: ButtonState,
    pub auto_stop_secs: f32,
    pub center: Vec2,
    pub radius: f32,
}

impl SpinButton {
    pub fn new(center: Vec2, radius: f32, auto_stop_secs: f32) -> Self {
        Self {
            state: ButtonState::Idle,
            auto_stop_secs,
            center,
            radius,
        }
    }

    /// Pointer press on the button
    pub fn press(&mut self) -> Option<SpinCommand> {
        match self.state {
            ButtonState::Idle => {
                self.state = ButtonState::Active {
                    remaining: self.auto_stop_secs,
                };
                Some(SpinCommand::Start)
            }
            ButtonState::Active { .. } => {
                // Early stop also disarms the timer
                self.state = ButtonState::Settling;
                Some(SpinCommand::Stop)
            }
            ButtonState::Settling => {
                log::debug!("Spin button pressed while settling, ignored");
                None
            }
        }
    }

    /// Run the auto-stop timer
    pub fn update(&mut self, dt: f32) -> Option<SpinCommand> {
        let ButtonState::Active { remaining } = self.state else {
            return None;
        };

        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.state = ButtonState::Settling;
            log::debug!("Auto-stop timer expired");
            Some(SpinCommand::Stop)
        } else {
            self.state = ButtonState::Active { remaining };
            None
        }
    }

    /// The spin has been evaluated; accept presses again
    pub fn release(&mut self) {
        if self.state == ButtonState::Settling {
            self.state = ButtonState::Idle;
        }
    }

    /// Drop back to Idle without issuing a command (the machine refused the spin)
    pub fn reset(&mut self) {
        self.state = ButtonState::Idle;
    }

    pub fn glyph(&self) -> Glyph {
        match self.state {
            ButtonState::Active { .. } => Glyph::Pause,
            ButtonState::Idle | ButtonState::Settling => Glyph::Play,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.state != ButtonState::Settling
    }

    /// Hit test against the round button
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> SpinButton {
        SpinButton::new(Vec2::new(400.0, 500.0), 30.0, 2.5)
    }

    #[test]
    fn test_press_cycle() {
        let mut button = button();
        assert_eq!(button.glyph(), Glyph::Play);
        assert_eq!(button.press(), Some(SpinCommand::Start));
        assert_eq!(button.glyph(), Glyph::Pause);
        assert_eq!(button.press(), Some(SpinCommand::Stop));
        assert_eq!(button.glyph(), Glyph::Play);
        assert!(!button.is_interactive());

        // Rejected until the spin settles
        assert_eq!(button.press(), None);
        button.release();
        assert!(button.is_interactive());
        assert_eq!(button.press(), Some(SpinCommand::Start));
    }

    #[test]
    fn test_auto_stop_fires_once() {
        let mut button = button();
        button.press();
        assert_eq!(button.update(2.0), None);
        assert_eq!(button.update(0.6), Some(SpinCommand::Stop));
        assert_eq!(button.update(10.0), None);
        assert_eq!(button.state, ButtonState::Settling);
    }

    #[test]
    fn test_manual_stop_disarms_timer() {
        let mut button = button();
        button.press();
        button.update(1.0);
        assert_eq!(button.press(), Some(SpinCommand::Stop));
        // Timer would have expired here
        assert_eq!(button.update(5.0), None);
    }

    #[test]
    fn test_release_only_from_settling() {
        let mut button = button();
        button.press();
        button.release();
        assert!(matches!(button.state, ButtonState::Active { .. }));
    }

    #[test]
    fn test_hit_test() {
        let button = button();
        assert!(button.contains(Vec2::new(410.0, 510.0)));
        assert!(!button.contains(Vec2::new(440.0, 530.0)));
    }
}
