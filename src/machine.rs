//! Slot machine controller
//!
//! Owns the simulation, the spin button and the win animation, and advances
//! them on a fixed timestep from whatever frame delta the host supplies.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameEvent, MachinePhase, MachineState, SpinOutcome, TickInput, tick};
use crate::ui::{AnimationStatus, Layout, SpinButton, SpinCommand, WinAnimation};

pub struct SlotMachine {
    pub state: MachineState,
    pub button: SpinButton,
    pub layout: Layout,
    /// Present while the win celebration plays
    pub win_animation: Option<WinAnimation>,
    /// Win animations started so far
    pub presentations: u32,
    /// Last resolved spin
    pub last_outcome: Option<SpinOutcome>,
    accumulator: f32,
    input: TickInput,
    events: Vec<GameEvent>,
}

impl SlotMachine {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let layout = Layout::new(&settings);
        let button = SpinButton::new(
            layout.button_center,
            layout.button_radius,
            settings.auto_stop_secs,
        );
        Self {
            state: MachineState::new(settings, seed),
            button,
            layout,
            win_animation: None,
            presentations: 0,
            last_outcome: None,
            accumulator: 0.0,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn phase(&self) -> MachinePhase {
        self.state.phase
    }

    /// Spin button activated (click, tap or key)
    pub fn press_spin(&mut self) -> Option<SpinCommand> {
        let command = self.button.press()?;
        self.queue(command);
        Some(command)
    }

    /// Pointer down at a stage position. Returns true if it hit the button.
    pub fn pointer_down(&mut self, point: Vec2) -> bool {
        if !self.button.contains(point) {
            return false;
        }
        self.press_spin();
        true
    }

    /// Keyboard input. Returns true if the key was handled.
    ///
    /// Auto-repeat is ignored so a held key cannot start and then
    /// immediately stop a spin.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        if repeat {
            return false;
        }
        match key {
            " " | "Enter" => {
                self.press_spin();
                true
            }
            // Debug: cycle the forced outcome
            "f" | "F" => {
                let settings = &mut self.state.settings;
                settings.forced_outcome = settings.forced_outcome.next();
                log::info!("Forced outcome: {}", settings.forced_outcome.as_str());
                settings.save();
                true
            }
            _ => false,
        }
    }

    fn queue(&mut self, command: SpinCommand) {
        match command {
            SpinCommand::Start => self.input.start = true,
            SpinCommand::Stop => self.input.stop = true,
        }
    }

    /// Run simulation steps for a frame delta (seconds)
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// One fixed simulation step
    pub fn step(&mut self) {
        if let Some(command) = self.button.update(SIM_DT) {
            self.queue(command);
        }

        // Clear one-shot inputs after processing
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, SIM_DT);

        let events = self.state.drain_events();
        if input.start && !events.iter().any(|e| matches!(e, GameEvent::SpinStarted { .. })) {
            log::warn!("Machine refused to start a spin, resetting button");
            self.button.reset();
        }
        for event in &events {
            self.handle_event(event);
        }
        self.events.extend(events);

        if let Some(animation) = self.win_animation.as_mut() {
            if animation.update(SIM_DT) == AnimationStatus::Finished {
                log::debug!("Win animation finished");
                self.win_animation = None;
            }
        }
    }

    fn handle_event(&mut self, event: &GameEvent) {
        if let GameEvent::SpinResolved(outcome) = event {
            if outcome.win {
                self.present_win();
            }
            self.last_outcome = Some(outcome.clone());
            self.button.release();
        }
    }

    fn present_win(&mut self) {
        let settings = &self.state.settings;
        let region = self.layout.reel_area().inset(settings.win_padding);
        self.win_animation = Some(WinAnimation::new(
            region,
            settings.win_frames,
            settings.win_fps,
        ));
        self.presentations += 1;
        log::info!("Playing win animation ({} frames)", settings.win_frames);
    }

    /// Take events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
