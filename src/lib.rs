//! Reel Spin - A three-reel slot machine mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (reel physics, alignment, evaluation)
//! - `ui`: Spin button, win animation, stage layout
//! - `machine`: Controller tying the simulation to the controls
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Data-driven machine tuning

pub mod machine;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use machine::SlotMachine;
pub use settings::{ForcedOutcome, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate reel speeds are tuned for)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frames per second that reel velocities are expressed in
    pub const FRAME_RATE: f32 = 60.0;
    /// Longest frame delta accepted before clamping (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Minimum stage dimensions
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;
    /// Gap between the stage edge and the reels
    pub const STAGE_MARGIN: f32 = 20.0;

    /// Spin button diameter
    pub const BUTTON_SIZE: f32 = 60.0;
    /// Gap above and below the spin button
    pub const BUTTON_MARGIN: f32 = 20.0;
}
