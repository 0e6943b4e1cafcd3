//! Machine state and spin session types
//!
//! Everything the frame loop mutates lives in `MachineState`; nothing is
//! global.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::align::Alignment;
use super::evaluate::WinTable;
use super::reel::{Reel, ReelGeometry, ReelSettings};
use super::symbol::SymbolKind;
use crate::settings::Settings;

/// Where the frame loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachinePhase {
    /// Reels at rest, ready for a spin
    Idle,
    /// Reels moving (stop may or may not be requested yet)
    Spinning,
    /// Reels at rest, snapping onto the pay-line
    Aligning,
}

/// State scoped to one spin-to-settle cycle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinSession {
    /// Spins started so far (1-based id of the current session)
    pub number: u64,
    /// Reels are moving
    pub spinning: bool,
    /// Outcome already reported for this session
    pub result_logged: bool,
}

impl SpinSession {
    /// Reset for a new spin
    pub fn begin(&mut self) {
        self.number += 1;
        self.spinning = true;
        self.result_logged = false;
    }
}

/// Result of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub session: u64,
    pub win: bool,
    /// On-line symbol per reel (None when nothing sat within tolerance)
    pub line: Vec<Option<SymbolKind>>,
    /// Result came from the forced-outcome override
    pub forced: bool,
}

/// Notifications for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SpinStarted { session: u64 },
    StopRequested,
    ReelsStopped,
    ReelAligned { reel: usize },
    SpinResolved(SpinOutcome),
}

/// Complete machine state
#[derive(Debug, Clone)]
pub struct MachineState {
    /// Seed for per-spin reel speeds
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    pub geometry: ReelGeometry,
    /// Reels, left to right
    pub reels: Vec<Reel>,
    pub session: SpinSession,
    pub phase: MachinePhase,
    /// Present while phase is Aligning
    pub alignment: Option<Alignment>,
    pub win_table: WinTable,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
}

impl MachineState {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let geometry = ReelGeometry::from_settings(&settings);
        let strip_len = settings.strip.len() as u32;
        let reels = (0..settings.reel_count as usize)
            .map(|i| Reel::build(i, &settings.strip, 1 + i as u32 * strip_len, &geometry))
            .collect();
        let win_table = WinTable::all_same(&settings.strip, settings.reel_count as usize);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            geometry,
            reels,
            session: SpinSession::default(),
            phase: MachinePhase::Idle,
            alignment: None,
            win_table,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Draw speed and deceleration for one reel
    pub fn draw_reel_settings(&mut self) -> ReelSettings {
        let [speed_min, speed_max] = self.settings.spin_speed_range;
        let [decel_min, decel_max] = self.settings.deceleration_range;
        ReelSettings {
            spin_speed: self.rng.random_range(speed_min..=speed_max),
            deceleration: self.rng.random_range(decel_min..=decel_max),
        }
    }

    /// On-line symbol per reel
    pub fn line_symbols(&self) -> Vec<Option<SymbolKind>> {
        self.reels
            .iter()
            .map(|r| {
                r.symbol_on_line(self.geometry.pay_line, self.geometry.symbol_size)
                    .map(|s| s.kind)
            })
            .collect()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn all_reels_stopped(&self) -> bool {
        self.reels.iter().all(Reel::is_stopped)
    }
}
