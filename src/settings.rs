//! Machine tunables
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{SymbolKind, default_strip};

/// Debug override for the evaluated result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ForcedOutcome {
    #[default]
    Off,
    Win,
    Lose,
}

impl ForcedOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForcedOutcome::Off => "Off",
            ForcedOutcome::Win => "Win",
            ForcedOutcome::Lose => "Lose",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(ForcedOutcome::Off),
            "win" => Some(ForcedOutcome::Win),
            "lose" | "loss" => Some(ForcedOutcome::Lose),
            _ => None,
        }
    }

    /// Next mode in the debug toggle cycle
    pub fn next(&self) -> Self {
        match self {
            ForcedOutcome::Off => ForcedOutcome::Win,
            ForcedOutcome::Win => ForcedOutcome::Lose,
            ForcedOutcome::Lose => ForcedOutcome::Off,
        }
    }

    /// Apply the override to a computed result
    pub fn apply(&self, computed: bool) -> bool {
        match self {
            ForcedOutcome::Off => computed,
            ForcedOutcome::Win => true,
            ForcedOutcome::Lose => false,
        }
    }
}

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} range is inverted or negative: [{min}, {max}]")]
    InvalidRange { name: &'static str, min: f32, max: f32 },
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("reel strip is empty")]
    EmptyStrip,
    #[error("machine needs at least one reel")]
    NoReels,
    #[error("symbol_spacing must not be negative: {0}")]
    NegativeSpacing(f32),
    #[error("align_offset {offset} moves symbols off the pay-line (limit {limit})")]
    AlignOffsetTooLarge { offset: f32, limit: f32 },
}

/// Slot machine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Layout ===
    /// Symbol sprite edge length
    pub symbol_size: f32,
    /// Vertical gap between symbols
    pub symbol_spacing: f32,
    /// Symbols visible in the reel window
    pub visible_symbols: u32,
    /// Number of reels
    pub reel_count: u32,
    /// Horizontal distance between reel origins
    pub reel_gap: f32,
    /// Symbols on every reel, top to bottom
    pub strip: Vec<SymbolKind>,

    // === Physics ===
    /// Spin speed drawn per reel per spin (units/frame)
    pub spin_speed_range: [f32; 2],
    /// Deceleration drawn per reel per spin (units/frame²)
    pub deceleration_range: [f32; 2],
    /// Seconds until the spin control stops the reels by itself
    pub auto_stop_secs: f32,

    // === Alignment ===
    /// Seconds the snap-to-line correction takes (0 snaps instantly)
    pub align_duration_secs: f32,
    /// Pay-line position in reel coordinates (None = middle of the window)
    pub pay_line: Option<f32>,
    /// Visual offset added to the pay-line when snapping
    pub align_offset: f32,

    // === Presentation ===
    /// Inset of the win animation from the reel area edges
    pub win_padding: f32,
    /// Frames in the win animation
    pub win_frames: u32,
    /// Win animation playback rate
    pub win_fps: f32,

    // === Debug ===
    /// Override the evaluated result
    pub forced_outcome: ForcedOutcome,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbol_size: 225.0,
            symbol_spacing: 20.0,
            visible_symbols: 3,
            reel_count: 3,
            reel_gap: 260.0,
            strip: default_strip(),

            spin_speed_range: [40.0, 80.0],
            deceleration_range: [0.05, 0.2],
            auto_stop_secs: 2.5,

            align_duration_secs: 0.5,
            pay_line: None,
            align_offset: 0.0,

            win_padding: 40.0,
            win_frames: 24,
            win_fps: 30.0,

            forced_outcome: ForcedOutcome::Off,
        }
    }
}

impl Settings {
    /// Distance between consecutive symbol tops
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.symbol_size + self.symbol_spacing
    }

    /// Height of the visible reel window
    pub fn reel_height(&self) -> f32 {
        let visible = self.visible_symbols as f32;
        self.symbol_size * visible + self.symbol_spacing * (visible - 1.0).max(0.0)
    }

    /// Width covered by all reels
    pub fn reels_width(&self) -> f32 {
        self.reel_gap * (self.reel_count.max(1) - 1) as f32 + self.symbol_size
    }

    /// Effective pay-line position
    pub fn pay_line_y(&self) -> f32 {
        self.pay_line.unwrap_or(self.reel_height() / 2.0)
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("symbol_size", self.symbol_size),
            ("win_fps", self.win_fps),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive(name));
            }
        }
        if self.symbol_spacing < 0.0 {
            return Err(SettingsError::NegativeSpacing(self.symbol_spacing));
        }
        // Evaluation only sees symbols centred within half a symbol of the line
        let limit = self.symbol_size / 2.0;
        if self.align_offset.abs() >= limit {
            return Err(SettingsError::AlignOffsetTooLarge {
                offset: self.align_offset,
                limit,
            });
        }
        if self.visible_symbols == 0 {
            return Err(SettingsError::NonPositive("visible_symbols"));
        }
        if self.win_frames == 0 {
            return Err(SettingsError::NonPositive("win_frames"));
        }
        if self.auto_stop_secs < 0.0 || self.align_duration_secs < 0.0 {
            return Err(SettingsError::NonPositive("timer duration"));
        }
        for (name, [min, max]) in [
            ("spin_speed", self.spin_speed_range),
            ("deceleration", self.deceleration_range),
        ] {
            if min < 0.0 || min > max {
                return Err(SettingsError::InvalidRange { name, min, max });
            }
        }
        if self.deceleration_range[0] == 0.0 {
            return Err(SettingsError::NonPositive("deceleration"));
        }
        if self.strip.is_empty() {
            return Err(SettingsError::EmptyStrip);
        }
        if self.reel_count == 0 {
            return Err(SettingsError::NoReels);
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "reel_spin_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
