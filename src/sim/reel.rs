//! Reel strips and their per-frame physics
//!
//! A reel is a column of symbols spaced one pitch apart. Spinning moves every
//! symbol down; symbols that fall out of the window are moved above the
//! topmost one so the strip loops forever.

use serde::{Deserialize, Serialize};

use super::symbol::{Symbol, SymbolKind};
use crate::settings::Settings;

/// Fixed reel dimensions shared by physics, alignment and evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelGeometry {
    pub symbol_size: f32,
    pub symbol_spacing: f32,
    /// Symbols whose top passes this are wrapped to the top of the strip
    pub reel_height: f32,
    /// Pay-line position in reel coordinates
    pub pay_line: f32,
    /// Visual offset added to the pay-line when snapping
    pub align_offset: f32,
}

impl ReelGeometry {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            symbol_size: settings.symbol_size,
            symbol_spacing: settings.symbol_spacing,
            reel_height: settings.reel_height(),
            pay_line: settings.pay_line_y(),
            align_offset: settings.align_offset,
        }
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.symbol_size + self.symbol_spacing
    }

    /// Where symbol centres are snapped to
    #[inline]
    pub fn snap_line(&self) -> f32 {
        self.pay_line + self.align_offset
    }
}

/// Motion parameters drawn for a reel at the start of each spin
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReelSettings {
    /// Initial velocity (units/frame)
    pub spin_speed: f32,
    /// Velocity lost per frame
    pub deceleration: f32,
}

/// One reel of the machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reel {
    pub index: usize,
    pub symbols: Vec<Symbol>,
    pub settings: ReelSettings,
    /// Set by a stop request, cleared when a spin starts
    pub stop_requested: bool,
    /// Recorded target for the stop (informational, deceleration does the stopping)
    pub stop_position: f32,
}

impl Reel {
    /// Build a reel from a strip, top to bottom, starting at the window top
    pub fn build(index: usize, strip: &[SymbolKind], first_id: u32, geometry: &ReelGeometry) -> Self {
        let pitch = geometry.pitch();
        let symbols = strip
            .iter()
            .enumerate()
            .map(|(i, &kind)| Symbol::new(first_id + i as u32, kind, i as f32 * pitch))
            .collect();

        let mut reel = Self {
            index,
            symbols,
            settings: ReelSettings::default(),
            stop_requested: false,
            stop_position: 0.0,
        };
        // Symbols below the window loop around above it
        reel.wrap_overflow(geometry);
        reel
    }

    /// Give every symbol the reel's spin speed and clear the stop flag
    pub fn start(&mut self, settings: ReelSettings) {
        self.settings = settings;
        self.stop_requested = false;
        for symbol in &mut self.symbols {
            symbol.vy = settings.spin_speed;
        }
    }

    /// Mark the reel for stopping. Returns false if it already was.
    pub fn request_stop(&mut self, geometry: &ReelGeometry) -> bool {
        if self.stop_requested {
            return false;
        }
        self.stop_requested = true;
        self.stop_position = geometry.reel_height * 2.0;
        true
    }

    /// Advance one frame: move, wrap, decelerate
    pub fn integrate(&mut self, delta: f32, geometry: &ReelGeometry) {
        for symbol in &mut self.symbols {
            symbol.y += symbol.vy * delta;
        }

        self.wrap_overflow(geometry);

        let decay = self.settings.deceleration * delta;
        for symbol in &mut self.symbols {
            symbol.vy = (symbol.vy - decay).max(0.0);
        }
    }

    /// Move every symbol past the window bottom above the topmost symbol.
    ///
    /// Bottom-most symbols go first so each lands one pitch above the
    /// previous one. Returns how many symbols were moved.
    pub fn wrap_overflow(&mut self, geometry: &ReelGeometry) -> usize {
        let mut overflowing: Vec<usize> = (0..self.symbols.len())
            .filter(|&i| self.symbols[i].y > geometry.reel_height)
            .collect();
        overflowing.sort_by(|&a, &b| self.symbols[b].y.total_cmp(&self.symbols[a].y));

        for &i in &overflowing {
            let top = self.top_y().unwrap_or(0.0);
            self.symbols[i].y = top - geometry.symbol_size - geometry.symbol_spacing;
        }

        overflowing.len()
    }

    /// Position of the topmost symbol
    pub fn top_y(&self) -> Option<f32> {
        self.symbols.iter().map(|s| s.y).min_by(f32::total_cmp)
    }

    /// True while any symbol still has velocity
    pub fn is_moving(&self) -> bool {
        self.symbols.iter().any(|s| s.vy > 0.0)
    }

    /// Stop requested and every symbol at rest
    pub fn is_stopped(&self) -> bool {
        self.stop_requested && !self.is_moving()
    }

    /// Shift every symbol by the same amount
    pub fn shift(&mut self, dy: f32) {
        for symbol in &mut self.symbols {
            symbol.y += dy;
        }
    }

    /// Index of the symbol whose centre is nearest the given line
    pub fn nearest_to(&self, line: f32, symbol_size: f32) -> Option<usize> {
        self.symbols
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (line - a.center(symbol_size)).abs();
                let db = (line - b.center(symbol_size)).abs();
                da.total_cmp(&db)
            })
            .map(|(i, _)| i)
    }

    /// The symbol whose centre lies within half a symbol of the line
    pub fn symbol_on_line(&self, line: f32, symbol_size: f32) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|s| (line - s.center(symbol_size)).abs() < symbol_size / 2.0)
    }

    /// Symbols sorted top to bottom
    pub fn ordered(&self) -> Vec<&Symbol> {
        let mut ordered: Vec<&Symbol> = self.symbols.iter().collect();
        ordered.sort_by(|a, b| a.y.total_cmp(&b.y));
        ordered
    }
}
