//! Symbol identities and the sprites that carry them

use serde::{Deserialize, Serialize};

/// Which picture a symbol shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    High1,
    High2,
    High3,
    High4,
    Wild,
    Low1,
    Low2,
    Low3,
    Low4,
}

impl SymbolKind {
    /// Every kind, in default strip order
    pub const ALL: [SymbolKind; 9] = [
        SymbolKind::High1,
        SymbolKind::High2,
        SymbolKind::High3,
        SymbolKind::High4,
        SymbolKind::Wild,
        SymbolKind::Low1,
        SymbolKind::Low2,
        SymbolKind::Low3,
        SymbolKind::Low4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::High1 => "High1",
            SymbolKind::High2 => "High2",
            SymbolKind::High3 => "High3",
            SymbolKind::High4 => "High4",
            SymbolKind::Wild => "Wild",
            SymbolKind::Low1 => "Low1",
            SymbolKind::Low2 => "Low2",
            SymbolKind::Low3 => "Low3",
            SymbolKind::Low4 => "Low4",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim_end_matches(".png")))
    }

    /// Texture key in the asset manifest
    pub fn texture_name(&self) -> String {
        format!("{}.png", self.as_str())
    }

    /// Swatch colour used when no texture atlas is loaded
    pub fn color(&self) -> [f32; 4] {
        match self {
            SymbolKind::High1 => [0.91, 0.30, 0.24, 1.0],
            SymbolKind::High2 => [0.95, 0.61, 0.07, 1.0],
            SymbolKind::High3 => [0.95, 0.77, 0.06, 1.0],
            SymbolKind::High4 => [0.61, 0.35, 0.71, 1.0],
            SymbolKind::Wild => [1.0, 1.0, 1.0, 1.0],
            SymbolKind::Low1 => [0.20, 0.60, 0.86, 1.0],
            SymbolKind::Low2 => [0.18, 0.80, 0.44, 1.0],
            SymbolKind::Low3 => [0.10, 0.74, 0.61, 1.0],
            SymbolKind::Low4 => [0.58, 0.65, 0.65, 1.0],
        }
    }
}

/// The default strip every reel is built from
pub fn default_strip() -> Vec<SymbolKind> {
    SymbolKind::ALL.to_vec()
}

/// A symbol sprite on a reel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub id: u32,
    pub kind: SymbolKind,
    /// Top edge, in reel-local coordinates (y grows downward)
    pub y: f32,
    /// Vertical velocity in units per frame
    pub vy: f32,
}

impl Symbol {
    pub fn new(id: u32, kind: SymbolKind, y: f32) -> Self {
        Self {
            id,
            kind,
            y,
            vy: 0.0,
        }
    }

    /// Vertical centre of the sprite
    #[inline]
    pub fn center(&self, symbol_size: f32) -> f32 {
        self.y + symbol_size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_names_round_trip() {
        for kind in SymbolKind::ALL {
            assert_eq!(SymbolKind::from_str(&kind.texture_name()), Some(kind));
        }
        assert_eq!(SymbolKind::from_str("wild"), Some(SymbolKind::Wild));
        assert_eq!(SymbolKind::from_str("Bonus"), None);
    }

    #[test]
    fn test_center() {
        let symbol = Symbol::new(1, SymbolKind::Low2, 100.0);
        assert_eq!(symbol.center(50.0), 125.0);
    }
}
