//! Snapping settled reels onto the pay-line
//!
//! Friction leaves symbols at arbitrary offsets. Each reel gets one
//! correction that moves its nearest symbol's centre onto the line; the
//! correction plays out over a short linear tween, then every symbol is
//! re-derived from the anchor with exact pitch.

use serde::{Deserialize, Serialize};

use super::reel::{Reel, ReelGeometry};

/// Offset that moves a reel's nearest symbol onto the snap line.
///
/// Returns the anchor symbol index and the offset, or None for an empty reel.
pub fn correction(reel: &Reel, geometry: &ReelGeometry) -> Option<(usize, f32)> {
    let target = geometry.snap_line();
    let anchor = reel.nearest_to(target, geometry.symbol_size)?;
    let offset = target - reel.symbols[anchor].center(geometry.symbol_size);
    Some((anchor, offset))
}

/// Apply the correction at once. Returns the offset applied.
pub fn align_now(reel: &mut Reel, geometry: &ReelGeometry) -> f32 {
    match correction(reel, geometry) {
        Some((anchor, offset)) => {
            reel.shift(offset);
            respace_from(reel, anchor, geometry.pitch());
            offset
        }
        None => 0.0,
    }
}

/// Re-derive every symbol from the anchor, walking outward in both directions
fn respace_from(reel: &mut Reel, anchor: usize, pitch: f32) {
    let mut order: Vec<usize> = (0..reel.symbols.len()).collect();
    order.sort_by(|&a, &b| reel.symbols[a].y.total_cmp(&reel.symbols[b].y));

    let Some(rank) = order.iter().position(|&i| i == anchor) else {
        return;
    };
    let anchor_y = reel.symbols[anchor].y;

    for (j, &i) in order.iter().enumerate() {
        reel.symbols[i].y = anchor_y + (j as f32 - rank as f32) * pitch;
    }
}

/// In-flight correction tween for one reel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReelAlignment {
    pub reel: usize,
    anchor: usize,
    offset: f32,
    /// Positions when the tween started, one per symbol
    start: Vec<f32>,
    elapsed: f32,
    duration: f32,
    pub done: bool,
}

impl ReelAlignment {
    pub fn begin(reel: &Reel, geometry: &ReelGeometry, duration: f32) -> Self {
        let (anchor, offset) = correction(reel, geometry).unwrap_or((0, 0.0));
        Self {
            reel: reel.index,
            anchor,
            offset,
            start: reel.symbols.iter().map(|s| s.y).collect(),
            elapsed: 0.0,
            duration,
            done: reel.symbols.is_empty(),
        }
    }

    /// Tween progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Advance the tween. Returns true on the step that completes it.
    pub fn step(&mut self, reel: &mut Reel, dt: f32, pitch: f32) -> bool {
        if self.done {
            return false;
        }

        self.elapsed += dt;
        let t = self.progress();
        for (symbol, &from) in reel.symbols.iter_mut().zip(&self.start) {
            symbol.y = from + self.offset * t;
        }

        if t >= 1.0 {
            respace_from(reel, self.anchor, pitch);
            self.done = true;
            return true;
        }
        false
    }
}

/// Join point: fires once every reel has finished aligning, in any order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentBarrier {
    completed: Vec<bool>,
}

impl AlignmentBarrier {
    pub fn new(reels: usize) -> Self {
        Self {
            completed: vec![false; reels],
        }
    }

    /// Record a finished reel. Returns false if it was already recorded.
    pub fn arrive(&mut self, reel: usize) -> bool {
        match self.completed.get_mut(reel) {
            Some(done) if !*done => {
                *done = true;
                true
            }
            _ => false,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.iter().filter(|&&d| d).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed.iter().all(|&d| d)
    }
}

/// Alignment of all reels after they come to rest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    pub reels: Vec<ReelAlignment>,
    pub barrier: AlignmentBarrier,
}

impl Alignment {
    pub fn begin(reels: &[Reel], geometry: &ReelGeometry, duration: f32) -> Self {
        Self {
            reels: reels
                .iter()
                .map(|r| ReelAlignment::begin(r, geometry, duration))
                .collect(),
            barrier: AlignmentBarrier::new(reels.len()),
        }
    }

    /// Advance every tween by dt. Returns the reels that finished this step.
    pub fn step(&mut self, reels: &mut [Reel], dt: f32, pitch: f32) -> Vec<usize> {
        let mut finished = Vec::new();
        for tween in &mut self.reels {
            let Some(reel) = reels.get_mut(tween.reel) else {
                continue;
            };
            if tween.step(reel, dt, pitch) && self.barrier.arrive(tween.reel) {
                finished.push(tween.reel);
            }
        }
        // Empty reels have nothing to tween but still count
        for tween in &self.reels {
            if tween.done {
                self.barrier.arrive(tween.reel);
            }
        }
        finished
    }

    pub fn is_complete(&self) -> bool {
        self.barrier.is_complete()
    }
}
