//! Stage layout: where reels, pay-line and the spin button sit

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;

/// Axis-aligned rectangle in stage coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shrink by `amount` on every side, never past the centre
    pub fn inset(&self, amount: f32) -> Self {
        let half = self.size() * 0.5;
        let d = Vec2::splat(amount).min(half);
        Self::new(self.min + d, self.max - d)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Positions derived from the settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Stage size the renderer fits to the canvas
    pub view_size: Vec2,
    /// Top-left corner of the first reel's window
    pub reels_origin: Vec2,
    pub reel_gap: f32,
    pub symbol_size: f32,
    pub reel_height: f32,
    pub reel_count: usize,
    /// Pay-line, in reel coordinates
    pub pay_line: f32,
    pub button_center: Vec2,
    pub button_radius: f32,
}

impl Layout {
    pub fn new(settings: &Settings) -> Self {
        let reels_width = settings.reels_width();
        let reel_height = settings.reel_height();

        let width = STAGE_WIDTH.max(reels_width + 2.0 * STAGE_MARGIN);
        let reels_origin = Vec2::new((width - reels_width) / 2.0, STAGE_MARGIN);

        let button_radius = BUTTON_SIZE / 2.0;
        let button_center = Vec2::new(
            width / 2.0,
            reels_origin.y + reel_height + BUTTON_MARGIN + button_radius,
        );
        let height = STAGE_HEIGHT.max(button_center.y + button_radius + BUTTON_MARGIN);

        Self {
            view_size: Vec2::new(width, height),
            reels_origin,
            reel_gap: settings.reel_gap,
            symbol_size: settings.symbol_size,
            reel_height,
            reel_count: settings.reel_count as usize,
            pay_line: settings.pay_line_y(),
            button_center,
            button_radius,
        }
    }

    /// Convert a reel-local position to stage coordinates
    pub fn to_stage(&self, reel: usize, local_y: f32) -> Vec2 {
        Vec2::new(
            self.reels_origin.x + reel as f32 * self.reel_gap,
            self.reels_origin.y + local_y,
        )
    }

    /// Visible window of one reel
    pub fn reel_window(&self, reel: usize) -> Rect {
        let min = self.to_stage(reel, 0.0);
        Rect::new(min, min + Vec2::new(self.symbol_size, self.reel_height))
    }

    /// Bounding box of every reel window
    pub fn reel_area(&self) -> Rect {
        let last = self.reel_count.saturating_sub(1);
        Rect::new(self.reel_window(0).min, self.reel_window(last).max)
    }

    /// Pay-line y in stage coordinates
    pub fn pay_line_stage(&self) -> f32 {
        self.reels_origin.y + self.pay_line
    }
}
