//! One-shot celebration played over the reels after a win

use super::layout::Rect;

/// Playback status after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Playing,
    Finished,
}

/// Non-looping frame sequence
#[derive(Debug, Clone)]
pub struct WinAnimation {
    /// Area the animation covers
    pub region: Rect,
    frames: u32,
    frame_duration: f32,
    elapsed: f32,
}

impl WinAnimation {
    pub fn new(region: Rect, frames: u32, fps: f32) -> Self {
        Self {
            region,
            frames: frames.max(1),
            frame_duration: 1.0 / fps.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Total playback time in seconds
    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_duration
    }

    /// Index of the frame on screen
    pub fn frame(&self) -> u32 {
        ((self.elapsed / self.frame_duration) as u32).min(self.frames - 1)
    }

    pub fn frame_count(&self) -> u32 {
        self.frames
    }

    /// Playback progress in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    pub fn update(&mut self, dt: f32) -> AnimationStatus {
        self.elapsed += dt;
        if self.is_finished() {
            AnimationStatus::Finished
        } else {
            AnimationStatus::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_plays_every_frame_then_finishes() {
        let region = Rect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut anim = WinAnimation::new(region, 4, 10.0);
        assert_eq!(anim.frame(), 0);
        assert_eq!(anim.update(0.15), AnimationStatus::Playing);
        assert_eq!(anim.frame(), 1);
        assert_eq!(anim.update(0.2), AnimationStatus::Playing);
        assert_eq!(anim.frame(), 3);
        assert_eq!(anim.update(0.1), AnimationStatus::Finished);
        // Holds the last frame rather than wrapping
        assert_eq!(anim.frame(), 3);
        assert_eq!(anim.progress(), 1.0);
    }
}
