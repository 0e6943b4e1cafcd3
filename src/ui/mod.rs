//! Interactive and decorative elements around the reels

pub mod layout;
pub mod spin_button;
pub mod win_animation;

pub use layout::{Layout, Rect};
pub use spin_button::{ButtonState, Glyph, SpinButton, SpinCommand};
pub use win_animation::{AnimationStatus, WinAnimation};
