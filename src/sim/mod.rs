//! Deterministic simulation module
//!
//! All reel logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod align;
pub mod evaluate;
pub mod reel;
pub mod state;
pub mod symbol;
pub mod tick;

pub use align::{Alignment, AlignmentBarrier, ReelAlignment, align_now, correction};
pub use evaluate::{WinTable, check_win};
pub use reel::{Reel, ReelGeometry, ReelSettings};
pub use state::{GameEvent, MachinePhase, MachineState, SpinOutcome, SpinSession};
pub use symbol::{Symbol, SymbolKind, default_strip};
pub use tick::{TickInput, start_spinning, stop_spinning, tick};
