//! Pay-line evaluation

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, MachineState, SpinOutcome};
use super::symbol::SymbolKind;
use crate::settings::ForcedOutcome;

/// Winning combinations, one kind per reel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WinTable {
    pub combinations: Vec<Vec<SymbolKind>>,
}

impl WinTable {
    /// One "every reel shows the same kind" combination per distinct kind
    pub fn all_same(strip: &[SymbolKind], reels: usize) -> Self {
        let mut kinds: Vec<SymbolKind> = Vec::new();
        for &kind in strip {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Self {
            combinations: kinds.into_iter().map(|k| vec![k; reels]).collect(),
        }
    }

    /// A line wins only when every reel has a symbol and the tuple is listed
    pub fn is_winning(&self, line: &[Option<SymbolKind>]) -> bool {
        let Some(kinds) = line.iter().copied().collect::<Option<Vec<_>>>() else {
            return false;
        };
        self.combinations.iter().any(|c| *c == kinds)
    }
}

/// Evaluate the pay-line once per session.
///
/// Returns None when this session's result was already reported.
pub fn check_win(state: &mut MachineState) -> Option<SpinOutcome> {
    if state.session.result_logged {
        log::debug!(
            "Spin {} already resolved, ignoring evaluation",
            state.session.number
        );
        return None;
    }
    state.session.result_logged = true;

    let line = state.line_symbols();
    if line.iter().any(Option::is_none) {
        log::warn!("Pay-line undetermined: {:?}", line);
    }

    let computed = state.win_table.is_winning(&line);
    let forced_outcome = state.settings.forced_outcome;
    let win = forced_outcome.apply(computed);

    let outcome = SpinOutcome {
        session: state.session.number,
        win,
        line,
        forced: forced_outcome != ForcedOutcome::Off,
    };

    if win {
        log::info!("Win!");
    } else {
        log::info!("Lose.");
    }
    state.events.push(GameEvent::SpinResolved(outcome.clone()));

    Some(outcome)
}
