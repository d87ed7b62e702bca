//! Tie-handling sub-state.
//!
//! Consecutive ties suspend suggestions. The first decisive round afterwards
//! restores normal operation before the round is processed further.

use crate::state::{SessionState, TieState};

/// Records a tie, entering or extending the pending state.
pub fn enter_tie(state: &mut SessionState) {
    state.ties = match state.ties {
        TieState::Normal => TieState::Pending {
            consecutive: 1,
            last_non_tie_round: state.latest_non_tie().map(|round| round.round),
        },
        TieState::Pending {
            consecutive,
            last_non_tie_round,
        } => TieState::Pending {
            consecutive: consecutive.saturating_add(1),
            last_non_tie_round,
        },
    };
    state.suspend_betting = true;
}

/// Leaves the pending state on a decisive round.
///
/// Returns the number of ties that were pending. Suggestions stay suspended
/// if the session has ended.
pub fn settle_ties(state: &mut SessionState) -> u32 {
    let TieState::Pending { consecutive, .. } = state.ties else {
        return 0;
    };

    state.ties = TieState::Normal;
    state.suspend_betting = state.ended;
    consecutive
}
