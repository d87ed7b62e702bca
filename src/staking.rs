//! Suggestion engine and martingale bet resolution.

use crate::round::{BankrollSample, BetOutcome, BetResolution};
use crate::score::{DiffType, Side, Winner};
use crate::state::SessionState;

/// Why no wager is suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoBetReason {
    /// The session has ended.
    SessionEnded,
    /// The session is paused.
    Paused,
    /// Ties are pending.
    TieOccurred,
    /// No decisive round has been recorded.
    NoData,
}

/// The next recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suggestion {
    /// Do not wager.
    NoBet {
        /// Why no wager is suggested.
        reason: NoBetReason,
    },
    /// The pattern is still being verified.
    Verification {
        /// Confirmations so far.
        count: u32,
        /// Confirmations required.
        required: u32,
    },
    /// Back a side.
    Bet {
        /// Side to back.
        target: Side,
        /// Wager amount.
        amount: i64,
        /// Whether the wager was doubled after a loss.
        is_martingale: bool,
    },
}

impl Suggestion {
    /// Returns the side to back, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Side> {
        match self {
            Self::Bet { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Computes the next suggestion. The first matching rule wins.
#[must_use]
pub fn suggest(state: &SessionState) -> Suggestion {
    if state.ended {
        return Suggestion::NoBet {
            reason: NoBetReason::SessionEnded,
        };
    }
    if state.paused {
        return Suggestion::NoBet {
            reason: NoBetReason::Paused,
        };
    }
    if state.suspend_betting {
        return Suggestion::NoBet {
            reason: NoBetReason::TieOccurred,
        };
    }
    if !state.pattern.verified {
        return Suggestion::Verification {
            count: state.pattern.count,
            required: state.options.required_verifications,
        };
    }

    let Some(last) = state.latest_non_tie() else {
        return Suggestion::NoBet {
            reason: NoBetReason::NoData,
        };
    };
    let Some(last_winner) = last.winning_side() else {
        return Suggestion::NoBet {
            reason: NoBetReason::NoData,
        };
    };

    let target = match last.diff_type {
        DiffType::Even => last_winner.opposite(),
        DiffType::Odd => last_winner,
    };

    Suggestion::Bet {
        target,
        amount: state.bet_amount,
        is_martingale: state.martingale_active,
    }
}

/// Arms the current suggestion as the outstanding wager.
///
/// Only a verified, unsuspended, running session gets a wager.
///
/// Reads the state after the round has been recorded and verified, so the
/// round that completes verification arms a wager immediately, as does the
/// first decisive round after a run of ties.
pub fn arm(state: &mut SessionState) -> Option<Side> {
    if !state.pattern.verified || !state.can_make_bet() {
        return None;
    }

    let target = suggest(state).target()?;
    state.active_bet = Some(target);
    Some(target)
}

/// Settles the outstanding wager against a round winner.
///
/// Ties neither settle nor cancel the wager. The wager is cleared once
/// settled, so settling twice is a no-op returning `None`.
pub fn resolve(state: &mut SessionState, winner: Winner) -> Option<BetResolution> {
    let actual = winner.side()?;
    let side = state.active_bet.take()?;
    let amount = state.bet_amount;

    let outcome = if side == actual {
        state.bankroll = state.bankroll.saturating_add(amount);
        state.bet_amount = state.options.initial_bet_amount;
        state.consecutive_losses = 0;
        state.martingale_active = false;
        BetOutcome::Win
    } else {
        state.bankroll = state.bankroll.saturating_sub(amount);
        state.bet_amount = amount.saturating_mul(2);
        state.consecutive_losses = state.consecutive_losses.saturating_add(1);
        state.martingale_active = true;
        BetOutcome::Lose
    };

    let round = u32::try_from(state.bankroll_history.len()).unwrap_or(u32::MAX);
    state.bankroll_history.push(BankrollSample {
        round,
        amount: state.bankroll,
    });

    tracing::debug!(
        ?side,
        ?outcome,
        amount,
        bankroll = state.bankroll,
        next_bet = state.bet_amount,
        "bet resolved"
    );

    Some(BetResolution {
        side,
        outcome,
        amount,
        bankroll: state.bankroll,
    })
}
