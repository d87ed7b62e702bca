//! Pattern verification.
//!
//! The heuristic compares the two most recent decisive rounds. When the
//! earlier one had an even score difference the winner is expected to
//! alternate; when it was odd the winner is expected to repeat. Ties are
//! skipped entirely.

use crate::round::{RoundResult, non_tie_rounds};
use crate::score::DiffType;
use crate::state::SessionState;

/// Why a verification passed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerificationReason {
    /// Fewer than two decisive rounds are available.
    InsufficientData,
    /// Even difference followed by a different winner.
    EvenAlternationConfirmed,
    /// Even difference followed by the same winner.
    EvenAlternationFailed,
    /// Odd difference followed by the same winner.
    OddContinuationConfirmed,
    /// Odd difference followed by a different winner.
    OddContinuationFailed,
}

/// Result of checking the pattern against the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verification {
    /// Whether the latest decisive round matched the expectation.
    pub verified: bool,
    /// Which rule applied.
    pub reason: VerificationReason,
}

/// Checks the latest pair of decisive rounds against the parity rule.
///
/// # Example
///
/// ```
/// use bacrs::{RoundResult, VerificationReason, verify};
///
/// // Banker wins by 2 (even), then Player wins: alternation holds.
/// let history = [RoundResult::new(3, 5, 1), RoundResult::new(7, 1, 2)];
/// let verification = verify(&history);
/// assert!(verification.verified);
/// assert_eq!(verification.reason, VerificationReason::EvenAlternationConfirmed);
/// ```
#[must_use]
pub fn verify(history: &[RoundResult]) -> Verification {
    let mut decisive = non_tie_rounds(history).rev();
    let (Some(curr), Some(prev)) = (decisive.next(), decisive.next()) else {
        return Verification {
            verified: false,
            reason: VerificationReason::InsufficientData,
        };
    };

    let same_winner = prev.winner == curr.winner;
    let (verified, reason) = match prev.diff_type {
        DiffType::Even if !same_winner => (true, VerificationReason::EvenAlternationConfirmed),
        DiffType::Even => (false, VerificationReason::EvenAlternationFailed),
        DiffType::Odd if same_winner => (true, VerificationReason::OddContinuationConfirmed),
        DiffType::Odd => (false, VerificationReason::OddContinuationFailed),
    };

    Verification { verified, reason }
}

/// Updates the confirmation streak after a decisive round was recorded.
///
/// A success extends the streak and a failure resets it to zero. Reaching the
/// required count marks the pattern verified for the rest of the session;
/// once verified the streak is no longer updated.
pub fn record_verification(state: &mut SessionState) -> Option<Verification> {
    if state.pattern.verified {
        return None;
    }

    let verification = verify(&state.history);
    if verification.verified {
        let required = state.options.required_verifications;
        let count = state.pattern.count.saturating_add(1).min(required);
        state.pattern.count = count;
        if count >= required {
            state.pattern.verified = true;
            tracing::info!(
                count,
                required,
                round = state.history.len(),
                "pattern verified"
            );
        }
    } else {
        state.pattern.count = 0;
    }

    Some(verification)
}

/// Clamps the streak after the required count changed.
pub(crate) fn clamp_progress(state: &mut SessionState) {
    let required = state.options.required_verifications;
    if !state.pattern.verified && state.pattern.count >= required {
        state.pattern.count = required;
        state.pattern.verified = true;
    }
}
