//! The session state aggregate.

use alloc::vec::Vec;

use crate::options::SessionOptions;
use crate::round::{BankrollSample, RoundResult, non_tie_rounds};
use crate::score::Side;

/// Progress of the pattern verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternProgress {
    /// Whether the pattern has been confirmed for this session.
    pub verified: bool,
    /// Consecutive confirmations so far.
    pub count: u32,
}

/// Tie-handling sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieState {
    /// No tie is pending.
    #[default]
    Normal,
    /// One or more consecutive ties have occurred.
    Pending {
        /// Number of consecutive ties (at least 1).
        consecutive: u32,
        /// Sequence number of the last decisive round before the ties.
        last_non_tie_round: Option<u32>,
    },
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    /// Ended by the user.
    Manual,
    /// Drawdown reached the configured loss limit.
    LossLimitReached,
}

/// Names of the state fields, used to report what a transition changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateField {
    /// `options`
    Options,
    /// `bankroll`
    Bankroll,
    /// `bet_amount`
    BetAmount,
    /// `consecutive_losses`
    ConsecutiveLosses,
    /// `loss_limit_amount`
    LossLimitAmount,
    /// `pattern`
    Pattern,
    /// `martingale_active`
    MartingaleActive,
    /// `ties`
    Ties,
    /// `paused`
    Paused,
    /// `ended`
    Ended,
    /// `suspend_betting`
    SuspendBetting,
    /// `active_bet`
    ActiveBet,
    /// `history`
    History,
    /// `bankroll_history`
    BankrollHistory,
}

/// All mutable fields of an advisory session.
///
/// Consumers receive clones of this record; every change goes through
/// [`Store::update`](crate::store::Store::update).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    /// Session configuration.
    pub options: SessionOptions,
    /// Current bankroll.
    pub bankroll: i64,
    /// Wager for the next suggestion.
    pub bet_amount: i64,
    /// Consecutive lost wagers.
    pub consecutive_losses: u32,
    /// Loss limit as an amount, derived from the options.
    pub loss_limit_amount: f64,
    /// Pattern verification progress.
    pub pattern: PatternProgress,
    /// Whether the wager has been doubled after a loss.
    pub martingale_active: bool,
    /// Tie sub-state.
    pub ties: TieState,
    /// Paused by the user or the risk monitor.
    pub paused: bool,
    /// Terminal; only a reset leaves this state.
    pub ended: bool,
    /// Why the session ended, if it has.
    pub end_reason: Option<EndReason>,
    /// Suggestions are withheld (ties pending or session ended).
    pub suspend_betting: bool,
    /// Outstanding suggestion awaiting the next decisive round.
    pub active_bet: Option<Side>,
    /// Every recorded round, oldest first.
    pub history: Vec<RoundResult>,
    /// Bankroll after each resolution, seeded with the initial bankroll.
    pub bankroll_history: Vec<BankrollSample>,
}

/// Values derived from the bankroll.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionMetrics {
    /// `initial_bankroll - bankroll`.
    pub current_loss: i64,
    /// Current loss in percent of the initial bankroll.
    pub loss_percentage: f64,
    /// Bankroll in percent of the initial bankroll.
    pub funds_ratio: f64,
    /// Whether the bankroll is at or above its initial value.
    pub is_profit: bool,
    /// `bankroll - initial_bankroll`.
    pub profit_loss: i64,
    /// Profit in percent of the initial bankroll.
    pub profit_percent: f64,
}

/// Summary of the round history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameView {
    /// Rounds recorded, ties included.
    pub total_rounds: usize,
    /// Decisive rounds recorded.
    pub non_tie_rounds: usize,
    /// Most recent decisive round.
    pub last_non_tie_round: Option<RoundResult>,
    /// Whether a suggestion may currently be armed.
    pub can_make_bet: bool,
}

impl SessionState {
    /// Creates a fresh session.
    #[must_use]
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            bankroll: options.initial_bankroll,
            bet_amount: options.initial_bet_amount,
            consecutive_losses: 0,
            loss_limit_amount: options.loss_limit_amount(),
            pattern: PatternProgress::default(),
            martingale_active: false,
            ties: TieState::Normal,
            paused: false,
            ended: false,
            end_reason: None,
            suspend_betting: false,
            active_bet: None,
            history: Vec::new(),
            bankroll_history: alloc::vec![BankrollSample {
                round: 0,
                amount: options.initial_bankroll,
            }],
        }
    }

    /// Returns a fresh session with the same configuration.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::new(self.options)
    }

    /// Returns whether ties are pending.
    #[must_use]
    pub const fn tie_pending(&self) -> bool {
        matches!(self.ties, TieState::Pending { .. })
    }

    /// Returns the number of consecutive ties (0 when none are pending).
    #[must_use]
    pub const fn consecutive_ties(&self) -> u32 {
        match self.ties {
            TieState::Normal => 0,
            TieState::Pending { consecutive, .. } => consecutive,
        }
    }

    /// Returns the decisive round that preceded the pending ties.
    #[must_use]
    pub fn last_non_tie_round(&self) -> Option<&RoundResult> {
        let TieState::Pending {
            last_non_tie_round: Some(round),
            ..
        } = self.ties
        else {
            return None;
        };
        self.round(round)
    }

    /// Looks up a round by its sequence number.
    #[must_use]
    pub fn round(&self, round: u32) -> Option<&RoundResult> {
        let index = usize::try_from(round.checked_sub(1)?).ok()?;
        self.history.get(index).filter(|r| r.round == round)
    }

    /// Returns the most recent decisive round.
    #[must_use]
    pub fn latest_non_tie(&self) -> Option<&RoundResult> {
        non_tie_rounds(&self.history).next_back()
    }

    /// Sequence number for the next recorded round.
    #[must_use]
    pub fn next_round(&self) -> u32 {
        u32::try_from(self.history.len()).map_or(u32::MAX, |len| len.saturating_add(1))
    }

    /// Returns whether a suggestion may be armed right now.
    #[must_use]
    pub const fn can_make_bet(&self) -> bool {
        !self.ended && !self.paused && !self.suspend_betting
    }

    /// Recomputes the derived loss-limit amount from the options.
    pub fn refresh_loss_limit(&mut self) {
        self.loss_limit_amount = self.options.loss_limit_amount();
    }

    /// Computes values derived from the bankroll.
    #[must_use]
    pub fn metrics(&self) -> SessionMetrics {
        let initial = self.options.initial_bankroll;
        let current_loss = initial.saturating_sub(self.bankroll);
        let profit_loss = self.bankroll.saturating_sub(initial);

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for monetary values"
        )]
        let (loss_percentage, funds_ratio, profit_percent) = if initial > 0 {
            let initial = initial as f64;
            (
                current_loss as f64 / initial * 100.0,
                self.bankroll as f64 / initial * 100.0,
                profit_loss as f64 / initial * 100.0,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        SessionMetrics {
            current_loss,
            loss_percentage,
            funds_ratio,
            is_profit: self.bankroll >= initial,
            profit_loss,
            profit_percent,
        }
    }

    /// Summarizes the round history.
    #[must_use]
    pub fn game_view(&self) -> GameView {
        GameView {
            total_rounds: self.history.len(),
            non_tie_rounds: non_tie_rounds(&self.history).count(),
            last_non_tie_round: self.latest_non_tie().copied(),
            can_make_bet: self.can_make_bet(),
        }
    }

    /// Checks the structural invariants of the aggregate.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let ties_ok = match self.ties {
            TieState::Normal => true,
            TieState::Pending { consecutive, .. } => consecutive > 0 && self.suspend_betting,
        };
        let pattern_ok = self.pattern.count <= self.options.required_verifications;
        let bet_ok = self.active_bet.is_none() || (self.pattern.verified && !self.ended);
        let seeded = self.bankroll_history.first().map(|sample| sample.round) == Some(0);

        ties_ok && pattern_ok && bet_ok && seeded
    }

    /// Lists the fields that differ between two states.
    #[must_use]
    pub fn changed_fields(previous: &Self, next: &Self) -> Vec<StateField> {
        let mut fields = Vec::new();
        let mut mark = |changed: bool, field: StateField| {
            if changed {
                fields.push(field);
            }
        };

        mark(previous.options != next.options, StateField::Options);
        mark(previous.bankroll != next.bankroll, StateField::Bankroll);
        mark(previous.bet_amount != next.bet_amount, StateField::BetAmount);
        mark(
            previous.consecutive_losses != next.consecutive_losses,
            StateField::ConsecutiveLosses,
        );
        mark(
            previous.loss_limit_amount.to_bits() != next.loss_limit_amount.to_bits(),
            StateField::LossLimitAmount,
        );
        mark(previous.pattern != next.pattern, StateField::Pattern);
        mark(
            previous.martingale_active != next.martingale_active,
            StateField::MartingaleActive,
        );
        mark(previous.ties != next.ties, StateField::Ties);
        mark(previous.paused != next.paused, StateField::Paused);
        mark(
            previous.ended != next.ended || previous.end_reason != next.end_reason,
            StateField::Ended,
        );
        mark(
            previous.suspend_betting != next.suspend_betting,
            StateField::SuspendBetting,
        );
        mark(previous.active_bet != next.active_bet, StateField::ActiveBet);
        mark(previous.history != next.history, StateField::History);
        mark(
            previous.bankroll_history != next.bankroll_history,
            StateField::BankrollHistory,
        );

        fields
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
