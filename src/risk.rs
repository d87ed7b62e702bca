//! Risk governor: loss-limit enforcement, advisory risk scoring, and
//! validation of configuration input.

use alloc::vec::Vec;

use crate::error::ConfigError;
use crate::options::{Currency, SessionOptions};
use crate::state::{EndReason, SessionState};

/// Default number of losses tabulated by [`martingale_exposure`].
pub const DEFAULT_EXPOSURE_STEPS: u32 = 10;

/// Drawdown relative to the loss limit, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    /// Below half of the limit.
    Safe,
    /// At least half of the limit.
    Medium,
    /// At least three quarters of the limit.
    High,
}

/// Band of the composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskBand {
    /// Score below 40.
    Low,
    /// Score of 40 or more.
    Medium,
    /// Score of 60 or more.
    High,
    /// Score of 80 or more; pauses the session.
    Critical,
}

/// Advisory warnings raised by the risk monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskWarning {
    /// Drawdown is above 80% of the loss limit.
    NearLossLimit,
    /// Five or more wagers lost in a row.
    LosingStreak,
    /// Bankroll is below half of its initial value.
    BankrollBelowHalf,
    /// Next wager is above 20% of the bankroll.
    BetAboveFifthOfBankroll,
}

/// Warning attached to an accepted bet amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BetWarning {
    /// The bet is above 10% of the bankroll.
    HighStake,
}

/// Inputs of the composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSignals {
    /// Current loss in percent of the initial bankroll.
    pub loss_percentage: f64,
    /// Consecutive lost wagers.
    pub consecutive_losses: u32,
    /// Bankroll in percent of the initial bankroll.
    pub funds_ratio: f64,
    /// Whether the wager is currently doubled.
    pub martingale_active: bool,
}

/// Output of the advisory risk monitor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskAssessment {
    /// Inputs that produced the score.
    pub signals: RiskSignals,
    /// Raised warnings.
    pub warnings: Vec<RiskWarning>,
    /// Weighted score.
    pub score: f64,
    /// Band of the score.
    pub band: RiskBand,
}

/// Risk figures for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskSnapshot {
    /// Bankroll in percent of the initial bankroll.
    pub funds_ratio: f64,
    /// Current loss in percent of the initial bankroll.
    pub loss_percentage: f64,
    /// Drawdown relative to the loss limit.
    pub risk_level: RiskLevel,
    /// Raised warnings.
    pub warnings: Vec<RiskWarning>,
}

/// One step of a losing martingale run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureStep {
    /// Loss number, starting at 1.
    pub round: u32,
    /// Wager at this step.
    pub bet_amount: i64,
    /// Cumulative loss including this step.
    pub total_loss: i64,
    /// Bankroll left after this step.
    pub remaining_funds: i64,
    /// Cumulative loss in percent of the bankroll.
    pub risk_percentage: f64,
}

/// Worst case of a martingale run from a given base wager.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MartingaleExposure {
    /// Consecutive losses tabulated before the bankroll is exhausted.
    pub max_consecutive_losses: u32,
    /// Cumulative loss over those steps.
    pub total_risk_amount: i64,
    /// Cumulative loss in percent of the bankroll.
    pub risk_percentage: f64,
    /// Per-step detail.
    pub breakdown: Vec<ExposureStep>,
}

/// Classifies a drawdown against the loss limit.
#[must_use]
pub fn risk_level(loss_percentage: f64, loss_limit_percentage: f64) -> RiskLevel {
    if loss_percentage >= loss_limit_percentage * 0.75 {
        RiskLevel::High
    } else if loss_percentage >= loss_limit_percentage * 0.5 {
        RiskLevel::Medium
    } else {
        RiskLevel::Safe
    }
}

/// Ends the session, withdrawing any outstanding wager.
///
/// Returns `false` if the session had already ended.
pub fn end_session(state: &mut SessionState, reason: EndReason) -> bool {
    if state.ended {
        return false;
    }

    state.ended = true;
    state.end_reason = Some(reason);
    state.suspend_betting = true;
    state.active_bet = None;
    tracing::info!(
        ?reason,
        bankroll = state.bankroll,
        rounds = state.history.len(),
        "session ended"
    );
    true
}

/// Enforces the loss limit.
///
/// A limit of 0 disables the check. Returns `true` if this call ended the
/// session.
pub fn check_limits(state: &mut SessionState) -> bool {
    let limit = state.options.loss_limit_percentage;
    if limit <= 0.0 || state.ended {
        return false;
    }

    let loss_percentage = state.metrics().loss_percentage;
    if loss_percentage < limit {
        return false;
    }

    tracing::warn!(loss_percentage, limit, "loss limit reached");
    end_session(state, EndReason::LossLimitReached)
}

/// Collects the signals of the composite score.
#[must_use]
pub fn signals(state: &SessionState) -> RiskSignals {
    let metrics = state.metrics();
    RiskSignals {
        loss_percentage: metrics.loss_percentage,
        consecutive_losses: state.consecutive_losses,
        funds_ratio: metrics.funds_ratio,
        martingale_active: state.martingale_active,
    }
}

/// Weighted composite score and its band.
#[must_use]
pub fn overall_risk(signals: &RiskSignals) -> (f64, RiskBand) {
    let score = signals.loss_percentage.min(100.0) * 0.4
        + f64::from(signals.consecutive_losses) * 5.0
        + (100.0 - signals.funds_ratio).max(0.0) * 0.3
        + if signals.martingale_active { 20.0 } else { 0.0 };

    let band = if score >= 80.0 {
        RiskBand::Critical
    } else if score >= 60.0 {
        RiskBand::High
    } else if score >= 40.0 {
        RiskBand::Medium
    } else {
        RiskBand::Low
    };

    (score, band)
}

/// Lists the advisory warnings for the current state.
#[must_use]
pub fn warnings(state: &SessionState) -> Vec<RiskWarning> {
    let metrics = state.metrics();
    let mut warnings = Vec::new();

    if metrics.loss_percentage > state.options.loss_limit_percentage * 0.8 {
        warnings.push(RiskWarning::NearLossLimit);
    }
    if state.consecutive_losses >= 5 {
        warnings.push(RiskWarning::LosingStreak);
    }
    if metrics.funds_ratio < 50.0 {
        warnings.push(RiskWarning::BankrollBelowHalf);
    }
    // bet > bankroll / 5, kept in integers
    if state.bet_amount.saturating_mul(5) > state.bankroll {
        warnings.push(RiskWarning::BetAboveFifthOfBankroll);
    }

    warnings
}

/// Runs the advisory monitor.
#[must_use]
pub fn assess(state: &SessionState) -> RiskAssessment {
    let signals = signals(state);
    let (score, band) = overall_risk(&signals);
    RiskAssessment {
        signals,
        warnings: warnings(state),
        score,
        band,
    }
}

/// Pauses the session when the composite score is critical.
///
/// Does nothing for an ended or paused session. Returns `true` if the
/// session was paused.
pub fn auto_risk_control(state: &mut SessionState) -> bool {
    if state.ended || state.paused {
        return false;
    }

    let assessment = assess(state);
    if assessment.band != RiskBand::Critical {
        return false;
    }

    state.paused = true;
    tracing::warn!(
        score = assessment.score,
        bankroll = state.bankroll,
        consecutive_losses = state.consecutive_losses,
        "critical risk, session paused"
    );
    true
}

/// Builds the display snapshot.
#[must_use]
pub fn snapshot(state: &SessionState) -> RiskSnapshot {
    let metrics = state.metrics();
    RiskSnapshot {
        funds_ratio: metrics.funds_ratio,
        loss_percentage: metrics.loss_percentage,
        risk_level: risk_level(metrics.loss_percentage, state.options.loss_limit_percentage),
        warnings: warnings(state),
    }
}

/// Validates an initial bankroll in the given currency.
///
/// # Errors
///
/// Returns an error if the amount is not positive or lies outside
/// [`Currency::min_funds`]..=[`Currency::max_funds`].
pub const fn validate_funds(amount: i64, currency: Currency) -> Result<(), ConfigError> {
    if amount <= 0 {
        return Err(ConfigError::NonPositiveFunds);
    }
    let minimum = currency.min_funds();
    if amount < minimum {
        return Err(ConfigError::FundsBelowMinimum { minimum });
    }
    let maximum = currency.max_funds();
    if amount > maximum {
        return Err(ConfigError::FundsAboveMaximum { maximum });
    }
    Ok(())
}

/// Validates a loss-limit percentage.
///
/// # Errors
///
/// Returns an error if the percentage lies outside 0..=100 or is not a number.
pub fn validate_loss_limit(percentage: f64) -> Result<(), ConfigError> {
    if (0.0..=100.0).contains(&percentage) {
        Ok(())
    } else {
        Err(ConfigError::LossLimitOutOfRange)
    }
}

/// Validates a bet amount against a bankroll.
///
/// An accepted bet above 10% of the bankroll carries a warning.
///
/// # Errors
///
/// Returns an error if the amount is not positive or exceeds the bankroll.
pub const fn validate_bet_amount(amount: i64, bankroll: i64) -> Result<Option<BetWarning>, ConfigError> {
    if amount <= 0 {
        return Err(ConfigError::NonPositiveBet);
    }
    if amount > bankroll {
        return Err(ConfigError::BetExceedsBankroll);
    }
    if amount.saturating_mul(10) > bankroll {
        return Ok(Some(BetWarning::HighStake));
    }
    Ok(None)
}

/// Validates a full set of session options.
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_options(options: &SessionOptions) -> Result<Option<BetWarning>, ConfigError> {
    validate_funds(options.initial_bankroll, options.currency)?;
    validate_loss_limit(options.loss_limit_percentage)?;
    if options.required_verifications == 0 {
        return Err(ConfigError::ZeroVerifications);
    }
    validate_bet_amount(options.initial_bet_amount, options.initial_bankroll)
}

/// Tabulates a run of consecutive losses starting from `initial_bet`.
///
/// Stops after `max_losses` steps or once the cumulative loss reaches the
/// bankroll, whichever comes first.
#[must_use]
pub fn martingale_exposure(initial_bet: i64, bankroll: i64, max_losses: u32) -> MartingaleExposure {
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    let percent_of_bankroll = |amount: i64| {
        if bankroll > 0 {
            amount as f64 / bankroll as f64 * 100.0
        } else {
            0.0
        }
    };

    let mut breakdown = Vec::new();
    let mut bet = initial_bet;
    let mut total_loss: i64 = 0;
    let mut round = 0;

    while round < max_losses && total_loss < bankroll {
        total_loss = total_loss.saturating_add(bet);
        round += 1;
        breakdown.push(ExposureStep {
            round,
            bet_amount: bet,
            total_loss,
            remaining_funds: bankroll.saturating_sub(total_loss),
            risk_percentage: percent_of_bankroll(total_loss),
        });
        bet = bet.saturating_mul(2);
    }

    MartingaleExposure {
        max_consecutive_losses: round,
        total_risk_amount: total_loss,
        risk_percentage: percent_of_bankroll(total_loss),
        breakdown,
    }
}
