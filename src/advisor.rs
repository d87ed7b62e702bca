//! The advisory session façade.

use crate::error::{ConfigError, ControlError, PersistError, RoundError};
use crate::options::{Currency, SessionOptions};
use crate::pattern::{self, Verification};
use crate::persist::SettingsStore;
use crate::risk::{self, BetWarning, MartingaleExposure, RiskAssessment, RiskSnapshot};
use crate::round::{BetResolution, RoundResult};
use crate::staking::{self, Suggestion};
use crate::state::{EndReason, SessionState, StateField};
use crate::store::{ListenerId, Store};
use crate::ties;

/// Everything a caller needs after submitting a round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoundReport {
    /// The recorded round.
    pub round: RoundResult,
    /// Settlement of the previous suggestion, if one was outstanding.
    pub resolution: Option<BetResolution>,
    /// Pattern check for this round; `None` for ties and once verified.
    pub verification: Option<Verification>,
    /// Ties that were pending before this decisive round.
    pub ties_cleared: u32,
    /// Whether this round ended the session through the loss limit.
    pub loss_limit_reached: bool,
    /// Suggestion for the next round.
    pub suggestion: Suggestion,
    /// State after the round.
    pub state: SessionState,
}

/// A single-user baccarat advisory session.
///
/// All methods take `&self`; the session can be shared with a
/// [`RiskMonitor`](crate::RiskMonitor) through an `Arc`.
///
/// # Example
///
/// ```
/// use bacrs::{Advisor, SessionOptions, Suggestion};
///
/// let advisor = Advisor::new(SessionOptions::default()).unwrap();
/// let report = advisor.submit_round(7, 3).unwrap();
/// assert_eq!(report.round.round, 1);
/// assert!(matches!(advisor.suggestion(), Suggestion::Verification { .. }));
/// ```
#[derive(Default)]
pub struct Advisor {
    store: Store,
}

impl Advisor {
    /// Starts a session with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation.
    pub fn new(options: SessionOptions) -> Result<Self, ConfigError> {
        risk::validate_options(&options)?;
        tracing::info!(
            currency = options.currency.code(),
            initial_bankroll = options.initial_bankroll,
            loss_limit_percentage = options.loss_limit_percentage,
            required_verifications = options.required_verifications,
            "session started"
        );
        Ok(Self {
            store: Store::new(SessionState::new(options)),
        })
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Records a round and advances the session.
    ///
    /// Settles the outstanding suggestion against the round, enforces the
    /// loss limit, runs the tie sub-state, updates pattern verification and
    /// arms the next suggestion, all in one transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has ended or is paused.
    pub fn submit_round(&self, player_score: u8, banker_score: u8) -> Result<RoundReport, RoundError> {
        self.store.update(|state| {
            if state.ended {
                return Err(RoundError::SessionEnded);
            }
            if state.paused {
                return Err(RoundError::Paused);
            }

            let round = RoundResult::new(player_score, banker_score, state.next_round());

            let resolution = staking::resolve(state, round.winner);
            let loss_limit_reached = resolution.is_some() && risk::check_limits(state);

            let (ties_cleared, verification) = if round.is_tie() {
                ties::enter_tie(state);
                state.history.push(round);
                (0, None)
            } else {
                let cleared = ties::settle_ties(state);
                state.history.push(round);
                let verification = pattern::record_verification(state);
                staking::arm(state);
                (cleared, verification)
            };

            tracing::debug!(
                round = round.round,
                player_score,
                banker_score,
                winner = ?round.winner,
                diff = ?round.diff_type,
                consecutive_ties = state.consecutive_ties(),
                verification_count = state.pattern.count,
                active_bet = ?state.active_bet,
                "round recorded"
            );

            Ok(RoundReport {
                round,
                resolution,
                verification,
                ties_cleared,
                loss_limit_reached,
                suggestion: staking::suggest(state),
                state: state.clone(),
            })
        })
    }

    /// Returns the current suggestion.
    pub fn suggestion(&self) -> Suggestion {
        self.store.read(staking::suggest)
    }

    /// Returns risk figures for display.
    pub fn risk_snapshot(&self) -> RiskSnapshot {
        self.store.read(risk::snapshot)
    }

    /// Runs the advisory risk monitor without changing state.
    pub fn assess_risk(&self) -> RiskAssessment {
        self.store.read(risk::assess)
    }

    /// Pauses the session if the composite risk is critical.
    ///
    /// Returns `true` if the session was paused.
    pub fn auto_risk_control(&self) -> bool {
        self.store.update(risk::auto_risk_control)
    }

    /// Enforces the loss limit against the current bankroll.
    ///
    /// Returns `true` if this call ended the session.
    pub fn check_limits(&self) -> bool {
        self.store.update(risk::check_limits)
    }

    /// Tabulates a losing martingale run from the configured base wager.
    pub fn martingale_exposure(&self, max_losses: u32) -> MartingaleExposure {
        self.store.read(|state| {
            risk::martingale_exposure(state.options.initial_bet_amount, state.bankroll, max_losses)
        })
    }

    /// Pauses the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has ended or is already paused.
    pub fn pause(&self) -> Result<(), ControlError> {
        self.store.update(|state| {
            if state.ended {
                return Err(ControlError::SessionEnded);
            }
            if state.paused {
                return Err(ControlError::AlreadyPaused);
            }
            state.paused = true;
            tracing::info!("session paused");
            Ok(())
        })
    }

    /// Resumes a paused session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has ended or is not paused.
    pub fn resume(&self) -> Result<(), ControlError> {
        self.store.update(|state| {
            if state.ended {
                return Err(ControlError::SessionEnded);
            }
            if !state.paused {
                return Err(ControlError::NotPaused);
            }
            state.paused = false;
            tracing::info!("session resumed");
            Ok(())
        })
    }

    /// Ends the session. Only [`reset`](Self::reset) leaves this state.
    ///
    /// Returns `false` if the session had already ended.
    pub fn end_session(&self, reason: EndReason) -> bool {
        self.store.update(|state| risk::end_session(state, reason))
    }

    /// Starts over with the current configuration.
    pub fn reset(&self) {
        self.store.update(|state| *state = state.reset());
        tracing::info!("session reset");
    }

    /// Applies new options.
    ///
    /// A changed initial bankroll restarts the bankroll and its history. A
    /// changed base wager applies immediately unless a doubled wager is
    /// pending. Accepted bets above 10% of the bankroll carry a warning.
    /// The loss limit is enforced against the new settings, so lowering it
    /// below the current drawdown ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation; the previous
    /// configuration is kept.
    pub fn configure(&self, options: SessionOptions) -> Result<Option<BetWarning>, ConfigError> {
        let warning = risk::validate_options(&options).inspect_err(|err| {
            tracing::warn!(?err, "configuration rejected");
        })?;

        self.store.update(|state| {
            let previous = state.options;
            state.options = options;

            if options.initial_bankroll != previous.initial_bankroll {
                let fresh = SessionState::new(options);
                state.bankroll = fresh.bankroll;
                state.bankroll_history = fresh.bankroll_history;
            }
            if options.initial_bet_amount != previous.initial_bet_amount && !state.martingale_active
            {
                state.bet_amount = options.initial_bet_amount;
            }
            state.refresh_loss_limit();
            risk::check_limits(state);
            pattern::clamp_progress(state);
        });

        tracing::info!(
            language = options.language.code(),
            currency = options.currency.code(),
            initial_bankroll = options.initial_bankroll,
            loss_limit_percentage = options.loss_limit_percentage,
            required_verifications = options.required_verifications,
            "settings applied"
        );
        Ok(warning)
    }

    /// Switches currency, restarting the bankroll and base wager at the
    /// currency's defaults. Other settings are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting options fail validation.
    pub fn switch_currency(&self, currency: Currency) -> Result<Option<BetWarning>, ConfigError> {
        let options = self.store.read(|state| state.options.with_currency(currency));
        self.configure(options)
    }

    /// Registers a state-change listener.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionState, &SessionState, &[StateField]) + Send + Sync + 'static,
    ) -> ListenerId {
        self.store.subscribe(listener)
    }

    /// Removes a state-change listener.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Saves the persisted settings.
    ///
    /// # Errors
    ///
    /// Returns the storage error; session state is unaffected.
    pub fn save_settings(&self, storage: &mut impl SettingsStore) -> Result<(), PersistError> {
        let settings = self.store.read(|state| state.options.settings());
        storage.save(&settings).inspect_err(|err| {
            tracing::warn!(?err, "failed to save settings");
        })
    }

    /// Loads and applies persisted settings.
    ///
    /// Returns `false` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns the storage error, or [`PersistError::Invalid`] if the stored
    /// settings fail validation. Session state is unaffected on error.
    pub fn load_settings(&self, storage: &impl SettingsStore) -> Result<bool, PersistError> {
        let settings = storage.load().inspect_err(|err| {
            tracing::warn!(?err, "failed to load settings");
        })?;
        let Some(settings) = settings else {
            return Ok(false);
        };

        let options = self.store.read(|state| state.options.with_settings(settings));
        self.configure(options).map_err(PersistError::Invalid)?;
        Ok(true)
    }
}
