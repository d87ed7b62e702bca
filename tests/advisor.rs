//! Advisor integration tests.

#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use bacrs::{
    Advisor, BetOutcome, BetWarning, ConfigError, ControlError, Currency, DiffType, EndReason,
    Language,
    MemoryStore, NoBetReason, PersistError, RiskBand, RiskLevel, RiskWarning, RoundError,
    SessionOptions, Settings, SettingsStore, Side, StateField, Suggestion, VerificationReason,
    Winner, i18n,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Options that confirm the pattern after a single success.
fn quick_options() -> SessionOptions {
    SessionOptions::default().with_required_verifications(1)
}

/// Banker by 2, then Player by 6: confirms the pattern and arms Banker.
fn confirm_pattern(advisor: &Advisor) {
    advisor.submit_round(3, 5).unwrap();
    let report = advisor.submit_round(7, 1).unwrap();
    assert_eq!(
        report.verification.map(|v| v.reason),
        Some(VerificationReason::EvenAlternationConfirmed)
    );
    assert_eq!(report.state.active_bet, Some(Side::Banker));
}

#[test]
fn scores_reduce_before_comparison() {
    let advisor = Advisor::default();
    let report = advisor.submit_round(14, 7).unwrap();
    assert_eq!(report.round.winner, Winner::Banker);
    assert_eq!(report.round.diff_type, DiffType::Odd);
    assert_eq!(report.round.round, 1);
    assert_eq!(
        report.verification.map(|v| v.reason),
        Some(VerificationReason::InsufficientData)
    );
}

#[test]
fn pattern_examples() {
    let advisor = Advisor::default();
    advisor.submit_round(3, 5).unwrap(); // Banker, even
    let report = advisor.submit_round(7, 1).unwrap(); // Player, even
    assert!(report.verification.unwrap().verified);
    assert_eq!(report.state.pattern.count, 1);

    let advisor = Advisor::default();
    advisor.submit_round(2, 9).unwrap(); // Banker, odd
    let report = advisor.submit_round(4, 7).unwrap(); // Banker, odd
    assert_eq!(
        report.verification.map(|v| v.reason),
        Some(VerificationReason::OddContinuationConfirmed)
    );

    let advisor = Advisor::default();
    advisor.submit_round(2, 8).unwrap(); // Banker, even
    let report = advisor.submit_round(1, 3).unwrap(); // Banker, even
    assert!(!report.verification.unwrap().verified);
    assert_eq!(report.state.pattern.count, 0);
    assert_eq!(
        report.suggestion,
        Suggestion::Verification {
            count: 0,
            required: 4
        }
    );
}

#[test]
fn martingale_doubles_through_rounds() {
    let advisor = Advisor::new(quick_options()).unwrap();
    confirm_pattern(&advisor);

    let mut bets = vec![advisor.state().bet_amount];
    // Player keeps winning by an even margin, so Banker keeps being suggested.
    for _ in 0..3 {
        let report = advisor.submit_round(8, 2).unwrap();
        let resolution = report.resolution.unwrap();
        assert_eq!(resolution.side, Side::Banker);
        assert_eq!(resolution.outcome, BetOutcome::Lose);
        bets.push(report.state.bet_amount);
    }
    assert_eq!(bets, [500, 1000, 2000, 4000]);

    let state = advisor.state();
    assert_eq!(state.consecutive_losses, 3);
    assert_eq!(state.bankroll, 96_500);
    assert_eq!(
        advisor.suggestion(),
        Suggestion::Bet {
            target: Side::Banker,
            amount: 4000,
            is_martingale: true
        }
    );

    let report = advisor.submit_round(2, 8).unwrap();
    assert_eq!(report.resolution.unwrap().outcome, BetOutcome::Win);
    assert_eq!(report.state.bet_amount, 500);
    assert_eq!(report.state.consecutive_losses, 0);
    assert!(!report.state.martingale_active);
    assert_eq!(report.state.bankroll, 100_500);
    assert_eq!(report.state.bankroll_history.len(), 5);
}

#[test]
fn loss_limit_ends_session_through_rounds() {
    let advisor = Advisor::new(quick_options().with_initial_bet_amount(10_000)).unwrap();
    confirm_pattern(&advisor);

    let report = advisor.submit_round(8, 2).unwrap();
    assert!(!report.loss_limit_reached);
    assert_eq!(report.state.bankroll, 90_000);

    let report = advisor.submit_round(8, 2).unwrap();
    assert!(report.loss_limit_reached);
    assert!(report.state.ended);
    assert_eq!(report.state.end_reason, Some(EndReason::LossLimitReached));
    assert_eq!(report.state.active_bet, None);
    assert_eq!(
        report.suggestion,
        Suggestion::NoBet {
            reason: NoBetReason::SessionEnded
        }
    );
    assert!(report.state.is_consistent());

    assert_eq!(advisor.submit_round(1, 2), Err(RoundError::SessionEnded));
}

#[test]
fn ended_session_does_not_recover_without_reset() {
    let advisor = Advisor::default();
    advisor.store().update(|state| state.bankroll = 80_000);
    assert!(advisor.check_limits());
    assert!(advisor.state().ended);

    advisor.store().update(|state| state.bankroll = 95_000);
    assert!(!advisor.check_limits());
    assert!(advisor.state().ended);
    assert_eq!(advisor.submit_round(8, 2), Err(RoundError::SessionEnded));
    assert_eq!(advisor.pause(), Err(ControlError::SessionEnded));

    advisor.reset();
    let state = advisor.state();
    assert!(!state.ended);
    assert_eq!(state.bankroll, 100_000);
    assert!(advisor.submit_round(8, 2).is_ok());
}

#[test]
fn zero_loss_limit_disables_termination() {
    let advisor = Advisor::new(SessionOptions::default().with_loss_limit_percentage(0.0)).unwrap();
    advisor.store().update(|state| state.bankroll = 1_000);
    assert!(!advisor.check_limits());
    assert!(!advisor.state().ended);
}

#[test]
fn tie_sequence() {
    let advisor = Advisor::default();
    advisor.submit_round(8, 2).unwrap();

    let mut ties = Vec::new();
    let mut suspended = Vec::new();
    for _ in 0..3 {
        let report = advisor.submit_round(5, 5).unwrap();
        assert_eq!(report.verification, None);
        assert_eq!(
            report.suggestion,
            Suggestion::NoBet {
                reason: NoBetReason::TieOccurred
            }
        );
        ties.push(report.state.consecutive_ties());
        suspended.push(report.state.suspend_betting);
    }

    let report = advisor.submit_round(2, 9).unwrap();
    assert_eq!(report.ties_cleared, 3);
    ties.push(report.state.consecutive_ties());
    suspended.push(report.state.suspend_betting);

    assert_eq!(ties, [1, 2, 3, 0]);
    assert_eq!(suspended, [true, true, true, false]);
}

#[test]
fn tie_keeps_outstanding_bet() {
    let advisor = Advisor::new(quick_options()).unwrap();
    confirm_pattern(&advisor);

    let report = advisor.submit_round(4, 4).unwrap();
    assert_eq!(report.resolution, None);
    assert_eq!(report.state.active_bet, Some(Side::Banker));
    assert_eq!(report.state.last_non_tie_round().map(|r| r.round), Some(2));
    assert!(!report.state.game_view().can_make_bet);

    // Banker by 7 settles the bet held through the tie.
    let report = advisor.submit_round(2, 9).unwrap();
    let resolution = report.resolution.unwrap();
    assert_eq!(resolution.outcome, BetOutcome::Win);
    assert_eq!(resolution.bankroll, 100_500);
    assert_eq!(report.state.active_bet, Some(Side::Banker));
    assert_eq!(report.suggestion.target(), Some(Side::Banker));
}

#[test]
fn reset_preserves_configuration() {
    let advisor = Advisor::default();
    let options = SessionOptions::default()
        .with_initial_bankroll(50_000)
        .with_loss_limit_percentage(15.0);
    assert_eq!(advisor.configure(options), Ok(None));

    for (player, banker) in [(3, 5), (7, 1), (6, 6), (2, 9), (9, 0)] {
        advisor.submit_round(player, banker).unwrap();
    }
    assert_eq!(advisor.state().history.len(), 5);

    advisor.reset();
    let state = advisor.state();
    assert_eq!(state.bankroll, 50_000);
    assert_eq!(state.options.loss_limit_percentage, 15.0);
    assert!(state.history.is_empty());
    assert_eq!(state.pattern.count, 0);
    assert_eq!(state.loss_limit_amount, 7_500.0);
    assert_eq!(state.bankroll_history.len(), 1);
}

#[test]
fn configure_validates_and_keeps_previous() {
    let advisor = Advisor::default();
    let before = advisor.state();

    assert_eq!(
        advisor.configure(SessionOptions::default().with_initial_bankroll(500)),
        Err(ConfigError::FundsBelowMinimum { minimum: 1_000 })
    );
    assert_eq!(
        advisor.configure(SessionOptions::default().with_initial_bankroll(20_000_000)),
        Err(ConfigError::FundsAboveMaximum {
            maximum: 10_000_000
        })
    );
    assert_eq!(
        advisor.configure(SessionOptions::default().with_loss_limit_percentage(120.0)),
        Err(ConfigError::LossLimitOutOfRange)
    );
    assert_eq!(
        advisor.configure(SessionOptions::default().with_required_verifications(0)),
        Err(ConfigError::ZeroVerifications)
    );
    assert_eq!(
        advisor.configure(SessionOptions::default().with_initial_bet_amount(0)),
        Err(ConfigError::NonPositiveBet)
    );
    assert_eq!(
        advisor.configure(SessionOptions::default().with_initial_bet_amount(200_000)),
        Err(ConfigError::BetExceedsBankroll)
    );
    assert_eq!(advisor.state(), before);

    assert_eq!(
        advisor.configure(SessionOptions::default().with_initial_bet_amount(20_000)),
        Ok(Some(BetWarning::HighStake))
    );
    assert_eq!(advisor.state().bet_amount, 20_000);
}

#[test]
fn configure_mid_session() {
    let advisor = Advisor::new(SessionOptions::default().with_required_verifications(3)).unwrap();
    for (player, banker) in [(3, 5), (7, 1), (2, 8)] {
        advisor.submit_round(player, banker).unwrap();
    }
    assert_eq!(advisor.state().pattern.count, 2);

    // Lowering the requirement to the current streak confirms the pattern.
    advisor
        .configure(SessionOptions::default().with_required_verifications(2))
        .unwrap();
    let state = advisor.state();
    assert!(state.pattern.verified);
    assert_eq!(state.history.len(), 3);

    advisor.store().update(|state| {
        state.bankroll = 90_000;
        state.martingale_active = true;
        state.bet_amount = 1_000;
    });
    advisor
        .configure(
            SessionOptions::default()
                .with_required_verifications(2)
                .with_initial_bet_amount(800),
        )
        .unwrap();
    let state = advisor.state();
    assert_eq!(state.bet_amount, 1_000);
    assert_eq!(state.bankroll, 90_000);

    advisor
        .configure(
            SessionOptions::default()
                .with_required_verifications(2)
                .with_initial_bankroll(200_000),
        )
        .unwrap();
    let state = advisor.state();
    assert_eq!(state.bankroll, 200_000);
    assert_eq!(state.bankroll_history.len(), 1);
    assert_eq!(state.loss_limit_amount, 40_000.0);
}

#[test]
fn configure_lowering_loss_limit_ends_breached_session() {
    let advisor = Advisor::default();
    advisor.store().update(|state| state.bankroll = 85_000);
    assert!(!advisor.state().ended);

    advisor
        .configure(SessionOptions::default().with_loss_limit_percentage(10.0))
        .unwrap();
    let state = advisor.state();
    assert!(state.ended);
    assert_eq!(state.end_reason, Some(EndReason::LossLimitReached));
    assert_eq!(state.loss_limit_amount, 10_000.0);
    assert_eq!(
        advisor.suggestion(),
        Suggestion::NoBet {
            reason: NoBetReason::SessionEnded
        }
    );
    assert_eq!(advisor.submit_round(8, 2), Err(RoundError::SessionEnded));
}

#[test]
fn configure_lowering_loss_limit_keeps_healthy_session() {
    let advisor = Advisor::default();
    advisor.store().update(|state| state.bankroll = 85_000);

    advisor
        .configure(SessionOptions::default().with_loss_limit_percentage(18.0))
        .unwrap();
    let state = advisor.state();
    assert!(!state.ended);
    assert_eq!(state.end_reason, None);
    assert_eq!(state.bankroll, 85_000);
    assert!(advisor.submit_round(8, 2).is_ok());
}

#[test]
fn loaded_settings_enforce_loss_limit() {
    let mut storage = MemoryStore::new();
    storage
        .save(&Settings {
            loss_limit_percentage: 10.0,
            ..Settings::default()
        })
        .unwrap();

    let advisor = Advisor::default();
    advisor.store().update(|state| state.bankroll = 85_000);
    assert_eq!(advisor.load_settings(&storage), Ok(true));
    assert_eq!(advisor.state().end_reason, Some(EndReason::LossLimitReached));
}

#[test]
fn switching_currency_restarts_amounts() {
    let advisor = Advisor::new(SessionOptions::default().with_language(Language::En)).unwrap();
    advisor.submit_round(8, 2).unwrap();
    advisor.store().update(|state| state.bankroll = 92_000);

    assert_eq!(advisor.switch_currency(Currency::Usd), Ok(None));
    let state = advisor.state();
    assert_eq!(state.options.currency, Currency::Usd);
    assert_eq!(state.options.language, Language::En);
    assert_eq!(state.bankroll, 1_000);
    assert_eq!(state.bet_amount, 5);
    assert_eq!(state.loss_limit_amount, 200.0);
    assert_eq!(state.bankroll_history.len(), 1);
    assert!(!state.ended);

    // Yen-sized amounts are out of range in dollars.
    assert_eq!(
        advisor.configure(state.options.with_initial_bankroll(500_000)),
        Err(ConfigError::FundsAboveMaximum { maximum: 100_000 })
    );
    assert_eq!(i18n::format_amount(state.options.currency, state.bankroll), "$1,000");
}

#[test]
fn settings_round_trip_keeps_currency() {
    let mut storage = MemoryStore::new();
    let advisor = Advisor::default();
    advisor
        .configure(
            SessionOptions::default()
                .with_currency(Currency::Eur)
                .with_initial_bankroll(2_000),
        )
        .unwrap();
    advisor.save_settings(&mut storage).unwrap();

    let restored = Advisor::default();
    assert_eq!(restored.load_settings(&storage), Ok(true));
    let state = restored.state();
    assert_eq!(state.options.currency, Currency::Eur);
    assert_eq!(state.bankroll, 2_000);
    // The base wager follows the stored currency.
    assert_eq!(state.bet_amount, 5);
}

#[test]
fn pause_resume_and_end() {
    let advisor = Advisor::default();
    assert_eq!(advisor.resume(), Err(ControlError::NotPaused));
    advisor.pause().unwrap();
    assert_eq!(advisor.pause(), Err(ControlError::AlreadyPaused));
    assert_eq!(advisor.submit_round(8, 2), Err(RoundError::Paused));
    assert_eq!(
        advisor.suggestion(),
        Suggestion::NoBet {
            reason: NoBetReason::Paused
        }
    );
    assert!(advisor.state().history.is_empty());

    advisor.resume().unwrap();
    advisor.submit_round(8, 2).unwrap();

    assert!(advisor.end_session(EndReason::Manual));
    assert!(!advisor.end_session(EndReason::Manual));
    let state = advisor.state();
    assert_eq!(state.end_reason, Some(EndReason::Manual));
    assert!(state.suspend_betting);
    assert_eq!(advisor.resume(), Err(ControlError::SessionEnded));
}

#[test]
fn listeners_observe_transitions_in_order() {
    let advisor = Advisor::default();
    let log = Arc::new(Mutex::new(Vec::new()));

    for tag in 0..2 {
        let log = Arc::clone(&log);
        advisor.subscribe(move |next, previous, changed| {
            log.lock()
                .unwrap()
                .push((tag, previous.history.len(), next.history.len(), changed.to_vec()));
        });
    }

    advisor.submit_round(8, 2).unwrap();
    advisor.submit_round(5, 5).unwrap();

    let entries = log.lock().unwrap().clone();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].0, 0);
    assert_eq!(entries[1].0, 1);
    assert_eq!((entries[0].1, entries[0].2), (0, 1));
    assert_eq!(entries[0].3, [StateField::History]);
    assert_eq!(
        entries[2].3,
        [StateField::Ties, StateField::SuspendBetting, StateField::History]
    );

    // Rejected operations change nothing and notify nobody.
    let _ = advisor.resume();
    assert_eq!(log.lock().unwrap().len(), 4);
}

#[test]
fn unsubscribed_listener_is_silent() {
    let advisor = Advisor::default();
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let id = advisor.subscribe(move |_, _, _| *counter.lock().unwrap() += 1);

    advisor.submit_round(8, 2).unwrap();
    assert!(advisor.unsubscribe(id));
    advisor.submit_round(8, 2).unwrap();
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn risk_views() {
    let advisor = Advisor::default();
    let snapshot = advisor.risk_snapshot();
    assert_eq!(snapshot.risk_level, RiskLevel::Safe);
    assert_eq!(snapshot.funds_ratio, 100.0);
    assert!(snapshot.warnings.is_empty());

    advisor.store().update(|state| {
        state.bankroll = 85_000;
        state.consecutive_losses = 5;
    });
    let snapshot = advisor.risk_snapshot();
    assert_eq!(snapshot.risk_level, RiskLevel::High);
    assert_eq!(snapshot.warnings, [RiskWarning::LosingStreak]);

    let assessment = advisor.assess_risk();
    assert_eq!(assessment.score, 35.5);
    assert_eq!(assessment.band, RiskBand::Low);
    assert!(!advisor.auto_risk_control());

    advisor.store().update(|state| {
        state.bankroll = 40_000;
        state.martingale_active = true;
    });
    assert_eq!(advisor.assess_risk().band, RiskBand::Critical);
    assert!(advisor.auto_risk_control());
    assert!(advisor.state().paused);
    assert!(!advisor.auto_risk_control());
}

#[test]
fn martingale_exposure_from_base_wager() {
    let advisor = Advisor::default();
    let exposure = advisor.martingale_exposure(3);
    assert_eq!(exposure.max_consecutive_losses, 3);
    assert_eq!(exposure.total_risk_amount, 3_500);
    assert!((exposure.risk_percentage - 3.5).abs() < 1e-9);
    let bets: Vec<i64> = exposure.breakdown.iter().map(|s| s.bet_amount).collect();
    assert_eq!(bets, [500, 1000, 2000]);
    assert_eq!(exposure.breakdown[2].remaining_funds, 96_500);
}

#[test]
fn settings_round_trip() {
    let mut storage = MemoryStore::new();
    let advisor = Advisor::default();
    assert_eq!(advisor.load_settings(&storage), Ok(false));

    let options = SessionOptions::default()
        .with_language(Language::En)
        .with_initial_bankroll(50_000)
        .with_loss_limit_percentage(15.0)
        .with_required_verifications(3)
        .with_initial_bet_amount(700);
    advisor.configure(options).unwrap();
    advisor.save_settings(&mut storage).unwrap();

    let restored = Advisor::default();
    assert_eq!(restored.load_settings(&storage), Ok(true));
    let state = restored.state();
    assert_eq!(state.options.settings(), options.settings());
    // The base wager is not persisted.
    assert_eq!(state.options.initial_bet_amount, 500);
    assert_eq!(state.bankroll, 50_000);
}

#[test]
fn invalid_stored_settings_are_rejected() {
    let mut storage = MemoryStore::new();
    storage
        .save(&Settings {
            initial_bankroll: 10,
            ..Settings::default()
        })
        .unwrap();

    let advisor = Advisor::default();
    let before = advisor.state();
    assert_eq!(
        advisor.load_settings(&storage),
        Err(PersistError::Invalid(ConfigError::FundsBelowMinimum {
            minimum: 1_000
        }))
    );
    assert_eq!(advisor.state(), before);
}

struct OfflineStore;

impl SettingsStore for OfflineStore {
    fn save(&mut self, _: &Settings) -> Result<(), PersistError> {
        Err(PersistError::Unavailable)
    }

    fn load(&self) -> Result<Option<Settings>, PersistError> {
        Err(PersistError::Corrupt)
    }
}

#[test]
fn storage_failures_leave_session_untouched() {
    let advisor = Advisor::default();
    advisor.submit_round(8, 2).unwrap();
    let before = advisor.state();

    assert_eq!(
        advisor.save_settings(&mut OfflineStore),
        Err(PersistError::Unavailable)
    );
    assert_eq!(advisor.load_settings(&OfflineStore), Err(PersistError::Corrupt));
    assert_eq!(advisor.state(), before);
}

#[test]
fn suggestion_labels() {
    let advisor = Advisor::new(quick_options().with_language(Language::En)).unwrap();
    confirm_pattern(&advisor);
    let options = advisor.state().options;
    assert_eq!(
        i18n::describe_suggestion(options.language, options.currency, &advisor.suggestion()),
        "New bet: Banker (¥500)"
    );
}

#[test]
fn random_stream_keeps_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x00ba_ccaa);
    let advisor = Advisor::new(
        SessionOptions::default()
            .with_required_verifications(2)
            .with_initial_bet_amount(1_000),
    )
    .unwrap();

    let mut expected_bankroll = 100_000;
    for _ in 0..2_000 {
        if advisor.state().ended {
            advisor.reset();
            expected_bankroll = 100_000;
        }
        if rng.random_bool(0.02) {
            advisor.pause().unwrap();
            assert_eq!(advisor.submit_round(1, 2), Err(RoundError::Paused));
            advisor.resume().unwrap();
        }

        let before = advisor.state();
        let report = advisor
            .submit_round(rng.random_range(0..10), rng.random_range(0..10))
            .unwrap();
        let state = &report.state;

        assert!(state.is_consistent());
        assert_eq!(state.history.len(), before.history.len() + 1);
        assert_eq!(report.round.round as usize, state.history.len());
        assert!(state.pattern.count <= state.options.required_verifications);
        assert!(before.pattern.verified <= state.pattern.verified);

        if let Some(resolution) = report.resolution {
            assert_eq!(Some(resolution.side), before.active_bet);
            match resolution.outcome {
                BetOutcome::Win => expected_bankroll += resolution.amount,
                BetOutcome::Lose => expected_bankroll -= resolution.amount,
            }
        }
        if report.round.winner == Winner::Tie {
            assert_eq!(report.resolution, None);
            assert_eq!(state.active_bet, before.active_bet);
            assert!(state.suspend_betting);
        }
        assert_eq!(state.bankroll, expected_bankroll);
        assert_eq!(state, &advisor.state());
    }
}
