//! A baccarat advisory engine with optional `no_std` support.
//!
//! The crate records round results, verifies a score-parity pattern over the
//! decisive rounds, suggests a side with martingale staking once the pattern
//! is confirmed, and governs the session with a loss limit and a composite
//! risk score. All state lives in a [`Store`] that notifies observers after
//! each transition; [`Advisor`] drives it.
//!
//! # Example
//!
//! ```
//! use bacrs::{Advisor, SessionOptions, Suggestion};
//!
//! let options = SessionOptions::default()
//!     .with_initial_bankroll(50_000)
//!     .with_required_verifications(1);
//! let advisor = Advisor::new(options).unwrap();
//!
//! advisor.submit_round(3, 5).unwrap(); // Banker by 2
//! let report = advisor.submit_round(7, 1).unwrap(); // Player: alternation holds
//! assert!(report.state.pattern.verified);
//! assert!(matches!(report.suggestion, Suggestion::Bet { .. }));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod advisor;
pub mod error;
pub mod i18n;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod monitor;
pub mod options;
pub mod pattern;
pub mod persist;
pub mod risk;
pub mod round;
pub mod score;
pub mod staking;
pub mod state;
pub mod store;
mod sync;
pub mod ties;

// Re-export main types
pub use advisor::{Advisor, RoundReport};
pub use error::{ConfigError, ControlError, PersistError, RoundError};
#[cfg(feature = "std")]
pub use monitor::{DEFAULT_MONITOR_INTERVAL, RiskMonitor};
pub use options::{Currency, Language, SessionOptions, Settings};
pub use pattern::{Verification, VerificationReason, verify};
pub use persist::{MemoryStore, SETTINGS_KEY, SettingsStore};
pub use risk::{
    BetWarning, MartingaleExposure, RiskAssessment, RiskBand, RiskLevel, RiskSnapshot, RiskWarning,
};
pub use round::{BankrollSample, BetOutcome, BetResolution, RoundResult};
pub use score::{DiffType, Side, Winner, difference_type, reduce, winner_of};
pub use staking::{NoBetReason, Suggestion};
pub use state::{EndReason, SessionState, StateField, TieState};
pub use store::{ListenerId, Store};
