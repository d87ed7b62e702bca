//! Session configuration options.

/// Display language for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Language {
    /// Japanese.
    #[default]
    Ja,
    /// English.
    En,
}

impl Language {
    /// Returns the language code (`"ja"`, `"en"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Parses a language code. Unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Currency amounts are entered and displayed in.
///
/// Amounts stay whole units of the currency; switching currency resets the
/// bankroll and base wager to the currency's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Currency {
    /// Japanese yen.
    #[default]
    Jpy,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Korean won.
    Krw,
    /// Chinese yuan.
    Cny,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Self; 5] = [Self::Jpy, Self::Usd, Self::Eur, Self::Krw, Self::Cny];

    /// Returns the ISO 4217 code, e.g. `"JPY"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Jpy => "JPY",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Krw => "KRW",
            Self::Cny => "CNY",
        }
    }

    /// Parses an ISO 4217 code, ignoring ASCII case.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }

    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Jpy | Self::Cny => "¥",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Krw => "₩",
        }
    }

    /// Default starting bankroll.
    #[must_use]
    pub const fn initial_funds(self) -> i64 {
        match self {
            Self::Jpy => 100_000,
            Self::Usd => 1_000,
            Self::Eur => 900,
            Self::Krw => 1_200_000,
            Self::Cny => 7_000,
        }
    }

    /// Default base wager.
    #[must_use]
    pub const fn initial_bet(self) -> i64 {
        match self {
            Self::Jpy => 500,
            Self::Usd | Self::Eur => 5,
            Self::Krw => 6_000,
            Self::Cny => 35,
        }
    }

    /// Smallest accepted starting bankroll, a hundredth of the default.
    #[must_use]
    pub const fn min_funds(self) -> i64 {
        self.initial_funds() / 100
    }

    /// Largest accepted starting bankroll, a hundred times the default.
    #[must_use]
    pub const fn max_funds(self) -> i64 {
        self.initial_funds() * 100
    }
}

/// The configuration fields that survive between sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Display language.
    pub language: Language,
    /// Currency of every amount.
    pub currency: Currency,
    /// Starting bankroll.
    pub initial_bankroll: i64,
    /// Maximum tolerated drawdown in percent of the initial bankroll (0 disables).
    pub loss_limit_percentage: f64,
    /// Consecutive pattern confirmations needed before suggesting bets.
    pub required_verifications: u32,
}

impl Default for Settings {
    fn default() -> Self {
        SessionOptions::default().settings()
    }
}

/// Configuration options for an advisory session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bacrs::SessionOptions;
///
/// let options = SessionOptions::default()
///     .with_initial_bankroll(50_000)
///     .with_loss_limit_percentage(15.0)
///     .with_required_verifications(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionOptions {
    /// Display language.
    pub language: Language,
    /// Currency of every amount.
    pub currency: Currency,
    /// Starting bankroll.
    pub initial_bankroll: i64,
    /// Base wager, restored after every win.
    pub initial_bet_amount: i64,
    /// Maximum tolerated drawdown in percent of the initial bankroll (0 disables).
    pub loss_limit_percentage: f64,
    /// Consecutive pattern confirmations needed before suggesting bets.
    pub required_verifications: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        let currency = Currency::Jpy;
        Self {
            language: Language::Ja,
            currency,
            initial_bankroll: currency.initial_funds(),
            initial_bet_amount: currency.initial_bet(),
            loss_limit_percentage: 20.0,
            required_verifications: 4,
        }
    }
}

impl SessionOptions {
    /// Sets the display language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Switches currency, resetting the bankroll and base wager to its defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use bacrs::{Currency, SessionOptions};
    ///
    /// let options = SessionOptions::default().with_currency(Currency::Usd);
    /// assert_eq!(options.initial_bankroll, 1_000);
    /// assert_eq!(options.initial_bet_amount, 5);
    /// ```
    #[must_use]
    pub const fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self.initial_bankroll = currency.initial_funds();
        self.initial_bet_amount = currency.initial_bet();
        self
    }

    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bacrs::SessionOptions;
    ///
    /// let options = SessionOptions::default().with_initial_bankroll(250_000);
    /// assert_eq!(options.initial_bankroll, 250_000);
    /// ```
    #[must_use]
    pub const fn with_initial_bankroll(mut self, amount: i64) -> Self {
        self.initial_bankroll = amount;
        self
    }

    /// Sets the base wager.
    #[must_use]
    pub const fn with_initial_bet_amount(mut self, amount: i64) -> Self {
        self.initial_bet_amount = amount;
        self
    }

    /// Sets the loss limit in percent of the initial bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bacrs::SessionOptions;
    ///
    /// let options = SessionOptions::default().with_loss_limit_percentage(30.0);
    /// assert_eq!(options.loss_limit_percentage, 30.0);
    /// ```
    #[must_use]
    pub const fn with_loss_limit_percentage(mut self, percentage: f64) -> Self {
        self.loss_limit_percentage = percentage;
        self
    }

    /// Sets how many consecutive confirmations the pattern needs.
    #[must_use]
    pub const fn with_required_verifications(mut self, count: u32) -> Self {
        self.required_verifications = count;
        self
    }

    /// Returns the persisted subset of these options.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        Settings {
            language: self.language,
            currency: self.currency,
            initial_bankroll: self.initial_bankroll,
            loss_limit_percentage: self.loss_limit_percentage,
            required_verifications: self.required_verifications,
        }
    }

    /// Overlays persisted settings, keeping the base wager unless the
    /// currency changes, in which case the currency's default applies.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        if settings.currency != self.currency {
            self.initial_bet_amount = settings.currency.initial_bet();
        }
        self.language = settings.language;
        self.currency = settings.currency;
        self.initial_bankroll = settings.initial_bankroll;
        self.loss_limit_percentage = settings.loss_limit_percentage;
        self.required_verifications = settings.required_verifications;
        self
    }

    /// Loss limit expressed as an amount of the initial bankroll.
    #[must_use]
    pub fn loss_limit_amount(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for monetary values"
        )]
        let bankroll = self.initial_bankroll as f64;
        bankroll * (self.loss_limit_percentage / 100.0)
    }
}
