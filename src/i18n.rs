//! Display labels keyed by language.
//!
//! Engine logic never compares these strings; they exist only for
//! presentation.

use alloc::format;
use alloc::string::{String, ToString};

use crate::options::{Currency, Language};
use crate::risk::{RiskBand, RiskLevel, RiskWarning};
use crate::score::{DiffType, Side, Winner};
use crate::staking::{NoBetReason, Suggestion};

/// Keys of the label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TextKey {
    /// Player side.
    Player,
    /// Banker side.
    Banker,
    /// Tie outcome.
    Tie,
    /// Even difference.
    Even,
    /// Odd difference.
    Odd,
    /// Session has ended.
    SessionEnded,
    /// Session is paused.
    Paused,
    /// Suggestions suspended after a tie.
    TieOccurred,
    /// Pattern still being verified.
    PatternVerifying,
    /// Not enough rounds.
    DataInsufficient,
    /// Fresh wager.
    NewBet,
    /// Doubled wager.
    MartingaleContinue,
    /// Safe / low risk.
    Safe,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Critical risk.
    Critical,
    /// Near the loss limit.
    NearLossLimit,
    /// Long losing streak.
    LosingStreak,
    /// Bankroll below half.
    BankrollBelowHalf,
    /// Bet above a fifth of the bankroll.
    BetAboveFifthOfBankroll,
}

/// Looks up a label.
#[must_use]
pub const fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::Ja => ja(key),
        Language::En => en(key),
    }
}

const fn ja(key: TextKey) -> &'static str {
    match key {
        TextKey::Player => "プレイヤー",
        TextKey::Banker => "バンカー",
        TextKey::Tie => "タイ",
        TextKey::Even => "偶数",
        TextKey::Odd => "奇数",
        TextKey::SessionEnded => "セッション終了",
        TextKey::Paused => "一時停止中",
        TextKey::TieOccurred => "タイ発生のためベット見送り",
        TextKey::PatternVerifying => "パターン検証中",
        TextKey::DataInsufficient => "データ不足",
        TextKey::NewBet => "新規ベット",
        TextKey::MartingaleContinue => "マーチンゲール継続",
        TextKey::Safe => "安全",
        TextKey::Medium => "中",
        TextKey::High => "高",
        TextKey::Critical => "危険",
        TextKey::NearLossLimit => "損失限度に近づいています",
        TextKey::LosingStreak => "連続敗北が続いています",
        TextKey::BankrollBelowHalf => "資金が初期値の50%を下回りました",
        TextKey::BetAboveFifthOfBankroll => "ベット額が資金の20%を超えています",
    }
}

const fn en(key: TextKey) -> &'static str {
    match key {
        TextKey::Player => "Player",
        TextKey::Banker => "Banker",
        TextKey::Tie => "Tie",
        TextKey::Even => "Even",
        TextKey::Odd => "Odd",
        TextKey::SessionEnded => "Session ended",
        TextKey::Paused => "Paused",
        TextKey::TieOccurred => "Tie occurred, betting suspended",
        TextKey::PatternVerifying => "Verifying pattern",
        TextKey::DataInsufficient => "Insufficient data",
        TextKey::NewBet => "New bet",
        TextKey::MartingaleContinue => "Martingale continue",
        TextKey::Safe => "Safe",
        TextKey::Medium => "Medium",
        TextKey::High => "High",
        TextKey::Critical => "Critical",
        TextKey::NearLossLimit => "Approaching the loss limit",
        TextKey::LosingStreak => "Losing streak continues",
        TextKey::BankrollBelowHalf => "Bankroll fell below 50% of the initial amount",
        TextKey::BetAboveFifthOfBankroll => "Bet exceeds 20% of the bankroll",
    }
}

/// Name of a currency.
#[must_use]
pub const fn currency_name(language: Language, currency: Currency) -> &'static str {
    match (language, currency) {
        (Language::Ja, Currency::Jpy) => "日本円",
        (Language::Ja, Currency::Usd) => "米ドル",
        (Language::Ja, Currency::Eur) => "ユーロ",
        (Language::Ja, Currency::Krw) => "韓国ウォン",
        (Language::Ja, Currency::Cny) => "人民元",
        (Language::En, Currency::Jpy) => "Japanese Yen",
        (Language::En, Currency::Usd) => "US Dollar",
        (Language::En, Currency::Eur) => "Euro",
        (Language::En, Currency::Krw) => "Korean Won",
        (Language::En, Currency::Cny) => "Chinese Yuan",
    }
}

/// Label for a side.
#[must_use]
pub const fn side_label(language: Language, side: Side) -> &'static str {
    winner_label(language, Winner::from_side(side))
}

/// Label for a round winner.
#[must_use]
pub const fn winner_label(language: Language, winner: Winner) -> &'static str {
    let key = match winner {
        Winner::Player => TextKey::Player,
        Winner::Banker => TextKey::Banker,
        Winner::Tie => TextKey::Tie,
    };
    text(language, key)
}

/// Label for a difference parity.
#[must_use]
pub const fn diff_label(language: Language, diff: DiffType) -> &'static str {
    let key = match diff {
        DiffType::Even => TextKey::Even,
        DiffType::Odd => TextKey::Odd,
    };
    text(language, key)
}

/// Label for a loss-limit risk level.
#[must_use]
pub const fn risk_level_label(language: Language, level: RiskLevel) -> &'static str {
    let key = match level {
        RiskLevel::Safe => TextKey::Safe,
        RiskLevel::Medium => TextKey::Medium,
        RiskLevel::High => TextKey::High,
    };
    text(language, key)
}

/// Label for a composite risk band.
#[must_use]
pub const fn risk_band_label(language: Language, band: RiskBand) -> &'static str {
    let key = match band {
        RiskBand::Low => TextKey::Safe,
        RiskBand::Medium => TextKey::Medium,
        RiskBand::High => TextKey::High,
        RiskBand::Critical => TextKey::Critical,
    };
    text(language, key)
}

/// Label for a risk warning.
#[must_use]
pub const fn warning_label(language: Language, warning: RiskWarning) -> &'static str {
    let key = match warning {
        RiskWarning::NearLossLimit => TextKey::NearLossLimit,
        RiskWarning::LosingStreak => TextKey::LosingStreak,
        RiskWarning::BankrollBelowHalf => TextKey::BankrollBelowHalf,
        RiskWarning::BetAboveFifthOfBankroll => TextKey::BetAboveFifthOfBankroll,
    };
    text(language, key)
}

/// Describes a suggestion, e.g. `"New bet: Banker (¥500)"`.
#[must_use]
pub fn describe_suggestion(
    language: Language,
    currency: Currency,
    suggestion: &Suggestion,
) -> String {
    match *suggestion {
        Suggestion::NoBet { reason } => {
            let key = match reason {
                NoBetReason::SessionEnded => TextKey::SessionEnded,
                NoBetReason::Paused => TextKey::Paused,
                NoBetReason::TieOccurred => TextKey::TieOccurred,
                NoBetReason::NoData => TextKey::DataInsufficient,
            };
            String::from(text(language, key))
        }
        Suggestion::Verification { count, required } => {
            format!("{} ({count}/{required})", text(language, TextKey::PatternVerifying))
        }
        Suggestion::Bet {
            target,
            amount,
            is_martingale,
        } => {
            let status = if is_martingale {
                TextKey::MartingaleContinue
            } else {
                TextKey::NewBet
            };
            format!(
                "{}: {} ({})",
                text(language, status),
                side_label(language, target),
                format_amount(currency, amount)
            )
        }
    }
}

/// Digit group separator of the currency's usual locale.
const fn group_separator(currency: Currency) -> char {
    match currency {
        Currency::Eur => '.',
        Currency::Jpy | Currency::Usd | Currency::Krw | Currency::Cny => ',',
    }
}

/// Formats an amount with the currency symbol and digit grouping, e.g.
/// `"¥1,234,500"` or `"€1.234"`.
#[must_use]
pub fn format_amount(currency: Currency, amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let symbol = currency.symbol();
    let separator = group_separator(currency);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + symbol.len() + 1);
    if amount < 0 {
        grouped.push('-');
    }
    grouped.push_str(symbol);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats an amount compactly for chart axes: `"¥1.5M"`, `"¥12k"`, `"¥950"`.
#[must_use]
pub fn format_compact(currency: Currency, amount: i64) -> String {
    let symbol = currency.symbol();
    if amount >= 1_000_000 {
        let tenths = (amount.saturating_add(50_000)) / 100_000;
        format!("{symbol}{}.{}M", tenths / 10, tenths % 10)
    } else if amount >= 1_000 {
        format!("{symbol}{}k", (amount + 500) / 1_000)
    } else {
        format_amount(currency, amount)
    }
}
