//! Baccarat scoring utilities.
//!
//! All functions here are pure and total. Hand totals are reduced modulo 10
//! before any comparison, so `winner_of(14, 7)` and `winner_of(4, 7)` agree.

/// A side that can be backed by a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The player hand.
    Player,
    /// The banker hand.
    Banker,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Player => Self::Banker,
            Self::Banker => Self::Player,
        }
    }
}

/// Outcome of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    /// Player hand scored higher.
    Player,
    /// Banker hand scored higher.
    Banker,
    /// Both hands scored the same.
    Tie,
}

impl Winner {
    /// Returns the winning side, or `None` for a tie.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Player => Some(Side::Player),
            Self::Banker => Some(Side::Banker),
            Self::Tie => None,
        }
    }

    /// Returns whether the round was a tie.
    #[must_use]
    pub const fn is_tie(self) -> bool {
        matches!(self, Self::Tie)
    }

    /// Returns the winner corresponding to a side.
    #[must_use]
    pub const fn from_side(side: Side) -> Self {
        match side {
            Side::Player => Self::Player,
            Side::Banker => Self::Banker,
        }
    }
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        Self::from_side(side)
    }
}

/// Parity of the difference between the two reduced scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffType {
    /// The difference is even (including zero).
    Even,
    /// The difference is odd.
    Odd,
}

/// Reduces a hand total to its baccarat value (last digit).
#[must_use]
pub const fn reduce(score: u8) -> u8 {
    score % 10
}

/// Determines the round winner from raw hand totals.
///
/// # Example
///
/// ```
/// use bacrs::{Winner, winner_of};
///
/// assert_eq!(winner_of(14, 7), Winner::Banker);
/// assert_eq!(winner_of(9, 19), Winner::Tie);
/// ```
#[must_use]
pub const fn winner_of(player_score: u8, banker_score: u8) -> Winner {
    let player = reduce(player_score);
    let banker = reduce(banker_score);

    if player > banker {
        Winner::Player
    } else if banker > player {
        Winner::Banker
    } else {
        Winner::Tie
    }
}

/// Returns the parity of `|reduce(player) - reduce(banker)|`.
///
/// Defined for ties too, where the difference is zero and therefore even.
#[must_use]
pub const fn difference_type(player_score: u8, banker_score: u8) -> DiffType {
    let diff = reduce(player_score).abs_diff(reduce(banker_score));
    if diff % 2 == 0 {
        DiffType::Even
    } else {
        DiffType::Odd
    }
}
