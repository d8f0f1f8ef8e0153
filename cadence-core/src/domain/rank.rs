use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// A 1-based standing within a group's leaderboard (1 = best).
///
/// Ranks are computed server-side per (user, group); the client only
/// carries them. Zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(NonZeroU32);

impl Rank {
    /// Create a rank; returns `None` for zero.
    pub fn new(position: u32) -> Option<Self> {
        NonZeroU32::new(position).map(Rank)
    }

    /// First place
    pub fn first() -> Self {
        Rank(NonZeroU32::MIN)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display state of a user's rank within one group.
///
/// A user with no qualifying reports yet has no rank; that state renders
/// as its own sentinel, never as the numeral 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankLabel {
    Placed(Rank),
    Unranked,
}

impl RankLabel {
    /// Build a label from a rank lookup result (absent → `Unranked`).
    pub fn from_lookup(rank: Option<Rank>) -> Self {
        match rank {
            Some(rank) => RankLabel::Placed(rank),
            None => RankLabel::Unranked,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, RankLabel::Placed(_))
    }
}

impl fmt::Display for RankLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankLabel::Placed(rank) => write!(f, "{}", rank),
            RankLabel::Unranked => write!(f, "no rank yet"),
        }
    }
}
