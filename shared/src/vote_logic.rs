use serde::{Serialize, Deserialize};

use crate::models::Reputation;

/// Polarity of a voter's current opinion. Persisted as `0` (dislike) / `1` (like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Dislike,
    Like,
}

impl Direction {
    pub const fn from_like(want_like: bool) -> Self {
        if want_like { Direction::Like } else { Direction::Dislike }
    }

    pub const fn as_flag(self) -> i64 {
        match self {
            Direction::Dislike => 0,
            Direction::Like => 1,
        }
    }

    pub const fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Direction::Dislike),
            1 => Some(Direction::Like),
            _ => None,
        }
    }
}

/// Where a (voter, admin) pair currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteState {
    #[default]
    NoVote,
    Liked,
    Disliked,
}

impl From<Option<Direction>> for VoteState {
    fn from(current: Option<Direction>) -> Self {
        match current {
            None => VoteState::NoVote,
            Some(Direction::Like) => VoteState::Liked,
            Some(Direction::Dislike) => VoteState::Disliked,
        }
    }
}

/// Counter movement for one accepted vote: one `+1` on `increment`, and a
/// floor-clamped `-1` on `release` when the voter is switching sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterChange {
    pub increment: Direction,
    pub release: Option<Direction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePlan {
    AlreadyVoted,
    Apply(CounterChange),
}

impl VoteState {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            VoteState::NoVote => None,
            VoteState::Liked => Some(Direction::Like),
            VoteState::Disliked => Some(Direction::Dislike),
        }
    }

    pub fn plan(self, wanted: Direction) -> VotePlan {
        match self.direction() {
            Some(current) if current == wanted => VotePlan::AlreadyVoted,
            Some(current) => VotePlan::Apply(CounterChange {
                increment: wanted,
                release: Some(current),
            }),
            None => VotePlan::Apply(CounterChange {
                increment: wanted,
                release: None,
            }),
        }
    }
}

impl CounterChange {
    pub fn apply_to(&self, reputation: Reputation) -> Reputation {
        let mut next = reputation;
        if let Some(released) = self.release {
            match released {
                Direction::Like => next.likes = next.likes.saturating_sub(1),
                Direction::Dislike => next.dislikes = next.dislikes.saturating_sub(1),
            }
        }
        match self.increment {
            Direction::Like => next.likes = next.likes.saturating_add(1),
            Direction::Dislike => next.dislikes = next.dislikes.saturating_add(1),
        }
        next
    }
}
