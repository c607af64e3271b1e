use serde::{Serialize, Deserialize};

use crate::vote_logic::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reputation {
    pub likes: u64,
    pub dislikes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    pub auth: String,
    pub contact: Option<String>,
    pub likes: u64,
    pub dislikes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub voter: String,
    pub admin: String,
    pub direction: Direction,
}

/// Result of a vote request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteOutcome {
    Applied,
    AlreadyVoted,
}

impl AdminRecord {
    /// A freshly registered admin: no contact, no votes.
    pub fn new(auth: impl Into<String>) -> Self {
        Self {
            auth: auth.into(),
            contact: None,
            likes: 0,
            dislikes: 0,
        }
    }

    pub fn reputation(&self) -> Reputation {
        Reputation {
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}
