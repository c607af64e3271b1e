pub mod error;
pub mod models;
pub mod validation;
pub mod vote_logic;

pub use error::{ErrorCode, PublicError};
pub use models::*;
pub use validation::*;
pub use vote_logic::{CounterChange, Direction, VotePlan, VoteState};

#[cfg(test)]
mod tests;
