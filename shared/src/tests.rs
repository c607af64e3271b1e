#[cfg(test)]
mod tests {
    use crate::error::{ErrorCode, PublicError};
    use crate::models::{AdminRecord, Reputation, VoteOutcome};
    use crate::validation::{validate_identity, ValidationError, MAX_IDENTITY_LENGTH};
    use crate::vote_logic::{CounterChange, Direction, VotePlan, VoteState};

    fn rep(likes: u64, dislikes: u64) -> Reputation {
        Reputation { likes, dislikes }
    }

    fn apply(state: VoteState, wanted: Direction, reputation: Reputation) -> (VoteState, Reputation) {
        match state.plan(wanted) {
            VotePlan::Apply(change) => (VoteState::from(Some(wanted)), change.apply_to(reputation)),
            VotePlan::AlreadyVoted => (state, reputation),
        }
    }

    #[test]
    fn test_direction_flags() {
        assert_eq!(Direction::Like.as_flag(), 1);
        assert_eq!(Direction::Dislike.as_flag(), 0);
        assert_eq!(Direction::from_flag(1), Some(Direction::Like));
        assert_eq!(Direction::from_flag(0), Some(Direction::Dislike));
        assert_eq!(Direction::from_flag(2), None);
        assert_eq!(Direction::from_flag(-1), None);
        assert_eq!(Direction::from_like(true), Direction::Like);
        assert_eq!(Direction::from_like(false), Direction::Dislike);
    }

    #[test]
    fn test_first_vote_only_increments() {
        assert_eq!(
            VoteState::NoVote.plan(Direction::Like),
            VotePlan::Apply(CounterChange { increment: Direction::Like, release: None })
        );
        let (state, next) = apply(VoteState::NoVote, Direction::Dislike, rep(3, 4));
        assert_eq!(state, VoteState::Disliked);
        assert_eq!(next, rep(3, 5));
    }

    #[test]
    fn test_same_direction_is_noop() {
        assert_eq!(VoteState::Liked.plan(Direction::Like), VotePlan::AlreadyVoted);
        assert_eq!(VoteState::Disliked.plan(Direction::Dislike), VotePlan::AlreadyVoted);

        let (state, next) = apply(VoteState::Liked, Direction::Like, rep(1, 0));
        assert_eq!(state, VoteState::Liked);
        assert_eq!(next, rep(1, 0));
    }

    #[test]
    fn test_switch_moves_one_unit() {
        let (state, next) = apply(VoteState::NoVote, Direction::Like, rep(0, 0));
        assert_eq!(next, rep(1, 0));
        let (state, next) = apply(state, Direction::Dislike, next);
        assert_eq!(state, VoteState::Disliked);
        assert_eq!(next, rep(0, 1));
        let (_, next) = apply(state, Direction::Like, next);
        assert_eq!(next, rep(1, 0));
    }

    #[test]
    fn test_release_is_floor_clamped() {
        let change = CounterChange { increment: Direction::Like, release: Some(Direction::Dislike) };
        assert_eq!(change.apply_to(rep(0, 0)), rep(1, 0));

        let change = CounterChange { increment: Direction::Dislike, release: Some(Direction::Like) };
        assert_eq!(change.apply_to(rep(0, 7)), rep(0, 8));

        let change = CounterChange { increment: Direction::Like, release: None };
        assert_eq!(change.apply_to(rep(u64::MAX, 0)), rep(u64::MAX, 0));
    }

    #[test]
    fn test_state_round_trips_direction() {
        for state in [VoteState::NoVote, VoteState::Liked, VoteState::Disliked] {
            assert_eq!(VoteState::from(state.direction()), state);
        }
    }

    #[test]
    fn test_identity_validation() {
        assert!(validate_identity("76561198000000000").is_ok());
        assert_eq!(validate_identity(""), Err(ValidationError::EmptyIdentity));
        assert_eq!(validate_identity(" 7656"), Err(ValidationError::UntrimmedIdentity));
        assert_eq!(
            validate_identity(&"7".repeat(MAX_IDENTITY_LENGTH + 1)),
            Err(ValidationError::IdentityTooLong)
        );
        assert!(validate_identity(&"7".repeat(MAX_IDENTITY_LENGTH)).is_ok());
    }

    #[test]
    fn test_new_admin_is_zeroed() {
        let admin = AdminRecord::new("42");
        assert_eq!(admin.contact, None);
        assert_eq!(admin.reputation(), Reputation::default());
    }

    #[test]
    fn test_plain_data_serialization() {
        assert_eq!(serde_json::to_string(&VoteOutcome::AlreadyVoted).unwrap(), "\"alreadyVoted\"");

        let error = PublicError::new(ErrorCode::NotFound, "Admin not found: 42");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "notFound");
        assert!(json.get("cause").is_none());
        assert_eq!(error.to_string(), "Admin not found: Admin not found: 42");

        let error = PublicError::new(ErrorCode::StorageFailure, "Storage unavailable").caused_by("database is locked");
        let back: PublicError = serde_json::from_value(serde_json::to_value(&error).unwrap()).unwrap();
        assert_eq!(back.cause.as_deref(), Some("database is locked"));
    }
}
