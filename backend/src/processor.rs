use tracing::{debug, instrument, warn};

use shared::{validate_identity, Direction, VoteOutcome, VotePlan, VoteRecord, VoteState};
use crate::cache::ReputationCache;
use crate::error::{DirectoryError, DirectoryResult};
use crate::queries::Queries;
use crate::store::Store;

pub struct VoteProcessor;

impl VoteProcessor {
    pub fn validate_vote(voter: &str, target: &str) -> DirectoryResult<()> {
        validate_identity(voter).map_err(|e| DirectoryError::InvalidIdentity(voter.to_string(), e))?;
        validate_identity(target).map_err(|e| DirectoryError::InvalidIdentity(target.to_string(), e))?;
        Ok(())
    }

    /// Records `voter`'s opinion of `target`.
    ///
    /// The prior direction and the admin's counters are read, the new counters
    /// written and the vote row upserted in one transaction, so a failure before
    /// commit leaves the store and the cache as they were. The cache is refreshed
    /// after commit; if that refresh fails the error is returned even though the
    /// vote is durable, and the cached entry stays stale until the next reload.
    #[instrument(skip(store, cache))]
    pub async fn apply_vote(
        store: &Store,
        cache: &ReputationCache,
        voter: &str,
        target: &str,
        wanted: Direction,
    ) -> DirectoryResult<VoteOutcome> {
        Self::validate_vote(voter, target)?;

        let mut tx = store.begin().await?;

        let current = Queries::fetch_vote_direction(&mut *tx, voter, target).await?;
        let change = match VoteState::from(current).plan(wanted) {
            VotePlan::AlreadyVoted => {
                tx.rollback().await?;
                debug!("{} already voted {:?} for {}", voter, wanted, target);
                return Ok(VoteOutcome::AlreadyVoted);
            }
            VotePlan::Apply(change) => change,
        };

        let Some(admin) = Queries::fetch_admin(&mut *tx, target).await? else {
            tx.rollback().await?;
            warn!("Vote from {} rejected: {} is not a listed admin", voter, target);
            return Err(DirectoryError::UnknownAdmin(target.to_string()));
        };
        Queries::set_counters(&mut *tx, target, change.apply_to(admin.reputation())).await?;

        let vote = VoteRecord {
            voter: voter.to_string(),
            admin: target.to_string(),
            direction: wanted,
        };
        Queries::upsert_vote(&mut *tx, &vote).await?;
        tx.commit().await?;

        cache.refresh_one(store, target).await?;
        debug!("Applied {:?} from {} to {} (was {:?})", wanted, voter, target, current);
        Ok(VoteOutcome::Applied)
    }

    pub async fn current_direction(
        store: &Store,
        voter: &str,
        target: &str,
    ) -> DirectoryResult<Option<Direction>> {
        Queries::fetch_vote_direction(store.pool(), voter, target).await
    }
}
