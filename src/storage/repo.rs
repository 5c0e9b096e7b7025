use crate::error::Result;
use crate::game::boxer::{Boxer, FightOutcome, LeaderboardSort, NewBoxer};

/// Repository trait for boxer records.
///
/// Calls are synchronous and each one holds a store connection only for its
/// own duration. Implementations report a unique-name collision as
/// `BoxingError::Duplicate`, whichever way it was detected.
pub trait BoxerRepository {
    fn name_exists(&self, name: &str) -> Result<bool>;

    /// Insert with `fights = wins = 0`, returning the stored row.
    fn insert_boxer(&self, boxer: &NewBoxer) -> Result<Boxer>;

    /// `NotFound` when no row has this id.
    fn delete_boxer(&self, id: i64) -> Result<()>;

    fn find_by_id(&self, id: i64) -> Result<Option<Boxer>>;
    fn find_by_name(&self, name: &str) -> Result<Option<Boxer>>;

    /// Boxers with at least one fight, best first.
    fn ranked_boxers(&self, sort: LeaderboardSort) -> Result<Vec<Boxer>>;

    /// Apply one fight result as a single update. `NotFound` when no row has this id.
    fn record_outcome(&self, id: i64, outcome: FightOutcome) -> Result<()>;
}
