//! Boxer registry: validated CRUD and stat updates over a `BoxerRepository`.

use tracing::{error, info, warn};

use super::boxer::{Boxer, FightOutcome, LeaderboardEntry, LeaderboardSort, NewBoxer};
use crate::error::{BoxerKey, BoxingError, Result};
use crate::storage::repo::BoxerRepository;

pub struct BoxerRegistry<R> {
    repo: R,
}

impl<R: BoxerRepository> BoxerRegistry<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validate and store a new boxer with no fights on record.
    pub fn create(&self, boxer: NewBoxer) -> Result<Boxer> {
        info!("Received request to create boxer: {}", boxer.name);

        if let Err(e) = boxer.validate() {
            warn!("Rejected boxer {}: {e}", boxer.name);
            return Err(e);
        }

        if self.repo.name_exists(&boxer.name).map_err(log_store_error)? {
            warn!("Boxer already exists: {}", boxer.name);
            return Err(BoxingError::Duplicate(boxer.name));
        }

        // A concurrent insert can still win the race; the repo reports that as Duplicate too.
        match self.repo.insert_boxer(&boxer) {
            Ok(stored) => {
                info!("Boxer successfully added: {} (id {})", stored.name, stored.id);
                Ok(stored)
            }
            Err(BoxingError::Duplicate(name)) => {
                error!("Boxer already exists: {name}");
                Err(BoxingError::Duplicate(name))
            }
            Err(e) => Err(log_store_error(e)),
        }
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        info!("Received request to delete boxer with ID {id}");
        match self.repo.delete_boxer(id) {
            Ok(()) => {
                info!("Boxer with ID {id} deleted");
                Ok(())
            }
            Err(e @ BoxingError::NotFound(_)) => {
                warn!("Cannot delete boxer: {e}");
                Err(e)
            }
            Err(e) => Err(log_store_error(e)),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Result<Boxer> {
        info!("Attempting to retrieve boxer with ID {id}");
        self.repo
            .find_by_id(id)
            .map_err(log_store_error)?
            .ok_or(BoxingError::NotFound(BoxerKey::Id(id)))
    }

    pub fn get_by_name(&self, name: &str) -> Result<Boxer> {
        info!("Attempting to retrieve boxer named {name}");
        match self.repo.find_by_name(name).map_err(log_store_error)? {
            Some(boxer) => {
                info!("Boxer named {name} found");
                Ok(boxer)
            }
            None => {
                info!("Boxer named {name} NOT found");
                Err(BoxingError::NotFound(BoxerKey::Name(name.to_string())))
            }
        }
    }

    /// Boxers who have fought, best first. Empty when nobody has fought yet.
    pub fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<LeaderboardEntry>> {
        info!("Attempting to retrieve the leaderboard sorted by {sort:?}");

        let ranked = self.repo.ranked_boxers(sort).map_err(log_store_error)?;
        if ranked.is_empty() {
            warn!("The leaderboard is empty!");
            return Ok(Vec::new());
        }

        let entries = ranked
            .into_iter()
            .map(LeaderboardEntry::from_boxer)
            .collect::<Result<Vec<_>>>()?;
        info!("Retrieved the leaderboard containing {} boxers.", entries.len());
        Ok(entries)
    }

    /// Add one fight to the boxer's record, and one win if they won.
    pub fn update_stats(&self, id: i64, outcome: FightOutcome) -> Result<()> {
        info!("Attempting to update boxer stats for boxer with ID {id}");
        match self.repo.record_outcome(id, outcome) {
            Ok(()) => {
                match outcome {
                    FightOutcome::Win => {
                        info!("Added one fight and one win to boxer stats for boxer with ID {id}")
                    }
                    FightOutcome::Loss => {
                        info!("Added one fight to boxer stats for boxer with ID {id}")
                    }
                }
                Ok(())
            }
            Err(e @ BoxingError::NotFound(_)) => {
                warn!("Cannot update boxer stats: {e}");
                Err(e)
            }
            Err(e) => Err(log_store_error(e)),
        }
    }
}

fn log_store_error(e: BoxingError) -> BoxingError {
    if matches!(e, BoxingError::Store(_)) {
        error!("{e}");
    }
    e
}
