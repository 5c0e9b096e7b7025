//! Ring simulator: two entrants, one random draw, persisted result.

use tracing::{debug, info, warn};

use super::boxer::{Boxer, FightOutcome};
use super::random::RandomSource;
use super::registry::BoxerRegistry;
use crate::error::{BoxingError, Result};
use crate::storage::repo::BoxerRepository;

pub const RING_CAPACITY: usize = 2;

/// Fighting skill of a boxer.
///
/// `weight * name length + reach / 10 + age modifier`, where the modifier is
/// -1 under 25, -2 over 35 and 0 otherwise. Name length counts Unicode
/// scalar values, not bytes.
pub fn fighting_skill(boxer: &Boxer) -> f64 {
    let age_modifier = if boxer.age < 25 {
        -1.0
    } else if boxer.age > 35 {
        -2.0
    } else {
        0.0
    };
    let name_len = boxer.name.chars().count() as f64;
    f64::from(boxer.weight) * name_len + boxer.reach / 10.0 + age_modifier
}

/// Probability that the first entrant wins: the logistic of the absolute skill gap.
///
/// Always at least 0.5 and assigned to entrant order, not to the stronger boxer.
pub fn win_probability(skill_1: f64, skill_2: f64) -> f64 {
    let delta = (skill_1 - skill_2).abs();
    1.0 / (1.0 + (-delta).exp())
}

#[derive(Debug, Default)]
pub struct Ring {
    entrants: Vec<Boxer>,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxers currently in the ring, in entry order.
    pub fn entrants(&self) -> &[Boxer] {
        &self.entrants
    }

    pub fn enter(&mut self, boxer: Boxer) -> Result<()> {
        if let Err(e) = boxer.validate() {
            warn!("Rejected entrant {}: {e}", boxer.name);
            return Err(BoxingError::InvalidEntrant(e.to_string()));
        }
        if self.entrants.len() >= RING_CAPACITY {
            warn!("Ring is full, cannot add {}", boxer.name);
            return Err(BoxingError::RingFull);
        }

        info!("Adding boxer {} to the ring", boxer.name);
        self.entrants.push(boxer);
        Ok(())
    }

    /// Empty the ring. Returns whether anyone was removed; clearing an empty ring only warns.
    pub fn clear(&mut self) -> bool {
        if self.entrants.is_empty() {
            warn!("Attempted to clear an empty ring");
            return false;
        }
        info!("Clearing {} boxer(s) from the ring", self.entrants.len());
        self.entrants.clear();
        true
    }

    /// Fight the two entrants, record the result and clear the ring.
    ///
    /// Returns the winner's name. The two stat updates are separate store
    /// writes: if the loser's update fails, the winner's is already committed
    /// and the ring keeps its entrants.
    pub fn fight<R: BoxerRepository>(
        &mut self,
        registry: &BoxerRegistry<R>,
        rng: &mut dyn RandomSource,
    ) -> Result<String> {
        let (boxer_1, boxer_2) = match self.entrants.as_slice() {
            [boxer_1, boxer_2] => (boxer_1, boxer_2),
            others => {
                warn!("There must be two boxers to start a fight.");
                return Err(BoxingError::InsufficientEntrants {
                    present: others.len(),
                });
            }
        };
        info!("Fight started between {} and {}", boxer_1.name, boxer_2.name);

        let skill_1 = fighting_skill(boxer_1);
        let skill_2 = fighting_skill(boxer_2);
        let p = win_probability(skill_1, skill_2);
        let draw = rng.draw();
        debug!(skill_1, skill_2, p, draw, "Fight odds computed");

        let (winner, loser) = if draw < p {
            (boxer_1, boxer_2)
        } else {
            (boxer_2, boxer_1)
        };

        registry.update_stats(winner.id, FightOutcome::Win)?;
        registry.update_stats(loser.id, FightOutcome::Loss)?;

        let winner_name = winner.name.clone();
        info!("The winner is: {winner_name}");
        self.clear();
        Ok(winner_name)
    }
}
