//! Boxer registry and ring simulator over a SQLite store, plus a tiny
//! hello-world HTTP service.
//!
//! The registry validates and persists boxer records; the ring takes two
//! of them, draws a winner and writes the result back through the registry.

pub mod config;
pub mod error;
pub mod game;
pub mod http;
pub mod storage;

pub use config::settings::{Settings, StoreConfig};
pub use error::{BoxerKey, BoxingError, Result};
pub use game::boxer::{
    Boxer, BoxerCard, FightOutcome, LeaderboardEntry, LeaderboardSort, NewBoxer, WeightClass,
};
pub use game::random::{RandomSource, RngSource};
pub use game::registry::BoxerRegistry;
pub use game::ring::{fighting_skill, win_probability, Ring, RING_CAPACITY};
pub use storage::repo::BoxerRepository;
pub use storage::sqlite_repo::SqliteRepo;
