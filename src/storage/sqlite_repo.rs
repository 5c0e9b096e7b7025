use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

use super::repo::BoxerRepository;
use crate::config::settings::StoreConfig;
use crate::error::{BoxerKey, BoxingError, Result};
use crate::game::boxer::{Boxer, FightOutcome, LeaderboardSort, NewBoxer};

pub const BOXERS_TABLE: &str = "boxers";

const SELECT_BOXER: &str =
    "SELECT id, name, weight, height, reach, age, fights, wins FROM boxers";

/// SQLite-backed repository.
///
/// Owns a single-threaded tokio runtime so synchronous callers can drive the
/// async pool. Must not be called from inside another tokio runtime.
pub struct SqliteRepo {
    pool: SqlitePool,
    rt: Runtime,
}

impl SqliteRepo {
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let pool = rt.block_on(Self::connect(config))?;
        info!("SQLite store opened at {:?}", config.db_path);
        Ok(Self { pool, rt })
    }

    async fn connect(config: &StoreConfig) -> Result<SqlitePool> {
        if config.create_if_missing {
            if let Some(parent) = config.db_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.db_path)
            .create_if_missing(config.create_if_missing);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
        }

        Ok(pool)
    }

    /// Run `SELECT 1` on a fresh connection.
    pub fn check_connection(&self) -> Result<()> {
        info!("Checking database connection");
        self.rt
            .block_on(async {
                let mut conn = self.pool.acquire().await?;
                debug!("Executing test query: SELECT 1;");
                sqlx::query("SELECT 1;").execute(&mut *conn).await?;
                Ok::<_, sqlx::Error>(())
            })
            .map_err(|e| {
                error!("Database connection failed: {e}");
                BoxingError::HealthCheck(format!("Database connection error: {e}"))
            })
    }

    pub fn check_table_exists(&self, table: &str) -> Result<()> {
        info!("Checking if table '{table}' exists");
        let found: Option<(String,)> = self
            .rt
            .block_on(async {
                let mut conn = self.pool.acquire().await?;
                sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                    .bind(table)
                    .fetch_optional(&mut *conn)
                    .await
            })
            .map_err(|e| {
                error!("Table check error for '{table}': {e}");
                BoxingError::HealthCheck(format!("Table check error for '{table}': {e}"))
            })?;

        match found {
            Some(_) => {
                info!("Table '{table}' exists.");
                Ok(())
            }
            None => {
                error!("Table '{table}' does not exist.");
                Err(BoxingError::HealthCheck(format!(
                    "Table '{table}' does not exist."
                )))
            }
        }
    }

    /// Startup check: the store is reachable and the `boxers` table is present.
    pub fn health_check(&self) -> Result<()> {
        self.check_connection()?;
        self.check_table_exists(BOXERS_TABLE)
    }

    pub async fn name_exists_async(&self, name: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM boxers WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    pub async fn insert_boxer_async(&self, boxer: &NewBoxer) -> Result<Boxer> {
        let mut tx = self.pool.begin().await?;

        let stored: Boxer = sqlx::query_as(
            r#"INSERT INTO boxers (name, weight, height, reach, age)
               VALUES (?, ?, ?, ?, ?)
               RETURNING id, name, weight, height, reach, age, fights, wins"#,
        )
        .bind(&boxer.name)
        .bind(boxer.weight)
        .bind(boxer.height)
        .bind(boxer.reach)
        .bind(boxer.age)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_insert_error(e, &boxer.name))?;

        tx.commit().await?;
        Ok(stored)
    }

    pub async fn delete_boxer_async(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM boxers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(BoxingError::NotFound(BoxerKey::Id(id)));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn find_by_id_async(&self, id: i64) -> Result<Option<Boxer>> {
        let mut conn = self.pool.acquire().await?;
        let boxer: Option<Boxer> = sqlx::query_as(&format!("{SELECT_BOXER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(boxer)
    }

    pub async fn find_by_name_async(&self, name: &str) -> Result<Option<Boxer>> {
        let mut conn = self.pool.acquire().await?;
        let boxer: Option<Boxer> = sqlx::query_as(&format!("{SELECT_BOXER} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(boxer)
    }

    pub async fn ranked_boxers_async(&self, sort: LeaderboardSort) -> Result<Vec<Boxer>> {
        let order = match sort {
            LeaderboardSort::Wins => "wins DESC",
            LeaderboardSort::WinPct => "(wins * 1.0 / fights) DESC",
        };
        let mut conn = self.pool.acquire().await?;
        let boxers: Vec<Boxer> = sqlx::query_as(&format!(
            "{SELECT_BOXER} WHERE fights > 0 ORDER BY {order}, id ASC"
        ))
        .fetch_all(&mut *conn)
        .await?;
        Ok(boxers)
    }

    pub async fn record_outcome_async(&self, id: i64, outcome: FightOutcome) -> Result<()> {
        let statement = match outcome {
            FightOutcome::Win => "UPDATE boxers SET fights = fights + 1, wins = wins + 1 WHERE id = ?",
            FightOutcome::Loss => "UPDATE boxers SET fights = fights + 1 WHERE id = ?",
        };

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(statement)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated == 0 {
            return Err(BoxingError::NotFound(BoxerKey::Id(id)));
        }

        tx.commit().await?;
        Ok(())
    }
}

impl BoxerRepository for SqliteRepo {
    fn name_exists(&self, name: &str) -> Result<bool> {
        self.rt.block_on(self.name_exists_async(name))
    }

    fn insert_boxer(&self, boxer: &NewBoxer) -> Result<Boxer> {
        self.rt.block_on(self.insert_boxer_async(boxer))
    }

    fn delete_boxer(&self, id: i64) -> Result<()> {
        self.rt.block_on(self.delete_boxer_async(id))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Boxer>> {
        self.rt.block_on(self.find_by_id_async(id))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Boxer>> {
        self.rt.block_on(self.find_by_name_async(name))
    }

    fn ranked_boxers(&self, sort: LeaderboardSort) -> Result<Vec<Boxer>> {
        self.rt.block_on(self.ranked_boxers_async(sort))
    }

    fn record_outcome(&self, id: i64, outcome: FightOutcome) -> Result<()> {
        self.rt.block_on(self.record_outcome_async(id, outcome))
    }
}

impl Drop for SqliteRepo {
    fn drop(&mut self) {
        self.rt.block_on(self.pool.close());
    }
}

/// Unique-name collisions become `Duplicate`; everything else stays a store error.
fn classify_insert_error(err: sqlx::Error, name: &str) -> BoxingError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return BoxingError::Duplicate(name.to_string());
        }
    }
    BoxingError::Store(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_temp(dir: &tempfile::TempDir) -> SqliteRepo {
        SqliteRepo::open(&StoreConfig::at(dir.path().join("boxing.db"))).unwrap()
    }

    #[test]
    fn test_insert_and_find() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);

        let stored = repo
            .insert_boxer(&NewBoxer::new("Ali", 210, 191.0, 198.5, 30))
            .unwrap();
        assert!(stored.id > 0);
        assert_eq!(stored.fights, 0);
        assert_eq!(stored.wins, 0);

        assert_eq!(repo.find_by_id(stored.id).unwrap(), Some(stored.clone()));
        assert_eq!(repo.find_by_name("Ali").unwrap(), Some(stored));
        assert_eq!(repo.find_by_name("Frazier").unwrap(), None);
        assert!(repo.name_exists("Ali").unwrap());
        assert!(!repo.name_exists("ali").unwrap());
    }

    #[test]
    fn test_unique_constraint_maps_to_duplicate() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);

        let boxer = NewBoxer::new("Ali", 210, 191.0, 198.5, 30);
        repo.insert_boxer(&boxer).unwrap();
        match repo.insert_boxer(&boxer) {
            Err(BoxingError::Duplicate(name)) => assert_eq!(name, "Ali"),
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);

        assert!(matches!(
            repo.delete_boxer(99),
            Err(BoxingError::NotFound(BoxerKey::Id(99)))
        ));

        let stored = repo
            .insert_boxer(&NewBoxer::new("Ali", 210, 191.0, 198.5, 30))
            .unwrap();
        repo.delete_boxer(stored.id).unwrap();
        assert_eq!(repo.find_by_id(stored.id).unwrap(), None);
    }

    #[test]
    fn test_record_outcome() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);
        let id = repo
            .insert_boxer(&NewBoxer::new("Ali", 210, 191.0, 198.5, 30))
            .unwrap()
            .id;

        repo.record_outcome(id, FightOutcome::Win).unwrap();
        repo.record_outcome(id, FightOutcome::Loss).unwrap();

        let boxer = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!((boxer.fights, boxer.wins), (2, 1));

        assert!(matches!(
            repo.record_outcome(id + 1, FightOutcome::Win),
            Err(BoxingError::NotFound(_))
        ));
    }

    #[test]
    fn test_ranked_boxers_orders_by_metric() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);
        let a = repo.insert_boxer(&NewBoxer::new("A", 150, 180.0, 70.0, 25)).unwrap().id;
        let b = repo.insert_boxer(&NewBoxer::new("B", 150, 180.0, 70.0, 25)).unwrap().id;
        repo.insert_boxer(&NewBoxer::new("Idle", 150, 180.0, 70.0, 25)).unwrap();

        // A: 2 wins of 2, B: 3 wins of 5
        for _ in 0..2 {
            repo.record_outcome(a, FightOutcome::Win).unwrap();
        }
        for outcome in ["win", "win", "win", "loss", "loss"] {
            repo.record_outcome(b, outcome.parse().unwrap()).unwrap();
        }

        let by_wins: Vec<_> = repo
            .ranked_boxers(LeaderboardSort::Wins)
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(by_wins, ["B", "A"]);

        let by_pct: Vec<_> = repo
            .ranked_boxers(LeaderboardSort::WinPct)
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(by_pct, ["A", "B"]);
    }

    #[test]
    fn test_health_check() {
        let dir = tempdir().unwrap();
        let repo = open_temp(&dir);
        repo.health_check().unwrap();
    }

    #[test]
    fn test_health_check_fails_without_table() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            run_migrations: false,
            ..StoreConfig::at(dir.path().join("empty.db"))
        };
        let repo = SqliteRepo::open(&config).unwrap();

        repo.check_connection().unwrap();
        match repo.health_check() {
            Err(BoxingError::HealthCheck(msg)) => {
                assert_eq!(msg, "Table 'boxers' does not exist.")
            }
            other => panic!("expected HealthCheck error, got {other:?}"),
        }
    }

    #[test]
    fn test_open_missing_file_without_create_fails() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            create_if_missing: false,
            ..StoreConfig::at(dir.path().join("missing.db"))
        };
        assert!(matches!(
            SqliteRepo::open(&config),
            Err(BoxingError::Store(_))
        ));
    }
}
