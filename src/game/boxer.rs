use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoxingError, Result};

/// Lightest weight (lbs) that maps to a weight class.
pub const MIN_WEIGHT: u32 = 125;
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 40;

// ── Weight class ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightClass {
    Featherweight,
    Lightweight,
    Middleweight,
    Heavyweight,
}

impl WeightClass {
    /// Derive the class from a weight in lbs. Anything under 125 has no class.
    pub fn from_weight(weight: u32) -> Result<Self> {
        match weight {
            203.. => Ok(WeightClass::Heavyweight),
            166..=202 => Ok(WeightClass::Middleweight),
            133..=165 => Ok(WeightClass::Lightweight),
            MIN_WEIGHT..=132 => Ok(WeightClass::Featherweight),
            _ => Err(BoxingError::validation(
                "weight",
                weight,
                "Weight must be at least 125.",
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightClass::Featherweight => "FEATHERWEIGHT",
            WeightClass::Lightweight => "LIGHTWEIGHT",
            WeightClass::Middleweight => "MIDDLEWEIGHT",
            WeightClass::Heavyweight => "HEAVYWEIGHT",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Boxer ───────────────────────────────────────────────────────────

/// Attributes supplied when registering a boxer. Not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoxer {
    pub name: String,
    /// Weight in lbs.
    pub weight: u32,
    /// Height in cm.
    pub height: f64,
    /// Reach in cm.
    pub reach: f64,
    pub age: u32,
}

impl NewBoxer {
    pub fn new(name: impl Into<String>, weight: u32, height: f64, reach: f64, age: u32) -> Self {
        Self {
            name: name.into(),
            weight,
            height,
            reach,
            age,
        }
    }

    /// Check every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<()> {
        validate_physical(self.weight, self.height, self.reach, self.age)
    }
}

fn validate_physical(weight: u32, height: f64, reach: f64, age: u32) -> Result<()> {
    if weight < MIN_WEIGHT {
        return Err(BoxingError::validation(
            "weight",
            weight,
            "Must be at least 125.",
        ));
    }
    // Negated comparisons so NaN is rejected too.
    if !(height > 0.0) {
        return Err(BoxingError::validation(
            "height",
            height,
            "Must be greater than 0.",
        ));
    }
    if !(reach > 0.0) {
        return Err(BoxingError::validation(
            "reach",
            reach,
            "Must be greater than 0.",
        ));
    }
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(BoxingError::validation(
            "age",
            age,
            "Must be between 18 and 40.",
        ));
    }
    Ok(())
}

/// Snapshot of a stored boxer. The store stays the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Boxer {
    pub id: i64,
    pub name: String,
    pub weight: u32,
    pub height: f64,
    pub reach: f64,
    pub age: u32,
    pub fights: u32,
    pub wins: u32,
}

impl Boxer {
    /// Computed on every call; never stored.
    pub fn weight_class(&self) -> Result<WeightClass> {
        WeightClass::from_weight(self.weight)
    }

    /// Same field rules as registration, plus `wins <= fights`.
    pub fn validate(&self) -> Result<()> {
        validate_physical(self.weight, self.height, self.reach, self.age)?;
        if self.wins > self.fights {
            return Err(BoxingError::validation(
                "wins",
                self.wins,
                "Wins cannot exceed fights.",
            ));
        }
        Ok(())
    }

    /// Percentage of fights won, rounded to one decimal with ties to even.
    /// `None` before the first fight.
    pub fn win_pct(&self) -> Option<f64> {
        if self.fights == 0 {
            return None;
        }
        let pct = f64::from(self.wins) / f64::from(self.fights) * 100.0;
        Some((pct * 10.0).round_ties_even() / 10.0)
    }
}

/// Boxer plus its derived weight class, as shown to users.
#[derive(Debug, Clone, Serialize)]
pub struct BoxerCard<'a> {
    #[serde(flatten)]
    pub boxer: &'a Boxer,
    pub weight_class: WeightClass,
}

impl<'a> BoxerCard<'a> {
    pub fn new(boxer: &'a Boxer) -> Result<Self> {
        Ok(Self {
            weight_class: boxer.weight_class()?,
            boxer,
        })
    }
}

// ── Fight outcome ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightOutcome {
    Win,
    Loss,
}

impl FightOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            FightOutcome::Win => "win",
            FightOutcome::Loss => "loss",
        }
    }
}

impl FromStr for FightOutcome {
    type Err = BoxingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "win" => Ok(FightOutcome::Win),
            "loss" => Ok(FightOutcome::Loss),
            other => Err(BoxingError::validation(
                "result",
                other,
                "Expected 'win' or 'loss'.",
            )),
        }
    }
}

impl fmt::Display for FightOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Leaderboard ─────────────────────────────────────────────────────

/// Metric the leaderboard is sorted by, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl FromStr for LeaderboardSort {
    type Err = BoxingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wins" => Ok(LeaderboardSort::Wins),
            "win_pct" => Ok(LeaderboardSort::WinPct),
            other => Err(BoxingError::validation(
                "sort_by",
                other,
                "Expected 'wins' or 'win_pct'.",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    #[serde(flatten)]
    pub boxer: Boxer,
    pub weight_class: WeightClass,
    pub win_pct: f64,
}

impl LeaderboardEntry {
    /// Annotate a boxer that has fought at least once.
    pub fn from_boxer(boxer: Boxer) -> Result<Self> {
        let weight_class = boxer.weight_class()?;
        let win_pct = boxer.win_pct().unwrap_or(0.0);
        Ok(Self {
            boxer,
            weight_class,
            win_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxer(weight: u32, fights: u32, wins: u32) -> Boxer {
        Boxer {
            id: 1,
            name: "Ali".into(),
            weight,
            height: 191.0,
            reach: 198.0,
            age: 30,
            fights,
            wins,
        }
    }

    #[test]
    fn test_weight_class_boundaries() {
        assert!(matches!(
            WeightClass::from_weight(124),
            Err(BoxingError::Validation { field: "weight", .. })
        ));
        let cases = [
            (125, WeightClass::Featherweight),
            (132, WeightClass::Featherweight),
            (133, WeightClass::Lightweight),
            (165, WeightClass::Lightweight),
            (166, WeightClass::Middleweight),
            (202, WeightClass::Middleweight),
            (203, WeightClass::Heavyweight),
            (400, WeightClass::Heavyweight),
        ];
        for (weight, expected) in cases {
            assert_eq!(WeightClass::from_weight(weight).unwrap(), expected, "weight {weight}");
        }
    }

    #[test]
    fn test_weight_class_serializes_uppercase() {
        let json = serde_json::to_string(&WeightClass::Middleweight).unwrap();
        assert_eq!(json, "\"MIDDLEWEIGHT\"");
        assert_eq!(WeightClass::Heavyweight.to_string(), "HEAVYWEIGHT");
    }

    #[test]
    fn test_validate_reports_offending_field() {
        let cases = [
            (NewBoxer::new("A", 124, 180.0, 70.0, 25), "weight"),
            (NewBoxer::new("A", 150, 0.0, 70.0, 25), "height"),
            (NewBoxer::new("A", 150, 180.0, -1.0, 25), "reach"),
            (NewBoxer::new("A", 150, 180.0, f64::NAN, 25), "reach"),
            (NewBoxer::new("A", 150, 180.0, 70.0, 17), "age"),
            (NewBoxer::new("A", 150, 180.0, 70.0, 41), "age"),
        ];
        for (input, expected) in cases {
            match input.validate() {
                Err(BoxingError::Validation { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected validation error on {expected}, got {other:?}"),
            }
        }
        assert!(NewBoxer::new("A", 125, 1.0, 0.1, 18).validate().is_ok());
        assert!(NewBoxer::new("A", 125, 1.0, 0.1, 40).validate().is_ok());
    }

    #[test]
    fn test_validation_message_names_value() {
        let err = NewBoxer::new("A", 100, 180.0, 70.0, 25).validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid weight: 100. Must be at least 125.");
    }

    #[test]
    fn test_snapshot_rejects_more_wins_than_fights() {
        assert!(boxer(150, 3, 3).validate().is_ok());
        assert!(matches!(
            boxer(150, 2, 3).validate(),
            Err(BoxingError::Validation { field: "wins", .. })
        ));
    }

    #[test]
    fn test_win_pct_rounds_to_one_decimal() {
        assert_eq!(boxer(150, 0, 0).win_pct(), None);
        assert_eq!(boxer(150, 3, 2).win_pct(), Some(66.7));
        assert_eq!(boxer(150, 16, 11).win_pct(), Some(68.8));
        assert_eq!(boxer(150, 5, 4).win_pct(), Some(80.0));
    }

    #[test]
    fn test_win_pct_exact_halves_round_to_even() {
        // 6.25 and 31.25 are exact halves at the first decimal
        assert_eq!(boxer(150, 16, 1).win_pct(), Some(6.2));
        assert_eq!(boxer(150, 16, 5).win_pct(), Some(31.2));
        // 68.75 rounds up to the even digit
        assert_eq!(boxer(150, 16, 11).win_pct(), Some(68.8));
    }

    #[test]
    fn test_outcome_and_sort_parsing() {
        assert_eq!("win".parse::<FightOutcome>().unwrap(), FightOutcome::Win);
        assert_eq!("loss".parse::<FightOutcome>().unwrap(), FightOutcome::Loss);
        assert!(matches!(
            "draw".parse::<FightOutcome>(),
            Err(BoxingError::Validation { field: "result", .. })
        ));

        assert_eq!("wins".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::Wins);
        assert_eq!("win_pct".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::WinPct);
        assert!(matches!(
            "losses".parse::<LeaderboardSort>(),
            Err(BoxingError::Validation { field: "sort_by", .. })
        ));
    }

    #[test]
    fn test_card_flattens_boxer_fields() {
        let b = boxer(210, 0, 0);
        let value = serde_json::to_value(BoxerCard::new(&b).unwrap()).unwrap();
        assert_eq!(value["name"], "Ali");
        assert_eq!(value["weight_class"], "HEAVYWEIGHT");
        assert_eq!(value["fights"], 0);
    }
}
