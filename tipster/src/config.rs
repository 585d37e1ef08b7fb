//! Rule parameters injected into the engine. Nothing in the scoring, ranking or statistics code
//! hard-codes a point value; everything is read from a [Config].

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidConfig {
    #[error("top match factor must be at least 1, got {0}")]
    TopMatchFactor(u32),

    #[error("{field} must lie in {range:?}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: RangeInclusive<f64>,
        value: f64,
    },

    #[error("form window must be at least 1")]
    EmptyFormWindow,

    #[error("season must have at least one matchday")]
    NoMatchdays,

    #[error("{top} top places and {relegation} relegation places do not fit a table")]
    TooManyPlaces { top: u32, relegation: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub tendency_points: u32,
    pub result_bonus_points: u32,
    pub top_match_factor: u32,
    pub outsider_bonus_one: u32,
    pub outsider_bonus_two: u32,
    pub first_place_exact: u32,
    pub second_place_exact: u32,
    pub relegation_exact: u32,
    pub relegation_correct_not_exact: u32,
}
impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            tendency_points: 1,
            result_bonus_points: 1,
            top_match_factor: 2,
            outsider_bonus_one: 2,
            outsider_bonus_two: 1,
            first_place_exact: 5,
            second_place_exact: 3,
            relegation_exact: 3,
            relegation_correct_not_exact: 1,
        }
    }
}
impl ScoringRules {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.top_match_factor == 0 {
            return Err(InvalidConfig::TopMatchFactor(self.top_match_factor));
        }
        Ok(())
    }
}

/// Parameters of the form index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormParams {
    /// Number of most recent matchdays considered.
    pub window: u32,

    /// Weight of the most recent matchday relative to the oldest one in the window.
    pub recency_ratio: f64,

    /// Baseline points per match that a typical tipster earns.
    pub reference_points_per_match: f64,

    pub squash_scale: f64,
    pub squash_gain: f64,

    /// Share of the opponent-relative component; the reference component takes the remainder.
    pub relative_weight: f64,

    /// Returned when there is no relative signal at all.
    pub no_signal: f64,
}
impl Default for FormParams {
    fn default() -> Self {
        Self {
            window: 6,
            recency_ratio: 2.5,
            reference_points_per_match: 0.6,
            squash_scale: 10.0,
            squash_gain: 2.25,
            relative_weight: 0.75,
            no_signal: -10.0,
        }
    }
}
impl FormParams {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.window == 0 {
            return Err(InvalidConfig::EmptyFormWindow);
        }
        check_range("recency_ratio", 1.0..=f64::MAX, self.recency_ratio)?;
        check_range(
            "reference_points_per_match",
            f64::MIN_POSITIVE..=f64::MAX,
            self.reference_points_per_match,
        )?;
        check_range("relative_weight", 0.0..=1.0, self.relative_weight)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonFormat {
    pub matchdays: u32,
    pub top_places: u32,
    pub relegation_places: u32,
}
impl Default for SeasonFormat {
    fn default() -> Self {
        Self {
            matchdays: 34,
            top_places: 2,
            relegation_places: 3,
        }
    }
}
impl SeasonFormat {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.matchdays == 0 {
            return Err(InvalidConfig::NoMatchdays);
        }
        // a double round robin of n teams has 2(n - 1) matchdays
        let teams = self.matchdays / 2 + 1;
        if self.top_places + self.relegation_places > teams {
            return Err(InvalidConfig::TooManyPlaces {
                top: self.top_places,
                relegation: self.relegation_places,
            });
        }
        Ok(())
    }

    /// Whether `place` names one of the slots users may bet on.
    pub fn is_valid_place(&self, place: i32) -> bool {
        (place > 0 && place as u32 <= self.top_places)
            || (place < 0 && place.unsigned_abs() <= self.relegation_places)
    }

    /// The first matchday of the second half of the season.
    pub fn second_half_start(&self) -> u32 {
        self.matchdays / 2 + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: ScoringRules,
    pub form: FormParams,
    pub season: SeasonFormat,
}
impl Config {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.rules.validate()?;
        self.form.validate()?;
        self.season.validate()?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    range: RangeInclusive<f64>,
    value: f64,
) -> Result<(), InvalidConfig> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InvalidConfig::OutOfRange {
            field,
            range,
            value,
        })
    }
}
