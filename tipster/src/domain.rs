//! Value records consumed and produced by the engine. Unknown goals, teams and matchdays are
//! carried as the [UNKNOWN] sentinel rather than as absent values, so that records deserialised
//! from a store always have a well-defined shape.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type MatchId = i64;
pub type TeamId = i64;

/// Sentinel for an unavailable goal count, team or matchday.
pub const UNKNOWN: i32 = -1;

/// Sentinel for an unavailable team.
pub const UNKNOWN_TEAM: TeamId = -1;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tendency {
    Draw,
    HomeWin,
    AwayWin,
}
impl Tendency {
    /// The coarse outcome of a scoreline, or `None` if either side is unknown.
    pub fn of(goals_home: i32, goals_away: i32) -> Option<Tendency> {
        if goals_home < 0 || goals_away < 0 {
            return None;
        }
        Some(match goals_home.cmp(&goals_away) {
            Ordering::Equal => Tendency::Draw,
            Ordering::Greater => Tendency::HomeWin,
            Ordering::Less => Tendency::AwayWin,
        })
    }
}

fn result_key(goals_home: i32, goals_away: i32) -> Option<String> {
    if goals_home < 0 || goals_away < 0 {
        None
    } else {
        Some(format!("{goals_home}-{goals_away}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub season: i32,
    pub matchday: i32,
    pub is_finished: bool,
    pub is_top_match: bool,
    pub goals_home: i32,
    pub goals_away: i32,
}
impl Match {
    pub fn unknown() -> Self {
        Self {
            id: -1,
            season: UNKNOWN,
            matchday: UNKNOWN,
            is_finished: false,
            is_top_match: false,
            goals_home: UNKNOWN,
            goals_away: UNKNOWN,
        }
    }

    pub fn tendency(&self) -> Option<Tendency> {
        Tendency::of(self.goals_home, self.goals_away)
    }

    pub fn has_result(&self) -> bool {
        self.goals_home >= 0 && self.goals_away >= 0
    }

    pub fn result_key(&self) -> Option<String> {
        result_key(self.goals_home, self.goals_away)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub match_id: MatchId,
    pub user_id: UserId,
    pub goals_home: i32,
    pub goals_away: i32,
}
impl Bet {
    pub fn new(match_id: MatchId, user_id: UserId, goals_home: i32, goals_away: i32) -> Self {
        Self {
            match_id,
            user_id,
            goals_home,
            goals_away,
        }
    }

    pub fn unknown(match_id: MatchId, user_id: UserId) -> Self {
        Self::new(match_id, user_id, UNKNOWN, UNKNOWN)
    }

    pub fn tendency(&self) -> Option<Tendency> {
        Tendency::of(self.goals_home, self.goals_away)
    }

    pub fn has_result(&self) -> bool {
        self.goals_home >= 0 && self.goals_away >= 0
    }

    pub fn result_key(&self) -> Option<String> {
        result_key(self.goals_home, self.goals_away)
    }
}

/// A user's guess of which team finishes in a signed `place` slot. Positive places count from the
/// top of the table, negative places count backward from the last place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonBet {
    pub season: i32,
    pub place: i32,
    pub team_id: TeamId,
    pub user_id: UserId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResult {
    pub season: i32,
    pub place: i32,
    pub team_id: TeamId,
}
impl SeasonResult {
    pub fn unknown(season: i32, place: i32) -> Self {
        Self {
            season,
            place,
            team_id: UNKNOWN_TEAM,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMatchVote {
    pub match_id: MatchId,
    pub user_id: UserId,
    pub timestamp: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub display_name: String,
}

/// Accumulated points of one user. `points` always equals the sum of every contribution ever
/// merged in, so the bonus fields are breakdowns of `points` rather than independent counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub user_id: UserId,
    pub points: u32,
    pub matches: u32,
    pub results: u32,
    pub extra_top: u32,
    pub extra_outsider: u32,
    pub extra_season: u32,
}
impl Score {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Orders scores best-first: more points, then more correct tendencies, then more exact
    /// results. Scores that compare equal share a table position.
    pub fn compare(&self, other: &Score) -> Ordering {
        other
            .points
            .cmp(&self.points)
            .then_with(|| other.matches.cmp(&self.matches))
            .then_with(|| other.results.cmp(&self.results))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::new(self.user_id)
    }
}

impl AddAssign<&Score> for Score {
    fn add_assign(&mut self, rhs: &Score) {
        assert_eq!(
            self.user_id, rhs.user_id,
            "cannot merge the score of user {} into user {}",
            rhs.user_id, self.user_id
        );
        self.points += rhs.points;
        self.matches += rhs.matches;
        self.results += rhs.results;
        self.extra_top += rhs.extra_top;
        self.extra_outsider += rhs.extra_outsider;
        self.extra_season += rhs.extra_season;
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self += &rhs;
    }
}

impl Add for Score {
    type Output = Score;

    fn add(mut self, rhs: Score) -> Self::Output {
        self += &rhs;
        self
    }
}

/// One leaderboard line. `position` is shared by rows whose scores compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub position: u32,
    pub user_id: UserId,
    pub user_name: String,
    pub points: u32,
    pub matches: u32,
    pub results: u32,
    pub extra_top: u32,
    pub extra_outsider: u32,
    pub extra_season: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultFrequency {
    pub result: String,
    pub fraction: f64,
}

impl Display for ResultFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:.1}%)", self.result, self.fraction * 100.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlot {
    pub minimum: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub maximum: f64,
}
