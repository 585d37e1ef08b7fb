//! Per-matchday history of a season. A [ScoreHistory] holds the frozen score snapshot of every
//! matchday; a [MatchHistory] holds the matches and bets those snapshots were computed from.
//! Matchdays are numbered from 1.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::aggregate::ScoreAggregator;
use crate::config::{Config, ScoringRules, SeasonFormat};
use crate::domain::{Bet, Match, Score, UserId};
use crate::points::TendencyPointCalculator;
use crate::store::{MatchStore, ScoreSink};
use crate::table::{build_window, TableBuilder, TableWindow};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistory {
    snapshots: Vec<Vec<Score>>,
}
impl ScoreHistory {
    /// Reads the stored snapshots of matchdays `1..=current`.
    pub fn from_store(store: &impl MatchStore, season: i32, current: u32) -> Self {
        (1..=current)
            .map(|matchday| store.score_snapshot(season, matchday))
            .collect::<Vec<_>>()
            .into()
    }

    pub fn push(&mut self, snapshot: Vec<Score>) {
        self.snapshots.push(snapshot);
    }

    pub fn matchdays(&self) -> u32 {
        self.snapshots.len() as u32
    }

    /// The snapshot of `matchday`, or an empty one if the matchday has not been recorded.
    pub fn snapshot(&self, matchday: u32) -> &[Score] {
        matchday
            .checked_sub(1)
            .and_then(|index| self.snapshots.get(index as usize))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn user_points(&self, user_id: UserId, matchday: u32) -> u32 {
        self.snapshot(matchday)
            .iter()
            .filter(|score| score.user_id == user_id)
            .map(|score| score.points)
            .sum()
    }

    /// Combined points of everyone other than `user_id` on `matchday`.
    pub fn others_points(&self, user_id: UserId, matchday: u32) -> u32 {
        self.snapshot(matchday)
            .iter()
            .filter(|score| score.user_id != user_id)
            .map(|score| score.points)
            .sum()
    }

    /// The user's points on each of the matchdays `1..=matchday`.
    pub fn points_series(&self, user_id: UserId, matchday: u32) -> Vec<u32> {
        (1..=matchday)
            .map(|matchday| self.user_points(user_id, matchday))
            .collect()
    }
}

impl From<Vec<Vec<Score>>> for ScoreHistory {
    fn from(snapshots: Vec<Vec<Score>>) -> Self {
        Self { snapshots }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchdayRecord {
    pub matches: Vec<Match>,
    pub bets: Vec<Bet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    matchdays: Vec<MatchdayRecord>,
}
impl MatchHistory {
    pub fn push(&mut self, record: MatchdayRecord) {
        self.matchdays.push(record);
    }

    pub fn matchdays(&self) -> u32 {
        self.matchdays.len() as u32
    }

    pub fn matchday(&self, matchday: u32) -> Option<&MatchdayRecord> {
        matchday
            .checked_sub(1)
            .and_then(|index| self.matchdays.get(index as usize))
    }

    /// Records of the matchdays `1..=matchday` that have been recorded.
    pub fn up_to(&self, matchday: u32) -> impl Iterator<Item = &MatchdayRecord> {
        self.matchdays.iter().take(matchday as usize)
    }
}

impl From<Vec<MatchdayRecord>> for MatchHistory {
    fn from(matchdays: Vec<MatchdayRecord>) -> Self {
        Self { matchdays }
    }
}

/// Scores one matchday in a fresh aggregator.
pub fn matchday_snapshot(matches: &[Match], bets: &[Bet], rules: &ScoringRules) -> Vec<Score> {
    let mut aggregator = ScoreAggregator::<TendencyPointCalculator>::new(rules);
    aggregator.calc_scores(matches, bets);
    aggregator.scores(false)
}

/// Replays matchdays `1..=current` of `season` from the store.
pub fn load(
    store: &impl MatchStore,
    season: i32,
    current: u32,
    rules: &ScoringRules,
) -> (ScoreHistory, MatchHistory) {
    let mut scores = ScoreHistory::default();
    let mut matches = MatchHistory::default();
    for matchday in 1..=current {
        let fixtures = store.matches_by_matchday(season, matchday);
        let bets: Vec<_> = fixtures
            .iter()
            .flat_map(|fixture| store.bets_for_match(fixture.id))
            .collect();
        trace!(
            "matchday {matchday}: {} matches, {} bets",
            fixtures.len(),
            bets.len()
        );
        scores.push(matchday_snapshot(&fixtures, &bets, rules));
        matches.push(MatchdayRecord {
            matches: fixtures,
            bets,
        });
    }
    debug!("replayed {current} matchdays of season {season}");
    (scores, matches)
}

/// Season-bet scores of every user, best first. Bets on places outside the season format are
/// ignored.
pub fn season_scores(
    store: &impl MatchStore,
    season: i32,
    format: &SeasonFormat,
    rules: &ScoringRules,
) -> Vec<Score> {
    let bets: Vec<_> = store
        .season_bets(season)
        .into_iter()
        .filter(|bet| {
            let valid = format.is_valid_place(bet.place);
            if !valid {
                trace!("ignoring season bet on place {}: {bet:?}", bet.place);
            }
            valid
        })
        .collect();
    let mut aggregator = ScoreAggregator::<TendencyPointCalculator>::new(rules);
    aggregator.calc_season_scores(&bets, &store.season_results(season));
    aggregator.scores(true)
}

/// Writes the snapshot of `current` and every window table for it to `sink`.
pub fn publish(
    sink: &mut impl ScoreSink,
    builder: &TableBuilder,
    scores: &ScoreHistory,
    season_scores: &[Score],
    season: i32,
    current: u32,
    config: &Config,
) {
    sink.set_score_snapshot(season, current, scores.snapshot(current));
    for window in TableWindow::iter() {
        let rows = build_window(window, current, scores, season_scores, builder, config);
        sink.set_table_view(season, current, window, &rows);
    }
    debug!("published matchday {current} of season {season}");
}
