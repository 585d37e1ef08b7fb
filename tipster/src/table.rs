//! Leaderboards. Scores are ranked with [Score::compare]; rows that compare equal share a
//! position, and the next distinct row resumes at its 1-based index (1, 2, 2, 4, ...).

use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

use crate::aggregate::ScoreAggregator;
use crate::config::{Config, SeasonFormat};
use crate::domain::{Score, TableRow, User, UserId};
use crate::history::ScoreHistory;
use crate::points::TendencyPointCalculator;
use crate::store::UserDirectory;

pub const UNKNOWN_USER: &str = "unknown user";

/// Table positions of `scores`, which must already be sorted best-first.
pub fn positions(scores: &[Score]) -> Vec<u32> {
    let mut positions: Vec<u32> = Vec::with_capacity(scores.len());
    for (index, score) in scores.iter().enumerate() {
        let position = match index {
            0 => 1,
            _ if scores[index - 1].compare(score).is_eq() => positions[index - 1],
            _ => index as u32 + 1,
        };
        positions.push(position);
    }
    positions
}

#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    names: FxHashMap<UserId, String>,
}
impl TableBuilder {
    pub fn new(users: &[User]) -> Self {
        Self {
            names: users
                .iter()
                .map(|user| (user.id, user.display_name.clone()))
                .collect(),
        }
    }

    pub fn from_directory(directory: &impl UserDirectory) -> Self {
        Self::new(&directory.active_users())
    }

    pub fn user_name(&self, user_id: UserId) -> &str {
        self.names
            .get(&user_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_USER)
    }

    /// Ranks `scores` into table rows. Without `include_season`, season points are taken out of
    /// each score before ranking.
    pub fn build(&self, scores: &[Score], include_season: bool) -> Vec<TableRow> {
        let mut scores: Vec<_> = scores
            .iter()
            .cloned()
            .map(|mut score| {
                if !include_season {
                    score.points = score.points.saturating_sub(score.extra_season);
                    score.extra_season = 0;
                }
                score
            })
            .collect();
        scores.sort_by(Score::compare);

        positions(&scores)
            .into_iter()
            .zip(scores)
            .map(|(position, score)| TableRow {
                position,
                user_id: score.user_id,
                user_name: self.user_name(score.user_id).to_string(),
                points: score.points,
                matches: score.matches,
                results: score.results,
                extra_top: score.extra_top,
                extra_outsider: score.extra_outsider,
                extra_season: score.extra_season,
            })
            .collect()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TableWindow {
    Matchday,
    Total,
    LastFive,
    LastTen,
    SecondHalf,
    Final,
}
impl TableWindow {
    /// The matchdays summed into this window when the season stands at `current`. The range is
    /// empty when the window has not started yet.
    pub fn matchdays(&self, current: u32, format: &SeasonFormat) -> RangeInclusive<u32> {
        match self {
            TableWindow::Matchday => current..=current,
            TableWindow::Total => 1..=current,
            TableWindow::LastFive => last(5, current),
            TableWindow::LastTen => last(10, current),
            TableWindow::SecondHalf => format.second_half_start()..=current,
            TableWindow::Final => 1..=format.matchdays,
        }
    }

    pub fn includes_season(&self) -> bool {
        matches!(self, TableWindow::Final)
    }
}

fn last(matchdays: u32, current: u32) -> RangeInclusive<u32> {
    u32::max(1, (current + 1).saturating_sub(matchdays))..=current
}

/// Sums the snapshots in the window into a fresh aggregator, then ranks the totals.
pub fn build_window(
    window: TableWindow,
    current: u32,
    history: &ScoreHistory,
    season_scores: &[Score],
    builder: &TableBuilder,
    config: &Config,
) -> Vec<TableRow> {
    let mut aggregator = ScoreAggregator::<TendencyPointCalculator>::new(&config.rules);
    let matchdays = window.matchdays(current, &config.season);
    for matchday in matchdays.clone() {
        aggregator.add_scores(history.snapshot(matchday));
    }
    if window.includes_season() {
        aggregator.add_scores(season_scores);
    }
    debug!(
        "{window} table over matchdays {matchdays:?}: {} users",
        aggregator.len()
    );
    builder.build(&aggregator.scores(false), window.includes_season())
}
