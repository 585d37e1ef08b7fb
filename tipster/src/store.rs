//! Interfaces to the collaborators that feed the engine and receive its output, plus a
//! [MemoryStore] implementing all of them over a single season.

use std::io;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    Bet, Match, MatchId, Score, SeasonBet, SeasonResult, TableRow, TopMatchVote, User,
};
use crate::file::ReadJsonFile;
use crate::table::TableWindow;

/// Source of match, bet and result records. Absent records come back as empty collections,
/// never as errors.
pub trait MatchStore {
    fn matches_by_matchday(&self, season: i32, matchday: u32) -> Vec<Match>;

    fn bets_for_match(&self, match_id: MatchId) -> Vec<Bet>;

    fn season_bets(&self, season: i32) -> Vec<SeasonBet>;

    fn season_results(&self, season: i32) -> Vec<SeasonResult>;

    fn score_snapshot(&self, season: i32, matchday: u32) -> Vec<Score>;

    fn top_match_votes(&self, season: i32) -> Vec<TopMatchVote>;
}

pub trait UserDirectory {
    fn active_users(&self) -> Vec<User>;
}

/// Write-only destination for computed snapshots and tables.
pub trait ScoreSink {
    fn set_score_snapshot(&mut self, season: i32, matchday: u32, scores: &[Score]);

    fn set_table_view(
        &mut self,
        season: i32,
        matchday: u32,
        window: TableWindow,
        rows: &[TableRow],
    );
}

/// Raw records of one season, as stored in a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonData {
    pub season: i32,
    pub users: Vec<User>,
    pub matches: Vec<Match>,
    pub bets: Vec<Bet>,
    pub season_bets: Vec<SeasonBet>,
    pub season_results: Vec<SeasonResult>,
    pub votes: Vec<TopMatchVote>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: SeasonData,
    bets_by_match: FxHashMap<MatchId, Vec<Bet>>,
    snapshots: FxHashMap<(i32, u32), Vec<Score>>,
    tables: FxHashMap<(i32, u32, TableWindow), Vec<TableRow>>,
}
impl MemoryStore {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let data = SeasonData::read_json_file(path)?;
        Ok(data.into())
    }

    pub fn season(&self) -> i32 {
        self.data.season
    }

    /// The last matchday of the store's season with at least one finished match, or 0 if none
    /// has finished.
    pub fn latest_matchday(&self) -> u32 {
        self.data
            .matches
            .iter()
            .filter(|fixture| {
                fixture.season == self.data.season && fixture.is_finished && fixture.matchday > 0
            })
            .map(|fixture| fixture.matchday as u32)
            .max()
            .unwrap_or_default()
    }

    pub fn table_view(
        &self,
        season: i32,
        matchday: u32,
        window: TableWindow,
    ) -> Option<&[TableRow]> {
        self.tables
            .get(&(season, matchday, window))
            .map(Vec::as_slice)
    }
}

impl From<SeasonData> for MemoryStore {
    fn from(data: SeasonData) -> Self {
        let mut bets_by_match: FxHashMap<MatchId, Vec<Bet>> = FxHashMap::default();
        for bet in &data.bets {
            bets_by_match
                .entry(bet.match_id)
                .or_default()
                .push(bet.clone());
        }
        debug!(
            "loaded season {}: {} users, {} matches, {} bets",
            data.season,
            data.users.len(),
            data.matches.len(),
            data.bets.len()
        );
        Self {
            data,
            bets_by_match,
            snapshots: FxHashMap::default(),
            tables: FxHashMap::default(),
        }
    }
}

impl MatchStore for MemoryStore {
    fn matches_by_matchday(&self, season: i32, matchday: u32) -> Vec<Match> {
        self.data
            .matches
            .iter()
            .filter(|fixture| fixture.season == season && fixture.matchday == matchday as i32)
            .cloned()
            .collect()
    }

    fn bets_for_match(&self, match_id: MatchId) -> Vec<Bet> {
        self.bets_by_match
            .get(&match_id)
            .cloned()
            .unwrap_or_default()
    }

    fn season_bets(&self, season: i32) -> Vec<SeasonBet> {
        self.data
            .season_bets
            .iter()
            .filter(|bet| bet.season == season)
            .cloned()
            .collect()
    }

    fn season_results(&self, season: i32) -> Vec<SeasonResult> {
        self.data
            .season_results
            .iter()
            .filter(|result| result.season == season)
            .cloned()
            .collect()
    }

    fn score_snapshot(&self, season: i32, matchday: u32) -> Vec<Score> {
        self.snapshots
            .get(&(season, matchday))
            .cloned()
            .unwrap_or_default()
    }

    fn top_match_votes(&self, season: i32) -> Vec<TopMatchVote> {
        if season == self.data.season {
            self.data.votes.clone()
        } else {
            vec![]
        }
    }
}

impl UserDirectory for MemoryStore {
    fn active_users(&self) -> Vec<User> {
        self.data.users.clone()
    }
}

impl ScoreSink for MemoryStore {
    fn set_score_snapshot(&mut self, season: i32, matchday: u32, scores: &[Score]) {
        self.snapshots.insert((season, matchday), scores.to_vec());
    }

    fn set_table_view(
        &mut self,
        season: i32,
        matchday: u32,
        window: TableWindow,
        rows: &[TableRow],
    ) {
        self.tables.insert((season, matchday, window), rows.to_vec());
    }
}
