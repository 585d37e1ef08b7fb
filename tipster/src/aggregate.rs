//! Aggregation of scores across users. A [ScoreAggregator] owns one [PointCalculator] per user,
//! created lazily the first time the user is seen, and is meant to live for a single computation
//! pass.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::config::ScoringRules;
use crate::domain::{Bet, Match, Score, SeasonBet, SeasonResult, UserId};
use crate::points::{PointCalculator, TendencyPointCalculator};

#[derive(Debug, Clone)]
pub struct ScoreAggregator<C: PointCalculator = TendencyPointCalculator> {
    rules: ScoringRules,
    user_to_index: FxHashMap<UserId, usize>,
    calculators: Vec<C>,
}

impl<C: PointCalculator> ScoreAggregator<C> {
    /// Panics if `rules` do not validate. Callers holding a [crate::config::Config] validate it
    /// once up front.
    pub fn new(rules: &ScoringRules) -> Self {
        if let Err(err) = rules.validate() {
            panic!("invalid scoring rules: {err}");
        }
        Self {
            rules: rules.clone(),
            user_to_index: FxHashMap::default(),
            calculators: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    fn calculator(&mut self, user_id: UserId) -> &mut C {
        let index = match self.user_to_index.get(&user_id) {
            Some(&index) => index,
            None => {
                let index = self.calculators.len();
                self.calculators.push(C::for_user(user_id, &self.rules));
                self.user_to_index.insert(user_id, index);
                index
            }
        };
        &mut self.calculators[index]
    }

    /// Scores every bettor on every match. Users are tracked in the order they first appear in
    /// `bets`.
    pub fn calc_scores(&mut self, matches: &[Match], bets: &[Bet]) {
        let users = distinct_users(bets.iter().map(|bet| bet.user_id));
        for fixture in matches {
            let match_bets: Vec<_> = bets
                .iter()
                .filter(|bet| bet.match_id == fixture.id)
                .cloned()
                .collect();
            for &user_id in &users {
                self.calculator(user_id)
                    .add_single_match_score(&match_bets, fixture);
            }
        }
        debug!(
            "scored {} matches for {} users from {} bets",
            matches.len(),
            users.len(),
            bets.len()
        );
    }

    pub fn calc_season_scores(&mut self, bets: &[SeasonBet], results: &[SeasonResult]) {
        let users = distinct_users(bets.iter().map(|bet| bet.user_id));
        for &user_id in &users {
            let user_bets: Vec<_> = bets
                .iter()
                .filter(|bet| bet.user_id == user_id)
                .cloned()
                .collect();
            self.calculator(user_id).add_season_score(&user_bets, results);
        }
        debug!("scored season bets for {} users", users.len());
    }

    pub fn add_scores(&mut self, scores: &[Score]) {
        for score in scores {
            self.calculator(score.user_id).add_score(score);
        }
    }

    /// Every tracked user's score, best first. Fully tied scores retain the order in which their
    /// users were first seen.
    pub fn scores(&self, include_season: bool) -> Vec<Score> {
        let mut scores: Vec<_> = self
            .calculators
            .iter()
            .map(|calculator| calculator.score(include_season))
            .collect();
        scores.sort_by(Score::compare);
        scores
    }
}

/// Distinct values in order of first appearance.
pub fn distinct_users(user_ids: impl IntoIterator<Item = UserId>) -> Vec<UserId> {
    let mut seen = FxHashSet::default();
    let mut users = vec![];
    for user_id in user_ids {
        if seen.insert(user_id) {
            users.push(user_id);
        }
    }
    users
}
