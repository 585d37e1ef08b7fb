//! Per-user point calculation. A [PointCalculator] accumulates the score of a single user across
//! matches and season bets; [TendencyPointCalculator] implements the tendency/result rule set.

use tracing::trace;

use crate::config::ScoringRules;
use crate::domain::{Bet, Match, Score, SeasonBet, SeasonResult, Tendency, UserId, UNKNOWN_TEAM};

/// Accumulates the score of one user. Alternative rule sets implement this trait, leaving
/// aggregation and statistics untouched.
pub trait PointCalculator {
    fn for_user(user_id: UserId, rules: &ScoringRules) -> Self
    where
        Self: Sized;

    fn user_id(&self) -> UserId;

    /// Scores the user's bet on `fixture`, given every bet placed on that match.
    fn add_single_match_score(&mut self, bets: &[Bet], fixture: &Match);

    /// Scores the user's season bets against the final table.
    fn add_season_score(&mut self, bets: &[SeasonBet], results: &[SeasonResult]);

    /// Merges an externally supplied offset into the match-derived score.
    fn add_score(&mut self, offset: &Score);

    fn score(&self, include_season: bool) -> Score;
}

#[derive(Debug, Clone)]
pub struct TendencyPointCalculator {
    rules: ScoringRules,
    match_score: Score,
    season_score: Score,
}

impl TendencyPointCalculator {
    fn single_match_score(&self, bets: &[Bet], fixture: &Match) -> Score {
        let mut score = Score::new(self.user_id());
        let bet = match bets.iter().find(|bet| bet.user_id == self.user_id()) {
            Some(bet) if bet.match_id == fixture.id => bet,
            _ => return score,
        };

        let tendency = bet.tendency();
        if tendency.is_some() && tendency == fixture.tendency() {
            score.matches += 1;
            score.points += self.rules.tendency_points;
        }
        if bet.has_result()
            && fixture.has_result()
            && bet.goals_home == fixture.goals_home
            && bet.goals_away == fixture.goals_away
        {
            score.results += 1;
            score.points += self.rules.result_bonus_points;
        }

        if fixture.is_top_match {
            let base = score.points;
            score.extra_top += base * (self.rules.top_match_factor - 1);
            score.points *= self.rules.top_match_factor;
        }

        if score.points > 0 {
            if let Some(tendency) = tendency {
                let bonus = self.outsider_bonus(bets, fixture, tendency);
                score.extra_outsider += bonus;
                score.points += bonus;
            }
        }
        score
    }

    fn outsider_bonus(&self, bets: &[Bet], fixture: &Match, tendency: Tendency) -> u32 {
        let sharing = bets
            .iter()
            .filter(|bet| bet.match_id == fixture.id && bet.tendency() == Some(tendency))
            .count();
        match sharing {
            1 => self.rules.outsider_bonus_one,
            2 => self.rules.outsider_bonus_two,
            _ => 0,
        }
    }

    fn season_bet_points(&self, bet: &SeasonBet, results: &[SeasonResult]) -> u32 {
        let result = results
            .iter()
            .find(|result| result.place == bet.place)
            .cloned()
            .unwrap_or_else(|| SeasonResult::unknown(bet.season, bet.place));

        if bet.team_id == result.team_id {
            match bet.place {
                1 => self.rules.first_place_exact,
                2 => self.rules.second_place_exact,
                _ => self.rules.relegation_exact,
            }
        } else if bet.place < 0 {
            let relegated = results
                .iter()
                .filter(|result| result.place < 0 && result.team_id == bet.team_id)
                .count() as u32;
            relegated * self.rules.relegation_correct_not_exact
        } else {
            0
        }
    }
}

impl PointCalculator for TendencyPointCalculator {
    /// Panics if `rules` do not validate.
    fn for_user(user_id: UserId, rules: &ScoringRules) -> Self {
        if let Err(err) = rules.validate() {
            panic!("invalid scoring rules: {err}");
        }
        Self {
            rules: rules.clone(),
            match_score: Score::new(user_id),
            season_score: Score::new(user_id),
        }
    }

    fn user_id(&self) -> UserId {
        self.match_score.user_id
    }

    fn add_single_match_score(&mut self, bets: &[Bet], fixture: &Match) {
        let score = self.single_match_score(bets, fixture);
        if !score.is_zero() {
            trace!("user {} scored on match {}: {score:?}", self.user_id(), fixture.id);
        }
        self.match_score += &score;
    }

    fn add_season_score(&mut self, bets: &[SeasonBet], results: &[SeasonResult]) {
        let season_points: u32 = bets
            .iter()
            .filter(|bet| bet.user_id == self.user_id() && bet.team_id != UNKNOWN_TEAM)
            .map(|bet| self.season_bet_points(bet, results))
            .sum();
        trace!("user {} scored {season_points} season points", self.user_id());
        self.season_score.points += season_points;
        self.season_score.extra_season += season_points;
    }

    fn add_score(&mut self, offset: &Score) {
        self.match_score += offset;
    }

    fn score(&self, include_season: bool) -> Score {
        let mut score = self.match_score.clone();
        if include_season {
            score += &self.season_score;
        }
        score
    }
}
