//! Fixtures shared by the unit tests.

use crate::domain::{Bet, Match, Score, SeasonBet, SeasonResult, User, UserId};

pub fn fixture(id: i64, matchday: i32, goals: (i32, i32), is_top_match: bool) -> Match {
    Match {
        id,
        season: 2023,
        matchday,
        is_finished: goals.0 >= 0,
        is_top_match,
        goals_home: goals.0,
        goals_away: goals.1,
    }
}

pub fn users() -> Vec<User> {
    ["Anna", "Bert", "Cleo"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| User {
            id,
            display_name: name.into(),
        })
        .collect()
}

pub fn season_bet(user_id: UserId, place: i32, team_id: i64) -> SeasonBet {
    SeasonBet {
        season: 2023,
        place,
        team_id,
        user_id,
    }
}

pub fn season_result(place: i32, team_id: i64) -> SeasonResult {
    SeasonResult {
        season: 2023,
        place,
        team_id,
    }
}

/// Three users tipping two finished matches; the second is the top match.
///
/// | user | 2-1       | 0-0 (top)  |
/// |------|-----------|------------|
/// | 1    | 2-1 exact | 1-1 draw   |
/// | 2    | 1-0 home  | 0-0 exact  |
/// | 3    | 0-2 wrong | 2-1 wrong  |
pub fn two_matches_three_users() -> (Vec<Match>, Vec<Bet>) {
    let matches = vec![fixture(1, 1, (2, 1), false), fixture(2, 1, (0, 0), true)];
    let bets = vec![
        Bet::new(1, 1, 2, 1),
        Bet::new(2, 1, 1, 1),
        Bet::new(1, 2, 1, 0),
        Bet::new(2, 2, 0, 0),
        Bet::new(1, 3, 0, 2),
        Bet::new(2, 3, 2, 1),
    ];
    (matches, bets)
}

/// Hand-computed totals of [two_matches_three_users] under the default rules, best first.
pub fn two_matches_three_users_scores() -> Vec<Score> {
    vec![
        // match 1: 1 + outsider 1; match 2: (1 + 1) × 2 + outsider 1
        Score {
            user_id: 2,
            points: 7,
            matches: 2,
            results: 1,
            extra_top: 2,
            extra_outsider: 2,
            extra_season: 0,
        },
        // match 1: 1 + 1 + outsider 1; match 2: 1 × 2 + outsider 1
        Score {
            user_id: 1,
            points: 6,
            matches: 2,
            results: 1,
            extra_top: 1,
            extra_outsider: 2,
            extra_season: 0,
        },
        Score::new(3),
    ]
}

pub fn points(user_id: UserId, points: u32) -> Score {
    Score {
        user_id,
        points,
        ..Score::default()
    }
}
