use assert_float_eq::*;
use tipster_testing::{assert_slice_f64_absolute, assert_slice_f64_relative};

use super::*;
use crate::domain::{Bet, Match};
use crate::history::MatchdayRecord;
use crate::testing;

/// One matchday of two finished matches, each tipped by users 1, 2 and 3.
fn matchday_record(matchday: i32) -> MatchdayRecord {
    let base = i64::from(matchday) * 10;
    let matches: Vec<Match> = vec![
        testing::fixture(base + 1, matchday, (1, 0), false),
        testing::fixture(base + 2, matchday, (2, 2), false),
    ];
    let bets = (1..=3)
        .flat_map(|user_id| {
            [
                Bet::new(base + 1, user_id, 1, 0),
                Bet::new(base + 2, user_id, 1, 1),
            ]
        })
        .collect();
    MatchdayRecord { matches, bets }
}

fn matches(matchdays: i32) -> MatchHistory {
    (1..=matchdays).map(matchday_record).collect::<Vec<_>>().into()
}

fn single_snapshot(user_points: u32, other_points: u32) -> ScoreHistory {
    ScoreHistory::from(vec![vec![
        testing::points(1, user_points),
        testing::points(2, other_points),
        testing::points(3, other_points),
    ]])
}

fn shares(frequencies: &[ResultFrequency]) -> Vec<(&str, f64)> {
    frequencies
        .iter()
        .map(|frequency| (frequency.result.as_str(), frequency.fraction))
        .collect()
}

fn config_with_reference(reference_points_per_match: f64) -> Config {
    Config {
        form: FormParams {
            reference_points_per_match,
            ..FormParams::default()
        },
        ..Config::default()
    }
}

#[test]
fn recency_weights_normalised() {
    let weights = recency_weights(6, 2.5);
    assert_eq!(6, weights.len());
    assert_float_relative_eq!(1.0, weights.iter().sum::<f64>(), 1e-9);
    assert_float_relative_eq!(2.5, weights[5] / weights[0], 1e-9);
    for index in 1..weights.len() {
        assert!(weights[index] > weights[index - 1]);
    }
    assert_eq!(vec![1.0], recency_weights(1, 2.5));
    assert!(recency_weights(0, 2.5).is_empty());
}

#[test]
fn squash_bounds() {
    let params = FormParams::default();
    assert_float_absolute_eq!(0.0, squash(1.0, &params), 1e-12);
    assert!(squash(100.0, &params) <= params.squash_scale);
    assert!(squash(0.0, &params) >= -params.squash_scale);
    assert_float_relative_eq!(-squash(2.0, &params), squash(0.0, &params), 1e-12);
}

#[test]
fn form_at_par() {
    // two points from two matches, opponents averaging one point per bet
    let scores = single_snapshot(2, 2);
    let matches = matches(1);
    let config = config_with_reference(1.0);
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    assert_float_absolute_eq!(0.0, stats.form(1, 1), 1e-9);
}

#[test]
fn form_above_par() {
    let scores = single_snapshot(4, 2);
    let matches = matches(1);
    let config = config_with_reference(1.0);
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    // 10·tanh(2.25) ≈ 9.78
    assert_float_absolute_eq!(9.8, stats.form(1, 1), 1e-9);

    let config = Config::default();
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    assert_float_absolute_eq!(9.8, stats.form(1, 1), 1e-9);
}

#[test]
fn form_below_par() {
    let scores = single_snapshot(1, 2);
    let matches = matches(1);
    let config = config_with_reference(1.0);
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    // 10·tanh(-1.125) ≈ -8.10
    assert_float_absolute_eq!(-8.1, stats.form(1, 1), 1e-9);
}

#[test]
fn form_without_signal() {
    let scores = single_snapshot(0, 2);
    let matches = matches(1);
    let config = Config::default();
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    assert_eq!(config.form.no_signal, stats.form(1, 1));
    assert_eq!(config.form.no_signal, stats.form(1, 0));

    let empty = MatchHistory::default();
    let scores = single_snapshot(3, 2);
    let stats = TendencyStatistics::new(&scores, &empty, &config);
    assert_eq!(config.form.no_signal, stats.form(1, 1));
}

#[test]
fn form_favours_recent_matchdays() {
    let config = config_with_reference(1.0);
    let matches = matches(3);
    let improving = ScoreHistory::from(vec![
        vec![testing::points(1, 1), testing::points(2, 2), testing::points(3, 2)],
        vec![testing::points(1, 2), testing::points(2, 2), testing::points(3, 2)],
        vec![testing::points(1, 3), testing::points(2, 2), testing::points(3, 2)],
    ]);
    let declining = ScoreHistory::from(vec![
        vec![testing::points(1, 3), testing::points(2, 2), testing::points(3, 2)],
        vec![testing::points(1, 2), testing::points(2, 2), testing::points(3, 2)],
        vec![testing::points(1, 1), testing::points(2, 2), testing::points(3, 2)],
    ]);
    let improving_stats = TendencyStatistics::new(&improving, &matches, &config);
    let declining_stats = TendencyStatistics::new(&declining, &matches, &config);
    let improving_form = improving_stats.form(1, 3);
    let declining_form = declining_stats.form(1, 3);
    assert!(improving_form > 0.0, "{improving_form}");
    assert!(declining_form < 0.0, "{declining_form}");

    let history = improving_stats.form_history(1, 1, 3);
    assert_eq!(3, history.len());
    assert_slice_f64_absolute(&[-8.1, history[1], improving_form], &history, 1e-9);
}

#[test]
fn form_ignores_unfinished_matches() {
    let mut record = matchday_record(1);
    record.matches[1].is_finished = false;
    record.matches[1].goals_home = -1;
    record.matches[1].goals_away = -1;
    let matches = MatchHistory::from(vec![record]);
    // one finished match, opponents averaging one point per bet
    let scores = single_snapshot(1, 1);
    let config = config_with_reference(1.0);
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    assert_float_absolute_eq!(0.0, stats.form(1, 1), 1e-9);
}

#[test]
fn position_history_reranks_each_matchday() {
    let scores = ScoreHistory::from(vec![
        vec![testing::points(1, 3), testing::points(2, 1)],
        vec![testing::points(1, 0), testing::points(2, 4)],
        vec![testing::points(1, 2), testing::points(2, 0), testing::points(3, 9)],
    ]);
    let matches = MatchHistory::default();
    let config = Config::default();
    let stats = TendencyStatistics::new(&scores, &matches, &config);
    assert_eq!(vec![Some(2), Some(1), Some(2)], stats.position_history(2, 3));
    assert_eq!(vec![Some(1), Some(2), Some(2)], stats.position_history(1, 3));
    assert_eq!(vec![None, None, Some(1)], stats.position_history(3, 3));
    assert!(stats.position_history(1, 0).is_empty());
}

#[test]
fn percentiles_of_ten() {
    let samples = [7.0, 2.0, 4.0, 9.0, 4.0, 3.0, 8.0, 4.0, 6.0, 5.0];
    let box_plot = box_plot(&samples).unwrap();
    assert_eq!(
        BoxPlot {
            minimum: 2.0,
            lower_quartile: 4.0,
            median: 4.5,
            upper_quartile: 7.0,
            maximum: 9.0,
        },
        box_plot
    );
}

#[test]
fn percentiles_of_one() {
    let box_plot = box_plot(&[8.0]).unwrap();
    assert_slice_f64_relative(
        &[8.0; 5],
        &[
            box_plot.minimum,
            box_plot.lower_quartile,
            box_plot.median,
            box_plot.upper_quartile,
            box_plot.maximum,
        ],
        f64::EPSILON,
    );
    assert!(super::box_plot(&[]).is_none());
}

#[test]
fn percentile_of_even_pair() {
    assert_eq!(Some(3.0), percentile(&[2.0, 4.0], 50));
    assert_eq!(Some(2.0), percentile(&[2.0, 4.0], 25));
    assert_eq!(Some(4.0), percentile(&[2.0, 4.0], 75));
}

#[test]
fn percentile_undefined() {
    assert_eq!(None, percentile(&[], 50));
    assert_eq!(None, percentile(&[2.0, 4.0], 0));
    assert_eq!(None, percentile(&[2.0, 4.0], 100));
}

#[test]
fn mean_and_population_std_dev() {
    let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_float_relative_eq!(5.0, mean(&samples), 1e-12);
    assert_float_relative_eq!(2.0, std_dev(&samples), 1e-12);
    assert_eq!(0.0, mean(&[]));
    assert_eq!(0.0, std_dev(&[]));
    assert_eq!(0.0, std_dev(&[3.0]));
}

#[test]
fn user_point_series_statistics() {
    let snapshots: Vec<_> = [2, 3, 4, 4, 4, 5, 6, 7, 8, 9]
        .into_iter()
        .map(|points| vec![testing::points(1, points)])
        .collect();
    let scores = ScoreHistory::from(snapshots);
    let matches = MatchHistory::default();
    let config = Config::default();
    let stats = TendencyStatistics::new(&scores, &matches, &config);

    let box_plot = stats.box_plot(1, 10).unwrap();
    assert_eq!(4.5, box_plot.median);
    assert_float_relative_eq!(5.2, stats.mean_points(1, 10), 1e-12);
    assert_float_relative_eq!(2.1354156504, stats.std_dev(1, 10), 1e-9);

    let first = stats.box_plot(1, 1).unwrap();
    assert_eq!(2.0, first.maximum);
    assert!(stats.box_plot(1, 0).is_none());
}

#[test]
fn frequencies_sorted_descending() {
    let frequencies = frequencies(["1-0", "2-1", "1-0", "0-0"].map(String::from));
    assert_eq!(
        vec![("1-0", 0.5), ("2-1", 0.25), ("0-0", 0.25)],
        shares(&frequencies)
    );
    assert!(super::frequencies(Vec::<String>::new()).is_empty());
}

#[test]
fn most_frequent_bets_and_results() {
    let mut matches = matches(2);
    matches.push(MatchdayRecord {
        matches: vec![testing::fixture(31, 3, (-1, -1), false)],
        bets: vec![Bet::new(31, 1, 3, 0), Bet::unknown(31, 2)],
    });
    let scores = ScoreHistory::default();
    let config = Config::default();
    let stats = TendencyStatistics::new(&scores, &matches, &config);

    let bets = stats.most_frequent_bets(1, 3);
    assert_eq!(3, bets.len());
    assert_eq!(("1-0", 0.4), (bets[0].result.as_str(), bets[0].fraction));
    assert_eq!(("1-1", 0.4), (bets[1].result.as_str(), bets[1].fraction));
    assert_eq!(("3-0", 0.2), (bets[2].result.as_str(), bets[2].fraction));
    let total: f64 = bets.iter().map(|frequency| frequency.fraction).sum();
    assert_float_relative_eq!(1.0, total, 1e-12);

    assert!(stats.most_frequent_bets(2, 0).is_empty());
    assert_eq!(2, stats.most_frequent_bets(2, 3).len());

    let results = stats.most_frequent_results(3);
    assert_eq!(vec![("1-0", 0.5), ("2-2", 0.5)], shares(&results));
}
