//! User statistics derived from a season's history: the form index, position history, dispersion
//! of matchday points, and frequency tables of tipped and actual results.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::aggregate::ScoreAggregator;
use crate::config::{Config, FormParams};
use crate::domain::{BoxPlot, ResultFrequency, UserId};
use crate::history::{MatchHistory, ScoreHistory};
use crate::points::TendencyPointCalculator;
use crate::table::positions;

pub trait StatisticsCalculator {
    /// Recency-weighted performance over the matchdays leading up to `matchday`, bounded to the
    /// squash scale.
    fn form(&self, user_id: UserId, matchday: u32) -> f64;

    fn form_history(&self, user_id: UserId, start: u32, end: u32) -> Vec<f64> {
        (start..=end)
            .map(|matchday| self.form(user_id, matchday))
            .collect()
    }

    /// The user's table position after each of the matchdays `1..=matchday`; `None` where the
    /// user had not yet appeared.
    fn position_history(&self, user_id: UserId, matchday: u32) -> Vec<Option<u32>>;

    fn box_plot(&self, user_id: UserId, matchday: u32) -> Option<BoxPlot>;

    fn mean_points(&self, user_id: UserId, matchday: u32) -> f64;

    fn std_dev(&self, user_id: UserId, matchday: u32) -> f64;

    fn most_frequent_bets(&self, user_id: UserId, matchday: u32) -> Vec<ResultFrequency>;

    fn most_frequent_results(&self, matchday: u32) -> Vec<ResultFrequency>;
}

pub struct TendencyStatistics<'a> {
    scores: &'a ScoreHistory,
    matches: &'a MatchHistory,
    config: &'a Config,
}

/// Inputs of the form index for one user on one matchday.
#[derive(Debug, Default, PartialEq)]
struct FormSample {
    user_points: u32,
    others_points: u32,
    finished_matches: usize,
    others_bets: usize,
}

impl<'a> TendencyStatistics<'a> {
    pub fn new(scores: &'a ScoreHistory, matches: &'a MatchHistory, config: &'a Config) -> Self {
        Self {
            scores,
            matches,
            config,
        }
    }

    fn form_sample(&self, user_id: UserId, matchday: u32) -> FormSample {
        let mut sample = FormSample {
            user_points: self.scores.user_points(user_id, matchday),
            others_points: self.scores.others_points(user_id, matchday),
            ..FormSample::default()
        };
        if let Some(record) = self.matches.matchday(matchday) {
            let finished: Vec<_> = record
                .matches
                .iter()
                .filter(|fixture| fixture.is_finished)
                .map(|fixture| fixture.id)
                .collect();
            sample.finished_matches = finished.len();
            sample.others_bets = record
                .bets
                .iter()
                .filter(|bet| {
                    bet.user_id != user_id && bet.has_result() && finished.contains(&bet.match_id)
                })
                .count();
        }
        sample
    }

    fn points_samples(&self, user_id: UserId, matchday: u32) -> Vec<f64> {
        self.scores
            .points_series(user_id, matchday)
            .into_iter()
            .map(f64::from)
            .collect()
    }
}

impl StatisticsCalculator for TendencyStatistics<'_> {
    fn form(&self, user_id: UserId, matchday: u32) -> f64 {
        let params = &self.config.form;
        let window = u32::min(params.window, matchday);
        if window == 0 {
            return params.no_signal;
        }

        let weights = recency_weights(window as usize, params.recency_ratio);
        let first = matchday + 1 - window;
        let (mut relative, mut reference) = (0.0, 0.0);
        for (weight, matchday) in weights.into_iter().zip(first..=matchday) {
            let sample = self.form_sample(user_id, matchday);
            trace!("form sample for user {user_id} on matchday {matchday}: {sample:?}");
            let user_points = f64::from(sample.user_points);
            let finished = sample.finished_matches as f64;

            if sample.others_bets > 0 {
                let opponent_rate = f64::from(sample.others_points) / sample.others_bets as f64;
                let expected = opponent_rate * finished;
                if expected > 0.0 {
                    relative += weight * user_points / expected;
                }
            }
            let expected = params.reference_points_per_match * finished;
            if expected > 0.0 {
                reference += weight * user_points / expected;
            }
        }

        if relative == 0.0 {
            return params.no_signal;
        }
        let form = params.relative_weight * squash(relative, params)
            + (1.0 - params.relative_weight) * squash(reference, params);
        (form * 10.0).round() / 10.0
    }

    fn position_history(&self, user_id: UserId, matchday: u32) -> Vec<Option<u32>> {
        let mut aggregator = ScoreAggregator::<TendencyPointCalculator>::new(&self.config.rules);
        (1..=matchday)
            .map(|matchday| {
                aggregator.add_scores(self.scores.snapshot(matchday));
                let scores = aggregator.scores(false);
                positions(&scores)
                    .into_iter()
                    .zip(&scores)
                    .find(|(_, score)| score.user_id == user_id)
                    .map(|(position, _)| position)
            })
            .collect()
    }

    fn box_plot(&self, user_id: UserId, matchday: u32) -> Option<BoxPlot> {
        box_plot(&self.points_samples(user_id, matchday))
    }

    fn mean_points(&self, user_id: UserId, matchday: u32) -> f64 {
        mean(&self.points_samples(user_id, matchday))
    }

    fn std_dev(&self, user_id: UserId, matchday: u32) -> f64 {
        std_dev(&self.points_samples(user_id, matchday))
    }

    fn most_frequent_bets(&self, user_id: UserId, matchday: u32) -> Vec<ResultFrequency> {
        frequencies(
            self.matches
                .up_to(matchday)
                .flat_map(|record| record.bets.iter())
                .filter(|bet| bet.user_id == user_id)
                .filter_map(|bet| bet.result_key()),
        )
    }

    fn most_frequent_results(&self, matchday: u32) -> Vec<ResultFrequency> {
        frequencies(
            self.matches
                .up_to(matchday)
                .flat_map(|record| record.matches.iter())
                .filter(|fixture| fixture.is_finished)
                .filter_map(|fixture| fixture.result_key()),
        )
    }
}

/// Exponential weights for `window` matchdays, oldest first, summing to 1. The newest weight is
/// `ratio` times the oldest.
pub fn recency_weights(window: usize, ratio: f64) -> Vec<f64> {
    if window <= 1 {
        return vec![1.0; window];
    }
    let base = ratio.powf(1.0 / (window - 1) as f64);
    let weights: Vec<_> = (0..window).map(|index| base.powi(index as i32)).collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|weight| weight / sum).collect()
}

/// Maps a performance ratio onto `[-scale, scale]`, with a ratio of 1 mapping to 0.
pub fn squash(ratio: f64, params: &FormParams) -> f64 {
    params.squash_scale * f64::tanh(params.squash_gain * (ratio - 1.0))
}

/// The `percentile` of ascending `sorted` samples. When `n·p/100` is whole, the two straddling
/// samples are averaged. `None` for an empty sample, or a percentile outside `1..100`.
pub fn percentile(sorted: &[f64], percentile: u32) -> Option<f64> {
    if sorted.is_empty() || !(1..100).contains(&percentile) {
        return None;
    }
    let product = sorted.len() * percentile as usize;
    if product % 100 == 0 {
        let index = product / 100 - 1;
        Some((sorted[index] + sorted[index + 1]) / 2.0)
    } else {
        Some(sorted[product / 100])
    }
}

pub fn box_plot(samples: &[f64]) -> Option<BoxPlot> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(BoxPlot {
        minimum: *sorted.first()?,
        lower_quartile: percentile(&sorted, 25)?,
        median: percentile(&sorted, 50)?,
        upper_quartile: percentile(&sorted, 75)?,
        maximum: *sorted.last()?,
    })
}

/// Arithmetic mean; 0 for an empty sample.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

/// Population standard deviation; 0 for an empty sample.
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mean = mean(samples);
    let variance = samples
        .iter()
        .map(|sample| (sample - mean).powi(2))
        .sum::<f64>()
        / samples.len() as f64;
    variance.sqrt()
}

/// Share of each distinct key, most frequent first. Equally frequent keys keep the order in which
/// they were first seen.
pub fn frequencies(keys: impl IntoIterator<Item = String>) -> Vec<ResultFrequency> {
    let mut key_to_index: FxHashMap<String, usize> = FxHashMap::default();
    let mut counts: Vec<(String, usize)> = vec![];
    for key in keys {
        match key_to_index.get(&key) {
            Some(&index) => counts[index].1 += 1,
            None => {
                key_to_index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts.sort_by(|(_, a), (_, b)| b.cmp(a));
    counts
        .into_iter()
        .map(|(result, count)| ResultFrequency {
            result,
            fraction: count as f64 / total as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests;
