//! Selection of a matchday's top match from user votes.

use std::cmp::Ordering;

use tinyrand::Rand;
use tracing::debug;

use crate::domain::{MatchId, TopMatchVote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteTally {
    pub match_id: MatchId,
    pub votes: usize,

    /// Timestamp of the most recent vote, or -1 if there were none.
    pub last_vote: i64,
}
impl VoteTally {
    /// Orders tallies best-first: more votes, then the earlier final vote.
    pub fn compare(&self, other: &VoteTally) -> Ordering {
        other
            .votes
            .cmp(&self.votes)
            .then_with(|| self.last_vote.cmp(&other.last_vote))
    }
}

/// Tallies the votes cast for each candidate, in candidate order. Votes for other matches are
/// ignored.
pub fn tally(votes: &[TopMatchVote], candidates: &[MatchId]) -> Vec<VoteTally> {
    candidates
        .iter()
        .map(|&match_id| {
            let (votes, last_vote) = votes
                .iter()
                .filter(|vote| vote.match_id == match_id)
                .fold((0, -1), |(count, last), vote| {
                    (count + 1, i64::max(last, vote.timestamp))
                });
            VoteTally {
                match_id,
                votes,
                last_vote,
            }
        })
        .collect()
}

/// Picks the top match among `candidates`. Candidates that tie on both votes and last vote time
/// are drawn from uniformly using `rand`. Returns `None` only when there are no candidates.
pub fn evaluate_top_match_votes(
    votes: &[TopMatchVote],
    candidates: &[MatchId],
    rand: &mut impl Rand,
) -> Option<MatchId> {
    let mut tallies = tally(votes, candidates);
    tallies.sort_by(VoteTally::compare);
    let leader = tallies.first()?;
    let tied = tallies
        .iter()
        .take_while(|tally| tally.compare(leader).is_eq())
        .count();
    let chosen = &tallies[rand.next_lim_usize(tied)];
    debug!(
        "top match {} with {} votes, drawn from {tied} tied candidates",
        chosen.match_id, chosen.votes
    );
    Some(chosen.match_id)
}
