//! Scoring, ranking and statistics engine for football prediction pools.
//! Turns match bets and season bets into per-user scores, ranks users into tie-aware leaderboards
//! over several matchday windows, and derives form, position history and dispersion statistics.

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod file;
pub mod history;
pub mod points;
pub mod print;
pub mod stats;
pub mod store;
pub mod table;
pub mod vote;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
