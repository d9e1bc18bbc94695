//! Aggregations over a slice of game records.
//!
//! All of these are recomputed from scratch on every call; the collection
//! never grows past a few hundred games.

use std::cmp::Reverse;

use crate::models::{GameRecord, GameStats, PerformanceSeries, Winner};

pub fn compute_stats(games: &[GameRecord]) -> GameStats {
    games.iter().fold(
        GameStats {
            total: games.len(),
            ..GameStats::default()
        },
        |mut stats, game| {
            match game.winner {
                Winner::Nithin => stats.nithin += 1,
                Winner::Vishvesh => stats.vishvesh += 1,
                Winner::Draw => stats.draws += 1,
            }
            stats
        },
    )
}

/// Newest first: date descending, then game number descending.
pub fn sorted_newest_first(games: &[GameRecord]) -> Vec<GameRecord> {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|game| Reverse(game.sort_key()));
    sorted
}

pub fn recent_games(games: &[GameRecord], limit: usize) -> Vec<GameRecord> {
    let mut recent = sorted_newest_first(games);
    recent.truncate(limit);
    recent
}

/// Running win totals per player, one point per game in play order.
pub fn performance_series(games: &[GameRecord]) -> PerformanceSeries {
    let mut ordered: Vec<&GameRecord> = games.iter().collect();
    ordered.sort_by_key(|game| game.sort_key());

    let mut series = PerformanceSeries {
        labels: Vec::with_capacity(ordered.len()),
        nithin: Vec::with_capacity(ordered.len()),
        vishvesh: Vec::with_capacity(ordered.len()),
    };

    let (mut nithin_wins, mut vishvesh_wins) = (0, 0);
    for (index, game) in ordered.into_iter().enumerate() {
        match game.winner {
            Winner::Nithin => nithin_wins += 1,
            Winner::Vishvesh => vishvesh_wins += 1,
            Winner::Draw => {}
        }

        series.labels.push(format!("Game {}", index + 1));
        series.nithin.push(nithin_wins);
        series.vishvesh.push(vishvesh_wins);
    }

    series
}
