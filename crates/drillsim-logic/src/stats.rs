//! Aggregate statistics and leaderboard ordering over finished sessions.
//!
//! Nothing here is stored. Aggregates are recomputed from the full result
//! history on every call, so they can never drift from the log.

use serde::{Deserialize, Serialize};

use crate::state::GameResult;

/// Derived totals over a result history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_games: u32,
    pub victories: u32,
    /// Mean score rounded to the nearest integer, 0 for an empty history.
    pub average_score: i32,
    /// Highest score, 0 for an empty history.
    pub best_score: i32,
}

/// Recompute aggregates from a result history.
pub fn aggregate(results: &[GameResult]) -> AggregateStats {
    if results.is_empty() {
        return AggregateStats::default();
    }
    let sum: i64 = results.iter().map(|r| i64::from(r.score)).sum();
    AggregateStats {
        total_games: results.len() as u32,
        victories: results.iter().filter(|r| r.victory).count() as u32,
        average_score: (sum as f64 / results.len() as f64).round() as i32,
        best_score: results.iter().map(|r| r.score).max().unwrap_or(0),
    }
}

/// Leaderboard order: score descending, ties broken by earlier completion.
/// The sort is stable, so equal inputs always rank identically.
pub fn rank_by_score(results: &[GameResult]) -> Vec<GameResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.completed_at.cmp(&b.completed_at))
    });
    ranked
}

/// Top `n` leaderboard entries.
pub fn high_scores(results: &[GameResult], n: usize) -> Vec<GameResult> {
    let mut ranked = rank_by_score(results);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::HazardType;

    fn result(id: &str, score: i32, victory: bool, completed_at: u64) -> GameResult {
        GameResult {
            scenario_id: id.into(),
            hazard: HazardType::Fire,
            scenario_title: "Drill".into(),
            score,
            victory,
            time_spent_s: 60,
            actions_taken: 4,
            health_remaining: 80,
            objectives_completed: 2,
            objectives_total: 2,
            difficulty: 3,
            completed_at,
        }
    }

    #[test]
    fn empty_history_aggregates_to_zeros() {
        assert_eq!(aggregate(&[]), AggregateStats::default());
    }

    #[test]
    fn aggregates_count_round_and_max() {
        let history = vec![
            result("a", 110, true, 1),
            result("b", -5, false, 2),
            result("c", 40, false, 3),
        ];
        let stats = aggregate(&history);
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.victories, 1);
        // (110 - 5 + 40) / 3 = 48.33 rounds to 48.
        assert_eq!(stats.average_score, 48);
        assert_eq!(stats.best_score, 110);
    }

    #[test]
    fn best_score_can_be_negative() {
        let history = vec![result("a", -20, false, 1), result("b", -5, false, 2)];
        assert_eq!(aggregate(&history).best_score, -5);
    }

    #[test]
    fn leaderboard_orders_by_score_then_timestamp() {
        let history = vec![
            result("late_low", 30, false, 50),
            result("early_high", 90, true, 10),
            result("late_high", 90, true, 40),
        ];
        let ranked = rank_by_score(&history);
        let ids: Vec<&str> = ranked.iter().map(|r| r.scenario_id.as_str()).collect();
        assert_eq!(ids, vec!["early_high", "late_high", "late_low"]);
    }

    #[test]
    fn leaderboard_is_deterministic_for_full_ties() {
        // Same score, same timestamp: the stable sort keeps input order.
        let history = vec![
            result("first_in", 50, false, 7),
            result("second_in", 50, false, 7),
        ];
        for _ in 0..3 {
            let ranked = rank_by_score(&history);
            assert_eq!(ranked[0].scenario_id, "first_in");
            assert_eq!(ranked[1].scenario_id, "second_in");
        }
    }

    #[test]
    fn high_scores_truncates() {
        let history = vec![
            result("a", 10, false, 1),
            result("b", 20, false, 2),
            result("c", 30, false, 3),
        ];
        let top = high_scores(&history, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].scenario_id, "c");
        assert_eq!(top[1].scenario_id, "b");
    }
}
