use std::fmt;

use super::GameResult;

/// Aggregate statistics over a set of games.
///
/// Round statistics only cover games that ended by reaching the victory
/// points, so they read as rounds to threshold. They are `None` when no game
/// got there.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionSummary {
    pub games: usize,
    /// Share of games that ended by reaching the victory points.
    pub success_rate: f64,
    pub mean_rounds: Option<f64>,
    pub median_rounds: Option<f64>,
    /// Population standard deviation.
    pub stdev_rounds: Option<f64>,
    /// Games won per seat. Shared wins count for every winner.
    pub wins: Vec<usize>,
}

impl CompetitionSummary {
    pub fn from_results(num_players: usize, results: &[GameResult]) -> Self {
        let mut wins = vec![0; num_players];
        for idx in results.iter().flat_map(|r| r.winners.iter()) {
            if let Some(count) = wins.get_mut(*idx) {
                *count += 1;
            }
        }

        let mut rounds: Vec<f64> = results
            .iter()
            .filter(|r| r.reached_threshold())
            .map(|r| f64::from(r.rounds))
            .collect();
        rounds.sort_by(f64::total_cmp);

        let games = results.len();
        let success_rate = if games == 0 {
            0.0
        } else {
            rounds.len() as f64 / games as f64
        };

        let mean_rounds = mean(&rounds);
        let stdev_rounds = mean_rounds.map(|m| {
            let variance = rounds.iter().map(|r| (r - m).powi(2)).sum::<f64>() / rounds.len() as f64;
            variance.sqrt()
        });

        Self {
            games,
            success_rate,
            mean_rounds,
            median_rounds: median(&rounds),
            stdev_rounds,
            wins,
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Expects `sorted` to be sorted.
fn median(sorted: &[f64]) -> Option<f64> {
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        n if n % 2 == 0 => Some((sorted[mid - 1] + sorted[mid]) / 2.0),
        _ => Some(sorted[mid]),
    }
}

impl fmt::Display for CompetitionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games: {}", self.games)?;
        writeln!(f, "success rate: {:.1}%", self.success_rate * 100.0)?;
        match (self.mean_rounds, self.median_rounds, self.stdev_rounds) {
            (Some(mean), Some(median), Some(stdev)) => writeln!(
                f,
                "rounds to threshold: mean {mean:.2} median {median:.1} stdev {stdev:.2}"
            )?,
            _ => writeln!(f, "rounds to threshold: n/a")?,
        }
        for (idx, wins) in self.wins.iter().enumerate() {
            writeln!(f, "seat {idx} wins: {wins}")?;
        }
        Ok(())
    }
}
