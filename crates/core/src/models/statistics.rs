use serde::{Deserialize, Serialize};

/// Aggregate outcome counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub total: usize,
    pub nithin: usize,
    pub vishvesh: usize,
    pub draws: usize,
}

impl GameStats {
    pub fn win_rates(&self) -> WinRates {
        if self.total == 0 {
            return WinRates::default();
        }

        let total = self.total as f64;
        WinRates {
            nithin: self.nithin as f64 / total * 100.0,
            vishvesh: self.vishvesh as f64 / total * 100.0,
        }
    }
}

/// Share of all games won by each player, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WinRates {
    pub nithin: f64,
    pub vishvesh: f64,
}

impl WinRates {
    /// Percentage with one decimal place, e.g. `"33.3%"`.
    pub fn format(rate: f64) -> String {
        format!("{:.1}%", rate)
    }
}

/// Cumulative win counts per game, oldest game first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSeries {
    pub labels: Vec<String>,
    pub nithin: Vec<usize>,
    pub vishvesh: Vec<usize>,
}

impl PerformanceSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Highest cumulative count reached by either player.
    pub fn peak(&self) -> usize {
        let nithin = self.nithin.last().copied().unwrap_or(0);
        let vishvesh = self.vishvesh.last().copied().unwrap_or(0);
        nithin.max(vishvesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_rates_empty() {
        let rates = GameStats::default().win_rates();
        assert_eq!(rates, WinRates::default());
    }

    #[test]
    fn test_win_rates_format() {
        let stats = GameStats {
            total: 3,
            nithin: 1,
            vishvesh: 1,
            draws: 1,
        };
        let rates = stats.win_rates();
        assert_eq!(WinRates::format(rates.nithin), "33.3%");
        assert_eq!(WinRates::format(rates.vishvesh), "33.3%");
    }
}
