use std::fmt::Write;

use tally_core::domain::RecordStore;
use tally_core::models::{GameRecord, WinRates, Winner};

use crate::charts::{DoughnutChart, LineChart};

const RATE_BAR_WIDTH: usize = 20;

/// Read-only scoreboard view.
///
/// Owns the store it renders and the two chart handles. Charts from the
/// previous render are destroyed before new ones are built.
pub struct Dashboard {
    store: RecordStore,
    recent_limit: usize,
    performance_chart: Option<LineChart>,
    outcome_chart: Option<DoughnutChart>,
}

impl Dashboard {
    pub fn new(store: RecordStore, recent_limit: usize) -> Self {
        Self {
            store,
            recent_limit,
            performance_chart: None,
            outcome_chart: None,
        }
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn render(&mut self) -> String {
        self.refresh_charts();

        let stats = self.store.stats();
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} {:>4}    {} {:>4}",
            Winner::Nithin.label(),
            stats.nithin,
            Winner::Vishvesh.label(),
            stats.vishvesh
        );
        let _ = writeln!(
            out,
            "TOTAL GAMES {:>4}    DRAWS {:>4}",
            stats.total, stats.draws
        );

        if stats.total > 0 {
            let rates = stats.win_rates();
            out.push_str("\nWIN RATE\n");
            out.push_str(&rate_line(Winner::Nithin, rates.nithin));
            out.push_str(&rate_line(Winner::Vishvesh, rates.vishvesh));
        }

        out.push_str("\nRECENT GAMES\n");
        out.push_str(&recent_games_block(
            &self.store.recent_games(self.recent_limit),
        ));

        out.push_str("\nPERFORMANCE OVER TIME\n");
        if let Some(chart) = &self.performance_chart {
            out.push_str(&chart.render());
        }

        out.push_str("\nOUTCOMES\n");
        if let Some(chart) = &self.outcome_chart {
            out.push_str(&chart.render());
        }

        out
    }

    fn refresh_charts(&mut self) {
        if let Some(chart) = self.performance_chart.take() {
            chart.destroy();
        }
        if let Some(chart) = self.outcome_chart.take() {
            chart.destroy();
        }

        self.performance_chart = Some(LineChart::new(self.store.performance_series()));
        self.outcome_chart = Some(DoughnutChart::new(&self.store.stats()));
    }
}

fn rate_line(winner: Winner, rate: f64) -> String {
    let filled = ((rate / 100.0) * RATE_BAR_WIDTH as f64).round() as usize;
    format!(
        "{:<9} [{}{}] {}\n",
        winner.label(),
        "#".repeat(filled),
        " ".repeat(RATE_BAR_WIDTH - filled),
        WinRates::format(rate)
    )
}

fn recent_games_block(games: &[GameRecord]) -> String {
    if games.is_empty() {
        return "NO GAMES PLAYED YET\n".to_string();
    }

    games
        .iter()
        .map(|game| {
            format!(
                "{} - GAME #{:<3} {}\n",
                game.date.format("%Y-%m-%d"),
                game.game_number,
                game.winner.label()
            )
        })
        .collect()
}
