//! Text renderings of the two dashboard charts.
//!
//! A chart is built from a snapshot of store data and owns everything it
//! needs to draw itself, so the dashboard can throw it away and build a new
//! one whenever the data changes.

use std::fmt::Write;

use tally_core::models::{GameStats, PerformanceSeries, Winner};

const NITHIN_MARK: char = 'N';
const VISHVESH_MARK: char = 'V';
const OVERLAP_MARK: char = '*';
const BAR_WIDTH: usize = 30;

/// Cumulative wins per player, one column per game.
#[derive(Debug, Clone)]
pub struct LineChart {
    series: PerformanceSeries,
}

impl LineChart {
    pub fn new(series: PerformanceSeries) -> Self {
        Self { series }
    }

    pub fn render(&self) -> String {
        if self.series.is_empty() {
            return "NO GAMES PLAYED YET\n".to_string();
        }

        let peak = self.series.peak();
        let axis_width = peak.to_string().len();
        let mut out = String::new();

        for level in (0..=peak).rev() {
            let _ = write!(out, "{:>width$} |", level, width = axis_width);
            for (nithin, vishvesh) in self.series.nithin.iter().zip(&self.series.vishvesh) {
                let mark = match (*nithin == level, *vishvesh == level) {
                    (true, true) => OVERLAP_MARK,
                    (true, false) => NITHIN_MARK,
                    (false, true) => VISHVESH_MARK,
                    (false, false) => ' ',
                };
                out.push(mark);
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "{:>width$} +{}",
            "",
            "-".repeat(self.series.len()),
            width = axis_width
        );
        let _ = writeln!(
            out,
            "{} {}   {} {}   {} both",
            NITHIN_MARK,
            Winner::Nithin.label(),
            VISHVESH_MARK,
            Winner::Vishvesh.label(),
            OVERLAP_MARK
        );

        out
    }

    pub fn destroy(self) {
        tracing::trace!(points = self.series.len(), "line chart disposed");
    }
}

/// Share of games per outcome.
#[derive(Debug, Clone)]
pub struct DoughnutChart {
    slices: [(Winner, usize); 3],
    total: usize,
}

impl DoughnutChart {
    pub fn new(stats: &GameStats) -> Self {
        Self {
            slices: [
                (Winner::Nithin, stats.nithin),
                (Winner::Vishvesh, stats.vishvesh),
                (Winner::Draw, stats.draws),
            ],
            total: stats.total,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        for (winner, count) in &self.slices {
            let share = if self.total == 0 {
                0.0
            } else {
                *count as f64 / self.total as f64
            };
            let filled = (share * BAR_WIDTH as f64).round() as usize;

            let label = match winner {
                Winner::Draw => "DRAWS",
                other => other.label(),
            };
            let _ = writeln!(
                out,
                "{:<9} {}{} {:>3} ({:.1}%)",
                label,
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled),
                count,
                share * 100.0
            );
        }

        out
    }

    pub fn destroy(self) {
        tracing::trace!(total = self.total, "doughnut chart disposed");
    }
}
