//! Text Heatmap
//!
//! Renders the success matrix as a shaded terminal grid. Willingness runs up
//! the vertical axis (highest row on top), reactivity along the bottom.

use std::io::{self, Write};

use sweep_events::SweepReport;

use super::stats::SweepStats;
use super::HeatmapSink;

/// Shading ramp from lowest to highest success rate
pub const GLYPH_RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];

const ROW_LABEL_WIDTH: usize = 6;
const CELL_WIDTH: usize = 8;

/// Glyph for a success rate in [0, 1].
pub fn glyph_for(rate: f64) -> char {
    let buckets = GLYPH_RAMP.len();
    let index = (rate.clamp(0.0, 1.0) * buckets as f64) as usize;
    GLYPH_RAMP[index.min(buckets - 1)]
}

/// Writes a shaded grid, a value legend and summary statistics.
pub struct TextHeatmap<W: Write> {
    writer: W,
    show_summary: bool,
}

impl<W: Write> TextHeatmap<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_summary: true,
        }
    }

    /// Omit the statistics block under the legend.
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_grid(&mut self, report: &SweepReport) -> io::Result<()> {
        let (rows, columns) = report.matrix.shape();
        let w = &mut self.writer;

        writeln!(w, "Reconciliation Success Rate")?;
        writeln!(
            w,
            "seed {} | {} trials per cell | round limit {}",
            report.seed, report.parameters.trials_per_cell, report.parameters.round_limit
        )?;
        writeln!(w)?;
        writeln!(w, "Willingness to Compromise")?;

        for row in (0..rows).rev() {
            let label = report.willingness.get(row).unwrap_or(f64::NAN);
            write!(w, "{:>width$.2} |", label, width = ROW_LABEL_WIDTH)?;
            for column in 0..columns {
                let rate = report.matrix.rate(row, column).unwrap_or(0.0);
                let shade = glyph_for(rate);
                write!(w, " {}{} {:.2}", shade, shade, rate)?;
            }
            writeln!(w)?;
        }

        write!(w, "{:>width$} +", "", width = ROW_LABEL_WIDTH)?;
        writeln!(w, "{}", "-".repeat(columns * CELL_WIDTH))?;

        write!(w, "{:>width$}  ", "", width = ROW_LABEL_WIDTH)?;
        for value in report.reactivity.values() {
            write!(w, "{:>width$.2}", value, width = CELL_WIDTH - 1)?;
            write!(w, " ")?;
        }
        writeln!(w)?;
        writeln!(w, "{:>width$}  Emotional Reactivity", "", width = ROW_LABEL_WIDTH)?;
        Ok(())
    }

    fn write_legend(&mut self) -> io::Result<()> {
        let buckets = GLYPH_RAMP.len();
        write!(self.writer, "Legend:")?;
        for (i, glyph) in GLYPH_RAMP.iter().enumerate() {
            let low = i as f64 / buckets as f64;
            let high = (i + 1) as f64 / buckets as f64;
            write!(self.writer, " [{}{}] {:.1}-{:.1}", glyph, glyph, low, high)?;
        }
        writeln!(self.writer)
    }

    fn write_summary(&mut self, report: &SweepReport) -> io::Result<()> {
        let stats = SweepStats::from_report(report);
        let w = &mut self.writer;

        writeln!(w)?;
        writeln!(
            w,
            "Overall: {}/{} trials reconciled ({:.3})",
            stats.total_successes, stats.total_trials, stats.overall_rate
        )?;
        if let Some(best) = stats.best {
            writeln!(
                w,
                "Best cell:  willingness {:.2}, reactivity {:.2} -> {:.3}",
                best.cell.willingness, best.cell.reactivity, best.rate
            )?;
        }
        if let Some(worst) = stats.worst {
            writeln!(
                w,
                "Worst cell: willingness {:.2}, reactivity {:.2} -> {:.3}",
                worst.cell.willingness, worst.cell.reactivity, worst.rate
            )?;
        }
        if let Some(rounds) = stats.mean_rounds_to_success {
            writeln!(w, "Mean rounds to reconciliation: {:.2}", rounds)?;
        }
        Ok(())
    }
}

impl<W: Write> HeatmapSink for TextHeatmap<W> {
    fn render(&mut self, report: &SweepReport) -> io::Result<()> {
        self.write_grid(report)?;
        writeln!(self.writer)?;
        self.write_legend()?;
        if self.show_summary {
            self.write_summary(report)?;
        }
        self.writer.flush()
    }
}
