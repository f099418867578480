//! Output Generation
//!
//! Rendering collaborators for finished sweeps, plus summary statistics.

pub mod heatmap;
pub mod stats;

pub use heatmap::*;
pub use stats::*;

use std::io::{self, Write};

use sweep_events::SweepReport;

/// Consumer of a completed sweep report.
pub trait HeatmapSink {
    fn render(&mut self, report: &SweepReport) -> io::Result<()>;
}

/// Writes the report as pretty-printed JSON.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HeatmapSink for JsonSink<W> {
    fn render(&mut self, report: &SweepReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_events::ParameterAxis;

    use crate::negotiation::NegotiationRules;
    use crate::sweep::SweepRunner;

    #[test]
    fn test_json_sink_emits_parseable_report() {
        let runner = SweepRunner::new(NegotiationRules::default(), 10).unwrap();
        let report = runner
            .run_seeded(
                ParameterAxis::linspace("willingness", 0.3, 0.9, 2),
                ParameterAxis::linspace("reactivity", 0.1, 0.7, 3),
                42,
            )
            .unwrap();

        let mut sink = JsonSink::new(Vec::new());
        sink.render(&report).unwrap();
        let output = String::from_utf8(sink.into_inner()).unwrap();

        let parsed: SweepReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.matrix.shape(), (2, 3));
        let counts = |r: &SweepReport| -> Vec<u32> {
            r.matrix.cells().iter().map(|c| c.successes).collect()
        };
        assert_eq!(counts(&parsed), counts(&report));
        assert_eq!(parsed.seed, 42);
        assert!(output.ends_with('\n'));
    }
}
