//! Console progress output.
//!
//! The reporter only reads metadata rows and writes text; it never changes
//! the state of a run. Write failures are logged and otherwise ignored.

use crate::{config::Verbosity, metadata::IterationRecord, types::Scalar};
use std::io::{self, Write};

const COLUMNS: [&str; 4] = ["Time (s)", "Primal resid", "Dual resid", "rho"];

/// Writes per-iteration progress at a configurable verbosity.
pub struct ProgressReporter {
    verbosity: Verbosity,
    width: usize,
    writer: Box<dyn Write + Send>,
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("verbosity", &self.verbosity)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl ProgressReporter {
    /// Creates a reporter writing to stdout.
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_writer(verbosity, io::stdout())
    }

    /// Creates a reporter writing to an arbitrary sink.
    pub fn with_writer<W: Write + Send + 'static>(verbosity: Verbosity, writer: W) -> Self {
        Self {
            verbosity,
            width: 12,
            writer: Box::new(writer),
        }
    }

    /// Sets the column width of the detailed table.
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.width = width.max(COLUMNS.iter().map(|c| c.len()).max().unwrap_or(0));
        self
    }

    /// Output level of this reporter.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reports the row just appended to the metadata table.
    pub fn report_iteration<T: Scalar>(&mut self, record: &IterationRecord<T>) {
        let text = match self.verbosity {
            Verbosity::Quiet => return,
            Verbosity::Summary => format!("[Iteration {}]\n", record.iteration),
            Verbosity::Detailed => {
                let mut text = String::new();
                if record.iteration == 1 {
                    text.push_str(&self.header());
                }
                text.push_str(&self.row(record));
                text
            }
        };
        self.emit(&text);
    }

    /// Reports the end of a run.
    pub fn report_end(&mut self, converged: bool, iterations: usize) {
        let mut text = String::new();
        match self.verbosity {
            Verbosity::Quiet => return,
            Verbosity::Summary => {}
            Verbosity::Detailed => text.push_str(&self.rule()),
        }
        if converged {
            text.push_str(&format!("Converged after {iterations} iterations!\n"));
        }
        if !text.is_empty() {
            self.emit(&text);
        }
    }

    fn rule(&self) -> String {
        let mut line = String::from("+");
        for _ in COLUMNS {
            line.push_str(&"-".repeat(self.width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn header(&self) -> String {
        let mut text = self.rule();
        text.push('|');
        for name in COLUMNS {
            text.push_str(&format!(" {name:>w$} |", w = self.width));
        }
        text.push('\n');
        text.push_str(&self.rule());
        text
    }

    fn row<T: Scalar>(&self, record: &IterationRecord<T>) -> String {
        let w = self.width;
        format!(
            "| {:>w$.4e} | {:>w$.4e} | {:>w$.4e} | {:>w$.4e} |\n",
            record.elapsed.as_secs_f64(),
            record.primal_residual,
            record.dual_residual,
            record.rho,
        )
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
        {
            tracing::warn!(error = %err, "failed to write optimization progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record(iteration: usize) -> IterationRecord<f64> {
        IterationRecord {
            iteration,
            primal_residual: 0.5,
            dual_residual: 0.25,
            rho: 10.0,
            objective: None,
            elapsed: Duration::from_millis(10),
        }
    }

    #[test]
    fn test_quiet_writes_nothing() {
        let buffer = SharedBuffer::default();
        let mut reporter = ProgressReporter::with_writer(Verbosity::Quiet, buffer.clone());
        reporter.report_iteration(&record(1));
        reporter.report_end(true, 1);
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_summary_lines() {
        let buffer = SharedBuffer::default();
        let mut reporter = ProgressReporter::with_writer(Verbosity::Summary, buffer.clone());
        reporter.report_iteration(&record(1));
        reporter.report_iteration(&record(2));
        reporter.report_end(true, 2);
        assert_eq!(
            buffer.contents(),
            "[Iteration 1]\n[Iteration 2]\nConverged after 2 iterations!\n"
        );
    }

    #[test]
    fn test_detailed_table() {
        let buffer = SharedBuffer::default();
        let mut reporter = ProgressReporter::with_writer(Verbosity::Detailed, buffer.clone());
        reporter.report_iteration(&record(1));
        reporter.report_iteration(&record(2));
        reporter.report_end(false, 2);

        let out = buffer.contents();
        assert_eq!(out.matches("Primal resid").count(), 1);
        assert!(out.contains("5.0000e-1"));
        assert!(!out.contains("Converged"));

        let lines: Vec<&str> = out.lines().collect();
        // rule, header, rule, 2 rows, closing rule
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }
}
