//! Generation statistics collection and reporting.
//!
//! This module tracks what a generation run produced. It provides:
//! 1. **Volume:** Blocks assembled and words emitted per memory image.
//! 2. **Saturation:** Accumulator clamp events and saturated output cells, which show how
//!    hard a vector set exercises the array's overflow handling.
//! 3. **Reporting:** A one-line run summary, a multi-line report, and structured log output.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::info;

/// Statistics for one generation run.
#[derive(Clone, Debug)]
pub struct GenerationStats {
    start_time: Instant,
    elapsed: Option<Duration>,
    /// Number of instruction blocks assembled.
    pub blocks: u64,
    /// Words in the concatenated `A` image.
    pub a_words: u64,
    /// Words in the concatenated `B` image.
    pub b_words: u64,
    /// Words in the expected-output image.
    pub expected_words: u64,
    /// Total accumulator clamps across all blocks.
    pub clamp_events: u64,
    /// Output cells in which at least one clamp occurred.
    pub saturated_cells: u64,
    /// Largest block size seen.
    pub largest_block: usize,
}

impl Default for GenerationStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed: None,
            blocks: 0,
            a_words: 0,
            b_words: 0,
            expected_words: 0,
            clamp_events: 0,
            saturated_cells: 0,
            largest_block: 0,
        }
    }
}

impl GenerationStats {
    /// Records one assembled block.
    pub fn record_block(
        &mut self,
        size: usize,
        a_words: usize,
        b_words: usize,
        expected_words: usize,
        clamp_events: u64,
        saturated_cells: u64,
    ) {
        self.blocks += 1;
        self.a_words += a_words as u64;
        self.b_words += b_words as u64;
        self.expected_words += expected_words as u64;
        self.clamp_events += clamp_events;
        self.saturated_cells += saturated_cells;
        self.largest_block = self.largest_block.max(size);
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.start_time.elapsed());
    }

    /// Wall-clock time spent assembling (up to now if not yet finished).
    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start_time.elapsed())
    }

    /// Fraction of expected words that hit saturation, in percent.
    pub fn saturation_percent(&self) -> f64 {
        if self.expected_words == 0 {
            0.0
        } else {
            (self.saturated_cells as f64 / self.expected_words as f64) * 100.0
        }
    }

    /// One-line summary printed on success.
    pub fn summary_line(&self, dir: &Path) -> String {
        format!(
            "Wrote {} instruction blocks to {} (instructions+dataA+dataB+expected).",
            self.blocks,
            dir.display()
        )
    }

    /// Multi-line report of every counter.
    pub fn report(&self) -> String {
        let lines = [
            "==========================================================".to_string(),
            "SYSTOLIC TEST-VECTOR STATISTICS".to_string(),
            "==========================================================".to_string(),
            format!("host_seconds             {:.4} s", self.elapsed().as_secs_f64()),
            format!("blocks                   {}", self.blocks),
            format!("largest_block            {}", self.largest_block),
            format!("words.a                  {}", self.a_words),
            format!("words.b                  {}", self.b_words),
            format!("words.expected           {}", self.expected_words),
            "----------------------------------------------------------".to_string(),
            format!("sat.clamp_events         {}", self.clamp_events),
            format!(
                "sat.cells                {} ({:.2}%)",
                self.saturated_cells,
                self.saturation_percent()
            ),
            "==========================================================".to_string(),
        ];
        lines.join("\n")
    }

    /// Prints [`report`](Self::report) to stdout.
    pub fn print(&self) {
        println!("{}", self.report());
    }

    /// Emits the counters as a structured log event.
    pub fn log(&self) {
        info!(
            blocks = self.blocks,
            a_words = self.a_words,
            b_words = self.b_words,
            expected_words = self.expected_words,
            clamp_events = self.clamp_events,
            saturated_cells = self.saturated_cells,
            saturated_pct = self.saturation_percent(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "generation finished"
        );
    }
}
