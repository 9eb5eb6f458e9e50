//! Outcome of a pipeline run.

use std::{path::PathBuf, time::Duration};

/// What a run read, produced and rewrote.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Documents in processing order.
    pub documents: Vec<PathBuf>,
    /// Distinct characters across all documents.
    pub characters: usize,
    /// Characters the source font has no glyph for.
    pub missing: Vec<char>,
    pub input_size: usize,
    pub output_size: usize,
    pub output_font: PathBuf,
    /// Documents whose embedded font was replaced (or would be, in a dry run).
    pub patched: usize,
    /// Documents without an embedded font reference.
    pub unpatched: Vec<PathBuf>,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl RunReport {
    /// Size saved relative to the source font, in percent.
    pub fn reduction(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        (1.0 - self.output_size as f64 / self.input_size as f64) * 100.0
    }
}
