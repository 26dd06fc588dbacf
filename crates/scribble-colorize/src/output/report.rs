use std::fmt;

use crate::solver::{SolveReport, Solution};

/// Whether the solver met its tolerance on both channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    /// Both channels converged.
    Full,
    /// At least one channel hit the iteration cap. The image is usable but
    /// colors may not have spread all the way.
    Degraded,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Full => "full",
            Quality::Degraded => "degraded",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics for one colorization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorizeReport {
    /// Pixels pinned by the scribble.
    pub marked_pixels: usize,
    /// Unmarked pixels with no path to a mark, rendered achromatic.
    pub unreachable_pixels: usize,
    /// Solve outcome for the I channel.
    pub i: SolveReport,
    /// Solve outcome for the Q channel.
    pub q: SolveReport,
    pub quality: Quality,
}

impl ColorizeReport {
    pub(crate) fn new(marked_pixels: usize, unreachable_pixels: usize, solution: &Solution) -> Self {
        let quality = if solution.converged() {
            Quality::Full
        } else {
            Quality::Degraded
        };
        Self {
            marked_pixels,
            unreachable_pixels,
            i: solution.i_report,
            q: solution.q_report,
            quality,
        }
    }

    /// Larger of the two channels' iteration counts.
    pub fn iterations(&self) -> usize {
        self.i.iterations.max(self.q.iterations)
    }
}
