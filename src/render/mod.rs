// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text rendering of scheduled segments.
//!
//! Segment boundaries are scaled onto an integer grid so that every cell is
//! the same (smallest needed) fraction of a beat, then each pitch gets one row
//! of `*` cells, highest pitch first:
//!
//! ```text
//! 523:  **
//! 440: *  * ****
//! 349:     *****
//! ```
//!
//! Two notes of the same pitch sounding at once cannot be shown on one row;
//! those spans are collected as [`Overlap`]s and listed after the grid.
//!
//! Grids wider than [`MAX_GRID_CELLS`] are refused.

use std::fmt;

use thiserror::Error;

use crate::piece::{Piece, ScheduleError, Segment};
use crate::timing::{Frac, FracError};

/// Largest number of cells a row may span
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Errors raised while rendering
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The grid scale no longer fits in 64 bits
    #[error("grid scale overflows when multiplying in denominator {denominator}")]
    ScaleOverflow {
        /// Denominator being multiplied in
        denominator: i64,
    },
    /// The grid would be wider than [`MAX_GRID_CELLS`]
    #[error("grid needs {cells} cells (limit {limit})")]
    GridTooLarge {
        /// Cells needed to reach the end of the last segment
        cells: u128,
        /// The cap
        limit: usize,
    },
    /// Scheduling the piece failed
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// Scaling a boundary failed
    #[error(transparent)]
    Fraction(#[from] FracError),
}

/// Integer multiplier that turns every given fraction into a whole number.
///
/// Denominators are visited in ascending order and multiplied in whenever
/// they do not already divide the running product. The result is a common
/// multiple of all denominators, though not always the least one.
pub fn grid_scale(values: impl IntoIterator<Item = Frac>) -> Result<i64, RenderError> {
    let mut denominators: Vec<i64> = values.into_iter().map(|f| f.denom()).collect();
    denominators.sort_unstable();

    let mut scale: i64 = 1;
    for denominator in denominators {
        if scale % denominator != 0 {
            scale = scale
                .checked_mul(denominator)
                .ok_or(RenderError::ScaleOverflow { denominator })?;
        }
    }
    Ok(scale)
}

/// Extend `scale` until every boundary lands on a whole cell.
///
/// Boundaries that are already whole at `scale` leave it unchanged, so the
/// result equals `scale` whenever the boundaries line up with its grid.
pub fn refine_scale(
    scale: i64,
    boundaries: impl IntoIterator<Item = Frac>,
) -> Result<i64, RenderError> {
    let mut scale = scale;
    for boundary in boundaries {
        let denominator = boundary.checked_mul(Frac::integer(scale))?.denom();
        if denominator != 1 {
            scale = scale
                .checked_mul(denominator)
                .ok_or(RenderError::ScaleOverflow { denominator })?;
        }
    }
    Ok(scale)
}

/// One pitch row of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Pitch in Hz
    pitch: f64,
    /// Drawn cells (spaces and `*`, no trailing spaces)
    bar: String,
}

impl Row {
    /// Get the pitch of this row
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Get the drawn bar
    pub fn bar(&self) -> &str {
        &self.bar
    }

    /// Mark cells `[start, end)` as sounding
    fn fill(&mut self, start: usize, end: usize) {
        if self.bar.len() < start {
            let gap = start - self.bar.len();
            self.bar.extend(std::iter::repeat(' ').take(gap));
        }
        let from = self.bar.len().max(start);
        self.bar.extend(std::iter::repeat('*').take(end.saturating_sub(from)));
    }
}

/// A span where one pitch is played by more than one note at once
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// Pitch in Hz
    pub pitch: f64,
    /// First overlapping cell
    pub start: usize,
    /// Cell after the last overlapping cell
    pub end: usize,
    /// Largest number of simultaneous notes in the span
    pub voices: usize,
}

/// A piece drawn on an integer grid
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// Cells per beat
    scale: i64,
    /// Rows, highest pitch first
    rows: Vec<Row>,
    /// Same-pitch overlaps, in time order
    overlaps: Vec<Overlap>,
}

impl Rendering {
    /// Render an ordered, contiguous segment list, scaling by segment denominators
    pub fn from_segments(segments: &[Segment]) -> Result<Self, RenderError> {
        let scale = grid_scale(segments.iter().flat_map(|s| [s.start(), s.duration()]))?;
        Self::with_scale(segments, scale)
    }

    /// Schedule and render a piece.
    ///
    /// The grid is scaled by the denominators of the notes' starts and
    /// durations, refined only where a segment boundary falls between cells.
    pub fn from_piece(piece: &Piece) -> Result<Self, RenderError> {
        let segments = piece.segments()?;
        let base = grid_scale(piece.notes().iter().flat_map(|n| [n.start(), n.duration()]))?;
        let scale = refine_scale(base, segments.iter().flat_map(|s| [s.start(), s.end()]))?;
        Self::with_scale(&segments, scale)
    }

    /// Render on a grid of `scale` cells per beat; every boundary must be whole
    fn with_scale(segments: &[Segment], scale: i64) -> Result<Self, RenderError> {
        let k = Frac::integer(scale);
        if let Some(last) = segments.last() {
            let cells = last.end().checked_mul(k)?;
            let cells = cells.numer().unsigned_abs() as u128 / cells.denom() as u128;
            if cells > MAX_GRID_CELLS as u128 {
                return Err(RenderError::GridTooLarge {
                    cells,
                    limit: MAX_GRID_CELLS,
                });
            }
        }

        let mut pitches: Vec<f64> = segments
            .iter()
            .flat_map(|s| s.pitches().iter().copied())
            .collect();
        pitches.sort_by(|a, b| b.total_cmp(a));
        pitches.dedup();

        let mut rows: Vec<Row> = pitches
            .into_iter()
            .map(|pitch| Row {
                pitch,
                bar: String::new(),
            })
            .collect();
        let mut overlaps: Vec<Overlap> = Vec::new();

        for segment in segments {
            let start = to_cell(segment.start(), k)?;
            let end = to_cell(segment.end(), k)?;

            for row in rows.iter_mut() {
                let voices = segment.pitches().iter().filter(|&&p| p == row.pitch).count();
                if voices == 0 {
                    continue;
                }
                row.fill(start, end);
                if voices > 1 {
                    record_overlap(&mut overlaps, row.pitch, start, end, voices);
                }
            }
        }

        Ok(Self {
            scale,
            rows,
            overlaps,
        })
    }

    /// Get the number of cells per beat
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Get the rows, highest pitch first
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the same-pitch overlaps
    pub fn overlaps(&self) -> &[Overlap] {
        &self.overlaps
    }
}

/// Cell index of a boundary on a grid with `k` cells per beat
fn to_cell(time: Frac, k: Frac) -> Result<usize, RenderError> {
    let scaled = time.checked_mul(k)?;
    usize::try_from(scaled.numer()).map_err(|_| {
        RenderError::Fraction(FracError::Overflow {
            operation: "grid cell",
        })
    })
}

/// Extend the previous overlap of `pitch` if it ends at `start`, else start a new one
fn record_overlap(overlaps: &mut Vec<Overlap>, pitch: f64, start: usize, end: usize, voices: usize) {
    if let Some(last) = overlaps.iter_mut().rev().find(|o| o.pitch == pitch) {
        if last.end == start {
            last.end = end;
            last.voices = last.voices.max(voices);
            return;
        }
    }
    overlaps.push(Overlap {
        pitch,
        start,
        end,
        voices,
    });
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{:>3.0}: {}", row.pitch, row.bar)?;
        }
        if !self.overlaps.is_empty() {
            writeln!(f, "overlaps:")?;
            for overlap in &self.overlaps {
                writeln!(
                    f,
                    "{:>3.0}: cells {}..{} ({} notes)",
                    overlap.pitch, overlap.start, overlap.end, overlap.voices
                )?;
            }
        }
        Ok(())
    }
}
