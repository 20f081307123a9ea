// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sweep partition of a piece into segments.
//!
//! Consecutive markers bound sub-intervals during which the set of sounding
//! pitches is constant. For each pair `(prev, cur)` one segment is emitted,
//! holding every note with `start <= prev` and `end >= cur`. Silent spans are
//! emitted as segments with no pitches, so the output always tiles
//! `[first marker, last marker)` without gaps.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use thiserror::Error;
use tracing::{debug, error};

use super::Note;
use crate::timing::{Frac, FracError};

/// Errors raised by the sweep
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// Markers were not strictly increasing. This is a bug in whatever
    /// produced the markers; the scheduling call is abandoned.
    #[error("internal invariant violated: marker {index} ({current}) does not follow {previous}")]
    UnsortedMarkers {
        /// Index of the offending marker
        index: usize,
        /// Marker before it
        previous: Frac,
        /// The offending marker
        current: Frac,
    },
    /// A segment duration could not be represented
    #[error(transparent)]
    Fraction(#[from] FracError),
}

/// A span of time with a constant set of sounding pitches
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start in beats
    start: Frac,
    /// Length in beats
    duration: Frac,
    /// `start + duration`
    end: Frac,
    /// Sounding pitches in piece order; empty means silence
    pitches: Vec<f64>,
}

impl Segment {
    /// Create a segment
    pub fn new(start: Frac, duration: Frac, pitches: Vec<f64>) -> Result<Self, FracError> {
        Ok(Self {
            start,
            duration,
            end: start.checked_add(duration)?,
            pitches,
        })
    }

    /// Get the start in beats
    pub fn start(&self) -> Frac {
        self.start
    }

    /// Get the duration in beats
    pub fn duration(&self) -> Frac {
        self.duration
    }

    /// Get the end in beats
    pub fn end(&self) -> Frac {
        self.end
    }

    /// Get the sounding pitches (a pitch repeats if two notes play it)
    pub fn pitches(&self) -> &[f64] {
        &self.pitches
    }

    /// Check if nothing sounds during this segment
    pub fn is_silence(&self) -> bool {
        self.pitches.is_empty()
    }
}

/// Split `notes` into one segment per adjacent pair of `markers`.
///
/// `markers` must be strictly increasing, as produced by
/// [`extract_markers`](super::extract_markers). Notes are admitted in start
/// order and retired through a min-heap of end times, so each segment only
/// looks at notes that may still be sounding.
pub fn partition(notes: &[Note], markers: &[Frac]) -> Result<Vec<Segment>, ScheduleError> {
    let mut by_start: Vec<usize> = (0..notes.len()).collect();
    by_start.sort_by_key(|&i| notes[i].start());

    let mut next = 0;
    let mut active: BTreeSet<usize> = BTreeSet::new();
    let mut ends: BinaryHeap<Reverse<(Frac, usize)>> = BinaryHeap::with_capacity(notes.len());
    let mut segments = Vec::with_capacity(markers.len().saturating_sub(1));

    for (index, pair) in markers.windows(2).enumerate() {
        let (prev, cur) = (pair[0], pair[1]);
        if cur <= prev {
            error!(index = index + 1, %prev, %cur, "markers are not strictly increasing");
            return Err(ScheduleError::UnsortedMarkers {
                index: index + 1,
                previous: prev,
                current: cur,
            });
        }

        while let Some(&i) = by_start.get(next) {
            if notes[i].start() > prev {
                break;
            }
            active.insert(i);
            ends.push(Reverse((notes[i].end(), i)));
            next += 1;
        }

        while let Some(&Reverse((end, i))) = ends.peek() {
            if end > prev {
                break;
            }
            ends.pop();
            active.remove(&i);
        }

        // Closed containment: a note ending exactly at `cur` still covers
        // the whole segment.
        let pitches = active
            .iter()
            .map(|&i| &notes[i])
            .filter(|note| note.end() >= cur)
            .map(Note::pitch)
            .collect();

        segments.push(Segment {
            start: prev,
            duration: cur.checked_sub(prev)?,
            end: cur,
            pitches,
        });
    }

    debug!(notes = notes.len(), segments = segments.len(), "partitioned notes");
    Ok(segments)
}
