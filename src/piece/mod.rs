// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Notes, pieces and the segment scheduler.
//!
//! This module provides:
//! - The note and piece data model, with exact start times and durations
//! - Marker extraction (every instant at which the sounding set may change)
//! - The sweep partition that turns a piece into contiguous segments

pub mod markers;
pub mod sweep;

pub use markers::extract_markers;
pub use sweep::{partition, ScheduleError, Segment};

use thiserror::Error;

use crate::timing::{Frac, FracError};

/// Errors raised when building a note
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoteError {
    /// Pitch is not a positive, finite frequency
    #[error("invalid pitch {0} Hz (must be positive and finite)")]
    InvalidPitch(f64),
    /// Start lies before the beginning of the piece
    #[error("note starts before zero: {0}")]
    NegativeStart(Frac),
    /// Duration is negative
    #[error("note has negative duration: {0}")]
    NegativeDuration(Frac),
    /// End time could not be represented
    #[error(transparent)]
    Fraction(#[from] FracError),
}

/// A single note: a pitch held from `start` for `duration` beats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Frequency in Hz
    pitch: f64,
    /// Start time in beats from the start of the piece
    start: Frac,
    /// Duration in beats
    duration: Frac,
    /// Cached `start + duration`
    end: Frac,
}

impl Note {
    /// Create a validated note.
    ///
    /// A zero duration is accepted; such a note never sounds in any segment.
    pub fn new(pitch: f64, start: Frac, duration: Frac) -> Result<Self, NoteError> {
        if !pitch.is_finite() || pitch <= 0.0 {
            return Err(NoteError::InvalidPitch(pitch));
        }
        if start.is_negative() {
            return Err(NoteError::NegativeStart(start));
        }
        if duration.is_negative() {
            return Err(NoteError::NegativeDuration(duration));
        }
        let end = start.checked_add(duration)?;
        Ok(Self {
            pitch,
            start,
            duration,
            end,
        })
    }

    /// Get the frequency in Hz
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Get the start time in beats
    pub fn start(&self) -> Frac {
        self.start
    }

    /// Get the duration in beats
    pub fn duration(&self) -> Frac {
        self.duration
    }

    /// Get the end time in beats
    pub fn end(&self) -> Frac {
        self.end
    }
}

/// An ordered collection of notes.
///
/// Notes may overlap in any way. Their order is kept and decides the order
/// of pitches inside each segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Piece {
    /// Optional piece name
    name: Option<String>,
    /// Notes in insertion order
    notes: Vec<Note>,
}

impl Piece {
    /// Create an empty piece
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a piece from notes
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self { name: None, notes }
    }

    /// Set the piece name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the piece name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Append a note
    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Get all notes
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Get the number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the piece has no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Total length in beats (latest note end, or zero)
    pub fn length(&self) -> Frac {
        self.notes.iter().map(Note::end).max().unwrap_or(Frac::ZERO)
    }

    /// Sorted, deduplicated change points of the piece
    pub fn markers(&self) -> Vec<Frac> {
        extract_markers(&self.notes)
    }

    /// Schedule the piece into contiguous segments covering `[0, length)`
    pub fn segments(&self) -> Result<Vec<Segment>, ScheduleError> {
        partition(&self.notes, &self.markers())
    }
}

impl FromIterator<Note> for Piece {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self::with_notes(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(pitch: f64, start: (i64, i64), duration: (i64, i64)) -> Note {
        Note::new(
            pitch,
            Frac::literal(start.0, start.1),
            Frac::literal(duration.0, duration.1),
        )
        .unwrap()
    }

    #[test]
    fn test_note_end() {
        let n = note(440.0, (2, 3), (1, 3));
        assert_eq!(n.end(), Frac::ONE);
        assert_eq!(n.pitch(), 440.0);
    }

    #[test]
    fn test_note_validation() {
        let one = Frac::ONE;
        assert_eq!(
            Note::new(0.0, one, one),
            Err(NoteError::InvalidPitch(0.0))
        );
        assert!(matches!(
            Note::new(f64::NAN, one, one),
            Err(NoteError::InvalidPitch(_))
        ));
        assert_eq!(
            Note::new(440.0, Frac::literal(-1, 2), one),
            Err(NoteError::NegativeStart(Frac::literal(-1, 2)))
        );
        assert_eq!(
            Note::new(440.0, one, Frac::literal(-1, 4)),
            Err(NoteError::NegativeDuration(Frac::literal(-1, 4)))
        );
        assert!(Note::new(440.0, one, Frac::ZERO).is_ok());
        assert!(matches!(
            Note::new(440.0, Frac::integer(i64::MAX), one),
            Err(NoteError::Fraction(FracError::Overflow { .. }))
        ));
    }

    #[test]
    fn test_piece_length() {
        let mut piece = Piece::new().named("test");
        assert_eq!(piece.length(), Frac::ZERO);
        assert!(piece.is_empty());

        piece.push(note(440.0, (0, 1), (5, 2)));
        piece.push(note(523.25, (1, 1), (1, 1)));
        assert_eq!(piece.len(), 2);
        assert_eq!(piece.length(), Frac::literal(5, 2));
        assert_eq!(piece.name(), Some("test"));
    }

    #[test]
    fn test_empty_piece_has_no_segments() {
        let piece = Piece::new();
        assert_eq!(piece.markers(), vec![Frac::ZERO]);
        assert!(piece.segments().unwrap().is_empty());
    }

    #[test]
    fn test_collect_piece() {
        let piece: Piece = vec![note(440.0, (0, 1), (1, 2)), note(330.0, (1, 2), (1, 2))]
            .into_iter()
            .collect();
        assert_eq!(piece.len(), 2);
        assert_eq!(piece.segments().unwrap().len(), 2);
    }
}
