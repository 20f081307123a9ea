// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Marker extraction.
//!
//! A marker is an instant at which the set of sounding pitches may change:
//! the start or end of some note, plus zero so that a piece may open with
//! silence. Markers are sorted and deduplicated with exact comparison only.

use tracing::debug;

use super::Note;
use crate::timing::Frac;

/// Collect the strictly increasing marker sequence for `notes`.
///
/// The result always starts at zero and holds at most `2 * notes.len() + 1`
/// values. It does not depend on the order of `notes`.
pub fn extract_markers(notes: &[Note]) -> Vec<Frac> {
    let mut markers = Vec::with_capacity(notes.len() * 2 + 1);
    markers.push(Frac::ZERO);
    for note in notes {
        markers.push(note.start());
        markers.push(note.end());
    }

    markers.sort_unstable();
    markers.dedup();

    debug!(notes = notes.len(), markers = markers.len(), "extracted markers");
    markers
}
