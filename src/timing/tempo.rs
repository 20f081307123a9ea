// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo conversion from beats to wall-clock time.
//!
//! Seconds per beat is kept as an exact [`Frac`], so converting a segment
//! boundary to a sample index never accumulates rounding error: every
//! boundary is rounded once, from its exact position.

use std::time::Duration;

use super::fraction::{Frac, FracError};

/// Default tempo in BPM
pub const DEFAULT_BPM: u32 = 60;

/// A fixed tempo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    /// Beats per minute
    bpm: u32,
    /// Exact length of one beat in seconds
    seconds_per_beat: Frac,
}

impl Tempo {
    /// Create a tempo from beats per minute (0 is a division by zero)
    pub fn from_bpm(bpm: u32) -> Result<Self, FracError> {
        Ok(Self {
            bpm,
            seconds_per_beat: Frac::new(60, bpm as i64)?,
        })
    }

    /// Get beats per minute
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Get the exact length of one beat in seconds
    pub fn seconds_per_beat(&self) -> Frac {
        self.seconds_per_beat
    }

    /// Length of one beat as a `Duration`
    pub fn beat_duration(&self) -> Duration {
        Duration::from_nanos(60_000_000_000 / self.bpm as u64)
    }

    /// Exact number of seconds spanned by `beats`
    pub fn seconds(&self, beats: Frac) -> Result<Frac, FracError> {
        beats.checked_mul(self.seconds_per_beat)
    }

    /// Sample index of a (non-negative) beat position, rounded half up
    pub fn sample_offset(&self, beats: Frac, sample_rate: u32) -> Result<u64, FracError> {
        let overflow = FracError::Overflow { operation: "sample offset" };
        let numer = beats.numer() as i128 * 60 * sample_rate as i128;
        let denom = beats.denom() as i128 * self.bpm as i128;
        if numer < 0 {
            return Err(overflow);
        }
        u64::try_from((2 * numer + denom) / (2 * denom)).map_err(|_| overflow)
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: DEFAULT_BPM,
            seconds_per_beat: Frac::ONE,
        }
    }
}
