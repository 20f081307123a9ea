// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sine synthesis of scheduled segments.
//!
//! Each segment covers the samples `[offset(start), offset(end))`, where
//! offsets are computed from the exact beat position, so segment lengths never
//! drift. Silence is written as zeros. Several pitches are averaged, which
//! keeps a chord no louder than a single voice.

use std::f64::consts::TAU;

use tracing::debug;

use crate::piece::Segment;
use crate::timing::{FracError, Tempo};

/// Synth configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Peak level of one voice (0.0 - 1.0)
    pub amplitude: f32,
    /// Master gain (0.0 - 1.0)
    pub gain: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            amplitude: 0.1,
            gain: 0.9,
        }
    }
}

/// Renders segments to mono samples
#[derive(Debug, Clone)]
pub struct Synth {
    /// Sample rate in Hz
    sample_rate: u32,
    /// Peak level of one voice
    amplitude: f32,
    /// Master gain
    gain: f32,
}

impl Synth {
    /// Create a synth, clamping amplitude and gain to 0.0 - 1.0
    pub fn new(config: SynthConfig) -> Self {
        Self {
            sample_rate: config.sample_rate,
            amplitude: config.amplitude.clamp(0.0, 1.0),
            gain: config.gain.clamp(0.0, 1.0),
        }
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the single-voice amplitude
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Set master gain (0.0 - 1.0)
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Get current gain
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Render ordered segments at `tempo`.
    ///
    /// The buffer starts at sample 0 (beat 0); a gap before the first
    /// segment is filled with silence.
    pub fn render(&self, segments: &[Segment], tempo: &Tempo) -> Result<Vec<f32>, FracError> {
        let total = match segments.last() {
            Some(last) => tempo.sample_offset(last.end(), self.sample_rate)?,
            None => 0,
        };
        let mut buffer = Vec::with_capacity(total as usize);

        for segment in segments {
            let from = tempo.sample_offset(segment.start(), self.sample_rate)?;
            let to = tempo.sample_offset(segment.end(), self.sample_rate)?;
            if (buffer.len() as u64) < from {
                buffer.resize(from as usize, 0.0);
            }
            let from = from.max(buffer.len() as u64);
            buffer.extend((from..to).map(|n| self.sample(segment.pitches(), n)));
        }

        debug!(
            segments = segments.len(),
            samples = buffer.len(),
            bpm = tempo.bpm(),
            "rendered audio"
        );
        Ok(buffer)
    }

    /// Value of sample `n` (absolute, so phase carries across segments)
    fn sample(&self, pitches: &[f64], n: u64) -> f32 {
        if pitches.is_empty() {
            return 0.0;
        }
        let t = n as f64 / self.sample_rate as f64;
        let sum: f64 = pitches.iter().map(|&freq| (TAU * freq * t).sin()).sum();
        (sum / pitches.len() as f64) as f32 * self.amplitude * self.gain
    }
}

impl Default for Synth {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}
