// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Offline audio for scheduled pieces.
//!
//! This module provides:
//! - Sine synthesis of a segment list
//! - Mono 16-bit PCM WAV output

pub mod synth;
pub mod wav;

pub use synth::{Synth, SynthConfig};
pub use wav::write_wav_16bit;
