// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exact time arithmetic.
//!
//! This module provides the exact fraction type used for every musical
//! time value, and tempo conversion from beats to seconds and samples.

pub mod fraction;
pub mod tempo;

pub use fraction::{Frac, FracError};
pub use tempo::{Tempo, DEFAULT_BPM};
