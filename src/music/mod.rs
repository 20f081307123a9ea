// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities.
//!
//! This module maps pitch names such as `A4` or `Eb3` to frequencies.

pub mod labels;

pub use labels::{LabelError, PitchTable};
