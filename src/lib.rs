// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exact-time note scheduling.
//!
//! A [`Piece`](piece::Piece) is a set of possibly overlapping notes whose
//! start times and durations are exact fractions of a beat. Scheduling
//! sweeps the piece into contiguous [`Segment`](piece::Segment)s, each with a
//! constant set of sounding pitches, which can then be drawn as a text grid
//! or synthesised to a WAV file.

pub mod audio;
pub mod config;
pub mod music;
pub mod piece;
pub mod render;
pub mod timing;
