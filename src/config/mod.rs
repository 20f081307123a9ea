// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Piece files.
//!
//! A piece file holds an optional name, playback settings and a list of
//! notes. Start times and durations are exact fractions written as `"n/d"`
//! strings or plain integers; pitches are either a frequency in Hz or a name
//! such as `"A4"`. Files ending in `.toml` are TOML, anything else is YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audio::SynthConfig;
use crate::music::PitchTable;
use crate::piece::{Note, Piece};
use crate::timing::{Frac, Tempo, DEFAULT_BPM};

/// Root of a piece file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PieceFile {
    /// Piece name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Playback settings
    #[serde(default)]
    pub settings: Settings,
    /// Notes in piece order
    #[serde(default)]
    pub notes: Vec<NoteConfig>,
}

impl PieceFile {
    /// Load a piece file, choosing the format from the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read piece file: {:?}", path))?;
        let file = if is_toml(path) {
            Self::from_toml(&contents)
        } else {
            Self::from_yaml(&contents)
        }
        .with_context(|| format!("Invalid piece file: {:?}", path))?;
        info!(path = %path.display(), notes = file.notes.len(), "loaded piece file");
        Ok(file)
    }

    /// Parse a piece from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML piece")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize piece to YAML")
    }

    /// Parse a piece from a TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML piece")
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize piece to TOML")
    }

    /// Save to a file, choosing the format from the extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, text).with_context(|| format!("Failed to write piece file: {:?}", path))
    }

    /// Build a validated piece, resolving pitch names through `table`
    pub fn to_piece(&self, table: &mut PitchTable) -> Result<Piece> {
        let mut piece = Piece::new();
        for (index, config) in self.notes.iter().enumerate() {
            let pitch = match &config.pitch {
                Pitch::Hz(freq) => *freq,
                Pitch::Name(name) => table
                    .frequency(name)
                    .with_context(|| format!("Invalid pitch in note {}", index))?,
            };
            let note = Note::new(pitch, config.start, config.duration)
                .with_context(|| format!("Invalid note {}", index))?;
            piece.push(note);
        }
        if let Some(name) = &self.name {
            piece = piece.named(name.clone());
        }
        Ok(piece)
    }

    /// Describe an existing piece, writing pitches in Hz
    pub fn from_piece(piece: &Piece, settings: Settings) -> Self {
        Self {
            name: piece.name().map(str::to_string),
            settings,
            notes: piece
                .notes()
                .iter()
                .map(|note| NoteConfig {
                    pitch: Pitch::Hz(note.pitch()),
                    start: note.start(),
                    duration: note.duration(),
                })
                .collect(),
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"))
}

/// Playback settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Tempo in BPM
    #[serde(default = "default_tempo")]
    pub tempo: u32,
    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Peak level of one voice (0.0 - 1.0)
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    /// Master gain (0.0 - 1.0)
    #[serde(default = "default_gain")]
    pub gain: f32,
}

fn default_tempo() -> u32 {
    DEFAULT_BPM
}
fn default_sample_rate() -> u32 {
    44100
}
fn default_amplitude() -> f32 {
    0.1
}
fn default_gain() -> f32 {
    0.9
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            sample_rate: default_sample_rate(),
            amplitude: default_amplitude(),
            gain: default_gain(),
        }
    }
}

impl Settings {
    /// Tempo described by these settings
    pub fn to_tempo(&self) -> Result<Tempo> {
        Tempo::from_bpm(self.tempo).with_context(|| format!("Invalid tempo: {}", self.tempo))
    }

    /// Synth configuration described by these settings
    pub fn synth_config(&self) -> SynthConfig {
        SynthConfig {
            sample_rate: self.sample_rate,
            amplitude: self.amplitude,
            gain: self.gain,
        }
    }
}

/// One note as written in a piece file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteConfig {
    /// Frequency or pitch name
    pub pitch: Pitch,
    /// Start in beats
    #[serde(default)]
    pub start: Frac,
    /// Duration in beats
    pub duration: Frac,
}

/// A pitch given either in Hz or by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Pitch {
    /// Frequency in Hz
    Hz(f64),
    /// Name such as `A4` or `Eb3`
    Name(String),
}
