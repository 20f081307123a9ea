// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch names to frequencies.
//!
//! Names are `<tone><octave>`: a letter A-G (any case), an optional `#` or
//! `b`, and a single octave digit, e.g. `A4`, `c#5`, `Eb1`. Frequencies use
//! twelve-tone equal temperament on a piano keyboard where key 49 is A4 at
//! 440 Hz.
//!
//! Lookups are memoised in a [`PitchTable`] that the caller creates and owns;
//! there is no shared global table.

use std::collections::HashMap;

use thiserror::Error;

/// Piano key number of A4
pub const A4_KEY: i32 = 49;

/// Frequency of A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Errors produced while parsing a pitch name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// Name is not 2 or 3 characters long
    #[error("invalid length (need 2 or 3) in {0:?}")]
    InvalidLength(String),
    /// Last character is not an octave digit
    #[error("invalid octave in {0:?}")]
    Octave(String),
    /// Tone part is not a known note name
    #[error("unknown tone in {0:?}")]
    Tone(String),
}

/// Semitone offset of a tone from C in the same octave.
///
/// `B#` and `Cb` cross into the neighbouring octave.
fn tone_offset(tone: &str) -> Option<i32> {
    match tone {
        "Cb" => Some(-1),
        "C" => Some(0),
        "C#" | "Db" => Some(1),
        "D" => Some(2),
        "D#" | "Eb" => Some(3),
        "E" | "Fb" => Some(4),
        "F" | "E#" => Some(5),
        "F#" | "Gb" => Some(6),
        "G" => Some(7),
        "G#" | "Ab" => Some(8),
        "A" => Some(9),
        "A#" | "Bb" => Some(10),
        "B" => Some(11),
        "B#" => Some(12),
        _ => None,
    }
}

/// Memoising pitch-name lookup
#[derive(Debug, Clone, Default)]
pub struct PitchTable {
    /// Normalised name to key index
    names: HashMap<String, i32>,
    /// Key index to frequency
    freqs: HashMap<i32, f64>,
}

impl PitchTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency of a piano key (49 = A4)
    pub fn key_frequency(&mut self, index: i32) -> f64 {
        *self
            .freqs
            .entry(index)
            .or_insert_with(|| 2f64.powf((index - A4_KEY) as f64 / 12.0) * A4_FREQUENCY)
    }

    /// Piano key index of a pitch name
    pub fn key_index(&mut self, name: &str) -> Result<i32, LabelError> {
        let chars: Vec<char> = name.chars().collect();
        if chars.len() != 2 && chars.len() != 3 {
            return Err(LabelError::InvalidLength(name.to_string()));
        }

        let normalised: String = chars[0]
            .to_uppercase()
            .chain(chars[1..].iter().copied())
            .collect();
        if let Some(&index) = self.names.get(&normalised) {
            return Ok(index);
        }

        let octave = chars[chars.len() - 1]
            .to_digit(10)
            .ok_or_else(|| LabelError::Octave(name.to_string()))? as i32;
        let tone = &normalised[..normalised.len() - 1];
        let offset = tone_offset(tone).ok_or_else(|| LabelError::Tone(name.to_string()))?;

        let index = octave * 12 + offset - 8;
        self.names.insert(normalised, index);
        Ok(index)
    }

    /// Frequency in Hz of a pitch name
    pub fn frequency(&mut self, name: &str) -> Result<f64, LabelError> {
        let index = self.key_index(name)?;
        Ok(self.key_frequency(index))
    }

    /// Frequency of a literal pitch name.
    ///
    /// Panics on an invalid name. Only for names written in source code; use
    /// [`PitchTable::frequency`] for anything read at runtime.
    pub fn f(&mut self, name: &str) -> f64 {
        match self.frequency(name) {
            Ok(freq) => freq,
            Err(err) => panic!("{err} (use PitchTable::frequency for runtime input)"),
        }
    }

    /// Number of memoised names
    pub fn cached_names(&self) -> usize {
        self.names.len()
    }

    /// Number of memoised frequencies
    pub fn cached_frequencies(&self) -> usize {
        self.freqs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_to(n: f64, dp: i32) -> f64 {
        let k = 10f64.powi(dp);
        (n * k).round() / k
    }

    #[test]
    fn test_known_frequencies() {
        let cases = [
            ("A0", 27.5),
            ("A4", 440.0),
            ("A#7", 3729.310),
            ("F6", 1396.913),
            ("C4", 261.6256),
            ("Eb1", 38.89087),
            ("D#1", 38.89087),
            // Cb is the B below
            ("Cb4", 246.9417),
            ("B3", 246.9417),
            // E# is F
            ("E#5", 698.4565),
            ("F5", 698.4565),
            // B# is the C above
            ("B#2", 130.8128),
            ("C3", 130.8128),
            // Fb is E
            ("Fb7", 2637.020),
            ("E7", 2637.020),
        ];

        let mut table = PitchTable::new();
        for (name, expected) in cases {
            let actual = table
                .frequency(name)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(round_to(actual, 2), round_to(expected, 2), "{name}");
        }
    }

    #[test]
    fn test_lowercase_tone() {
        let mut table = PitchTable::new();
        assert_eq!(table.frequency("a4").unwrap(), 440.0);
        assert_eq!(table.key_index("bb3").unwrap(), table.key_index("A#3").unwrap());
    }

    #[test]
    fn test_invalid_names() {
        let mut table = PitchTable::new();
        assert_eq!(
            table.frequency("A"),
            Err(LabelError::InvalidLength("A".to_string()))
        );
        assert_eq!(
            table.frequency("A#10"),
            Err(LabelError::InvalidLength("A#10".to_string()))
        );
        assert_eq!(table.frequency("Ax"), Err(LabelError::Octave("Ax".to_string())));
        assert_eq!(table.frequency("H4"), Err(LabelError::Tone("H4".to_string())));
        assert_eq!(table.frequency("Cx4"), Err(LabelError::Tone("Cx4".to_string())));
    }

    #[test]
    fn test_lookups_are_cached() {
        let mut table = PitchTable::new();
        table.frequency("A4").unwrap();
        table.frequency("a4").unwrap();
        table.frequency("A4").unwrap();
        assert_eq!(table.cached_names(), 1);
        assert_eq!(table.cached_frequencies(), 1);

        // Enharmonic names share one frequency entry.
        table.frequency("D#1").unwrap();
        table.frequency("Eb1").unwrap();
        assert_eq!(table.cached_names(), 3);
        assert_eq!(table.cached_frequencies(), 2);
    }

    #[test]
    fn test_key_frequency() {
        let mut table = PitchTable::new();
        assert_eq!(table.key_frequency(A4_KEY), A4_FREQUENCY);
        assert_eq!(table.key_frequency(A4_KEY + 12), 880.0);
    }

    #[test]
    #[should_panic(expected = "unknown tone")]
    fn test_literal_lookup_panics() {
        PitchTable::new().f("Q4");
    }
}
