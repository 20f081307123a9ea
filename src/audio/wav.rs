// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Mono 16-bit PCM WAV writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

/// Size of the RIFF/fmt/data headers in bytes
pub const HEADER_LEN: usize = 44;

/// Convert a sample in `[-1.0, 1.0]` to 16-bit PCM, clamping anything outside
fn to_pcm(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped >= 0.0 {
        (clamped * i16::MAX as f32) as i16
    } else {
        // -1.0 maps to i16::MIN
        (clamped * -(i16::MIN as f32)) as i16
    }
}

/// Write samples as a mono 16-bit PCM WAV file
pub fn write_wav_16bit(path: &Path, samples: &[f32], sample_rate: u32) -> io::Result<()> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = num_channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;
    let data_size = u32::try_from(samples.len() * block_align as usize)
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "too many samples for WAV"))?;

    let mut out = BufWriter::new(File::create(path)?);

    // RIFF chunk
    out.write_all(b"RIFF")?;
    out.write_all(&(36 + data_size).to_le_bytes())?;
    out.write_all(b"WAVE")?;

    // fmt subchunk
    out.write_all(b"fmt ")?;
    out.write_all(&16u32.to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?; // PCM
    out.write_all(&num_channels.to_le_bytes())?;
    out.write_all(&sample_rate.to_le_bytes())?;
    out.write_all(&byte_rate.to_le_bytes())?;
    out.write_all(&block_align.to_le_bytes())?;
    out.write_all(&bits_per_sample.to_le_bytes())?;

    // data subchunk
    out.write_all(b"data")?;
    out.write_all(&data_size.to_le_bytes())?;
    for &sample in samples {
        out.write_all(&to_pcm(sample).to_le_bytes())?;
    }
    out.flush()?;

    info!(path = %path.display(), samples = samples.len(), sample_rate, "wrote WAV file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn read_u32(data: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    #[test]
    fn test_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("header.wav");
        write_wav_16bit(&path, &[0.0; 10], 22050).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), HEADER_LEN + 20);
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(read_u32(&data, 4), 36 + 20);
        assert_eq!(&data[8..12], b"WAVE");
        assert_eq!(&data[12..16], b"fmt ");
        assert_eq!(u16::from_le_bytes([data[20], data[21]]), 1);
        assert_eq!(u16::from_le_bytes([data[22], data[23]]), 1);
        assert_eq!(read_u32(&data, 24), 22050);
        assert_eq!(read_u32(&data, 28), 44100);
        assert_eq!(&data[36..40], b"data");
        assert_eq!(read_u32(&data, 40), 20);
    }

    #[test]
    fn test_samples_are_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clamp.wav");
        write_wav_16bit(&path, &[2.0, -2.0, 0.0, -1.0], 8000).unwrap();

        let data = fs::read(&path).unwrap();
        let pcm: Vec<i16> = data[HEADER_LEN..]
            .chunks(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(pcm, vec![i16::MAX, i16::MIN, 0, i16::MIN]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        assert!(write_wav_16bit(&path, &[0.0], 8000).is_err());
    }
}
