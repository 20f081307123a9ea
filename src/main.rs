// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use piano::audio::{write_wav_16bit, Synth};
use piano::config::PieceFile;
use piano::music::PitchTable;
use piano::piece::Piece;
use piano::render::Rendering;
use tracing::info;

fn print_usage() {
    println!("piano - Exact-time note scheduler");
    println!();
    println!("Usage: piano [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --blocks <FILE>          Print the segments of a piece file");
    println!("  --render <FILE>          Draw a piece file as a text grid");
    println!("  --wav <FILE> <OUT.wav>   Synthesise a piece file to a WAV file");
    println!("  --freq <NAME>            Print the frequency of a pitch name (e.g. A4, Eb3)");
    println!("  --help                   Show this help message");
    println!();
    println!("Piece files ending in .toml are read as TOML, anything else as YAML.");
}

fn load_piece(path: &str) -> Result<(PieceFile, Piece)> {
    let file = PieceFile::load(path)?;
    let piece = file
        .to_piece(&mut PitchTable::new())
        .with_context(|| format!("Invalid piece in {:?}", path))?;
    Ok((file, piece))
}

fn print_blocks(path: &str) -> Result<()> {
    let (_, piece) = load_piece(path)?;
    for segment in piece.segments()? {
        if segment.is_silence() {
            println!("{} +{}: rest", segment.start(), segment.duration());
        } else {
            let pitches: Vec<String> = segment
                .pitches()
                .iter()
                .map(|p| format!("{:.2}", p))
                .collect();
            println!("{} +{}: {}", segment.start(), segment.duration(), pitches.join(" "));
        }
    }
    Ok(())
}

fn print_rendering(path: &str) -> Result<()> {
    let (_, piece) = load_piece(path)?;
    let rendering = Rendering::from_piece(&piece)?;
    if let Some(name) = piece.name() {
        println!("{}", name);
    }
    print!("{}", rendering);
    Ok(())
}

fn write_wav(path: &str, out: &str) -> Result<()> {
    let (file, piece) = load_piece(path)?;
    let tempo = file.settings.to_tempo()?;
    let synth = Synth::new(file.settings.synth_config());

    let samples = synth.render(&piece.segments()?, &tempo)?;
    write_wav_16bit(Path::new(out), &samples, synth.sample_rate())
        .with_context(|| format!("Failed to write WAV file: {:?}", out))?;

    info!(
        seconds = samples.len() as f64 / synth.sample_rate() as f64,
        "synthesis complete"
    );
    println!("Wrote {} samples to {}", samples.len(), out);
    Ok(())
}

fn print_frequency(name: &str) -> Result<()> {
    let freq = PitchTable::new().frequency(name)?;
    println!("{}: {:.4} Hz", name, freq);
    Ok(())
}

fn require<'a>(args: &'a [String], index: usize, what: &str) -> &'a str {
    match args.get(index) {
        Some(arg) => arg.as_str(),
        None => {
            eprintln!("Error: {} requires {}", args[1], what);
            eprintln!("Run with --help for usage information");
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("piano - Exact-time note scheduler");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--blocks" => {
            print_blocks(require(&args, 2, "a piece file"))?;
        }
        "--render" => {
            print_rendering(require(&args, 2, "a piece file"))?;
        }
        "--wav" => {
            let path = require(&args, 2, "a piece file");
            let out = require(&args, 3, "an output file");
            write_wav(path, out)?;
        }
        "--freq" => {
            print_frequency(require(&args, 2, "a pitch name"))?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
