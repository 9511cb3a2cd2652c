//! Offline preview of filename cleaning.
//!
//! Loads a word list and prints what the bot would rename each filename to,
//! so a word list can be checked before it is deployed.

use std::io::BufRead;
use std::process::ExitCode;

use clap::Parser;

use oldtown_file_bot::naming::{WordList, brand_filename, clean_filename};

/// Filename cleaning preview.
#[derive(Parser, Debug)]
#[command(name = "clean_filenames")]
#[command(about = "Shows how the bot would rename the given filenames")]
#[command(version)]
struct Args {
    /// Path to the newline-delimited word list.
    #[arg(short, long, default_value = "words_to_remove.txt")]
    words: String,

    /// Show the intermediate cleaned name as well.
    #[arg(short, long)]
    verbose: bool,

    /// Filenames to preview. Read from stdin, one per line, when omitted.
    filenames: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let words = match WordList::load_from_file(&args.words) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("✗ Could not load word list {}: {e}", args.words);
            return ExitCode::FAILURE;
        }
    };

    if args.verbose {
        println!("Loaded {} words from {}", words.len(), args.words);
        for word in words.words() {
            println!("  - {word}");
        }
        println!();
    }

    let filenames = if args.filenames.is_empty() {
        match read_stdin_lines() {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("✗ Failed to read filenames from stdin: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        args.filenames
    };

    for filename in &filenames {
        let cleaned = clean_filename(filename, Some(&words));
        let branded = brand_filename(&cleaned);

        if args.verbose {
            println!("{filename}\n  cleaned: {cleaned}\n  sent as: {branded}");
        } else {
            println!("{filename} → {branded}");
        }
    }

    ExitCode::SUCCESS
}

fn read_stdin_lines() -> std::io::Result<Vec<String>> {
    std::io::stdin()
        .lock()
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .collect()
}
