//! Import the question library from the spreadsheet CSV export
//!
//! Usage: cargo run --bin import_questions -- --input questions.csv

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use underwriting_engine::catalog::{import_questions_csv, save_questions};
use underwriting_engine::config::DEFAULT_QUESTIONS_PATH;

#[derive(Parser, Debug)]
#[command(about = "Convert the question spreadsheet export into the question library JSON", version)]
struct Cli {
    /// CSV export (Id, category, Question_Number, Question_Text, Answer_Format, Answer_Values[, EMLoading, Decision])
    #[arg(long)]
    input: PathBuf,
    /// Question library file to overwrite
    #[arg(long, default_value = DEFAULT_QUESTIONS_PATH)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let questions = import_questions_csv(&cli.input)
        .with_context(|| format!("Failed to import {}", cli.input.display()))?;

    let main_count = questions.iter().filter(|q| q.is_main()).count();
    save_questions(&cli.output, &questions)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    println!(
        "Imported {} questions ({} main, {} sub-questions) into {}",
        questions.len(),
        main_count,
        questions.len() - main_count,
        cli.output.display()
    );
    Ok(())
}
