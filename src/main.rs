// src/main.rs
// Command-line driver: builds a card, marks it, and reports or highlights
// the winning patterns.
//
// Subcommands:
// - check: mark squares / called numbers and print which patterns are won
// - highlight: walk a pattern's groups on the card in the terminal (ESC exits)

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use bingo::card::{Card, CardGenerator};
use bingo::config::{BingoConfig, DEFAULT_CONFIG_PATH};
use bingo::defs::{Coordinate, Number};
use bingo::highlight::HighlightSequence;
use bingo::logging::{log_error, log_info, log_warning};
use bingo::matcher::PatternReport;
use bingo::pattern::Pattern;
use bingo::terminal;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo card pattern checker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mark squares on a card and report which patterns it satisfies
    Check {
        #[command(flatten)]
        card: CardArgs,

        /// Print the card and report as JSON
        #[arg(long)]
        json: bool,

        /// Write the marked card as JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Step through a pattern's groups on the card
    Highlight {
        /// Pattern to show (corners, lines, coverall, center, stamp)
        pattern: Pattern,

        #[command(flatten)]
        card: CardArgs,

        /// Only show groups that are fully marked
        #[arg(long)]
        winners_only: bool,

        /// Stop after one pass instead of cycling
        #[arg(long)]
        once: bool,
    },
}

#[derive(Args)]
struct CardArgs {
    /// Square to mark, as ROW,COL (repeatable)
    #[arg(short, long = "mark", value_name = "ROW,COL", allow_hyphen_values = true)]
    marks: Vec<Coordinate>,

    /// Called numbers to mark, comma separated
    #[arg(short, long, value_delimiter = ',')]
    called: Vec<Number>,

    /// Seed for the generated card
    #[arg(long)]
    seed: Option<u64>,

    /// Load the card from a JSON file instead of generating one
    #[arg(long = "card", conflicts_with = "seed")]
    card_file: Option<PathBuf>,
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    card: &'a Card,
    patterns: Vec<PatternReport>,
}

fn build_card(config: &BingoConfig, args: &CardArgs) -> Result<Card, Box<dyn Error>> {
    let mut card = match &args.card_file {
        Some(path) => {
            let card: Card = serde_json::from_str(&fs::read_to_string(path)?)?;
            if card.geometry() != &config.geometry {
                log_warning(&format!("Card in {} uses a different board geometry than the configuration", path.display()));
            }
            card
        }
        None => {
            let generator = CardGenerator::new(config.free_center);
            match args.seed {
                Some(seed) => generator.generate_with_rng(&config.geometry, &mut StdRng::seed_from_u64(seed))?,
                None => generator.generate(&config.geometry)?,
            }
        }
    };

    for &coordinate in &args.marks {
        card.mark(coordinate)?;
    }
    for &number in &args.called {
        if card.mark_number(number).is_empty() {
            log_info(&format!("Number {number} is not on this card"));
        }
    }
    Ok(card)
}

fn run_check(config: &BingoConfig, args: &CardArgs, json: bool, save: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    let matcher = config.matcher()?;
    let card = build_card(config, args)?;
    let patterns = matcher.report(&card)?;

    if let Some(path) = save {
        fs::write(path, serde_json::to_string_pretty(&card)?)?;
        log_info(&format!("Card saved to {}", path.display()));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&CheckOutput { card: &card, patterns })?);
        return Ok(());
    }

    terminal::print_card(&card);
    println!();
    for report in &patterns {
        if report.satisfied {
            println!("{:<9} WON", report.pattern.to_string());
            for group in &report.winning_groups {
                let squares: Vec<String> = group.iter().map(Coordinate::to_string).collect();
                println!("          {}", squares.join(" "));
            }
        } else {
            println!("{:<9} -", report.pattern.to_string());
        }
    }

    let won = patterns.iter().filter(|report| report.satisfied).count();
    log_info(&format!("{} of {} patterns satisfied, {} squares marked", won, patterns.len(), card.marked_count()));
    Ok(())
}

fn run_highlight(config: &BingoConfig, pattern: Pattern, args: &CardArgs, winners_only: bool, once: bool) -> Result<(), Box<dyn Error>> {
    let mut card = build_card(config, args)?;
    let mut sequence = HighlightSequence::new(pattern, card.geometry(), config.highlight_timing())?
        .repeating(!once)
        .winners_only(winners_only);

    let mut frames = 0;
    {
        let _raw = terminal::RawMode::enable()?;
        let title = format!("Pattern: {pattern}");
        while let Some(step) = sequence.next_step(&mut card)? {
            terminal::draw_frame(&title, &card)?;
            frames += 1;
            if terminal::hold_or_escape(step.hold)? {
                break;
            }
        }
        sequence.stop(&mut card)?;
    }

    if frames == 0 {
        log_info(&format!("Nothing to highlight for pattern {pattern}"));
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = BingoConfig::load_from_or_default(&cli.config);

    let result = match &cli.command {
        Command::Check { card, json, save } => run_check(&config, card, *json, save.as_ref()),
        Command::Highlight { pattern, card, winners_only, once } => {
            run_highlight(&config, *pattern, card, *winners_only, *once)
        }
    };

    if let Err(e) = result {
        log_error(&e.to_string());
        std::process::exit(1);
    }
}
