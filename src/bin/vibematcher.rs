//! `vibematcher` - find items that match a vibe from the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vibematcher::{
    Console, ConsoleCommand, ConsoleReply, EXAMPLE_VIBES, VibeConfig, VibeMatcher, clamp_top_n,
    glyph_for, render_results, run_smoke, start_or_fatal,
};

#[derive(Debug, Parser)]
#[command(name = "vibematcher", version, about = "Match a free-text vibe against the catalog")]
struct Cli {
    /// YAML config file; defaults apply when omitted.
    #[arg(long, short, env = "VIBEMATCHER_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the catalog against one query.
    Find {
        query: String,
        /// Number of matches to show (clamped to the catalog size).
        #[arg(long, short = 'n')]
        top_n: Option<usize>,
        /// Print hits as JSON instead of the console screen.
        #[arg(long)]
        json: bool,
    },
    /// Run the fixed smoke queries and print the report table.
    Smoke,
    /// List catalog items with their glyphs.
    Catalog,
    /// Interactive console.
    Console,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = VibeConfig::load(cli.config.as_deref()).context("loading configuration")?;

    let matcher = match start_or_fatal(&config).await {
        Ok(matcher) => matcher,
        Err(fatal) => {
            eprintln!("{fatal}");
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.command {
        Command::Find { query, top_n, json } => {
            let top_n = clamp_top_n(
                top_n.unwrap_or(config.matcher.default_top_n),
                matcher.catalog().len(),
            );
            let hits = matcher.find_matches(&query, top_n)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                println!("{}", render_results(&query, &hits));
            }
        }
        Command::Smoke => {
            let report = run_smoke(&matcher, &config.smoke)?;
            print!("{}", report.render_table());
            if !report.passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Catalog => {
            for item in matcher.catalog() {
                println!(
                    "{} {}  [{}]\n    {}",
                    glyph_for(item.vibes.as_slice()),
                    item.name,
                    item.vibes.join(", "),
                    item.description
                );
            }
        }
        Command::Console => run_console(&matcher, config.matcher.default_top_n)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn run_console(matcher: &VibeMatcher, default_top_n: usize) -> Result<()> {
    let mut console = Console::new();
    let mut top_n = clamp_top_n(default_top_n, matcher.catalog().len());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Describe a feeling, a place, a movie, or a style.");
    println!("Need inspiration? Try these (:example <n>, then Enter to search):");
    for (i, vibe) in EXAMPLE_VIBES.iter().enumerate() {
        println!("  {}. {vibe}", i + 1);
    }
    println!("Commands: :top <n>, :clear, :quit\n");
    println!("{}\n", console.screen());

    loop {
        print!("vibe> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match console.handle(ConsoleCommand::parse(&line), matcher, &mut top_n)? {
            ConsoleReply::Quit => break,
            ConsoleReply::Note(note) => println!("{note}"),
            ConsoleReply::Screen => println!("{}\n", console.screen()),
        }
    }
    Ok(())
}
