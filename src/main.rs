use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use clitheory::parser::{self, ParseError};
use clitheory::query::{Answer, Probe, Query};
use clitheory::repl;
use clitheory::spelling::Direction;

#[derive(Parser)]
#[command(name = "clitheory", about = "Spell notes, intervals, scales and chords")]
#[command(version)]
struct Cli {
    /// Print answers as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log more (-v debug, -vv trace); CLITHEORY_LOG overrides the default
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a note's spelling and semitone class
    Note {
        /// Note name, e.g. F#
        name: String,
    },

    /// Spell the note an interval above another
    Ascend {
        /// Starting note
        note: String,

        /// Interval, e.g. MAJOR 6
        #[arg(required = true, num_args = 1..)]
        interval: Vec<String>,
    },

    /// Spell the note an interval below another
    Descend {
        /// Starting note
        note: String,

        /// Interval, e.g. MINOR 3
        #[arg(required = true, num_args = 1..)]
        interval: Vec<String>,
    },

    /// Build a scale, e.g. `scale A MAJOR`
    Scale {
        /// Tonic and quality
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Print only this degree (e.g. SUBMEDIANT)
        #[arg(long)]
        degree: Option<String>,

        /// Print whether the scale contains this spelling
        #[arg(long, conflicts_with = "degree")]
        contains: Option<String>,
    },

    /// Build a chord, e.g. `chord C DOMINANT 7`
    Chord {
        /// Bass note and quality
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Print only this degree (e.g. THIRD)
        #[arg(long)]
        degree: Option<String>,

        /// Print whether the chord contains this spelling
        #[arg(long, conflicts_with = "degree")]
        contains: Option<String>,
    },

    /// Answer a single query, e.g. `query scale A MAJOR [MEDIANT]`
    Query {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Answer every query in a script file
    Run {
        /// Path to a query script
        file: PathBuf,
    },

    /// Interactive prompt
    Repl,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let query = match cli.command {
        Command::Note { name } => parser::parse_note(&name).map(Query::Note).map_err(ParseError::from),
        Command::Ascend { note, interval } => {
            interval_query(&note, &interval.join(" "), Direction::Ascending)
        }
        Command::Descend { note, interval } => {
            interval_query(&note, &interval.join(" "), Direction::Descending)
        }
        Command::Scale {
            name,
            degree,
            contains,
        } => parser::parse_scale_name(&name.join(" "))
            .map(|(tonic, quality)| Query::Scale {
                tonic,
                quality,
                probe: probe(degree, contains),
            })
            .map_err(ParseError::from),
        Command::Chord {
            name,
            degree,
            contains,
        } => parser::parse_chord_name(&name.join(" "))
            .map(|(bass, quality)| Query::Chord {
                bass,
                quality,
                probe: probe(degree, contains),
            })
            .map_err(ParseError::from),
        Command::Query { text } => parser::parse_query(&text.join(" ")),
        Command::Run { file } => {
            run_script(&file, cli.json);
            return;
        }
        Command::Repl => {
            if let Err(e) = repl::run(cli.json) {
                eprintln!("Prompt error: {}", e);
                std::process::exit(1);
            }
            return;
        }
    };

    let answer = query
        .and_then(|q| Ok(q.evaluate()?))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    print_answer(&answer, cli.json);
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = match verbose {
        0 => EnvFilter::try_from_env("CLITHEORY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("clitheory=debug"),
        _ => EnvFilter::new("clitheory=trace"),
    };

    // Only fails if already initialized
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn interval_query(note: &str, interval: &str, direction: Direction) -> Result<Query, ParseError> {
    Ok(Query::Interval {
        note: parser::parse_note(note)?,
        interval: parser::parse_interval(interval)?,
        direction,
    })
}

fn probe(degree: Option<String>, contains: Option<String>) -> Probe {
    match (degree, contains) {
        (Some(degree), _) => Probe::Degree(degree),
        (None, Some(note)) => Probe::Contains(note),
        (None, None) => Probe::All,
    }
}

fn print_answer(answer: &Answer, json: bool) {
    match answer.render(json) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Render error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_file(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

/// Evaluate a script line by line; failures are reported and the run
/// carries on, exiting non-zero at the end.
fn run_script(path: &PathBuf, json: bool) {
    let input = read_file(path);
    let queries = parser::parse_script(&input).unwrap_or_else(|e| {
        eprintln!("Parse error: {}", e);
        std::process::exit(1);
    });

    let mut failed = 0;
    for (line, query) in &queries {
        match query.evaluate() {
            Ok(answer) => print_answer(&answer, json),
            Err(e) => {
                eprintln!("line {}: {}", line, e);
                failed += 1;
            }
        }
    }

    tracing::info!(queries = queries.len(), failed, "script finished");
    if failed > 0 {
        std::process::exit(1);
    }
}
