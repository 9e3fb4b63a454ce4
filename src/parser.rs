use thiserror::Error;

use crate::chord::ChordQuality;
use crate::error::TheoryError;
use crate::interval::IntervalSpec;
use crate::note::Pitch;
use crate::query::{Probe, Query};
use crate::scale::ScaleQuality;
use crate::spelling::Direction;

/// Errors from reading a single query
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error(transparent)]
    Theory(#[from] TheoryError),
}

/// Parse errors with location info
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    pub source: ParseError,
}

/// Parse a note such as `C`, `F#` or `Bbb`
pub fn parse_note(name: &str) -> Result<Pitch, TheoryError> {
    name.trim().parse()
}

/// Parse an interval such as `MAJOR 3` or `PERFECT 11`
pub fn parse_interval(name: &str) -> Result<IntervalSpec, TheoryError> {
    name.trim().parse()
}

/// Split a qualified name into its root note and the remaining quality text.
fn split_root(name: &str) -> (&str, &str) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((root, quality)) => (root, quality.trim()),
        None => (name, ""),
    }
}

/// Parse a scale name such as `A MAJOR` or `G HARMONIC MINOR`
pub fn parse_scale_name(name: &str) -> Result<(Pitch, ScaleQuality), TheoryError> {
    let (tonic, quality) = split_root(name);
    Ok((parse_note(tonic)?, quality.parse()?))
}

/// Parse a chord name such as `C MAJOR`, `C DOMINANT 7` or `C MAJOR #11`
pub fn parse_chord_name(name: &str) -> Result<(Pitch, ChordQuality), TheoryError> {
    let (bass, quality) = split_root(name);
    Ok((parse_note(bass)?, quality.parse()?))
}

/// Split a trailing `[DEGREE]` or `contains NOTE` off a group name.
fn split_probe(text: &str) -> (&str, Probe) {
    let text = text.trim();
    if text.ends_with(']') {
        if let Some(open) = text.find('[') {
            let degree = text[open + 1..text.len() - 1].trim();
            return (text[..open].trim(), Probe::Degree(degree.to_string()));
        }
    }
    if let Some((name, note)) = text.split_once(" contains ") {
        return (name.trim(), Probe::Contains(note.trim().to_string()));
    }
    (text, Probe::All)
}

/// Parse one query line.
///
/// ```text
/// note C#
/// ascend C MAJOR 6
/// descend C MINOR 3
/// scale A MAJOR
/// scale A MAJOR [SUBMEDIANT]
/// chord C DOMINANT 7 contains Bb
/// ```
pub fn parse_query(line: &str) -> Result<Query, ParseError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "note" => {
            if rest.is_empty() {
                return Err(ParseError::Missing("note name"));
            }
            Ok(Query::Note(parse_note(rest)?))
        }
        "ascend" | "descend" => {
            let direction = if command.eq_ignore_ascii_case("ascend") {
                Direction::Ascending
            } else {
                Direction::Descending
            };
            let (note, interval) = split_root(rest);
            if note.is_empty() {
                return Err(ParseError::Missing("note name"));
            }
            if interval.is_empty() {
                return Err(ParseError::Missing("interval"));
            }
            Ok(Query::Interval {
                note: parse_note(note)?,
                interval: parse_interval(interval)?,
                direction,
            })
        }
        "scale" => {
            let (name, probe) = split_probe(rest);
            if name.is_empty() {
                return Err(ParseError::Missing("scale name"));
            }
            let (tonic, quality) = parse_scale_name(name)?;
            Ok(Query::Scale {
                tonic,
                quality,
                probe,
            })
        }
        "chord" => {
            let (name, probe) = split_probe(rest);
            if name.is_empty() {
                return Err(ParseError::Missing("chord name"));
            }
            let (bass, quality) = parse_chord_name(name)?;
            Ok(Query::Chord {
                bass,
                quality,
                probe,
            })
        }
        _ => Err(ParseError::UnknownCommand(command.to_string())),
    }
}

/// Parse a query script: one query per line, `#` comments and blank lines
/// skipped. Each query is returned with its 1-based line number.
pub fn parse_script(input: &str) -> Result<Vec<(usize, Query)>, ScriptError> {
    let mut queries = Vec::new();

    for (line_idx, line) in input.lines().enumerate() {
        let line_num = line_idx + 1;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let query = parse_query(trimmed).map_err(|source| ScriptError {
            line: line_num,
            source,
        })?;
        queries.push((line_num, query));
    }

    Ok(queries)
}
