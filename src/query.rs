//! Structured requests against the theory engine and their answers.

use std::fmt;

use serde::Serialize;

use crate::chord::{Chord, ChordQuality};
use crate::error::Result;
use crate::interval::IntervalSpec;
use crate::navigator::transpose;
use crate::note::Pitch;
use crate::parser::{self, ParseError};
use crate::scale::{Scale, ScaleQuality};
use crate::spelling::Direction;

/// What to report about a scale or chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Every note
    All,
    /// One note, by degree name
    Degree(String),
    /// Whether a spelling is present
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Note(Pitch),
    Interval {
        note: Pitch,
        interval: IntervalSpec,
        direction: Direction,
    },
    Scale {
        tonic: Pitch,
        quality: ScaleQuality,
        probe: Probe,
    },
    Chord {
        bass: Pitch,
        quality: ChordQuality,
        probe: Probe,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Note {
        note: String,
        semitone: u8,
    },
    Interval {
        from: String,
        interval: String,
        direction: &'static str,
        note: String,
    },
    Scale {
        scale: String,
        notes: Vec<String>,
        key_signature: Vec<String>,
    },
    Chord {
        chord: String,
        notes: Vec<String>,
    },
    Degree {
        group: String,
        degree: String,
        note: String,
    },
    Contains {
        group: String,
        note: String,
        contains: bool,
    },
}

impl Query {
    pub fn evaluate(&self) -> Result<Answer> {
        match self {
            Query::Note(pitch) => Ok(Answer::Note {
                note: pitch.to_string(),
                semitone: pitch.semitone_class(),
            }),
            Query::Interval {
                note,
                interval,
                direction,
            } => {
                let target = transpose(*note, *interval, *direction)?;
                Ok(Answer::Interval {
                    from: note.to_string(),
                    interval: interval.to_string(),
                    direction: match direction {
                        Direction::Ascending => "ascending",
                        Direction::Descending => "descending",
                    },
                    note: target.to_string(),
                })
            }
            Query::Scale {
                tonic,
                quality,
                probe,
            } => {
                let scale = Scale::new(*tonic, *quality)?;
                let group = scale.to_string();
                match probe {
                    Probe::All => Ok(Answer::Scale {
                        scale: group,
                        notes: scale.ascending(),
                        key_signature: scale.key_signature().spellings(),
                    }),
                    Probe::Degree(degree) => Ok(Answer::Degree {
                        note: scale.lookup(degree)?.to_string(),
                        group,
                        degree: degree.clone(),
                    }),
                    Probe::Contains(note) => Ok(Answer::Contains {
                        contains: scale.contains(note),
                        group,
                        note: note.clone(),
                    }),
                }
            }
            Query::Chord {
                bass,
                quality,
                probe,
            } => {
                let chord = Chord::new(*bass, *quality)?;
                let group = chord.to_string();
                match probe {
                    Probe::All => Ok(Answer::Chord {
                        chord: group,
                        notes: chord.spellings(),
                    }),
                    Probe::Degree(degree) => Ok(Answer::Degree {
                        note: chord.lookup(degree)?.to_string(),
                        group,
                        degree: degree.clone(),
                    }),
                    Probe::Contains(note) => Ok(Answer::Contains {
                        contains: chord.contains(note),
                        group,
                        note: note.clone(),
                    }),
                }
            }
        }
    }
}

/// Parse and evaluate a single query line.
pub fn answer(line: &str) -> std::result::Result<Answer, ParseError> {
    let query = parser::parse_query(line)?;
    Ok(query.evaluate()?)
}

impl Answer {
    /// Render as plain text, or as pretty JSON when `json` is set.
    pub fn render(&self, json: bool) -> serde_json::Result<String> {
        if json {
            serde_json::to_string_pretty(self)
        } else {
            Ok(self.to_string())
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Note { note, semitone } => write!(f, "{} (semitone {})", note, semitone),
            Answer::Interval { note, .. } => f.write_str(note),
            Answer::Scale {
                notes,
                key_signature,
                ..
            } => {
                writeln!(f, "{}", notes.join(" "))?;
                if key_signature.is_empty() {
                    write!(f, "key signature: none")
                } else {
                    write!(f, "key signature: {}", key_signature.join(" "))
                }
            }
            Answer::Chord { notes, .. } => f.write_str(&notes.join(" ")),
            Answer::Degree { note, .. } => f.write_str(note),
            Answer::Contains { contains, .. } => write!(f, "{}", contains),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TheoryError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_note_answer() {
        let a = answer("note Db").unwrap();
        assert_eq!(a.to_string(), "Db (semitone 1)");
    }

    #[test]
    fn test_interval_answers() {
        assert_eq!(answer("ascend C MAJOR 6").unwrap().to_string(), "A");
        assert_eq!(answer("descend C MINOR 3").unwrap().to_string(), "A");
        assert!(matches!(
            answer("ascend A# AUGMENTED 3"),
            Err(ParseError::Theory(TheoryError::NoteName { .. }))
        ));
    }

    #[test]
    fn test_scale_answers() {
        assert_eq!(
            answer("scale A MAJOR").unwrap(),
            Answer::Scale {
                scale: "A MAJOR".into(),
                notes: vec!["A", "B", "C#", "D", "E", "F#", "G#"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                key_signature: vec!["F#".to_string(), "C#".into(), "G#".into()],
            }
        );
        assert_eq!(
            answer("scale C MAJOR").unwrap().to_string(),
            "C D E F G A B\nkey signature: none"
        );
        assert_eq!(answer("scale A MAJOR [SUBMEDIANT]").unwrap().to_string(), "F#");
        assert_eq!(answer("scale Gb MAJOR contains F#").unwrap().to_string(), "false");
        assert!(matches!(
            answer("scale G# MAJOR"),
            Err(ParseError::Theory(TheoryError::InvalidTonic { .. }))
        ));
    }

    #[test]
    fn test_chord_answers() {
        assert_eq!(answer("chord C DOMINANT 7").unwrap().to_string(), "C E G Bb");
        assert_eq!(answer("chord C MAJOR [THIRD]").unwrap().to_string(), "E");
        assert!(matches!(
            answer("chord C MAJOR [NINTH]"),
            Err(ParseError::Theory(TheoryError::InvalidDegree { .. }))
        ));
        assert_eq!(answer("chord C DOMINANT 7 contains Bb").unwrap().to_string(), "true");
    }

    #[test]
    fn test_json_render() {
        let json = answer("chord C MAJOR").unwrap().render(true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "chord");
        assert_eq!(value["chord"], "C MAJOR");
        assert_eq!(value["notes"], serde_json::json!(["C", "E", "G"]));
    }
}
