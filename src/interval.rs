//! Interval model: quality plus number, resolved to letter steps and semitones.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TheoryError};

/// Semitones above the root for each simple interval of the major scale.
const MAJOR_SCALE_SEMITONES: [i8; 7] = [0, 2, 4, 5, 7, 9, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Augmented,
    Diminished,
}

impl Quality {
    pub fn name(self) -> &'static str {
        match self {
            Quality::Perfect => "PERFECT",
            Quality::Major => "MAJOR",
            Quality::Minor => "MINOR",
            Quality::Augmented => "AUGMENTED",
            Quality::Diminished => "DIMINISHED",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PERFECT" => Ok(Quality::Perfect),
            "MAJOR" => Ok(Quality::Major),
            "MINOR" => Ok(Quality::Minor),
            "AUGMENTED" => Ok(Quality::Augmented),
            "DIMINISHED" => Ok(Quality::Diminished),
            _ => Err(TheoryError::invalid_interval(s)),
        }
    }
}

/// A validated interval name such as MAJOR 3 or PERFECT 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalSpec {
    quality: Quality,
    number: u8,
}

impl IntervalSpec {
    /// Fails when the number is outside 1-15 or the quality does not apply
    /// to the number's family.
    pub fn new(quality: Quality, number: u8) -> Result<Self> {
        if !is_valid(quality, number) {
            return Err(TheoryError::invalid_interval(format!("{quality} {number}")));
        }
        Ok(Self { quality, number })
    }

    /// Constructor for the static pattern tables. An invalid pair is a
    /// compile error there.
    pub const fn fixed(quality: Quality, number: u8) -> Self {
        assert!(is_valid(quality, number), "invalid interval in pattern table");
        Self { quality, number }
    }

    pub fn quality(self) -> Quality {
        self.quality
    }

    pub fn number(self) -> u8 {
        self.number
    }

    /// Wider than an octave.
    pub fn is_compound(self) -> bool {
        self.number > 8
    }

    /// Returns `(letter steps, semitones)`. Letter steps are octave reduced;
    /// semitones keep the full compound span. The diminished unison is the
    /// only interval with a negative span.
    pub fn resolve(self) -> (u8, i8) {
        let simple = (self.number - 1) % 7;
        let octaves = ((self.number - 1) / 7) as i8;
        let base = MAJOR_SCALE_SEMITONES[simple as usize] + 12 * octaves;
        let perfect = is_perfect_family(self.number);

        let semitones = match self.quality {
            Quality::Perfect | Quality::Major => base,
            Quality::Augmented => base + 1,
            Quality::Minor => base - 1,
            Quality::Diminished if perfect => base - 1,
            Quality::Diminished => base - 2,
        };
        (simple, semitones)
    }
}

/// Unison, fourth, fifth and their octave compounds.
const fn is_perfect_family(number: u8) -> bool {
    matches!(number, 1 | 4 | 5 | 8 | 11 | 12 | 15)
}

const fn is_valid(quality: Quality, number: u8) -> bool {
    if number < 1 || number > 15 {
        return false;
    }
    match quality {
        Quality::Augmented | Quality::Diminished => true,
        Quality::Perfect => is_perfect_family(number),
        Quality::Major | Quality::Minor => !is_perfect_family(number),
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quality, self.number)
    }
}

impl FromStr for IntervalSpec {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TheoryError::invalid_interval(s);
        let (quality, number) = s.trim().rsplit_once(' ').ok_or_else(invalid)?;
        let quality: Quality = quality.trim().parse().map_err(|_| invalid())?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u8 = number.parse().map_err(|_| invalid())?;
        IntervalSpec::new(quality, number)
    }
}
