//! Pitch model: letters, accidentals and spelled pitches.
//!
//! A pitch is a letter plus an accidental. Its semitone class is derived, so
//! enharmonic spellings (C# and Db) stay distinct values.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TheoryError};
use crate::spelling::Direction;

/// Diatonic letter names, in cyclic order starting from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone class of the unaltered letter (C=0, B=11)
    pub fn natural_semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in the cyclic order (C=0, B=6)
    pub fn index(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Walk `steps` letters around the circle.
    pub fn step(self, steps: u8, direction: Direction) -> Letter {
        let steps = steps % 7;
        let index = match direction {
            Direction::Ascending => (self.index() + steps) % 7,
            Direction::Descending => (self.index() + 7 - steps) % 7,
        };
        Letter::ALL[index as usize]
    }

    /// Number of letter steps (0-6) from `self` to `other` walking in `direction`.
    pub fn distance_to(self, other: Letter, direction: Direction) -> u8 {
        match direction {
            Direction::Ascending => (other.index() + 7 - self.index()) % 7,
            Direction::Descending => (self.index() + 7 - other.index()) % 7,
        }
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Letter {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next().and_then(Letter::from_char), chars.next()) {
            (Some(letter), None) => Ok(letter),
            _ => Err(TheoryError::note_name(s)),
        }
    }
}

/// Semitone offset applied to a letter, limited to double flat..double sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Accidental(i8);

impl Accidental {
    pub const DOUBLE_FLAT: Accidental = Accidental(-2);
    pub const FLAT: Accidental = Accidental(-1);
    pub const NATURAL: Accidental = Accidental(0);
    pub const SHARP: Accidental = Accidental(1);
    pub const DOUBLE_SHARP: Accidental = Accidental(2);

    pub const ALL: [Accidental; 5] = [
        Self::DOUBLE_FLAT,
        Self::FLAT,
        Self::NATURAL,
        Self::SHARP,
        Self::DOUBLE_SHARP,
    ];

    /// Fails for offsets beyond two sharps or flats.
    pub fn new(offset: i8) -> Result<Self> {
        if (-2..=2).contains(&offset) {
            Ok(Accidental(offset))
        } else {
            Err(TheoryError::note_name(format!(
                "accidental offset {offset} is not representable"
            )))
        }
    }

    pub fn offset(self) -> i8 {
        self.0
    }

    pub fn is_natural(self) -> bool {
        self.0 == 0
    }

    pub fn symbol(self) -> &'static str {
        match self.0 {
            -2 => "bb",
            -1 => "b",
            1 => "#",
            2 => "##",
            _ => "",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Accidental {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::NATURAL),
            "#" => Ok(Self::SHARP),
            "##" => Ok(Self::DOUBLE_SHARP),
            "b" => Ok(Self::FLAT),
            "bb" => Ok(Self::DOUBLE_FLAT),
            _ => Err(TheoryError::note_name(format!("accidental '{s}'"))),
        }
    }
}

/// A spelled pitch class: letter plus accidental.
///
/// Equality is spelling equality; use [`Pitch::is_enharmonic`] to compare
/// sounding pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Pitch {
    pub fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::NATURAL)
    }

    /// Parse a pitch from a letter token and an accidental token.
    pub fn parse(letter: &str, accidental: &str) -> Result<Self> {
        let name = || TheoryError::note_name(format!("{letter}{accidental}"));
        let letter: Letter = letter.parse().map_err(|_| name())?;
        let accidental: Accidental = accidental.parse().map_err(|_| name())?;
        Ok(Self::new(letter, accidental))
    }

    /// Semitone class within the octave (0-11)
    pub fn semitone_class(self) -> u8 {
        let semitone = self.letter.natural_semitone() as i8 + self.accidental.offset();
        semitone.rem_euclid(12) as u8
    }

    pub fn is_enharmonic(self, other: Pitch) -> bool {
        self.semitone_class() == other.semitone_class()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental)
    }
}

impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .char_indices()
            .nth(1)
            .map(|(idx, _)| idx)
            .unwrap_or(s.len());
        if split == 0 {
            return Err(TheoryError::note_name(s));
        }
        Self::parse(&s[..split], &s[split..])
    }
}
