//! Chord definitions: triads, seventh chords and extended chords.
//!
//! Extended chords stack thirds cumulatively: a 13 chord carries the 7th,
//! 9th and 11th too. A `#` or `b` modifier alters only the top extension.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TheoryError};
use crate::group::{Degree, NoteGroup, PatternEntry};
use crate::interval::{IntervalSpec, Quality};
use crate::note::Pitch;

/// Seventh-chord family of an extended chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Dominant,
    Major,
    Minor,
}

impl Family {
    pub fn name(self) -> &'static str {
        match self {
            Family::Dominant => "DOMINANT",
            Family::Major => "MAJOR",
            Family::Minor => "MINOR",
        }
    }

    fn third(self) -> IntervalSpec {
        match self {
            Family::Minor => IntervalSpec::fixed(Quality::Minor, 3),
            _ => IntervalSpec::fixed(Quality::Major, 3),
        }
    }

    fn seventh(self) -> IntervalSpec {
        match self {
            Family::Major => IntervalSpec::fixed(Quality::Major, 7),
            _ => IntervalSpec::fixed(Quality::Minor, 7),
        }
    }
}

/// Highest chord tone of an extended chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Extension {
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Extension {
    pub fn number(self) -> u8 {
        match self {
            Extension::Seventh => 7,
            Extension::Ninth => 9,
            Extension::Eleventh => 11,
            Extension::Thirteenth => 13,
        }
    }

    pub fn from_number(number: u8) -> Option<Extension> {
        match number {
            7 => Some(Extension::Seventh),
            9 => Some(Extension::Ninth),
            11 => Some(Extension::Eleventh),
            13 => Some(Extension::Thirteenth),
            _ => None,
        }
    }

    fn degree(self) -> ChordDegree {
        match self {
            Extension::Seventh => ChordDegree::Seventh,
            Extension::Ninth => ChordDegree::Ninth,
            Extension::Eleventh => ChordDegree::Eleventh,
            Extension::Thirteenth => ChordDegree::Thirteenth,
        }
    }

    /// Interval above the bass for an upper extension, after any modifier.
    fn interval(self, modifier: Option<Modifier>) -> IntervalSpec {
        let number = self.number();
        let quality = match (self, modifier) {
            (_, Some(Modifier::Sharp)) => Quality::Augmented,
            (Extension::Eleventh, None) => Quality::Perfect,
            (Extension::Eleventh, Some(Modifier::Flat)) => Quality::Diminished,
            (_, None) => Quality::Major,
            (_, Some(Modifier::Flat)) => Quality::Minor,
        };
        IntervalSpec::fixed(quality, number)
    }
}

/// Alteration of the top extension of a 9, 11 or 13 chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Sharp,
    Flat,
}

impl Modifier {
    pub fn symbol(self) -> &'static str {
        match self {
            Modifier::Sharp => "#",
            Modifier::Flat => "b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    /// MINOR 7b5
    HalfDiminished,
    Extended {
        family: Family,
        extension: Extension,
        modifier: Option<Modifier>,
    },
}

impl ChordQuality {
    /// Fails when a modifier is applied to a seventh chord.
    pub fn extended(
        family: Family,
        extension: Extension,
        modifier: Option<Modifier>,
    ) -> Result<Self> {
        let quality = ChordQuality::Extended {
            family,
            extension,
            modifier,
        };
        if extension == Extension::Seventh && modifier.is_some() {
            return Err(TheoryError::invalid_quality("chord", quality.to_string()));
        }
        Ok(quality)
    }

    /// Intervals above the bass, one per chord tone.
    pub fn pattern(self) -> Vec<PatternEntry<ChordDegree>> {
        use ChordDegree::*;

        let fixed = IntervalSpec::fixed;
        let triad = |third: Quality, fifth: Quality| {
            vec![
                PatternEntry::new(Bass, fixed(Quality::Perfect, 1)),
                PatternEntry::new(Third, fixed(third, 3)),
                PatternEntry::new(Fifth, fixed(fifth, 5)),
            ]
        };

        match self {
            ChordQuality::Major => triad(Quality::Major, Quality::Perfect),
            ChordQuality::Minor => triad(Quality::Minor, Quality::Perfect),
            ChordQuality::Diminished => triad(Quality::Minor, Quality::Diminished),
            ChordQuality::Augmented => triad(Quality::Major, Quality::Augmented),
            ChordQuality::HalfDiminished => {
                let mut pattern = triad(Quality::Minor, Quality::Diminished);
                pattern.push(PatternEntry::new(Seventh, fixed(Quality::Minor, 7)));
                pattern
            }
            ChordQuality::Extended {
                family,
                extension,
                modifier,
            } => {
                let mut pattern = vec![
                    PatternEntry::new(Bass, fixed(Quality::Perfect, 1)),
                    PatternEntry::new(Third, family.third()),
                    PatternEntry::new(Fifth, fixed(Quality::Perfect, 5)),
                    PatternEntry::new(Seventh, family.seventh()),
                ];
                for upper in [Extension::Ninth, Extension::Eleventh, Extension::Thirteenth] {
                    if upper > extension {
                        break;
                    }
                    let alteration = if upper == extension { modifier } else { None };
                    pattern.push(PatternEntry::new(upper.degree(), upper.interval(alteration)));
                }
                pattern
            }
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordQuality::Major => f.write_str("MAJOR"),
            ChordQuality::Minor => f.write_str("MINOR"),
            ChordQuality::Diminished => f.write_str("DIMINISHED"),
            ChordQuality::Augmented => f.write_str("AUGMENTED"),
            ChordQuality::HalfDiminished => f.write_str("MINOR 7b5"),
            ChordQuality::Extended {
                family,
                extension,
                modifier,
            } => write!(
                f,
                "{} {}{}",
                family.name(),
                modifier.map(Modifier::symbol).unwrap_or_default(),
                extension.number()
            ),
        }
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TheoryError::invalid_quality("chord", s);
        let tokens: Vec<&str> = s.split_whitespace().collect();

        match tokens.as_slice() {
            ["MAJOR"] => Ok(ChordQuality::Major),
            ["MINOR"] => Ok(ChordQuality::Minor),
            ["DIMINISHED"] => Ok(ChordQuality::Diminished),
            ["AUGMENTED"] => Ok(ChordQuality::Augmented),
            ["MINOR", "7b5"] => Ok(ChordQuality::HalfDiminished),
            [family, extension] => {
                let family = match *family {
                    "DOMINANT" => Family::Dominant,
                    "MAJOR" => Family::Major,
                    "MINOR" => Family::Minor,
                    _ => return Err(invalid()),
                };
                let (modifier, number) = if let Some(n) = extension.strip_prefix('#') {
                    (Some(Modifier::Sharp), n)
                } else if let Some(n) = extension.strip_prefix('b') {
                    (Some(Modifier::Flat), n)
                } else {
                    (None, *extension)
                };
                if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                let extension = number
                    .parse()
                    .ok()
                    .and_then(Extension::from_number)
                    .ok_or_else(invalid)?;
                ChordQuality::extended(family, extension, modifier).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordDegree {
    Bass,
    Third,
    Fifth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl Degree for ChordDegree {
    const ALL: &'static [Self] = &[
        ChordDegree::Bass,
        ChordDegree::Third,
        ChordDegree::Fifth,
        ChordDegree::Seventh,
        ChordDegree::Ninth,
        ChordDegree::Eleventh,
        ChordDegree::Thirteenth,
    ];

    fn name(self) -> &'static str {
        match self {
            ChordDegree::Bass => "BASS",
            ChordDegree::Third => "THIRD",
            ChordDegree::Fifth => "FIFTH",
            ChordDegree::Seventh => "SEVENTH",
            ChordDegree::Ninth => "NINTH",
            ChordDegree::Eleventh => "ELEVENTH",
            ChordDegree::Thirteenth => "THIRTEENTH",
        }
    }
}

/// A chord spelled upward from its bass note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    quality: ChordQuality,
    group: NoteGroup<ChordDegree>,
}

impl Chord {
    pub fn new(bass: Pitch, quality: ChordQuality) -> Result<Self> {
        if let ChordQuality::Extended {
            family,
            extension,
            modifier,
        } = quality
        {
            ChordQuality::extended(family, extension, modifier)?;
        }
        let group = NoteGroup::build(bass, &quality.pattern()).map_err(|_| TheoryError::InvalidBass {
            bass: bass.to_string(),
            quality: quality.to_string(),
        })?;
        debug!(%bass, %quality, notes = %group, "built chord");
        Ok(Self { quality, group })
    }

    pub fn bass(&self) -> Pitch {
        self.group.root()
    }

    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    pub fn notes(&self) -> &[Pitch] {
        self.group.notes()
    }

    pub fn spellings(&self) -> Vec<String> {
        self.group.spellings()
    }

    pub fn group(&self) -> &NoteGroup<ChordDegree> {
        &self.group
    }

    pub fn get(&self, degree: ChordDegree) -> Option<Pitch> {
        self.group.get(degree)
    }

    pub fn lookup(&self, name: &str) -> Result<Pitch> {
        self.group.lookup(name)
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.group.contains(spelling)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.bass(), self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chord(bass: &str, quality: &str) -> Result<Chord> {
        Chord::new(bass.parse().unwrap(), quality.parse()?)
    }

    #[test]
    fn test_triads() {
        assert_eq!(chord("C", "MAJOR").unwrap().spellings(), vec!["C", "E", "G"]);
        assert_eq!(chord("C", "MINOR").unwrap().spellings(), vec!["C", "Eb", "G"]);
        assert_eq!(chord("B", "DIMINISHED").unwrap().spellings(), vec!["B", "D", "F"]);
        assert_eq!(chord("C", "AUGMENTED").unwrap().spellings(), vec!["C", "E", "G#"]);
    }

    #[test]
    fn test_sevenths() {
        assert_eq!(
            chord("C", "DOMINANT 7").unwrap().spellings(),
            vec!["C", "E", "G", "Bb"]
        );
        assert_eq!(
            chord("C", "MAJOR 7").unwrap().spellings(),
            vec!["C", "E", "G", "B"]
        );
        assert_eq!(
            chord("D", "MINOR 7").unwrap().spellings(),
            vec!["D", "F", "A", "C"]
        );
        assert_eq!(
            chord("C", "MINOR 7b5").unwrap().spellings(),
            vec!["C", "Eb", "Gb", "Bb"]
        );
    }

    #[test]
    fn test_extensions_are_cumulative() {
        assert_eq!(
            chord("C", "DOMINANT 9").unwrap().spellings(),
            vec!["C", "E", "G", "Bb", "D"]
        );
        assert_eq!(
            chord("C", "MINOR 13").unwrap().spellings(),
            vec!["C", "Eb", "G", "Bb", "D", "F", "A"]
        );
        let maj11 = chord("F", "MAJOR 11").unwrap();
        assert_eq!(maj11.lookup("ELEVENTH").unwrap().to_string(), "Bb");
        assert_eq!(maj11.lookup("SEVENTH").unwrap().to_string(), "E");
    }

    #[test]
    fn test_modifier_alters_top_extension_only() {
        assert_eq!(
            chord("C", "DOMINANT b9").unwrap().spellings(),
            vec!["C", "E", "G", "Bb", "Db"]
        );
        assert_eq!(
            chord("C", "MAJOR #11").unwrap().spellings(),
            vec!["C", "E", "G", "B", "D", "F#"]
        );
        let b13 = chord("C", "DOMINANT b13").unwrap();
        assert_eq!(b13.get(ChordDegree::Ninth).unwrap().to_string(), "D");
        assert_eq!(b13.get(ChordDegree::Eleventh).unwrap().to_string(), "F");
        assert_eq!(b13.get(ChordDegree::Thirteenth).unwrap().to_string(), "Ab");
        assert_eq!(
            chord("C", "DOMINANT #9").unwrap().lookup("NINTH").unwrap().to_string(),
            "D#"
        );
    }

    #[test]
    fn test_degrees() {
        let c = chord("C", "MAJOR").unwrap();
        assert_eq!(c.lookup("THIRD").unwrap().to_string(), "E");
        assert_eq!(c.lookup("BASS").unwrap().to_string(), "C");
        assert!(matches!(
            c.lookup("NINTH"),
            Err(TheoryError::InvalidDegree { .. })
        ));
        assert!(c.lookup("TONIC").is_err());
    }

    #[test]
    fn test_contains_by_spelling() {
        let c = chord("C", "DOMINANT 7").unwrap();
        assert!(c.contains("Bb"));
        assert!(!c.contains("A#"));
    }

    #[test]
    fn test_invalid_bass() {
        assert!(matches!(
            chord("B#", "AUGMENTED"),
            Err(TheoryError::InvalidBass { .. })
        ));
        assert!(chord("Fbb", "DIMINISHED").is_err());
    }

    #[test]
    fn test_modified_seventh_rejected() {
        let quality = ChordQuality::Extended {
            family: Family::Dominant,
            extension: Extension::Seventh,
            modifier: Some(Modifier::Sharp),
        };
        assert!(matches!(
            Chord::new("C".parse().unwrap(), quality),
            Err(TheoryError::InvalidQuality { kind: "chord", .. })
        ));
    }

    #[test]
    fn test_parse_quality() {
        for name in ["MAJOR", "MINOR 7b5", "DOMINANT 13", "MAJOR #11", "MINOR b9"] {
            assert_eq!(name.parse::<ChordQuality>().unwrap().to_string(), name);
        }
        let invalid = [
            "DOMINANT",
            "DOMINANT 8",
            "DOMINANT #7",
            "SUSPENDED",
            "MAJOR 7 9",
            "DOMINANT x9",
            "DOMINANT +9",
            "MINOR #+11",
        ];
        for name in invalid {
            assert!(
                matches!(
                    name.parse::<ChordQuality>(),
                    Err(TheoryError::InvalidQuality { kind: "chord", .. })
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(chord("Eb", "DOMINANT 7").unwrap().to_string(), "Eb DOMINANT 7");
    }
}
