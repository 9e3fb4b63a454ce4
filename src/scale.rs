// ── Scale definitions ─────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TheoryError};
use crate::group::{Degree, NoteGroup, PatternEntry};
use crate::interval::{IntervalSpec, Quality};
use crate::note::{Letter, Pitch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleQuality {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
}

impl ScaleQuality {
    pub const ALL: [ScaleQuality; 4] = [
        Self::Major,
        Self::NaturalMinor,
        Self::HarmonicMinor,
        Self::MelodicMinor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Major         => "MAJOR",
            Self::NaturalMinor  => "NATURAL MINOR",
            Self::HarmonicMinor => "HARMONIC MINOR",
            Self::MelodicMinor  => "MELODIC MINOR",
        }
    }

    /// Intervals from the tonic, one per degree.
    pub fn pattern(self) -> &'static [PatternEntry<ScaleDegree>; 7] {
        match self {
            Self::Major         => &MAJOR,
            Self::NaturalMinor  => &NATURAL_MINOR,
            Self::HarmonicMinor => &HARMONIC_MINOR,
            Self::MelodicMinor  => &MELODIC_MINOR,
        }
    }

    /// The form whose notes make up the key signature. Raised sixths and
    /// sevenths of the minor forms are written as accidentals.
    pub fn key_form(self) -> ScaleQuality {
        match self {
            Self::Major => Self::Major,
            _ => Self::NaturalMinor,
        }
    }
}

impl fmt::Display for ScaleQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MAJOR" => Ok(Self::Major),
            "MINOR" | "NATURAL MINOR" => Ok(Self::NaturalMinor),
            "HARMONIC MINOR" => Ok(Self::HarmonicMinor),
            "MELODIC MINOR" => Ok(Self::MelodicMinor),
            _ => Err(TheoryError::invalid_quality("scale", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleDegree {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    LeadingTone,
}

impl Degree for ScaleDegree {
    const ALL: &'static [Self] = &[
        Self::Tonic,
        Self::Supertonic,
        Self::Mediant,
        Self::Subdominant,
        Self::Dominant,
        Self::Submediant,
        Self::LeadingTone,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Tonic       => "TONIC",
            Self::Supertonic  => "SUPERTONIC",
            Self::Mediant     => "MEDIANT",
            Self::Subdominant => "SUBDOMINANT",
            Self::Dominant    => "DOMINANT",
            Self::Submediant  => "SUBMEDIANT",
            Self::LeadingTone => "LEADING TONE",
        }
    }
}

// ── Pattern tables ────────────────────────────────────────────────────────────

const fn entry(degree: ScaleDegree, quality: Quality, number: u8) -> PatternEntry<ScaleDegree> {
    PatternEntry::new(degree, IntervalSpec::fixed(quality, number))
}

static MAJOR: [PatternEntry<ScaleDegree>; 7] = [
    entry(ScaleDegree::Tonic, Quality::Perfect, 1),
    entry(ScaleDegree::Supertonic, Quality::Major, 2),
    entry(ScaleDegree::Mediant, Quality::Major, 3),
    entry(ScaleDegree::Subdominant, Quality::Perfect, 4),
    entry(ScaleDegree::Dominant, Quality::Perfect, 5),
    entry(ScaleDegree::Submediant, Quality::Major, 6),
    entry(ScaleDegree::LeadingTone, Quality::Major, 7),
];

static NATURAL_MINOR: [PatternEntry<ScaleDegree>; 7] = [
    entry(ScaleDegree::Tonic, Quality::Perfect, 1),
    entry(ScaleDegree::Supertonic, Quality::Major, 2),
    entry(ScaleDegree::Mediant, Quality::Minor, 3),
    entry(ScaleDegree::Subdominant, Quality::Perfect, 4),
    entry(ScaleDegree::Dominant, Quality::Perfect, 5),
    entry(ScaleDegree::Submediant, Quality::Minor, 6),
    entry(ScaleDegree::LeadingTone, Quality::Minor, 7),
];

static HARMONIC_MINOR: [PatternEntry<ScaleDegree>; 7] = [
    entry(ScaleDegree::Tonic, Quality::Perfect, 1),
    entry(ScaleDegree::Supertonic, Quality::Major, 2),
    entry(ScaleDegree::Mediant, Quality::Minor, 3),
    entry(ScaleDegree::Subdominant, Quality::Perfect, 4),
    entry(ScaleDegree::Dominant, Quality::Perfect, 5),
    entry(ScaleDegree::Submediant, Quality::Minor, 6),
    entry(ScaleDegree::LeadingTone, Quality::Major, 7),
];

static MELODIC_MINOR: [PatternEntry<ScaleDegree>; 7] = [
    entry(ScaleDegree::Tonic, Quality::Perfect, 1),
    entry(ScaleDegree::Supertonic, Quality::Major, 2),
    entry(ScaleDegree::Mediant, Quality::Minor, 3),
    entry(ScaleDegree::Subdominant, Quality::Perfect, 4),
    entry(ScaleDegree::Dominant, Quality::Perfect, 5),
    entry(ScaleDegree::Submediant, Quality::Major, 6),
    entry(ScaleDegree::LeadingTone, Quality::Major, 7),
];

/// Order in which sharps are added to a key signature; flats use the reverse.
const SHARP_ORDER: [Letter; 7] = [
    Letter::F,
    Letter::C,
    Letter::G,
    Letter::D,
    Letter::A,
    Letter::E,
    Letter::B,
];

// ── Key signature ─────────────────────────────────────────────────────────────

/// The sharp or flat notes of a key, in the order they are written.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct KeySignature {
    accidentals: Vec<Pitch>,
}

impl KeySignature {
    fn from_notes(notes: &[Pitch]) -> Self {
        let mut accidentals: Vec<Pitch> = notes
            .iter()
            .copied()
            .filter(|p| !p.accidental.is_natural())
            .collect();
        accidentals.sort_by_key(|p| {
            let pos = SHARP_ORDER
                .iter()
                .position(|l| *l == p.letter)
                .unwrap_or_default();
            if p.accidental.offset() > 0 { (0, pos) } else { (1, 6 - pos) }
        });
        Self { accidentals }
    }

    pub fn accidentals(&self) -> &[Pitch] {
        &self.accidentals
    }

    pub fn spellings(&self) -> Vec<String> {
        self.accidentals.iter().map(Pitch::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.accidentals.is_empty()
    }

    /// Position on the circle of fifths: sharps count up, flats count down.
    pub fn fifths(&self) -> i8 {
        self.accidentals
            .iter()
            .map(|p| p.accidental.offset().signum())
            .sum()
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spellings().join(" "))
    }
}

// ── Scale ─────────────────────────────────────────────────────────────────────

/// A seven-note scale with its key signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    quality: ScaleQuality,
    group: NoteGroup<ScaleDegree>,
    key_signature: KeySignature,
}

impl Scale {
    /// Build a scale, refusing tonics whose key signature would need double
    /// sharps or flats.
    pub fn new(tonic: Pitch, quality: ScaleQuality) -> Result<Self> {
        let invalid_tonic = || TheoryError::InvalidTonic {
            tonic: tonic.to_string(),
            quality: quality.to_string(),
        };

        let group = NoteGroup::build(tonic, quality.pattern()).map_err(|_| invalid_tonic())?;

        let key_form = quality.key_form();
        let key_signature = if key_form == quality {
            KeySignature::from_notes(group.notes())
        } else {
            let form = NoteGroup::build(tonic, key_form.pattern()).map_err(|_| invalid_tonic())?;
            KeySignature::from_notes(form.notes())
        };

        if key_signature
            .accidentals()
            .iter()
            .any(|p| p.accidental.offset().abs() > 1)
        {
            return Err(invalid_tonic());
        }

        debug!(%tonic, %quality, key_signature = %key_signature, "built scale");
        Ok(Self {
            quality,
            group,
            key_signature,
        })
    }

    pub fn tonic(&self) -> Pitch {
        self.group.root()
    }

    pub fn quality(&self) -> ScaleQuality {
        self.quality
    }

    pub fn notes(&self) -> &[Pitch] {
        self.group.notes()
    }

    pub fn group(&self) -> &NoteGroup<ScaleDegree> {
        &self.group
    }

    pub fn key_signature(&self) -> &KeySignature {
        &self.key_signature
    }

    pub fn degree(&self, degree: ScaleDegree) -> Pitch {
        // Every scale pattern defines all seven degrees.
        self.notes()[degree as usize]
    }

    pub fn lookup(&self, name: &str) -> Result<Pitch> {
        self.group.lookup(name)
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.group.contains(spelling)
    }

    /// Spellings from tonic up to leading tone.
    pub fn ascending(&self) -> Vec<String> {
        self.group.spellings()
    }

    pub fn descending(&self) -> Vec<String> {
        let mut notes = self.group.spellings();
        notes.reverse();
        notes
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic(), self.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scale(tonic: &str, quality: ScaleQuality) -> Result<Scale> {
        Scale::new(tonic.parse().unwrap(), quality)
    }

    #[test]
    fn test_major_notes() {
        let a = scale("A", ScaleQuality::Major).unwrap();
        assert_eq!(a.ascending(), vec!["A", "B", "C#", "D", "E", "F#", "G#"]);
        assert_eq!(a.descending()[0], "G#");
        assert_eq!(a.to_string(), "A MAJOR");
    }

    #[test]
    fn test_key_signature_order() {
        let a = scale("A", ScaleQuality::Major).unwrap();
        assert_eq!(a.key_signature().spellings(), vec!["F#", "C#", "G#"]);

        let ab = scale("Ab", ScaleQuality::Major).unwrap();
        assert_eq!(ab.key_signature().spellings(), vec!["Bb", "Eb", "Ab", "Db"]);

        let c = scale("C", ScaleQuality::Major).unwrap();
        assert!(c.key_signature().is_empty());
    }

    #[test]
    fn test_circle_of_fifths() {
        let majors = [
            ("Cb", -7), ("Gb", -6), ("Db", -5), ("Ab", -4), ("Eb", -3), ("Bb", -2), ("F", -1),
            ("C", 0), ("G", 1), ("D", 2), ("A", 3), ("E", 4), ("B", 5), ("F#", 6), ("C#", 7),
        ];
        for (tonic, fifths) in majors {
            let s = scale(tonic, ScaleQuality::Major).unwrap();
            assert_eq!(s.key_signature().fifths(), fifths, "{tonic} MAJOR");
        }

        let minors = [
            ("Ab", -7), ("Eb", -6), ("Bb", -5), ("F", -4), ("C", -3), ("G", -2), ("D", -1),
            ("A", 0), ("E", 1), ("B", 2), ("F#", 3), ("C#", 4), ("G#", 5), ("D#", 6), ("A#", 7),
        ];
        for (tonic, fifths) in minors {
            let s = scale(tonic, ScaleQuality::NaturalMinor).unwrap();
            assert_eq!(s.key_signature().fifths(), fifths, "{tonic} MINOR");
        }
    }

    #[test]
    fn test_invalid_tonics() {
        for tonic in ["G#", "D#", "A#", "E#", "B#", "Fb"] {
            assert!(
                matches!(
                    scale(tonic, ScaleQuality::Major),
                    Err(TheoryError::InvalidTonic { .. })
                ),
                "{tonic} MAJOR"
            );
        }
        for tonic in ["Db", "Gb", "Cb", "E#", "B#"] {
            assert!(scale(tonic, ScaleQuality::HarmonicMinor).is_err(), "{tonic} MINOR");
        }
        // C### would be needed for the supertonic
        assert!(scale("B##", ScaleQuality::Major).is_err());
    }

    #[test]
    fn test_minor_forms() {
        let natural = scale("C", ScaleQuality::NaturalMinor).unwrap();
        assert_eq!(natural.ascending(), vec!["C", "D", "Eb", "F", "G", "Ab", "Bb"]);

        let harmonic = scale("C", ScaleQuality::HarmonicMinor).unwrap();
        assert_eq!(harmonic.ascending(), vec!["C", "D", "Eb", "F", "G", "Ab", "B"]);

        let melodic = scale("C", ScaleQuality::MelodicMinor).unwrap();
        assert_eq!(melodic.ascending(), vec!["C", "D", "Eb", "F", "G", "A", "B"]);
        assert_eq!(melodic.key_signature().spellings(), vec!["Bb", "Eb", "Ab"]);
    }

    #[test]
    fn test_raised_leading_tone_may_double() {
        let s = scale("G#", ScaleQuality::HarmonicMinor).unwrap();
        assert_eq!(s.lookup("LEADING TONE").unwrap().to_string(), "F##");
        assert_eq!(s.key_signature().spellings(), vec!["F#", "C#", "G#", "D#", "A#"]);
    }

    #[test]
    fn test_degrees() {
        let c = scale("C", ScaleQuality::Major).unwrap();
        assert_eq!(c.lookup("SUBMEDIANT").unwrap().to_string(), "A");
        let a = scale("A", ScaleQuality::Major).unwrap();
        assert_eq!(a.lookup("SUBMEDIANT").unwrap().to_string(), "F#");
        assert_eq!(a.degree(ScaleDegree::LeadingTone).to_string(), "G#");
        assert_eq!(a.degree(ScaleDegree::Tonic).to_string(), "A");
        assert!(matches!(
            a.lookup("THIRD"),
            Err(TheoryError::InvalidDegree { .. })
        ));
    }

    #[test]
    fn test_contains_by_spelling() {
        let gb = scale("Gb", ScaleQuality::Major).unwrap();
        assert!(gb.contains("Gb"));
        assert!(gb.contains("Cb"));
        assert!(!gb.contains("F#"));
        assert!(!gb.contains("B"));
    }

    #[test]
    fn test_natural_tonics_all_build() {
        for quality in ScaleQuality::ALL {
            for letter in Letter::ALL {
                let s = Scale::new(Pitch::natural(letter), quality).unwrap();
                let mut letters: Vec<char> = s.notes().iter().map(|p| p.letter.as_char()).collect();
                letters.sort();
                letters.dedup();
                assert_eq!(letters.len(), 7, "{s}");
            }
        }
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!("MINOR".parse::<ScaleQuality>().unwrap(), ScaleQuality::NaturalMinor);
        assert_eq!(
            "HARMONIC MINOR".parse::<ScaleQuality>().unwrap(),
            ScaleQuality::HarmonicMinor
        );
        assert!(matches!(
            "DORIAN".parse::<ScaleQuality>(),
            Err(TheoryError::InvalidQuality { kind: "scale", .. })
        ));
    }
}
