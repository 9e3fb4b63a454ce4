//! Note group engine shared by scales and chords.
//!
//! A group is built from a root and a pattern of intervals measured from
//! that root. Each position carries a degree, so notes can be looked up by
//! name as well as by position.

use std::fmt;

use tracing::debug;

use crate::error::{Result, TheoryError};
use crate::interval::IntervalSpec;
use crate::navigator::ascend;
use crate::note::Pitch;

/// Named positions within a group (TONIC, THIRD, ...).
pub trait Degree: Copy + Eq + fmt::Debug + 'static {
    /// Every degree of this kind, in pattern order.
    const ALL: &'static [Self];

    /// Upper-case display name, words separated by a space.
    fn name(self) -> &'static str;

    /// Match a degree name, ignoring case and treating `_` as a space.
    fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('_', " ");
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(&wanted))
    }
}

/// One pattern position: the degree and its interval above the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternEntry<D> {
    pub degree: D,
    pub interval: IntervalSpec,
}

impl<D> PatternEntry<D> {
    pub const fn new(degree: D, interval: IntervalSpec) -> Self {
        Self { degree, interval }
    }
}

/// An ordered collection of spelled notes built from a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteGroup<D: Degree> {
    root: Pitch,
    notes: Vec<Pitch>,
    degrees: Vec<D>,
}

impl<D: Degree> NoteGroup<D> {
    /// Ascend from `root` once per pattern entry. Nothing is returned if any
    /// note fails to spell.
    pub fn build(root: Pitch, pattern: &[PatternEntry<D>]) -> Result<Self> {
        debug_assert!(
            pattern
                .iter()
                .enumerate()
                .all(|(i, e)| pattern[..i].iter().all(|prev| prev.degree != e.degree)),
            "pattern repeats a degree"
        );

        let notes = pattern
            .iter()
            .map(|entry| ascend(root, entry.interval))
            .collect::<Result<Vec<_>>>()?;
        let degrees = pattern.iter().map(|entry| entry.degree).collect();

        debug!(%root, size = pattern.len(), "built note group");
        Ok(Self {
            root,
            notes,
            degrees,
        })
    }

    pub fn root(&self) -> Pitch {
        self.root
    }

    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    pub fn degrees(&self) -> &[D] {
        &self.degrees
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (D, Pitch)> + '_ {
        self.degrees.iter().copied().zip(self.notes.iter().copied())
    }

    /// Spellings of every note, in order.
    pub fn spellings(&self) -> Vec<String> {
        self.notes.iter().map(Pitch::to_string).collect()
    }

    pub fn get(&self, degree: D) -> Option<Pitch> {
        self.iter().find(|(d, _)| *d == degree).map(|(_, p)| p)
    }

    /// Look up a note by degree name. Fails for names this group does not
    /// define, including valid names of degrees it omits.
    pub fn lookup(&self, name: &str) -> Result<Pitch> {
        D::from_name(name)
            .and_then(|degree| self.get(degree))
            .ok_or_else(|| TheoryError::invalid_degree(name))
    }

    /// Look up a note by its 1-based position.
    pub fn nth(&self, position: usize) -> Result<Pitch> {
        position
            .checked_sub(1)
            .and_then(|idx| self.notes.get(idx).copied())
            .ok_or_else(|| TheoryError::invalid_degree(position.to_string()))
    }

    /// Membership by spelling: a group holding Gb does not contain F#.
    pub fn contains(&self, spelling: &str) -> bool {
        self.notes.iter().any(|p| p.to_string() == spelling)
    }

    pub fn contains_pitch(&self, pitch: Pitch) -> bool {
        self.notes.contains(&pitch)
    }
}

impl<D: Degree> fmt::Display for NoteGroup<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spellings().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Quality;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Root,
        Upper,
        TopNote,
    }

    impl Degree for Step {
        const ALL: &'static [Self] = &[Step::Root, Step::Upper, Step::TopNote];

        fn name(self) -> &'static str {
            match self {
                Step::Root => "ROOT",
                Step::Upper => "UPPER",
                Step::TopNote => "TOP NOTE",
            }
        }
    }

    fn entry(degree: Step, quality: Quality, number: u8) -> PatternEntry<Step> {
        PatternEntry::new(degree, IntervalSpec::new(quality, number).unwrap())
    }

    fn sample(root: &str) -> Result<NoteGroup<Step>> {
        NoteGroup::build(
            root.parse().unwrap(),
            &[
                entry(Step::Root, Quality::Perfect, 1),
                entry(Step::Upper, Quality::Diminished, 5),
            ],
        )
    }

    #[test]
    fn test_build_from_root() {
        let group = sample("C").unwrap();
        assert_eq!(group.spellings(), vec!["C", "Gb"]);
        assert_eq!(group.to_string(), "C Gb");
        assert_eq!(group.len(), 2);
        assert_eq!(group.root().to_string(), "C");
    }

    #[test]
    fn test_lookup() {
        let group = sample("C").unwrap();
        assert_eq!(group.lookup("UPPER").unwrap().to_string(), "Gb");
        assert_eq!(group.lookup("upper").unwrap().to_string(), "Gb");
        assert!(matches!(
            group.lookup("TOP NOTE"),
            Err(TheoryError::InvalidDegree { .. })
        ));
        assert!(group.lookup("SIDEWAYS").is_err());
        assert_eq!(group.nth(1).unwrap().to_string(), "C");
        assert!(group.nth(0).is_err());
        assert!(group.nth(3).is_err());
    }

    #[test]
    fn test_contains_by_spelling() {
        let group = sample("C").unwrap();
        assert!(group.contains("Gb"));
        assert!(!group.contains("F#"));
    }

    #[test]
    fn test_degree_names() {
        assert_eq!(Step::from_name("top_note"), Some(Step::TopNote));
        assert_eq!(Step::from_name(" TOP NOTE "), Some(Step::TopNote));
        assert_eq!(Step::from_name("TOPNOTE"), None);
    }

    #[test]
    fn test_failed_note_fails_group() {
        // Cbb up a diminished fifth needs G triple flat
        assert!(matches!(sample("Cbb"), Err(TheoryError::NoteName { .. })));
    }
}
