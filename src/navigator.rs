//! Moves a pitch up or down by a named interval.

use crate::error::Result;
use crate::interval::IntervalSpec;
use crate::note::Pitch;
use crate::spelling::{Direction, spell};

/// Spell the note `interval` above `pitch`.
pub fn ascend(pitch: Pitch, interval: IntervalSpec) -> Result<Pitch> {
    transpose(pitch, interval, Direction::Ascending)
}

/// Spell the note `interval` below `pitch`.
pub fn descend(pitch: Pitch, interval: IntervalSpec) -> Result<Pitch> {
    transpose(pitch, interval, Direction::Descending)
}

pub fn transpose(pitch: Pitch, interval: IntervalSpec, direction: Direction) -> Result<Pitch> {
    let (steps, semitones) = interval.resolve();
    spell(pitch, steps, semitones, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TheoryError;
    use crate::interval::Quality;
    use crate::note::{Accidental, Letter};

    fn p(name: &str) -> Pitch {
        name.parse().unwrap()
    }

    fn i(name: &str) -> IntervalSpec {
        name.parse().unwrap()
    }

    #[test]
    fn test_worked_examples() {
        assert_eq!(ascend(p("C"), i("MAJOR 6")).unwrap().to_string(), "A");
        assert_eq!(descend(p("C"), i("MINOR 3")).unwrap().to_string(), "A");
        assert_eq!(ascend(p("D"), i("PERFECT 5")).unwrap().to_string(), "A");
        assert_eq!(ascend(p("F#"), i("MINOR 7")).unwrap().to_string(), "E");
        assert_eq!(ascend(p("C"), i("AUGMENTED 4")).unwrap().to_string(), "F#");
        assert_eq!(ascend(p("C"), i("DIMINISHED 5")).unwrap().to_string(), "Gb");
        assert_eq!(ascend(p("C"), i("MINOR 9")).unwrap().to_string(), "Db");
        assert_eq!(descend(p("E"), i("MAJOR 10")).unwrap().to_string(), "C");
    }

    #[test]
    fn test_unspellable_note() {
        assert!(matches!(
            ascend(p("A#"), i("AUGMENTED 3")),
            Err(TheoryError::NoteName { .. })
        ));
    }

    #[test]
    fn test_descend_undoes_ascend() {
        let pitches: Vec<Pitch> = Letter::ALL
            .into_iter()
            .flat_map(|l| Accidental::ALL.into_iter().map(move |a| Pitch::new(l, a)))
            .collect();
        let qualities = [
            Quality::Perfect,
            Quality::Major,
            Quality::Minor,
            Quality::Augmented,
            Quality::Diminished,
        ];

        let mut checked = 0;
        for pitch in &pitches {
            for quality in qualities {
                for number in 1..=15 {
                    let Ok(interval) = IntervalSpec::new(quality, number) else {
                        continue;
                    };
                    let Ok(up) = ascend(*pitch, interval) else {
                        continue;
                    };
                    assert_eq!(descend(up, interval).unwrap(), *pitch, "{pitch} {interval}");
                    checked += 1;
                }
            }
        }
        assert!(checked > 500);
    }
}
