//! Spelling resolver: picks the accidental that realizes an exact semitone
//! distance on a given destination letter.

use tracing::trace;

use crate::error::{Result, TheoryError};
use crate::note::{Accidental, Pitch};

/// Which way to walk around the letter (and semitone) circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Spell the note `generic_steps` letters and `semitones` semitones away from
/// `start`, walking in `direction`.
///
/// `semitones` is the exact size of the move, octaves included, and always
/// runs the same way as the letter walk. The one negative size accepted is the
/// diminished unison (`0` steps, `-1` semitone). Fails with
/// [`TheoryError::InvalidInterval`] for any other negative size and with
/// [`TheoryError::NoteName`] when the destination letter would need more than
/// two sharps or flats.
pub fn spell(start: Pitch, generic_steps: u8, semitones: i8, direction: Direction) -> Result<Pitch> {
    let diminished_unison = generic_steps % 7 == 0 && semitones == -1;
    if semitones < 0 && !diminished_unison {
        return Err(TheoryError::invalid_interval(format!(
            "{generic_steps} letter steps over {semitones} semitones"
        )));
    }

    let letter = start.letter.step(generic_steps, direction);
    let start_natural = start.letter.natural_semitone() as i16;
    let dest_natural = letter.natural_semitone() as i16;
    let start_offset = start.accidental.offset() as i16;
    let semitones = semitones as i16;

    // Accidental needed on the destination letter if the move spans no extra
    // octaves; each whole octave the move does span takes 12 back off.
    let (surplus, sign) = match direction {
        Direction::Ascending => (
            start_offset + semitones - (dest_natural - start_natural).rem_euclid(12),
            1,
        ),
        Direction::Descending => (
            semitones - start_offset - (start_natural - dest_natural).rem_euclid(12),
            -1,
        ),
    };
    let octaves = (surplus + 6).div_euclid(12).max(0);
    let offset = sign * (surplus - 12 * octaves);

    trace!(%start, ?direction, generic_steps, semitones, %letter, offset, "spelling");

    if !(-2..=2).contains(&offset) {
        return Err(TheoryError::note_name(format!(
            "{letter} with an offset of {offset} semitones"
        )));
    }
    let accidental = Accidental::new(offset as i8)?;
    Ok(Pitch::new(letter, accidental))
}
