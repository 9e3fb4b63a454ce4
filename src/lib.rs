//! Spelling-aware music theory: notes, intervals, scales and chords.
//!
//! Pitches keep their spelling (C# and Db are different notes), intervals
//! are named by quality and number, and scales and chords are built by
//! stacking intervals above a root.

pub mod chord;
pub mod error;
pub mod group;
pub mod interval;
pub mod navigator;
pub mod note;
pub mod parser;
pub mod query;
pub mod repl;
pub mod scale;
pub mod spelling;

pub use chord::{Chord, ChordDegree, ChordQuality, Extension, Family, Modifier};
pub use error::{Result, TheoryError};
pub use group::{Degree, NoteGroup, PatternEntry};
pub use interval::{IntervalSpec, Quality};
pub use navigator::{ascend, descend};
pub use note::{Accidental, Letter, Pitch};
pub use scale::{KeySignature, Scale, ScaleDegree, ScaleQuality};
pub use spelling::Direction;
