//! The twelve pitch classes.
//!
//! Pitch classes are numbered from A, so `A = 0`, `A# = 1`, ..., `G# = 11`.
//! Every spelling (flats, double sharps, unicode accidentals) normalizes to the
//! canonical sharp name on parse.
//!
//! ```
//! use fretboard::pitch::PitchClass;
//!
//! let e_flat: PitchClass = "Eb".parse().unwrap();
//! assert_eq!(e_flat.to_string(), "D#");
//! assert_eq!(e_flat, "D#".parse().unwrap());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FretboardError;

/// Canonical sharp spelling, indexed by pitch class.
pub const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// A pitch class in 12-EDO, `0..12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const A: Self = Self(0);
    pub const C: Self = Self(3);
    pub const D: Self = Self(5);
    pub const E: Self = Self(7);
    pub const G: Self = Self(10);

    /// Reduces any integer mod 12.
    pub fn new(value: i32) -> Self {
        Self(value.rem_euclid(12) as u8)
    }
    pub fn value(self) -> u8 {
        self.0
    }
    /// The canonical sharp name.
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }
    /// The pitch class `semitones` above `self`.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }
    /// Ascending distance in semitones from `self` up to `other`, in `0..12`.
    pub fn interval_to(self, other: Self) -> u8 {
        (other.0 + 12 - self.0) % 12
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PitchClass {
    type Err = FretboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| FretboardError::UnknownNote(s.to_string()))?;
        let base: i32 = match letter.to_ascii_uppercase() {
            'A' => 0,
            'B' => 2,
            'C' => 3,
            'D' => 5,
            'E' => 7,
            'F' => 8,
            'G' => 10,
            _ => return Err(FretboardError::UnknownNote(s.to_string())),
        };
        let mut accidental = 0;
        for c in chars {
            accidental += match c {
                '#' | '♯' => 1,
                'x' | '𝄪' => 2,
                'b' | '♭' => -1,
                '𝄫' => -2,
                _ => return Err(FretboardError::UnknownNote(s.to_string())),
            };
        }
        Ok(Self::new(base + accidental))
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = FretboardError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for (i, name) in NOTE_NAMES.iter().enumerate() {
            let pc: PitchClass = name.parse().unwrap();
            assert_eq!(pc.value() as usize, i);
            assert_eq!(pc.to_string(), *name);
        }
    }
    #[test]
    fn test_enharmonics_normalize() {
        let cases = [
            ("Bb", "A#"),
            ("Db", "C#"),
            ("Gb", "F#"),
            ("Cb", "B"),
            ("E#", "F"),
            ("Fx", "G"),
            ("F##", "G"),
            ("Abb", "G"),
            ("B♭", "A#"),
            ("c♯", "C#"),
            ("ab", "G#"),
        ];
        for (input, expected) in cases {
            let pc: PitchClass = input.parse().unwrap();
            assert_eq!(pc.name(), expected, "{input}");
        }
    }
    #[test]
    fn test_named_constants() {
        let named = [PitchClass::A, PitchClass::C, PitchClass::D, PitchClass::E, PitchClass::G];
        let names = named.map(PitchClass::name);
        assert_eq!(names, ["A", "C", "D", "E", "G"]);
        for pc in named {
            assert_eq!(pc.name().parse::<PitchClass>().unwrap(), pc);
        }
    }
    #[test]
    fn test_bad_names() {
        assert!("".parse::<PitchClass>().is_err());
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C?".parse::<PitchClass>().is_err());
    }
    #[test]
    fn test_interval_to() {
        assert_eq!(PitchClass::C.interval_to(PitchClass::G), 7);
        assert_eq!(PitchClass::G.interval_to(PitchClass::C), 5);
        assert_eq!(PitchClass::E.interval_to(PitchClass::E), 0);
        assert_eq!(PitchClass::new(-1), PitchClass::new(11));
    }
}
