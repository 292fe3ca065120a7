//! The seven-string, twenty-four-fret grid and its projection of a scale.
//!
//! String `0` is the highest-pitched string and string `6` the lowest. A [`FretboardMap`] holds
//! exactly the `(string, fret)` cells whose pitch belongs to the scale.
//!
//! ```
//! use fretboard::catalog::Catalog;
//! use fretboard::fretboard::{FretboardMap, Tuning};
//! use fretboard::pitch::PitchClass;
//! use fretboard::scale::generate_scale;
//!
//! let scale = generate_scale(PitchClass::C, "Major", Catalog::standard()).unwrap();
//! let map = FretboardMap::populate(&Tuning::standard(), &scale);
//! // Low B string, first fret: C, the root.
//! assert_eq!(map.get(6, 1).unwrap().degree, "R");
//! // C major has no C#.
//! assert!(map.get(6, 2).is_none());
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;
use crate::scale::ScaleNote;

pub const STRING_COUNT: usize = 7;
/// Highest fret. Frets run `0..=FRET_COUNT`, `0` being the open string.
pub const FRET_COUNT: u8 = 24;
/// Index of the lowest-pitched string.
pub const LOWEST_STRING: u8 = (STRING_COUNT - 1) as u8;

/// Open-string pitches, highest-pitched string first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning(pub [PitchClass; STRING_COUNT]);

impl Tuning {
    /// E B G D A E B.
    pub fn standard() -> Self {
        Self([
            PitchClass::E,
            PitchClass::new(2),
            PitchClass::G,
            PitchClass::new(5),
            PitchClass::A,
            PitchClass::E,
            PitchClass::new(2),
        ])
    }
    pub fn open(&self, string: u8) -> PitchClass {
        self.0[string as usize]
    }
    pub fn pitch_at(&self, string: u8, fret: u8) -> PitchClass {
        self.open(string).transpose(fret as i32)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard()
    }
}

/// A scale note at a concrete place on the neck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FretPosition {
    pub string: u8,
    pub fret: u8,
    pub pitch: PitchClass,
    pub degree: String,
}

impl FretPosition {
    pub fn key(&self) -> (u8, u8) {
        (self.string, self.fret)
    }
    /// Whether `other` is the same cell of the grid.
    pub fn same_cell(&self, other: &FretPosition) -> bool {
        self.key() == other.key()
    }
}

/// Every fretboard cell that belongs to one scale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FretboardMap {
    tuning: Tuning,
    /// Ordered by string, then ascending fret.
    positions: Vec<FretPosition>,
    #[serde(skip)]
    index: HashMap<(u8, u8), usize>,
}

impl FretboardMap {
    /// Keeps every cell whose pitch is in `scale`, labelled with that pitch's degree.
    pub fn populate(tuning: &Tuning, scale: &[ScaleNote]) -> Self {
        let degree_of = scale
            .iter()
            .map(|n| (n.pitch, n.degree.as_str()))
            .collect::<HashMap<_, _>>();
        let mut positions = Vec::new();
        for string in 0..STRING_COUNT as u8 {
            for fret in 0..=FRET_COUNT {
                let pitch = tuning.pitch_at(string, fret);
                if let Some(degree) = degree_of.get(&pitch) {
                    positions.push(FretPosition {
                        string,
                        fret,
                        pitch,
                        degree: degree.to_string(),
                    });
                }
            }
        }
        let index = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.key(), i))
            .collect();
        Self {
            tuning: *tuning,
            positions,
            index,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &FretPosition> {
        self.positions.iter()
    }
    pub fn get(&self, string: u8, fret: u8) -> Option<&FretPosition> {
        self.index.get(&(string, fret)).map(|&i| &self.positions[i])
    }
    /// The notes on one string, ascending fret.
    pub fn on_string(&self, string: u8) -> impl Iterator<Item = &FretPosition> {
        self.positions.iter().filter(move |p| p.string == string)
    }
    /// All notes ordered lowest-pitched string first, then ascending fret.
    ///
    /// Several algorithms walk the neck in this order.
    pub fn low_to_high(&self) -> Vec<&FretPosition> {
        (0..STRING_COUNT as u8)
            .rev()
            .flat_map(|string| self.on_string(string))
            .collect()
    }
    /// Notes whose fret lies in `lo..=hi`.
    pub fn in_fret_range(&self, lo: u8, hi: u8) -> impl Iterator<Item = &FretPosition> {
        self.positions
            .iter()
            .filter(move |p| (lo..=hi).contains(&p.fret))
    }
}
