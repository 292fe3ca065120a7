//! Plain-text tablature for a single-note line.
//!
//! One column per note, highest string on top. A slide target is written `/<fret>` and a bar line
//! closes every [`BAR_LENGTH`] notes.
//!
//! ```
//! use fretboard::catalog::Catalog;
//! use fretboard::fretboard::{FretboardMap, Tuning};
//! use fretboard::path::diagonal_run;
//! use fretboard::pitch::PitchClass;
//! use fretboard::scale::generate_scale;
//! use fretboard::tab::Tablature;
//!
//! let scale = generate_scale(PitchClass::G, "Major", Catalog::standard()).unwrap();
//! let map = FretboardMap::populate(&Tuning::standard(), &scale);
//! let tab = Tablature::from_path(&diagonal_run(&map), map.tuning());
//! assert_eq!(tab.rows().len(), 7);
//! assert!(tab.rows()[6].starts_with("B |-8-10-12-"));
//! ```

use std::fmt;

use crate::fretboard::{STRING_COUNT, Tuning};
use crate::path::{PathNode, ShiftType};

/// Notes per bar.
pub const BAR_LENGTH: usize = 8;
const FILLER: char = '-';
const BAR: char = '|';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tablature {
    rows: Vec<String>,
}

fn label(node: &PathNode) -> String {
    match node.shift {
        Some(ShiftType::Slide) => format!("/{}", node.position.fret),
        _ => node.position.fret.to_string(),
    }
}

impl Tablature {
    pub fn from_path(path: &[PathNode], tuning: &Tuning) -> Self {
        let mut rows = (0..STRING_COUNT as u8)
            .map(|s| format!("{:<2}{BAR}{FILLER}", tuning.open(s).name()))
            .collect::<Vec<_>>();

        for (i, node) in path.iter().enumerate() {
            let text = label(node);
            let blank = FILLER.to_string().repeat(text.len() + 1);
            for (string, row) in rows.iter_mut().enumerate() {
                if string == node.position.string as usize {
                    row.push_str(&text);
                    row.push(FILLER);
                } else {
                    row.push_str(&blank);
                }
            }
            if (i + 1) % BAR_LENGTH == 0 {
                rows.iter_mut().for_each(|row| row.push(BAR));
            }
        }
        if path.is_empty() || path.len() % BAR_LENGTH != 0 {
            rows.iter_mut().for_each(|row| row.push(BAR));
        }
        Self { rows }
    }

    /// Highest string first.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl fmt::Display for Tablature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows.join("\n"))
    }
}
