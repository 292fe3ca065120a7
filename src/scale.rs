//! Scale formulas and scale generation.
//!
//! A [`ScaleFormula`] is a list of `(semitone step, degree label)` pairs walked upward
//! from the root. A seven-note formula has six steps; the step back to the octave is implied.
//!
//! ```
//! use fretboard::catalog::Catalog;
//! use fretboard::pitch::PitchClass;
//! use fretboard::scale::generate_scale;
//!
//! let catalog = Catalog::standard();
//! let e_minor = generate_scale(PitchClass::E, "Natural Minor", catalog).unwrap();
//! let spelled = e_minor
//!     .iter()
//!     .map(|n| format!("{}({})", n.pitch, n.degree))
//!     .collect::<Vec<_>>();
//! assert_eq!(spelled, ["E(R)", "F#(2)", "G(b3)", "A(4)", "B(5)", "C(b6)", "D(b7)"]);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{FretboardError, Result};
use crate::pitch::PitchClass;

/// Degree label of the first note of every scale.
pub const ROOT_DEGREE: &str = "R";

/// A named, closed scale formula.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleFormula {
    pub name: String,
    /// `(semitones above the previous note, degree label)`.
    pub steps: Vec<(u8, String)>,
}

impl ScaleFormula {
    pub fn new(name: &str, steps: &[(u8, &str)]) -> Self {
        Self {
            name: name.to_string(),
            steps: steps.iter().map(|&(s, d)| (s, d.to_string())).collect(),
        }
    }

    /// Number of notes in the scale, counting the root.
    pub fn note_count(&self) -> usize {
        self.steps.len() + 1
    }

    /// Spells the formula from `root`.
    pub fn spell(&self, root: PitchClass) -> Vec<ScaleNote> {
        let mut notes = Vec::with_capacity(self.note_count());
        notes.push(ScaleNote {
            pitch: root,
            degree: ROOT_DEGREE.to_string(),
        });
        let mut current = root;
        for (step, degree) in &self.steps {
            current = current.transpose(*step as i32);
            notes.push(ScaleNote {
                pitch: current,
                degree: degree.clone(),
            });
        }
        notes
    }
}

/// One note of a spelled scale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleNote {
    pub pitch: PitchClass,
    pub degree: String,
}

/// Spells the catalog scale `scale_name` from `root`.
///
/// This is the only fallible step of the engine.
pub fn generate_scale(root: PitchClass, scale_name: &str, catalog: &Catalog) -> Result<Vec<ScaleNote>> {
    catalog
        .formula(scale_name)
        .map(|formula| formula.spell(root))
        .ok_or_else(|| FretboardError::UnknownScale(scale_name.to_string()))
}

/// The set of pitch classes of a spelled scale.
pub fn pitch_set(scale: &[ScaleNote]) -> BTreeSet<PitchClass> {
    scale.iter().map(|n| n.pitch).collect()
}

/// Modal color tones worth calling out on a diagram.
///
/// Any of `b2`, `#4`, `b6` that the scale contains, then `7` if the scale has both `7` and `b6`
/// (harmonic-minor color), then `6` if it has both `6` and `b7` (dorian/mixolydian color).
pub fn characteristic_degrees(scale: &[ScaleNote]) -> Vec<String> {
    let has = |d: &str| scale.iter().any(|n| n.degree == d);
    let mut result = ["b2", "#4", "b6"]
        .into_iter()
        .filter(|d| has(d))
        .map(String::from)
        .collect::<Vec<_>>();
    if has("7") && has("b6") {
        result.push("7".to_string());
    }
    if has("6") && has("b7") {
        result.push("6".to_string());
    }
    result
}

/// The built-in formula table.
pub fn standard_formulas() -> Vec<ScaleFormula> {
    vec![
        ScaleFormula::new("Major", &[(2, "2"), (2, "3"), (1, "4"), (2, "5"), (2, "6"), (2, "7")]),
        ScaleFormula::new("Natural Minor", &[(2, "2"), (1, "b3"), (2, "4"), (2, "5"), (1, "b6"), (2, "b7")]),
        ScaleFormula::new("Harmonic Minor", &[(2, "2"), (1, "b3"), (2, "4"), (2, "5"), (1, "b6"), (3, "7")]),
        ScaleFormula::new("Melodic Minor", &[(2, "2"), (1, "b3"), (2, "4"), (2, "5"), (2, "6"), (2, "7")]),
        ScaleFormula::new("Dorian", &[(2, "2"), (1, "b3"), (2, "4"), (2, "5"), (2, "6"), (1, "b7")]),
        ScaleFormula::new("Phrygian", &[(1, "b2"), (2, "b3"), (2, "4"), (2, "5"), (1, "b6"), (2, "b7")]),
        ScaleFormula::new("Lydian", &[(2, "2"), (2, "3"), (2, "#4"), (1, "5"), (2, "6"), (2, "7")]),
        ScaleFormula::new("Mixolydian", &[(2, "2"), (2, "3"), (1, "4"), (2, "5"), (2, "6"), (1, "b7")]),
        ScaleFormula::new("Locrian", &[(1, "b2"), (2, "b3"), (2, "4"), (1, "b5"), (2, "b6"), (2, "b7")]),
        ScaleFormula::new("Major Pentatonic", &[(2, "2"), (2, "3"), (3, "5"), (2, "6")]),
        ScaleFormula::new("Minor Pentatonic", &[(3, "b3"), (2, "4"), (2, "5"), (3, "b7")]),
        ScaleFormula::new("Blues", &[(3, "b3"), (2, "4"), (1, "b5"), (1, "5"), (3, "b7")]),
        ScaleFormula::new("Phrygian Dominant", &[(1, "b2"), (3, "3"), (1, "4"), (2, "5"), (1, "b6"), (2, "b7")]),
        ScaleFormula::new("Lydian Dominant", &[(2, "2"), (2, "3"), (2, "#4"), (1, "5"), (2, "6"), (1, "b7")]),
        ScaleFormula::new("Lydian Augmented", &[(2, "2"), (2, "3"), (2, "#4"), (2, "#5"), (1, "6"), (2, "7")]),
        ScaleFormula::new("Mixolydian b6", &[(2, "2"), (2, "3"), (1, "4"), (2, "5"), (1, "b6"), (2, "b7")]),
        ScaleFormula::new("Dorian b2", &[(1, "b2"), (2, "b3"), (2, "4"), (2, "5"), (2, "6"), (1, "b7")]),
        ScaleFormula::new("Locrian #2", &[(2, "2"), (1, "b3"), (2, "4"), (1, "b5"), (2, "b6"), (2, "b7")]),
        ScaleFormula::new("Altered", &[(1, "b2"), (2, "#2"), (1, "3"), (2, "#4"), (2, "#5"), (2, "b7")]),
        ScaleFormula::new("Hungarian Minor", &[(2, "2"), (1, "b3"), (3, "#4"), (1, "5"), (1, "b6"), (3, "7")]),
        ScaleFormula::new("Ukrainian Dorian", &[(2, "2"), (1, "b3"), (3, "#4"), (1, "5"), (2, "6"), (1, "b7")]),
        ScaleFormula::new("Double Harmonic", &[(1, "b2"), (3, "3"), (1, "4"), (2, "5"), (1, "b6"), (3, "7")]),
        ScaleFormula::new("Neapolitan Minor", &[(1, "b2"), (2, "b3"), (2, "4"), (2, "5"), (1, "b6"), (3, "7")]),
        ScaleFormula::new("Neapolitan Major", &[(1, "b2"), (2, "b3"), (2, "4"), (2, "5"), (2, "6"), (2, "7")]),
        ScaleFormula::new("Whole Tone", &[(2, "2"), (2, "3"), (2, "#4"), (2, "#5"), (2, "b7")]),
        ScaleFormula::new("Hirajoshi", &[(2, "2"), (1, "b3"), (4, "5"), (1, "b6")]),
    ]
}
