//! Stock chord progressions, resolved against a scale's diatonic chords.
//!
//! Progressions are written as bare roman numerals. A numeral names a scale degree, not a quality,
//! so `V` in natural minor resolves to the minor `v` chord and `vii` in major to `vii°`.

use serde::{Deserialize, Serialize};

use crate::chord::{ChordMap, ChordQuality};
use crate::pitch::PitchClass;

/// Scale whose progressions stand in for scales without their own.
pub const FALLBACK_SCALE: &str = "Natural Minor";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionFormula {
    pub name: String,
    pub numerals: Vec<String>,
}

/// The progressions listed for one scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionFamily {
    pub scale: String,
    pub progressions: Vec<ProgressionFormula>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgressionChord {
    pub degree: String,
    pub name: String,
    pub root: PitchClass,
    pub quality: ChordQuality,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChordProgression {
    pub name: String,
    pub numerals: Vec<String>,
    pub chords: Vec<ProgressionChord>,
}

/// The leading roman numeral of a label, lowercased: `"vii°7"` gives `"vii"`.
fn bare_numeral(label: &str) -> String {
    label
        .chars()
        .take_while(|c| matches!(c, 'I' | 'V' | 'X' | 'i' | 'v' | 'x'))
        .collect::<String>()
        .to_lowercase()
}

/// The first chord whose numeral matches, ignoring case and quality marks.
///
/// Stands in for a prefix match on the chord label: the numeral is compared whole, so `v` never
/// picks up `vi` or `vii`.
fn resolve(chords: &ChordMap, numeral: &str) -> Option<ProgressionChord> {
    let wanted = bare_numeral(numeral);
    chords
        .iter()
        .find(|c| bare_numeral(&c.degree) == wanted)
        .map(|c| ProgressionChord {
            degree: c.degree.clone(),
            name: c.name.clone(),
            root: c.root(),
            quality: c.quality,
        })
}

/// Resolves the progressions listed for `scale_name` (or for [`FALLBACK_SCALE`]).
///
/// A progression naming a degree the scale does not have is left out.
pub fn progressions(chords: &ChordMap, scale_name: &str, families: &[ProgressionFamily]) -> Vec<ChordProgression> {
    let family = families
        .iter()
        .find(|f| f.scale == scale_name)
        .or_else(|| families.iter().find(|f| f.scale == FALLBACK_SCALE));
    let Some(family) = family else {
        return vec![];
    };
    family
        .progressions
        .iter()
        .filter_map(|formula| {
            let resolved = formula
                .numerals
                .iter()
                .map(|n| resolve(chords, n))
                .collect::<Option<Vec<_>>>();
            if resolved.is_none() {
                log::debug!("{} has no chord for every degree of `{}`", scale_name, formula.name);
            }
            Some(ChordProgression {
                name: formula.name.clone(),
                numerals: formula.numerals.clone(),
                chords: resolved?,
            })
        })
        .collect()
}

fn family(scale: &str, progressions: &[(&str, &[&str])]) -> ProgressionFamily {
    ProgressionFamily {
        scale: scale.to_string(),
        progressions: progressions
            .iter()
            .map(|(name, numerals)| ProgressionFormula {
                name: name.to_string(),
                numerals: numerals.iter().map(|n| n.to_string()).collect(),
            })
            .collect(),
    }
}

pub fn standard_progressions() -> Vec<ProgressionFamily> {
    vec![
        family(
            "Major",
            &[
                ("I-IV-V", &["I", "IV", "V"]),
                ("I-V-vi-IV", &["I", "V", "vi", "IV"]),
                ("ii-V-I", &["ii", "V", "I"]),
                ("I-vi-IV-V", &["I", "vi", "IV", "V"]),
                ("iii-vi-ii-V", &["iii", "vi", "ii", "V"]),
            ],
        ),
        family(
            "Natural Minor",
            &[
                ("i-iv-v", &["i", "iv", "v"]),
                ("i-VI-III-VII", &["i", "VI", "III", "VII"]),
                ("i-iv-VII-III", &["i", "iv", "VII", "III"]),
                ("i-VII-VI-VII", &["i", "VII", "VI", "VII"]),
            ],
        ),
        family(
            "Harmonic Minor",
            &[
                ("i-iv-V", &["i", "iv", "V"]),
                ("ii°-V-i", &["ii", "V", "i"]),
                ("i-VI-V", &["i", "VI", "V"]),
            ],
        ),
        family(
            "Melodic Minor",
            &[("i-IV-V", &["i", "IV", "V"]), ("ii-V-i", &["ii", "V", "i"])],
        ),
        family(
            "Dorian",
            &[("i-IV", &["i", "IV"]), ("i-ii-IV", &["i", "ii", "IV"]), ("i-VII-IV", &["i", "VII", "IV"])],
        ),
        family("Phrygian", &[("i-II", &["i", "II"]), ("i-II-vii", &["i", "II", "vii"])]),
        family("Lydian", &[("I-II", &["I", "II"]), ("I-II-vii", &["I", "II", "vii"])]),
        family(
            "Mixolydian",
            &[("I-VII-IV", &["I", "VII", "IV"]), ("I-v-IV", &["I", "v", "IV"])],
        ),
        family("Locrian", &[("i°-II-iii", &["i", "II", "iii"])]),
        family(
            "Phrygian Dominant",
            &[("I-II-I", &["I", "II", "I"]), ("I-iv-II", &["I", "iv", "II"])],
        ),
    ]
}
