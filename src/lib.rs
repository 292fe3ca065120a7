//! Scale, position and harmony data for a seven-string guitar neck.
//!
//! Everything is derived from a root note and a scale name. [`ScaleData::generate`] runs the whole
//! pipeline once and keeps the results; the modules below can also be used one stage at a time.
//!
//! ```
//! use fretboard::ScaleData;
//! use fretboard::catalog::Catalog;
//!
//! let data = ScaleData::generate("A", "Natural Minor", Catalog::standard()).unwrap();
//! assert_eq!(data.chords.get("i").unwrap().name, "Am");
//! assert!(!data.positions.is_empty());
//! println!("{}", data.tab());
//! ```
pub mod analysis;
pub mod catalog;
pub mod chord;
pub mod error;
pub mod fretboard;
pub mod path;
pub mod pitch;
pub mod positions;
pub mod progression;
pub mod scale;
pub mod tab;
pub mod voicing;
#[cfg(feature = "wasm")]
pub mod wasm;

use serde::Serialize;

use analysis::{AnchorContext, anchor_contexts, tension_notes};
use catalog::Catalog;
use chord::{ChordMap, diatonic_chords};
use error::Result;
use fretboard::{FretboardMap, Tuning};
use path::{PathNode, diagonal_run};
use pitch::PitchClass;
use positions::{FingeringWindow, windows};
use progression::{ChordProgression, progressions};
use scale::{ScaleNote, characteristic_degrees, generate_scale};
use tab::Tablature;
use voicing::project_voicings;

/// Everything the fretboard view shows for one scale.
#[derive(Clone, Debug, Serialize)]
pub struct ScaleData {
    pub root: PitchClass,
    pub scale_name: String,
    pub notes: Vec<ScaleNote>,
    /// Modal color tones, e.g. `#4` for Lydian.
    pub characteristic_degrees: Vec<String>,
    pub fretboard: FretboardMap,
    /// Playable five-fret boxes, lowest first.
    pub positions: Vec<FingeringWindow>,
    pub diagonal_run: Vec<PathNode>,
    /// Diatonic chords with their voicings attached.
    pub chords: ChordMap,
    pub progressions: Vec<ChordProgression>,
}

impl ScaleData {
    /// Parses `root` and builds the data for `scale_name` in standard tuning.
    pub fn generate(root: &str, scale_name: &str, catalog: &Catalog) -> Result<Self> {
        Self::from_pitch(root.parse()?, scale_name, catalog)
    }

    pub fn from_pitch(root: PitchClass, scale_name: &str, catalog: &Catalog) -> Result<Self> {
        let notes = generate_scale(root, scale_name, catalog)?;
        log::debug!("generating {root} {scale_name} ({} notes)", notes.len());

        let fretboard = FretboardMap::populate(&Tuning::standard(), &notes);
        let positions = windows(&fretboard);
        let diagonal_run = diagonal_run(&fretboard);
        log::debug!(
            "{} fretboard notes, {} positions, {} run notes",
            fretboard.len(),
            positions.len(),
            diagonal_run.len()
        );

        let mut chords = diatonic_chords(&notes);
        for chord in chords.iter_mut() {
            chord.voicings = project_voicings(chord, &fretboard, &catalog.voicings);
        }
        let progressions = progressions(&chords, scale_name, &catalog.progressions);
        log::debug!("{} chords, {} progressions", chords.len(), progressions.len());

        Ok(Self {
            root,
            scale_name: scale_name.to_string(),
            characteristic_degrees: characteristic_degrees(&notes),
            notes,
            fretboard,
            positions,
            diagonal_run,
            chords,
            progressions,
        })
    }

    /// Chords containing the note at `(string, fret)`. Empty if no scale note is there.
    pub fn anchor_contexts_at(&self, string: u8, fret: u8) -> Vec<AnchorContext> {
        match self.fretboard.get(string, fret) {
            Some(note) => anchor_contexts(note, &self.chords, &self.fretboard),
            None => vec![],
        }
    }

    /// Tensions over the chord labelled `degree` (triad or seventh numeral).
    pub fn tension_notes_for(&self, degree: &str) -> Vec<PitchClass> {
        let parent = self.notes.iter().map(|n| n.pitch).collect::<Vec<_>>();
        self.chords
            .get(degree)
            .map(|chord| tension_notes(chord, &parent))
            .unwrap_or_default()
    }

    pub fn tab(&self) -> Tablature {
        Tablature::from_path(&self.diagonal_run, self.fretboard.tuning())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FretboardError;

    fn generate(root: &str, scale: &str) -> ScaleData {
        ScaleData::generate(root, scale, Catalog::standard()).unwrap()
    }

    #[test]
    fn test_c_major() {
        let data = generate("C", "Major");
        let names = data.chords.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["C", "Dm", "Em", "F", "G", "Am", "B°"]);
        assert!(data.characteristic_degrees.is_empty());
        assert_eq!(data.progressions.len(), 5);
        assert!(!data.chords.get("I").unwrap().voicings.is_empty());
        for chord in data.chords.iter() {
            for voicing in &chord.voicings {
                assert!(voicing.notes.iter().all(|n| chord.contains(n.pitch)));
            }
        }
    }
    #[test]
    fn test_g_major_run() {
        let data = generate("G", "Major");
        let first = &data.diagonal_run[0].position;
        assert_eq!((first.string, first.fret), (6, 8));
        assert_eq!(data.positions.len(), 7);
        assert!(data.tab().rows()[6].starts_with("B |-8-10-12-"));
    }
    #[test]
    fn test_on_demand_queries() {
        let data = generate("C", "Major");
        assert_eq!(data.anchor_contexts_at(0, 3).len(), 4);
        // F# is not in C major.
        assert!(data.anchor_contexts_at(0, 2).is_empty());
        let tensions = data.tension_notes_for("Imaj7");
        assert_eq!(tensions, [PitchClass::new(5), PitchClass::A]);
        assert_eq!(data.tension_notes_for("I"), tensions);
        assert!(data.tension_notes_for("VIII").is_empty());
    }
    #[test]
    fn test_lydian_color() {
        let data = generate("F", "Lydian");
        assert_eq!(data.characteristic_degrees, ["#4"]);
    }
    #[test]
    fn test_idempotent() {
        let a = serde_json::to_string(&generate("Eb", "Dorian")).unwrap();
        let b = serde_json::to_string(&generate("D#", "Dorian")).unwrap();
        assert_eq!(a, b);
    }
    #[test]
    fn test_hand_built_catalog_cannot_panic() {
        let mut catalog = Catalog::builtin();
        let broken = catalog.voicings[0].name.clone();
        catalog.voicings[0].notes[0].string = 9;
        assert!(catalog.validate().is_err());
        let data = ScaleData::generate("C", "Major", &catalog).unwrap();
        assert!(data.chords.iter().all(|c| c.voicings.iter().all(|v| v.template != broken)));
        assert!(!data.chords.get("I").unwrap().voicings.is_empty());
    }
    #[test]
    fn test_invalid_input() {
        let catalog = Catalog::standard();
        assert!(matches!(
            ScaleData::generate("C", "Bebop", catalog),
            Err(FretboardError::UnknownScale(name)) if name == "Bebop"
        ));
        assert!(matches!(
            ScaleData::generate("H", "Major", catalog),
            Err(FretboardError::UnknownNote(_))
        ));
    }
}
