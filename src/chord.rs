//! Diatonic chords.
//!
//! Chord `i` of a scale stacks scale thirds on degree `i`: scale notes `i`, `i+2`, `i+4` form the
//! triad and `i+6` adds the seventh, all indices taken modulo the scale length. The quality is read
//! off the measured intervals above the chord root.
//!
//! ```
//! use fretboard::catalog::Catalog;
//! use fretboard::chord::{diatonic_chords, ChordQuality};
//! use fretboard::pitch::PitchClass;
//! use fretboard::scale::generate_scale;
//!
//! let scale = generate_scale(PitchClass::G, "Major", Catalog::standard()).unwrap();
//! let chords = diatonic_chords(&scale);
//! let tonic = chords.get("I").unwrap();
//! assert_eq!(tonic.triad_names(), ["G", "B", "D"]);
//! assert_eq!(tonic.seventh_quality, Some(ChordQuality::Maj7));
//! assert_eq!(chords.get("vii°").unwrap().seventh_degree, "viiø7");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;
use crate::scale::ScaleNote;
use crate::voicing::Voicing;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordQuality {
    Maj,
    Min,
    Dim,
    Aug,
    Maj7,
    Min7,
    Dom7,
    Min7b5,
    Dim7,
    MinMaj7,
    AugMaj7,
    Aug7,
}

impl ChordQuality {
    /// Triad quality from the third and fifth above the root.
    ///
    /// Stacks that are not tertian (pentatonic and blues scales produce them) fall back on the
    /// third alone.
    pub fn triad(third: u8, fifth: u8) -> Self {
        match (third, fifth) {
            (4, 7) => Self::Maj,
            (3, 7) => Self::Min,
            (3, 6) => Self::Dim,
            (4, 8) => Self::Aug,
            (t, _) if t <= 3 => Self::Min,
            _ => Self::Maj,
        }
    }

    /// Seventh-chord quality over a triad, `None` if the stack is not a recognized seventh chord.
    pub fn seventh(triad: Self, seventh: u8) -> Option<Self> {
        match (triad, seventh) {
            (Self::Maj, 11) => Some(Self::Maj7),
            (Self::Maj, 10) => Some(Self::Dom7),
            (Self::Min, 10) => Some(Self::Min7),
            (Self::Min, 11) => Some(Self::MinMaj7),
            (Self::Dim, 10) => Some(Self::Min7b5),
            (Self::Dim, 9) => Some(Self::Dim7),
            (Self::Aug, 11) => Some(Self::AugMaj7),
            (Self::Aug, 10) => Some(Self::Aug7),
            _ => None,
        }
    }

    /// Chords with a major third, which treat the eleventh as an avoid note.
    pub fn has_major_third(self) -> bool {
        matches!(
            self,
            Self::Maj | Self::Aug | Self::Maj7 | Self::Dom7 | Self::AugMaj7 | Self::Aug7
        )
    }

    fn is_upper_case(self) -> bool {
        self.has_major_third()
    }

    /// Suffix after the root letter in a chord symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Maj => "",
            Self::Min => "m",
            Self::Dim => "°",
            Self::Aug => "+",
            Self::Maj7 => "maj7",
            Self::Min7 => "m7",
            Self::Dom7 => "7",
            Self::Min7b5 => "m7b5",
            Self::Dim7 => "°7",
            Self::MinMaj7 => "m(maj7)",
            Self::AugMaj7 => "+maj7",
            Self::Aug7 => "+7",
        }
    }

    /// Suffix after the roman numeral.
    fn roman_suffix(self) -> &'static str {
        match self {
            Self::Maj | Self::Min => "",
            Self::Dim => "°",
            Self::Aug => "+",
            Self::Maj7 | Self::MinMaj7 => "maj7",
            Self::Min7 | Self::Dom7 => "7",
            Self::Min7b5 => "ø7",
            Self::Dim7 => "°7",
            Self::AugMaj7 => "+maj7",
            Self::Aug7 => "+7",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Maj => "maj",
            Self::Min => "min",
            Self::Dim => "dim",
            Self::Aug => "aug",
            Self::Maj7 => "maj7",
            Self::Min7 => "min7",
            Self::Dom7 => "dom7",
            Self::Min7b5 => "min7b5",
            Self::Dim7 => "dim7",
            Self::MinMaj7 => "minMaj7",
            Self::AugMaj7 => "augMaj7",
            Self::Aug7 => "aug7",
        };
        write!(f, "{name}")
    }
}

/// The chord built on one scale degree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Chord {
    /// Zero-based scale degree.
    pub index: usize,
    /// Roman numeral of the triad, e.g. `ii`, `vii°`, `III+`.
    pub degree: String,
    /// Roman numeral of the seventh chord, e.g. `ii7`, `viiø7`.
    pub seventh_degree: String,
    /// Triad symbol, e.g. `Dm`.
    pub name: String,
    /// Seventh-chord symbol, e.g. `Dm7`.
    pub seventh_name: String,
    pub quality: ChordQuality,
    pub seventh_quality: Option<ChordQuality>,
    pub triad: [PitchClass; 3],
    pub seventh: [PitchClass; 4],
    pub voicings: Vec<Voicing>,
}

impl Chord {
    /// Stacks thirds on scale degree `index`. `scale` must not be empty.
    pub fn on_degree(scale: &[ScaleNote], index: usize) -> Self {
        let n = scale.len();
        let tone = |k: usize| scale[(index + k) % n].pitch;
        let root = tone(0);
        let triad = [root, tone(2), tone(4)];
        let seventh = [root, tone(2), tone(4), tone(6)];

        let quality = ChordQuality::triad(root.interval_to(triad[1]), root.interval_to(triad[2]));
        let seventh_quality = ChordQuality::seventh(quality, root.interval_to(seventh[3]));

        let numeral = NUMERALS[index % NUMERALS.len()];
        let numeral = if quality.is_upper_case() {
            numeral.to_string()
        } else {
            numeral.to_lowercase()
        };
        let degree = format!("{numeral}{}", quality.roman_suffix());
        let name = format!("{root}{}", quality.symbol());
        let (seventh_degree, seventh_name) = match seventh_quality {
            Some(q) => (
                format!("{numeral}{}", q.roman_suffix()),
                format!("{root}{}", q.symbol()),
            ),
            None => (degree.clone(), name.clone()),
        };

        Self {
            index,
            degree,
            seventh_degree,
            name,
            seventh_name,
            quality,
            seventh_quality,
            triad,
            seventh,
            voicings: vec![],
        }
    }

    pub fn root(&self) -> PitchClass {
        self.triad[0]
    }
    pub fn triad_names(&self) -> [&'static str; 3] {
        self.triad.map(PitchClass::name)
    }
    pub fn seventh_names(&self) -> [&'static str; 4] {
        self.seventh.map(PitchClass::name)
    }
    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.seventh.contains(&pitch)
    }
    /// Whether a voicing template written for `quality` fits this chord.
    pub fn matches_quality(&self, quality: ChordQuality) -> bool {
        self.quality == quality || self.seventh_quality == Some(quality)
    }
    /// The chord symbol to show: the seventh chord if there is one.
    pub fn display_name(&self) -> &str {
        if self.seventh_quality.is_some() {
            &self.seventh_name
        } else {
            &self.name
        }
    }

    /// Degree of `pitch` relative to this chord's root, spelled for its place in the stack.
    pub fn tone_label(&self, pitch: PitchClass) -> Option<&'static str> {
        let slot = self.seventh.iter().position(|&p| p == pitch)?;
        let interval = self.root().interval_to(pitch);
        Some(match (slot, interval) {
            (0, _) => "R",
            (1, 3) => "b3",
            (1, 4) => "3",
            (2, 6) => "b5",
            (2, 7) => "5",
            (2, 8) => "#5",
            (3, 9) => "bb7",
            (3, 10) => "b7",
            (3, 11) => "7",
            (_, i) => interval_name(i),
        })
    }
}

/// Plain interval name above a root.
pub fn interval_name(semitones: u8) -> &'static str {
    ["R", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7"][semitones as usize % 12]
}

/// The diatonic chords of a scale in degree order, looked up by roman numeral.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChordMap(Vec<Chord>);

impl ChordMap {
    pub fn new(chords: Vec<Chord>) -> Self {
        Self(chords)
    }
    /// Looks up a chord by its triad or seventh roman numeral.
    pub fn get(&self, degree: &str) -> Option<&Chord> {
        self.0
            .iter()
            .find(|c| c.degree == degree || c.seventh_degree == degree)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.0.iter()
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chord> {
        self.0.iter_mut()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One chord per scale degree, without voicings.
pub fn diatonic_chords(scale: &[ScaleNote]) -> ChordMap {
    ChordMap((0..scale.len()).map(|i| Chord::on_degree(scale, i)).collect())
}
