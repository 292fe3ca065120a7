//! Chord shapes and their projection onto the neck.
//!
//! A [`VoicingTemplate`] is a chord diagram drawn relative to its root note. Projection finds every
//! place the root can sit on the template's root string and slides the whole diagram there.
//! Templates are plain data; there is one projection routine for all of them.

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, ChordQuality};
use crate::fretboard::{FRET_COUNT, FretboardMap, STRING_COUNT};
use crate::pitch::PitchClass;

/// Anchors must lie strictly between these frets.
pub const MIN_ANCHOR_FRET: u8 = 0;
pub const MAX_ANCHOR_FRET: u8 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootLocation {
    pub string: u8,
    pub fret: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateNote {
    pub string: u8,
    /// Frets above (or below, if negative) the root.
    pub fret_offset: i8,
    /// Chord degree of the note, e.g. `b3`.
    pub degree: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBarre {
    pub fret_offset: i8,
    pub from_string: u8,
    pub to_string: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoicingTemplate {
    pub name: String,
    pub qualities: Vec<ChordQuality>,
    pub root: RootLocation,
    pub notes: Vec<TemplateNote>,
    #[serde(default)]
    pub barres: Vec<TemplateBarre>,
    #[serde(default)]
    pub open_strings: Vec<u8>,
    #[serde(default)]
    pub muted_strings: Vec<u8>,
    /// Open-string shapes only sound right where they are drawn.
    pub movable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoicingNote {
    pub string: u8,
    pub fret: u8,
    pub pitch: PitchClass,
    pub degree: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Barre {
    pub fret: u8,
    pub from_string: u8,
    pub to_string: u8,
}

/// A template placed at a concrete fret.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Voicing {
    /// `"<template> @ <anchor>fr"`.
    pub name: String,
    pub template: String,
    pub anchor_fret: u8,
    pub notes: Vec<VoicingNote>,
    pub barres: Vec<Barre>,
    pub muted_strings: Vec<u8>,
}

fn on_neck(fret: i32) -> Option<u8> {
    (0..=FRET_COUNT as i32)
        .contains(&fret)
        .then_some(fret as u8)
}

impl VoicingTemplate {
    /// The template with its root at `anchor_fret`, if every note stays on the neck.
    /// `None` as well for a note on a string the neck does not have.
    pub fn place(&self, map: &FretboardMap, anchor_fret: u8) -> Option<Voicing> {
        let shift = anchor_fret as i32 - self.root.fret as i32;
        if !self.movable && shift != 0 {
            return None;
        }
        let at = |offset: i8| on_neck(self.root.fret as i32 + offset as i32 + shift);

        let notes = self
            .notes
            .iter()
            .map(|n| {
                let string = (n.string < STRING_COUNT as u8).then_some(n.string)?;
                let fret = at(n.fret_offset)?;
                Some(VoicingNote {
                    string,
                    fret,
                    pitch: map.tuning().pitch_at(n.string, fret),
                    degree: n.degree.clone(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        let barres = self
            .barres
            .iter()
            .map(|b| {
                Some(Barre {
                    fret: at(b.fret_offset)?,
                    from_string: b.from_string,
                    to_string: b.to_string,
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Voicing {
            name: format!("{} @ {anchor_fret}fr", self.name),
            template: self.name.clone(),
            anchor_fret,
            notes,
            barres,
            muted_strings: self.muted_strings.clone(),
        })
    }
}

/// Every placement of every template written for `chord`'s quality.
///
/// A placement is kept only if all of its notes stay on the neck and sound chord tones.
pub fn project_voicings(chord: &Chord, map: &FretboardMap, templates: &[VoicingTemplate]) -> Vec<Voicing> {
    let root = chord.root();
    templates
        .iter()
        .filter(|t| t.qualities.iter().any(|&q| chord.matches_quality(q)))
        .flat_map(move |template| {
            map.on_string(template.root.string)
                .filter(move |p| p.pitch == root)
                .filter(|p| p.fret > MIN_ANCHOR_FRET && p.fret < MAX_ANCHOR_FRET)
                .filter_map(move |anchor| template.place(map, anchor.fret))
        })
        .filter(|v| v.notes.iter().all(|n| chord.contains(n.pitch)))
        .collect()
}

fn shape(string: u8, fret_offset: i8, degree: &str) -> TemplateNote {
    TemplateNote {
        string,
        fret_offset,
        degree: degree.to_string(),
    }
}

fn movable(
    name: &str,
    qualities: &[ChordQuality],
    root_string: u8,
    notes: &[(u8, i8, &str)],
    barre: Option<(i8, u8, u8)>,
) -> VoicingTemplate {
    let muted_strings = (0..7)
        .filter(|s| !notes.iter().any(|n| n.0 == *s))
        .collect();
    VoicingTemplate {
        name: name.to_string(),
        qualities: qualities.to_vec(),
        root: RootLocation {
            string: root_string,
            fret: 0,
        },
        notes: notes.iter().map(|&(s, o, d)| shape(s, o, d)).collect(),
        barres: barre
            .map(|(fret_offset, from_string, to_string)| TemplateBarre {
                fret_offset,
                from_string,
                to_string,
            })
            .into_iter()
            .collect(),
        open_strings: vec![],
        muted_strings,
        movable: true,
    }
}

fn open_shape(name: &str, quality: ChordQuality, root: RootLocation, notes: &[(u8, i8, &str)]) -> VoicingTemplate {
    let open_strings = notes
        .iter()
        .filter(|&&(_, o, _)| root.fret as i32 + o as i32 == 0)
        .map(|n| n.0)
        .collect();
    VoicingTemplate {
        movable: false,
        open_strings,
        root,
        ..movable(name, &[quality], root.string, notes, None)
    }
}

/// The built-in shape library for standard seven-string tuning.
pub fn standard_templates() -> Vec<VoicingTemplate> {
    use ChordQuality::*;
    vec![
        movable("E shape", &[Maj], 5, &[(5, 0, "R"), (4, 2, "5"), (3, 2, "R"), (2, 1, "3"), (1, 0, "5"), (0, 0, "R")], Some((0, 5, 0))),
        movable("A shape", &[Maj], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 2, "R"), (1, 2, "3"), (0, 0, "5")], Some((0, 4, 0))),
        movable("Low B triad", &[Maj], 6, &[(6, 0, "R"), (5, 2, "5"), (4, 2, "R"), (3, 1, "3")], None),
        movable("Em shape", &[Min], 5, &[(5, 0, "R"), (4, 2, "5"), (3, 2, "R"), (2, 0, "b3"), (1, 0, "5"), (0, 0, "R")], Some((0, 5, 0))),
        movable("Am shape", &[Min], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 2, "R"), (1, 1, "b3"), (0, 0, "5")], Some((0, 4, 0))),
        movable("Low B minor triad", &[Min], 6, &[(6, 0, "R"), (5, 2, "5"), (4, 2, "R"), (3, 0, "b3")], None),
        movable("Low B power chord", &[Maj, Min], 6, &[(6, 0, "R"), (5, 2, "5"), (4, 2, "R")], None),
        movable("Diminished (5th string)", &[Dim], 4, &[(4, 0, "R"), (3, 1, "b5"), (2, 2, "R"), (1, 1, "b3")], None),
        movable("Diminished (6th string)", &[Dim], 5, &[(5, 0, "R"), (4, 1, "b5"), (3, 2, "R"), (2, 0, "b3")], None),
        movable("Augmented (5th string)", &[Aug], 4, &[(4, 0, "R"), (3, 3, "#5"), (2, 2, "R"), (1, 2, "3")], None),
        movable("Augmented (6th string)", &[Aug], 5, &[(5, 0, "R"), (4, 3, "#5"), (3, 2, "R"), (2, 1, "3")], None),
        movable("Maj7 (6th string)", &[Maj7], 5, &[(5, 0, "R"), (3, 1, "7"), (2, 1, "3"), (1, 0, "5")], None),
        movable("Maj7 (5th string)", &[Maj7], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 1, "7"), (1, 2, "3"), (0, 0, "5")], None),
        movable("E7 shape", &[Dom7], 5, &[(5, 0, "R"), (4, 2, "5"), (3, 0, "b7"), (2, 1, "3"), (1, 0, "5"), (0, 0, "R")], Some((0, 5, 0))),
        movable("A7 shape", &[Dom7], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 0, "b7"), (1, 2, "3"), (0, 0, "5")], Some((0, 4, 0))),
        movable("Em7 shape", &[Min7], 5, &[(5, 0, "R"), (4, 2, "5"), (3, 0, "b7"), (2, 0, "b3"), (1, 0, "5"), (0, 0, "R")], Some((0, 5, 0))),
        movable("Am7 shape", &[Min7], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 0, "b7"), (1, 1, "b3"), (0, 0, "5")], Some((0, 4, 0))),
        movable("m7b5 (5th string)", &[Min7b5], 4, &[(4, 0, "R"), (3, 1, "b5"), (2, 0, "b7"), (1, 1, "b3")], None),
        movable("m7b5 (6th string)", &[Min7b5], 5, &[(5, 0, "R"), (3, 0, "b7"), (2, 0, "b3"), (1, -1, "b5")], None),
        movable("Dim7 (5th string)", &[Dim7], 4, &[(4, 0, "R"), (3, 1, "b5"), (2, -1, "bb7"), (1, 1, "b3")], None),
        movable("Dim7 (6th string)", &[Dim7], 5, &[(5, 0, "R"), (3, -1, "bb7"), (2, 0, "b3"), (1, -1, "b5")], None),
        movable("mMaj7 (5th string)", &[MinMaj7], 4, &[(4, 0, "R"), (3, 2, "5"), (2, 1, "7"), (1, 1, "b3")], None),
        open_shape(
            "Open C",
            Maj,
            RootLocation { string: 4, fret: 3 },
            &[(4, 0, "R"), (3, -1, "3"), (2, -3, "5"), (1, -2, "R"), (0, -3, "3")],
        ),
        open_shape(
            "Open G",
            Maj,
            RootLocation { string: 5, fret: 3 },
            &[(5, 0, "R"), (4, -1, "3"), (3, -3, "5"), (2, -3, "R"), (1, -3, "3"), (0, 0, "R")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::chord::diatonic_chords;
    use crate::fretboard::Tuning;
    use crate::scale::generate_scale;

    fn harmonize(root: PitchClass, name: &str) -> (FretboardMap, Vec<Chord>) {
        let scale = generate_scale(root, name, Catalog::standard()).unwrap();
        let map = FretboardMap::populate(&Tuning::standard(), &scale);
        (map, diatonic_chords(&scale).iter().cloned().collect())
    }

    fn interval_of(degree: &str) -> u8 {
        match degree {
            "R" => 0,
            "b3" => 3,
            "3" => 4,
            "b5" => 6,
            "5" => 7,
            "#5" => 8,
            "bb7" => 9,
            "b7" => 10,
            "7" => 11,
            other => panic!("unexpected degree {other}"),
        }
    }

    #[test]
    fn test_templates_are_spelled_correctly() {
        // Place every template at a fret where it fits and check each note sounds its degree.
        let tuning = Tuning::standard();
        for template in standard_templates() {
            let root_pitch = tuning.pitch_at(template.root.string, template.root.fret);
            for note in &template.notes {
                let fret = template.root.fret as i32 + note.fret_offset as i32 + 5 * template.movable as i32;
                let shifted_root = root_pitch.transpose(5 * template.movable as i32);
                let pitch = tuning.pitch_at(note.string, fret as u8);
                assert_eq!(
                    shifted_root.interval_to(pitch),
                    interval_of(&note.degree),
                    "{} string {}",
                    template.name,
                    note.string
                );
            }
        }
    }
    #[test]
    fn test_c_major_tonic_voicings() {
        let (map, chords) = harmonize(PitchClass::C, "Major");
        let voicings = project_voicings(&chords[0], &map, &standard_templates());
        let names = voicings.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
        assert!(names.contains(&"E shape @ 8fr"));
        assert!(names.contains(&"A shape @ 3fr"));
        assert!(names.contains(&"A shape @ 15fr"));
        assert!(names.contains(&"Open C @ 3fr"));
        assert!(names.contains(&"Maj7 (5th string) @ 3fr"));
        assert!(!names.iter().any(|n| n.starts_with("Open G")));
        let e_shape = voicings.iter().find(|v| v.name == "E shape @ 8fr").unwrap();
        assert_eq!(e_shape.barres, [Barre { fret: 8, from_string: 5, to_string: 0 }]);
        assert_eq!(e_shape.muted_strings, [6]);
        let open_c = voicings.iter().find(|v| v.name == "Open C @ 3fr").unwrap();
        let frets = open_c.notes.iter().map(|n| n.fret).collect::<Vec<_>>();
        assert_eq!(frets, [3, 2, 0, 1, 0]);
    }
    #[test]
    fn test_voicings_stay_on_neck_and_in_chord() {
        let catalog = Catalog::standard();
        let templates = standard_templates();
        for formula in &catalog.scales {
            for root in 0..12 {
                let (map, chords) = harmonize(PitchClass::new(root), &formula.name);
                for chord in &chords {
                    for voicing in project_voicings(chord, &map, &templates) {
                        assert!(voicing.anchor_fret > 0 && voicing.anchor_fret < 20);
                        for note in &voicing.notes {
                            assert!(note.fret <= FRET_COUNT);
                            assert_eq!(note.pitch, map.tuning().pitch_at(note.string, note.fret));
                            assert!(chord.contains(note.pitch), "{} in {}", voicing.name, chord.name);
                        }
                        assert!(voicing.barres.iter().all(|b| b.fret <= FRET_COUNT));
                    }
                }
            }
        }
    }
    #[test]
    fn test_dim7_on_leading_tone() {
        // F harmonic minor: E dim7 roots on the A string at 7 and 19, on the low E string at 12.
        let (map, chords) = harmonize(PitchClass::new(8), "Harmonic Minor");
        let dim7 = chords.iter().find(|c| c.seventh_quality == Some(ChordQuality::Dim7)).unwrap();
        assert_eq!(dim7.root(), PitchClass::E);
        let names = project_voicings(dim7, &map, &standard_templates())
            .into_iter()
            .map(|v| v.name)
            .collect::<Vec<_>>();
        assert!(names.contains(&"Dim7 (5th string) @ 7fr".to_string()));
        assert!(names.contains(&"Dim7 (6th string) @ 12fr".to_string()));
        assert!(names.contains(&"Dim7 (5th string) @ 19fr".to_string()));
    }
    #[test]
    fn test_place_rejects_off_neck() {
        let (map, _) = harmonize(PitchClass::C, "Major");
        let templates = standard_templates();
        let m7b5 = templates.iter().find(|t| t.name == "m7b5 (6th string)").unwrap();
        assert!(m7b5.place(&map, 0).is_none());
        assert!(m7b5.place(&map, 1).is_some());
        let open_g = templates.iter().find(|t| t.name == "Open G").unwrap();
        assert!(open_g.place(&map, 15).is_none());
        assert_eq!(open_g.open_strings, [3, 2, 1]);
        let mut extra_string = templates[0].clone();
        extra_string.notes[0].string = 9;
        assert!(extra_string.place(&map, 8).is_none());
    }
}
