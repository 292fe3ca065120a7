//! On-demand harmonic questions about a chord or a clicked note.

use std::cmp::Reverse;

use itertools::Itertools;
use serde::Serialize;

use crate::chord::{Chord, ChordMap};
use crate::fretboard::{FretPosition, FretboardMap};
use crate::pitch::PitchClass;
use crate::positions::{WINDOW_SPAN, finger_for};

/// b9, 9, #9, #11, b13, 13 above the chord root.
pub const TENSION_INTERVALS: [u8; 6] = [1, 2, 3, 6, 8, 9];
/// The natural eleventh: usable over minor chords, an avoid note over major ones.
pub const ELEVENTH: u8 = 5;
/// Frets the anchor box extends below the clicked note.
pub const ANCHOR_REACH_BELOW: u8 = 2;

/// Scale tones outside `chord` that work as color extensions over it, in scale order.
pub fn tension_notes(chord: &Chord, parent_scale: &[PitchClass]) -> Vec<PitchClass> {
    let root = chord.root();
    parent_scale
        .iter()
        .copied()
        .filter(|&p| !chord.contains(p))
        .filter(|&p| {
            let interval = root.interval_to(p);
            TENSION_INTERVALS.contains(&interval)
                || (interval == ELEVENTH && !chord.quality.has_major_third())
        })
        .unique()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArpeggioNote {
    pub position: FretPosition,
    pub finger: u8,
    /// Degree within the chord, e.g. `b3`.
    pub degree: String,
}

/// One chord the clicked note belongs to, with its arpeggio under the hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnchorContext {
    pub chord_degree: String,
    pub chord_name: String,
    /// What the clicked note is in this chord, e.g. `5`.
    pub role: String,
    pub description: String,
    pub base_fret: u8,
    pub arpeggio_notes: Vec<ArpeggioNote>,
}

/// The chords containing `note`, each with the chord tones in a five-fret box around it.
///
/// Chords with fewer than two tones in the box are skipped. Fuller boxes come first.
pub fn anchor_contexts(note: &FretPosition, chords: &ChordMap, map: &FretboardMap) -> Vec<AnchorContext> {
    let base = note.fret.saturating_sub(ANCHOR_REACH_BELOW);
    chords
        .iter()
        .filter_map(|chord| {
            let role = chord.tone_label(note.pitch)?;
            let arpeggio_notes = map
                .in_fret_range(base, base + WINDOW_SPAN)
                .filter_map(|p| {
                    Some(ArpeggioNote {
                        degree: chord.tone_label(p.pitch)?.to_string(),
                        position: p.clone(),
                        finger: finger_for(base, p.fret),
                    })
                })
                .collect::<Vec<_>>();
            if arpeggio_notes.len() < 2 {
                return None;
            }
            let chord_name = chord.display_name().to_string();
            let chord_degree = if chord.seventh_quality.is_some() {
                chord.seventh_degree.clone()
            } else {
                chord.degree.clone()
            };
            Some(AnchorContext {
                description: format!("{} as the {role} of {chord_name} ({chord_degree})", note.pitch),
                chord_degree,
                chord_name,
                role: role.to_string(),
                base_fret: base,
                arpeggio_notes,
            })
        })
        .sorted_by_key(|c| Reverse(c.arpeggio_notes.len()))
        .collect()
}
