//! Five-fret "box" positions.
//!
//! A position is anchored on a scale note on one of the two lowest strings. At each anchor two
//! windows compete: the one starting on the anchor fret and the one starting a fret below it.
//! The fuller window wins. Windows that are too sparse to play through are dropped.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::Serialize;

use crate::fretboard::{FretPosition, FretboardMap, LOWEST_STRING};

/// Frets covered by one hand position, inclusive of both ends.
pub const WINDOW_SPAN: u8 = 4;
/// Highest fret considered as an anchor.
pub const MAX_ANCHOR_FRET: u8 = 15;
pub const MIN_STRINGS: usize = 5;
pub const MIN_NOTES: usize = 10;
pub const MAX_POSITIONS: usize = 7;

/// A scale note with the finger that plays it (`0` = open string, `1` = index .. `4` = pinky).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fingered {
    pub position: FretPosition,
    pub finger: u8,
}

/// One playable position of the scale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FingeringWindow {
    /// Lowest fret of the window; the window covers `base..=base + WINDOW_SPAN`.
    pub base: u8,
    pub notes: Vec<Fingered>,
}

impl FingeringWindow {
    fn build(map: &FretboardMap, base: u8) -> Self {
        let notes = map
            .in_fret_range(base, base + WINDOW_SPAN)
            .map(|p| Fingered {
                position: p.clone(),
                finger: finger_for(base, p.fret),
            })
            .collect();
        Self { base, notes }
    }

    pub fn string_count(&self) -> usize {
        self.notes
            .iter()
            .map(|n| n.position.string)
            .collect::<BTreeSet<_>>()
            .len()
    }
    pub fn is_playable(&self) -> bool {
        self.string_count() >= MIN_STRINGS && self.notes.len() >= MIN_NOTES
    }
}

/// Index finger on `base`, one finger per fret, the pinky covering the stretch to the fifth fret.
/// Open strings in a box starting at the nut take `0`.
pub fn finger_for(base: u8, fret: u8) -> u8 {
    if base == 0 && fret == 0 {
        0
    } else {
        (fret.saturating_sub(base) + 1).min(4)
    }
}

/// At most [`MAX_POSITIONS`] positions ordered by base fret.
pub fn windows(map: &FretboardMap) -> Vec<FingeringWindow> {
    let count_in = |base: u8| map.in_fret_range(base, base + WINDOW_SPAN).count();
    let is_anchor = |fret: u8| {
        map.get(LOWEST_STRING, fret).is_some() || map.get(LOWEST_STRING - 1, fret).is_some()
    };

    let mut seen = BTreeSet::new();
    let mut result = Vec::new();
    for fret in (0..=MAX_ANCHOR_FRET).filter(|&f| is_anchor(f)) {
        let base = if fret > 0 && count_in(fret - 1) > count_in(fret) {
            fret - 1
        } else {
            fret
        };
        if !seen.insert(base) {
            continue;
        }
        let window = FingeringWindow::build(map, base);
        if window.is_playable() {
            result.push(window);
        } else {
            log::trace!(
                "dropping window at fret {base}: {} notes on {} strings",
                window.notes.len(),
                window.string_count()
            );
        }
    }
    result
        .into_iter()
        .sorted_by_key(|w| w.base)
        .take(MAX_POSITIONS)
        .collect()
}
