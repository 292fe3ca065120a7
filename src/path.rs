//! The diagonal run: one continuous line up and across the neck.
//!
//! The fretting hand is modelled as a [`Hand`] (anchor fret plus reach). From the current note
//! the hand plays every note on that string it can reach without moving (a phrase), then picks
//! the cheapest way to move on:
//!
//! - a **slide** along the same string, costing [`SLIDE_COST`] plus the fret distance;
//! - a **reposition** onto the next higher string, costing [`REPOSITION_COST`] plus the fret distance;
//! - failing both, an awkward **jump** to the next note in walking order at [`JUMP_COST`].
//!
//! Candidates come from a forward scan of the notes ordered lowest string first, ascending fret,
//! so the run only ever moves forward in that order and always terminates.
//! The run is not guaranteed to visit every note of the map.
//!
//! ```
//! use fretboard::catalog::Catalog;
//! use fretboard::fretboard::{FretboardMap, Tuning};
//! use fretboard::path::diagonal_run;
//! use fretboard::pitch::PitchClass;
//! use fretboard::scale::generate_scale;
//!
//! let scale = generate_scale(PitchClass::E, "Natural Minor", Catalog::standard()).unwrap();
//! let run = diagonal_run(&FretboardMap::populate(&Tuning::standard(), &scale));
//! // Starts on the lowest E of the low B string and climbs to the top string.
//! assert_eq!((run[0].position.string, run[0].position.fret), (6, 5));
//! assert_eq!(run.last().unwrap().position.string, 0);
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::fretboard::{FretPosition, FretboardMap};
use crate::scale::ROOT_DEGREE;

pub const SLIDE_COST: f32 = 1.0;
pub const REPOSITION_COST: f32 = 1.5;
pub const JUMP_COST: f32 = 10.0;
/// Longest slide considered, in frets.
pub const MAX_SLIDE: u8 = 4;
/// Largest fret difference when crossing to the next string.
pub const MAX_REPOSITION: u8 = 3;

/// Reach of the fretting hand. Higher up the neck frets are narrower, so the hand covers one more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hand {
    pub anchor_fret: u8,
    pub span: u8,
}

impl Hand {
    /// The hand placed to play `fret` with the second finger (or the first, near the nut).
    pub fn at(fret: u8) -> Self {
        let anchor_fret = if fret > 1 { fret - 1 } else { fret };
        let span = if anchor_fret < 5 { 4 } else { 5 };
        Self { anchor_fret, span }
    }
    pub fn reaches(&self, fret: u8) -> bool {
        fret >= self.anchor_fret && fret - self.anchor_fret <= self.span
    }
    pub fn finger(&self, fret: u8) -> u8 {
        (fret.saturating_sub(self.anchor_fret) + 1).clamp(1, 4)
    }
}

/// How a run arrived at a note from the previous phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Slide,
    Reposition,
}

/// One note of the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathNode {
    pub position: FretPosition,
    pub finger: u8,
    /// `Some(Slide)` on the note a slide lands on. Repositions and jumps are not marked.
    pub shift: Option<ShiftType>,
}

/// A way to leave the last note of a phrase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shift<'a> {
    Slide { target: &'a FretPosition, distance: u8 },
    Reposition { target: &'a FretPosition, distance: u8 },
    Jump { target: &'a FretPosition },
}

impl<'a> Shift<'a> {
    pub fn cost(&self) -> f32 {
        match self {
            Shift::Slide { distance, .. } => SLIDE_COST + *distance as f32,
            Shift::Reposition { distance, .. } => REPOSITION_COST + *distance as f32,
            Shift::Jump { .. } => JUMP_COST,
        }
    }
    pub fn target(&self) -> &'a FretPosition {
        match self {
            Shift::Slide { target, .. }
            | Shift::Reposition { target, .. }
            | Shift::Jump { target } => target,
        }
    }
    pub fn shift_type(&self) -> Option<ShiftType> {
        match self {
            Shift::Slide { .. } => Some(ShiftType::Slide),
            Shift::Reposition { .. } => Some(ShiftType::Reposition),
            Shift::Jump { .. } => None,
        }
    }
}

/// The notes on `note`'s string the hand reaches from `note` without moving, ascending.
/// Always starts with `note` itself.
pub fn phrase_in_reach(map: &FretboardMap, note: &FretPosition) -> Vec<PathNode> {
    let hand = Hand::at(note.fret);
    map.on_string(note.string)
        .skip_while(|p| p.fret < note.fret)
        .take_while(|p| hand.reaches(p.fret))
        .map(|p| PathNode {
            position: p.clone(),
            finger: hand.finger(p.fret),
            shift: None,
        })
        .collect()
}

/// The cheapest shift away from `order[from]`, scanning forward until the strings get too far.
///
/// Returns `None` only when `order[from]` is the last note.
pub fn next_shift<'a>(order: &[&'a FretPosition], from: usize) -> Option<Shift<'a>> {
    let last = order.get(from)?;
    let mut best: Option<Shift<'a>> = None;
    for &candidate in &order[from + 1..] {
        if last.string - candidate.string > 1 {
            break;
        }
        let distance = last.fret.abs_diff(candidate.fret);
        let option = if candidate.string == last.string {
            (1..=MAX_SLIDE)
                .contains(&distance)
                .then_some(Shift::Slide {
                    target: candidate,
                    distance,
                })
        } else {
            (distance <= MAX_REPOSITION).then_some(Shift::Reposition {
                target: candidate,
                distance,
            })
        };
        if let Some(option) = option {
            // Strict comparison keeps the earliest candidate on ties.
            if best.is_none_or(|b| option.cost() < b.cost()) {
                best = Some(option);
            }
        }
    }
    best.or_else(|| {
        order.get(from + 1).map(|&target| {
            log::debug!(
                "no ergonomic shift from string {} fret {}, jumping",
                last.string,
                last.fret
            );
            Shift::Jump { target }
        })
    })
}

/// Threads the run from the lowest root on the lowest string.
///
/// Empty if the map has no root.
pub fn diagonal_run(map: &FretboardMap) -> Vec<PathNode> {
    let order = map.low_to_high();
    let rank = order
        .iter()
        .enumerate()
        .map(|(i, p)| (p.key(), i))
        .collect::<HashMap<_, _>>();
    let Some(mut current) = order.iter().copied().find(|p| p.degree == ROOT_DEGREE) else {
        return vec![];
    };

    let mut path: Vec<PathNode> = Vec::new();
    let mut arriving = None;
    loop {
        let phrase = phrase_in_reach(map, current);
        let Some(last) = phrase.last().map(|n| n.position.key()) else {
            break;
        };
        for (i, mut node) in phrase.into_iter().enumerate() {
            if i == 0 {
                if path
                    .last()
                    .is_some_and(|prev| prev.position.same_cell(&node.position))
                {
                    continue;
                }
                node.shift = arriving;
            }
            path.push(node);
        }
        let Some(shift) = rank.get(&last).and_then(|&from| next_shift(&order, from)) else {
            break;
        };
        current = shift.target();
        arriving = shift.shift_type().filter(|&t| t == ShiftType::Slide);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::fretboard::{LOWEST_STRING, Tuning};
    use crate::pitch::PitchClass;
    use crate::scale::generate_scale;

    fn map_of(root: &str, name: &str) -> FretboardMap {
        let scale = generate_scale(root.parse().unwrap(), name, Catalog::standard()).unwrap();
        FretboardMap::populate(&Tuning::standard(), &scale)
    }
    fn cells(run: &[PathNode]) -> Vec<(u8, u8)> {
        run.iter().map(|n| n.position.key()).collect()
    }

    #[test]
    fn test_hand() {
        assert_eq!(Hand::at(0), Hand { anchor_fret: 0, span: 4 });
        assert_eq!(Hand::at(1), Hand { anchor_fret: 1, span: 4 });
        assert_eq!(Hand::at(5), Hand { anchor_fret: 4, span: 4 });
        assert_eq!(Hand::at(6), Hand { anchor_fret: 5, span: 5 });
        let hand = Hand::at(8);
        assert!(hand.reaches(7) && hand.reaches(12));
        assert!(!hand.reaches(6) && !hand.reaches(13));
        assert_eq!(hand.finger(7), 1);
        assert_eq!(hand.finger(8), 2);
        assert_eq!(hand.finger(12), 4);
    }
    #[test]
    fn test_phrase_stays_in_reach() {
        let map = map_of("G", "Major");
        let start = map.get(LOWEST_STRING, 8).unwrap();
        let phrase = phrase_in_reach(&map, start);
        assert_eq!(cells(&phrase), [(6, 8), (6, 10), (6, 12)]);
        assert_eq!(phrase.iter().map(|n| n.finger).collect::<Vec<_>>(), [2, 4, 4]);
    }
    #[test]
    fn test_shift_costs() {
        let p = FretPosition {
            string: 3,
            fret: 5,
            pitch: PitchClass::new(10),
            degree: "R".to_string(),
        };
        assert_eq!(Shift::Slide { target: &p, distance: 2 }.cost(), 3.0);
        assert_eq!(Shift::Reposition { target: &p, distance: 0 }.cost(), 1.5);
        assert_eq!(Shift::Jump { target: &p }.cost(), JUMP_COST);
    }
    #[test]
    fn test_g_major_run() {
        let run = diagonal_run(&map_of("G", "Major"));
        assert_eq!(
            cells(&run),
            [
                (6, 8),
                (6, 10),
                (6, 12),
                (5, 12),
                (5, 14),
                (5, 15),
                (4, 15),
                (4, 17),
                (4, 19),
                (3, 19),
                (3, 21),
                (3, 22),
                (2, 21),
                (2, 23),
                (2, 24),
                (1, 24),
                (0, 24),
            ]
        );
        // Every move in this run is a string crossing.
        assert!(run.iter().all(|n| n.shift.is_none()));
    }
    #[test]
    fn test_slide_is_taken_when_cheapest() {
        // A Hirajoshi has a four-semitone gap that forces a slide on the low E string.
        let run = diagonal_run(&map_of("A", "Hirajoshi"));
        let slide = run
            .iter()
            .position(|n| n.shift == Some(ShiftType::Slide))
            .unwrap();
        assert_eq!(run[slide].position.key(), (5, 19));
        assert_eq!(run[slide - 1].position.key(), (5, 17));
    }
    #[test]
    fn test_transitions_are_ergonomic() {
        let catalog = Catalog::standard();
        for formula in &catalog.scales {
            let scale = generate_scale(PitchClass::new(4), &formula.name, catalog).unwrap();
            let map = FretboardMap::populate(&Tuning::standard(), &scale);
            let order = map.low_to_high();
            let rank = |n: &PathNode| {
                order
                    .iter()
                    .position(|p| p.same_cell(&n.position))
                    .unwrap()
            };
            let run = diagonal_run(&map);
            assert!(!run.is_empty());
            assert_eq!(run[0].position.degree, ROOT_DEGREE);
            assert_eq!(run[0].position.string, LOWEST_STRING);
            for pair in run.windows(2) {
                let (a, b) = (&pair[0].position, &pair[1].position);
                assert!(!a.same_cell(b));
                assert!(rank(&pair[0]) < rank(&pair[1]), "{} moves backwards", formula.name);
                let distance = a.fret.abs_diff(b.fret);
                let slide = a.string == b.string && (1..=MAX_SLIDE).contains(&distance);
                let reposition = a.string == b.string + 1 && distance <= MAX_REPOSITION;
                let jump = rank(&pair[1]) == rank(&pair[0]) + 1;
                assert!(slide || reposition || jump, "{}: {:?} -> {:?}", formula.name, a, b);
                assert!((1..=4).contains(&pair[1].finger));
            }
        }
    }
    #[test]
    fn test_deterministic() {
        let map = map_of("D", "Dorian");
        assert_eq!(diagonal_run(&map), diagonal_run(&map));
    }
    #[test]
    fn test_empty_map() {
        let map = FretboardMap::populate(&Tuning::standard(), &[]);
        assert!(diagonal_run(&map).is_empty());
        assert!(next_shift(&map.low_to_high(), 0).is_none());
    }
}
