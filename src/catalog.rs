//! The static tables the engine reads: scale formulas, voicing templates and progressions.
//!
//! ```
//! use fretboard::catalog::Catalog;
//!
//! let catalog = Catalog::standard();
//! assert_eq!(catalog.scale_names()[0], "Major");
//! let copy = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();
//! assert_eq!(&copy, catalog);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{FretboardError, Result};
use crate::fretboard::STRING_COUNT;
use crate::progression::{ProgressionFamily, standard_progressions};
use crate::scale::{ScaleFormula, standard_formulas};
use crate::voicing::{VoicingTemplate, standard_templates};

pub const MIN_SCALE_NOTES: usize = 5;
pub const MAX_SCALE_NOTES: usize = 7;

static STANDARD: Lazy<Catalog> = Lazy::new(|| {
    let catalog = Catalog::builtin();
    log::debug!(
        "built-in catalog: {} scales, {} voicing templates, {} progression families",
        catalog.scales.len(),
        catalog.voicings.len(),
        catalog.progressions.len()
    );
    catalog
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// In display order; names are unique.
    pub scales: Vec<ScaleFormula>,
    pub voicings: Vec<VoicingTemplate>,
    pub progressions: Vec<ProgressionFamily>,
}

impl Catalog {
    /// The shared built-in catalog.
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    /// A fresh copy of the built-in tables.
    pub fn builtin() -> Self {
        Self {
            scales: standard_formulas(),
            voicings: standard_templates(),
            progressions: standard_progressions(),
        }
    }

    /// Parses and [validates](Self::validate) a catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        log::debug!("loaded catalog with {} scales", catalog.scales.len());
        Ok(catalog)
    }

    /// Checks that every scale has 5 to 7 notes inside one octave and that every voicing
    /// template only names strings of the seven-string neck.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(FretboardError::InvalidCatalog(msg));
        for formula in &self.scales {
            if !(MIN_SCALE_NOTES..=MAX_SCALE_NOTES).contains(&formula.note_count()) {
                return invalid(format!("scale `{}` has {} notes", formula.name, formula.note_count()));
            }
            let span = formula.steps.iter().map(|(s, _)| *s as u32).sum::<u32>();
            if span >= 12 || formula.steps.iter().any(|(s, _)| *s == 0) {
                return invalid(format!("scale `{}` does not fit in one octave", formula.name));
            }
        }
        for template in &self.voicings {
            let bad_string = std::iter::once(template.root.string)
                .chain(template.notes.iter().map(|n| n.string))
                .chain(template.barres.iter().flat_map(|b| [b.from_string, b.to_string]))
                .chain(template.open_strings.iter().copied())
                .chain(template.muted_strings.iter().copied())
                .find(|&s| s as usize >= STRING_COUNT);
            if let Some(bad) = bad_string {
                return invalid(format!("voicing `{}` uses string {bad}", template.name));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn formula(&self, name: &str) -> Option<&ScaleFormula> {
        self.scales.iter().find(|f| f.name == name)
    }

    pub fn scale_names(&self) -> Vec<&str> {
        self.scales.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn progression_family(&self, scale: &str) -> Option<&ProgressionFamily> {
        self.progressions.iter().find(|f| f.scale == scale)
    }
}
