//! Substance taxonomy.
//!
//! Reference data mapping substance names to categories, plus the concern text attached to
//! concerning additives. The taxonomy is immutable once built:
//!
//! - [`Taxonomy::bundled`] returns a process-wide handle to the tables compiled into the crate,
//!   built on first use.
//! - [`Taxonomy::from_yaml`] / [`Taxonomy::load`] build a taxonomy from a YAML document with the
//!   same shape, for deployments that curate their own lists. Load it once at startup and share
//!   it behind an `Arc`.
//!
//! All substance names are stored as lowercase ASCII so that matching against an ASCII-lowercased
//! copy of label text keeps byte offsets aligned with the original text.

mod data;

pub(crate) use data::{
    DYE_COLOUR_WORDS, HARMFUL_INGREDIENTS, HARMFUL_NEUROTOXINS, HARMFUL_OTHER_ADDITIVES,
    HARMFUL_PRESERVATIVES, NAMED_DYES,
};

use crate::error::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// Category a substance is flagged under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceCategory {
    Carcinogen,
    Neurotoxin,
    ConcerningAdditive,
    ArtificialSweetener,
    Preservative,
}

impl SubstanceCategory {
    /// Every category, in declaration order.
    pub const ALL: [SubstanceCategory; 5] = [
        SubstanceCategory::Carcinogen,
        SubstanceCategory::Neurotoxin,
        SubstanceCategory::ConcerningAdditive,
        SubstanceCategory::ArtificialSweetener,
        SubstanceCategory::Preservative,
    ];

    /// Stable identifier, identical to the serialised form.
    pub fn as_str(self) -> &'static str {
        match self {
            SubstanceCategory::Carcinogen => "carcinogen",
            SubstanceCategory::Neurotoxin => "neurotoxin",
            SubstanceCategory::ConcerningAdditive => "concerning_additive",
            SubstanceCategory::ArtificialSweetener => "artificial_sweetener",
            SubstanceCategory::Preservative => "preservative",
        }
    }

    /// Returns a human-readable name for this category.
    pub fn display_name(self) -> &'static str {
        match self {
            SubstanceCategory::Carcinogen => "Carcinogen",
            SubstanceCategory::Neurotoxin => "Neurotoxin",
            SubstanceCategory::ConcerningAdditive => "Concerning additive",
            SubstanceCategory::ArtificialSweetener => "Artificial sweetener",
            SubstanceCategory::Preservative => "Preservative",
        }
    }
}

impl std::fmt::Display for SubstanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single named substance and the category it is flagged under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubstanceEntry {
    /// Lowercase canonical name, matched as a substring.
    pub name: String,
    pub category: SubstanceCategory,
    /// Free-text description of the health concern, when one is recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concern: Option<String>,
}

/// A concerning additive and the concern reported when an ingredient contains it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdditiveConcern {
    pub name: String,
    pub concern: String,
}

/// Immutable substance reference data.
///
/// `markers` drive positional highlighting; the carcinogen, neurotoxin and additive tables drive
/// ingredient analysis. The tables overlap but are curated separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taxonomy {
    markers: Vec<SubstanceEntry>,
    carcinogens: Vec<String>,
    neurotoxins: Vec<String>,
    concerning_additives: Vec<AdditiveConcern>,
}

/// On-disk YAML shape of a taxonomy.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyWire {
    markers: Vec<SubstanceEntry>,
    carcinogens: Vec<String>,
    neurotoxins: Vec<String>,
    concerning_additives: Vec<AdditiveConcern>,
}

static BUNDLED: LazyLock<Arc<Taxonomy>> =
    LazyLock::new(|| Arc::new(Taxonomy::build_bundled()));

impl Taxonomy {
    /// Returns the taxonomy compiled into the crate.
    pub fn bundled() -> &'static Taxonomy {
        &BUNDLED
    }

    /// A shared handle to the bundled taxonomy. Every call points at the same tables.
    pub fn shared() -> Arc<Taxonomy> {
        Arc::clone(&BUNDLED)
    }

    fn build_bundled() -> Self {
        let concern_for = |name: &str| {
            data::CONCERNING_ADDITIVES
                .iter()
                .find(|(additive, _)| *additive == name)
                .map(|(_, concern)| (*concern).to_owned())
        };

        let markers = data::MARKERS
            .iter()
            .flat_map(|(category, names)| {
                names.iter().map(move |name| SubstanceEntry {
                    name: (*name).to_owned(),
                    category: *category,
                    concern: concern_for(name),
                })
            })
            .collect();

        Self {
            markers,
            carcinogens: data::CARCINOGENS.iter().map(|s| (*s).to_owned()).collect(),
            neurotoxins: data::NEUROTOXINS.iter().map(|s| (*s).to_owned()).collect(),
            concerning_additives: data::CONCERNING_ADDITIVES
                .iter()
                .map(|(name, concern)| AdditiveConcern {
                    name: (*name).to_owned(),
                    concern: (*concern).to_owned(),
                })
                .collect(),
        }
    }

    /// Parse a taxonomy from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface the path (e.g. `markers.3.category`) of the
    /// first field that does not match the expected shape.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::TaxonomySchema`] if the YAML does not match the taxonomy shape, and
    /// [`LabelError::InvalidInput`] if a substance name is empty or not ASCII.
    pub fn from_yaml(yaml_text: &str) -> LabelResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, TaxonomyWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(LabelError::TaxonomySchema {
                    path,
                    message: source.to_string(),
                });
            }
        };

        Self::from_wire(wire)
    }

    /// Read and parse a taxonomy YAML file.
    pub fn load(path: &Path) -> LabelResult<Self> {
        let text = std::fs::read_to_string(path).map_err(LabelError::FileRead)?;
        let taxonomy = Self::from_yaml(&text)?;
        tracing::info!(
            path = %path.display(),
            markers = taxonomy.markers.len(),
            "loaded substance taxonomy"
        );
        Ok(taxonomy)
    }

    /// Render the taxonomy as YAML accepted by [`Taxonomy::from_yaml`].
    pub fn to_yaml(&self) -> LabelResult<String> {
        let wire = TaxonomyWire {
            markers: self.markers.clone(),
            carcinogens: self.carcinogens.clone(),
            neurotoxins: self.neurotoxins.clone(),
            concerning_additives: self.concerning_additives.clone(),
        };
        serde_yaml::to_string(&wire).map_err(LabelError::YamlSerialization)
    }

    fn from_wire(wire: TaxonomyWire) -> LabelResult<Self> {
        let markers = wire
            .markers
            .into_iter()
            .map(|entry| {
                Ok(SubstanceEntry {
                    name: canonical_name(&entry.name, "markers")?,
                    category: entry.category,
                    concern: entry.concern,
                })
            })
            .collect::<LabelResult<Vec<_>>>()?;

        let carcinogens = wire
            .carcinogens
            .iter()
            .map(|name| canonical_name(name, "carcinogens"))
            .collect::<LabelResult<Vec<_>>>()?;

        let neurotoxins = wire
            .neurotoxins
            .iter()
            .map(|name| canonical_name(name, "neurotoxins"))
            .collect::<LabelResult<Vec<_>>>()?;

        let concerning_additives = wire
            .concerning_additives
            .into_iter()
            .map(|additive| {
                Ok(AdditiveConcern {
                    name: canonical_name(&additive.name, "concerning_additives")?,
                    concern: additive.concern,
                })
            })
            .collect::<LabelResult<Vec<_>>>()?;

        Ok(Self {
            markers,
            carcinogens,
            neurotoxins,
            concerning_additives,
        })
    }

    /// Highlight markers in scan order.
    pub fn markers(&self) -> &[SubstanceEntry] {
        &self.markers
    }

    pub fn carcinogens(&self) -> &[String] {
        &self.carcinogens
    }

    pub fn neurotoxins(&self) -> &[String] {
        &self.neurotoxins
    }

    pub fn concerning_additives(&self) -> &[AdditiveConcern] {
        &self.concerning_additives
    }
}

fn canonical_name(name: &str, table: &str) -> LabelResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LabelError::InvalidInput(format!(
            "{table}: substance name cannot be empty"
        )));
    }
    if !trimmed.is_ascii() {
        return Err(LabelError::InvalidInput(format!(
            "{table}: substance name '{trimmed}' must contain only ASCII characters"
        )));
    }
    Ok(trimmed.to_ascii_lowercase())
}
