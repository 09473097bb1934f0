//! Whole-label scan against the flat harmful-ingredient list.
//!
//! Unlike [`crate::analysis`], this works on the raw, untokenized text and reports the list
//! names that occur anywhere in it, grouped into broad categories.

use crate::taxonomy::{
    DYE_COLOUR_WORDS, HARMFUL_INGREDIENTS, HARMFUL_NEUROTOXINS, HARMFUL_OTHER_ADDITIVES,
    HARMFUL_PRESERVATIVES, NAMED_DYES,
};
use serde::{Deserialize, Serialize};

/// Broad grouping of the harmful-ingredient list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmfulGroup {
    Neurotoxins,
    SyntheticFoodDyes,
    Preservatives,
    OtherHarmfulAdditives,
}

impl HarmfulGroup {
    /// Report order.
    pub const ALL: [HarmfulGroup; 4] = [
        HarmfulGroup::Neurotoxins,
        HarmfulGroup::SyntheticFoodDyes,
        HarmfulGroup::Preservatives,
        HarmfulGroup::OtherHarmfulAdditives,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HarmfulGroup::Neurotoxins => "Neurotoxins",
            HarmfulGroup::SyntheticFoodDyes => "Synthetic Food Dyes",
            HarmfulGroup::Preservatives => "Preservatives",
            HarmfulGroup::OtherHarmfulAdditives => "Other Harmful Additives",
        }
    }

    /// Whether a harmful-list name belongs to this group.
    pub fn contains(self, name: &str) -> bool {
        match self {
            HarmfulGroup::Neurotoxins => HARMFUL_NEUROTOXINS.contains(&name),
            HarmfulGroup::SyntheticFoodDyes => is_dye(name),
            HarmfulGroup::Preservatives => HARMFUL_PRESERVATIVES.contains(&name),
            HarmfulGroup::OtherHarmfulAdditives => HARMFUL_OTHER_ADDITIVES.contains(&name),
        }
    }
}

/// Dyes are recognised by a colour word anywhere in the name, or by an explicit dye name.
fn is_dye(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    DYE_COLOUR_WORDS.iter().any(|colour| lower.contains(colour)) || NAMED_DYES.contains(&name)
}

/// Result of scanning a label against the harmful-ingredient list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeurotoxinAnalysis {
    /// List names found in the text, in list order.
    pub found: Vec<String>,
    /// Labels of the groups with at least one finding, in report order.
    pub categories: Vec<String>,
    pub summary: String,
}

impl NeurotoxinAnalysis {
    pub fn is_clean(&self) -> bool {
        self.found.is_empty()
    }
}

/// Scan raw label text for every name on the harmful-ingredient list (case-insensitive
/// containment).
pub fn analyze_harmful_ingredients(text: &str) -> NeurotoxinAnalysis {
    let lower = text.to_lowercase();

    let found: Vec<&str> = HARMFUL_INGREDIENTS
        .iter()
        .copied()
        .filter(|name| lower.contains(&name.to_lowercase()))
        .collect();

    let categories = HarmfulGroup::ALL
        .iter()
        .filter(|group| found.iter().any(|name| group.contains(name)))
        .map(|group| group.label().to_owned())
        .collect();

    let summary = if found.is_empty() {
        "No harmful ingredients found".to_owned()
    } else {
        format!("Found {} potentially harmful ingredients", found.len())
    };

    tracing::debug!(found = found.len(), "harmful ingredient scan complete");

    NeurotoxinAnalysis {
        found: found.into_iter().map(str::to_owned).collect(),
        categories,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_findings() {
        let analysis = analyze_harmful_ingredients("");
        assert!(analysis.is_clean());
        assert!(analysis.categories.is_empty());
        assert_eq!(analysis.summary, "No harmful ingredients found");
    }

    #[test]
    fn finds_names_case_insensitively_in_list_order() {
        let analysis =
            analyze_harmful_ingredients("sugar, sodium benzoate, red 40 and msg. Carrageenan");
        assert_eq!(
            analysis.found,
            vec!["MSG", "Red 40", "Sodium Benzoate", "Carrageenan"]
        );
        assert_eq!(
            analysis.categories,
            vec![
                "Neurotoxins",
                "Synthetic Food Dyes",
                "Preservatives",
                "Other Harmful Additives"
            ]
        );
        assert_eq!(analysis.summary, "Found 4 potentially harmful ingredients");
    }

    #[test]
    fn nested_names_are_reported_separately() {
        let analysis = analyze_harmful_ingredients("Citrus Red 2");
        assert_eq!(analysis.found, vec!["Red 2", "Citrus Red 2"]);
        assert_eq!(analysis.categories, vec!["Synthetic Food Dyes"]);
    }

    #[test]
    fn explicit_dye_names_count_as_dyes() {
        let analysis = analyze_harmful_ingredients("Colour: tartrazine");
        assert_eq!(analysis.found, vec!["Tartrazine"]);
        assert_eq!(analysis.categories, vec!["Synthetic Food Dyes"]);
    }

    #[test]
    fn group_membership() {
        assert!(HarmfulGroup::SyntheticFoodDyes.contains("Brilliant Black BN"));
        assert!(HarmfulGroup::SyntheticFoodDyes.contains("Indigotine"));
        assert!(!HarmfulGroup::SyntheticFoodDyes.contains("TBHQ"));
        assert!(HarmfulGroup::Preservatives.contains("Propylene Glycol"));
        assert!(HarmfulGroup::Neurotoxins.contains("Aspartame"));
        assert!(!HarmfulGroup::OtherHarmfulAdditives.contains("MSG"));
    }

    #[test]
    fn arbitrary_text_never_panics() {
        for text in ["\u{0}", "ÄÖÜ ß", "....;;;,,,", "🙂 red"] {
            let _ = analyze_harmful_ingredients(text);
        }
    }
}
