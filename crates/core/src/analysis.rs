//! Ingredient analysis against the taxonomy's carcinogen, neurotoxin and additive tables.

use crate::taxonomy::Taxonomy;
use crate::tokenizer::IngredientCandidate;
use serde::{Deserialize, Serialize};

/// An ingredient flagged as a concerning additive, with the concern reported for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditiveFinding {
    /// Original text of the ingredient.
    pub ingredient: String,
    pub concern: String,
}

/// Result of analysing a list of ingredient candidates.
///
/// Lists hold the original text of each flagged ingredient, in input order. An ingredient may
/// appear in several lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAnalysis {
    pub carcinogens: Vec<String>,
    pub neurotoxins: Vec<String>,
    /// Keyed by ingredient text, in first-insertion order.
    pub concerning_additives: Vec<AdditiveFinding>,
}

impl IngredientAnalysis {
    pub fn has_harmful_substances(&self) -> bool {
        !self.carcinogens.is_empty()
            || !self.neurotoxins.is_empty()
            || !self.concerning_additives.is_empty()
    }

    /// Human-readable count of what was found.
    pub fn summary(&self) -> String {
        if !self.has_harmful_substances() {
            return "No known harmful substances found".to_owned();
        }

        let mut items = Vec::new();
        if !self.carcinogens.is_empty() {
            items.push(format!("{} carcinogen(s)", self.carcinogens.len()));
        }
        if !self.neurotoxins.is_empty() {
            items.push(format!("{} neurotoxin(s)", self.neurotoxins.len()));
        }
        if !self.concerning_additives.is_empty() {
            items.push(format!(
                "{} concerning additive(s)",
                self.concerning_additives.len()
            ));
        }
        format!("Warning: Found {}", items.join(", "))
    }

    /// Concern text recorded for an ingredient, if it was flagged as an additive.
    pub fn concern_for(&self, ingredient: &str) -> Option<&str> {
        self.concerning_additives
            .iter()
            .find(|f| f.ingredient == ingredient)
            .map(|f| f.concern.as_str())
    }

    /// Risk level of every flagged additive, in the same order as `concerning_additives`.
    pub fn additive_risks(&self) -> Vec<(&AdditiveFinding, RiskLevel)> {
        self.concerning_additives
            .iter()
            .map(|f| (f, RiskLevel::from_concern(&f.concern)))
            .collect()
    }

    fn record_additive(&mut self, ingredient: &str, concern: &str) {
        match self
            .concerning_additives
            .iter_mut()
            .find(|f| f.ingredient == ingredient)
        {
            Some(existing) => existing.concern = concern.to_owned(),
            None => self.concerning_additives.push(AdditiveFinding {
                ingredient: ingredient.to_owned(),
                concern: concern.to_owned(),
            }),
        }
    }
}

/// Coarse severity derived from an additive's concern text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// "carcinogen" in the concern means high risk, "inflammatory" medium, anything else low.
    pub fn from_concern(concern: &str) -> Self {
        let concern = concern.to_lowercase();
        if concern.contains("carcinogen") {
            RiskLevel::High
        } else if concern.contains("inflammatory") {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classify each candidate against the taxonomy's analysis tables.
///
/// The lowercased `normalized_name` is tested for substring containment against each table
/// independently. When several additives match one ingredient, the last one in table order sets
/// the concern.
pub fn analyze_ingredients(
    taxonomy: &Taxonomy,
    candidates: &[IngredientCandidate],
) -> IngredientAnalysis {
    let mut analysis = IngredientAnalysis::default();

    for candidate in candidates {
        let name = candidate.normalized_name.to_lowercase();

        if taxonomy.carcinogens().iter().any(|c| name.contains(c.as_str())) {
            analysis.carcinogens.push(candidate.original_text.clone());
        }

        if taxonomy.neurotoxins().iter().any(|n| name.contains(n.as_str())) {
            analysis.neurotoxins.push(candidate.original_text.clone());
        }

        for additive in taxonomy.concerning_additives() {
            if name.contains(additive.name.as_str()) {
                analysis.record_additive(&candidate.original_text, &additive.concern);
            }
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        carcinogens = analysis.carcinogens.len(),
        neurotoxins = analysis.neurotoxins.len(),
        additives = analysis.concerning_additives.len(),
        "ingredients analysed"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::{parse_ingredient, parse_ingredient_list};

    fn analyse(text: &str) -> IngredientAnalysis {
        analyze_ingredients(Taxonomy::bundled(), &parse_ingredient_list(text))
    }

    #[test]
    fn clean_ingredients_yield_empty_analysis() {
        let analysis = analyse("Water, Oats, Salt 1g");
        assert!(analysis.carcinogens.is_empty());
        assert!(analysis.neurotoxins.is_empty());
        assert!(analysis.concerning_additives.is_empty());
        assert!(!analysis.has_harmful_substances());
        assert_eq!(analysis.summary(), "No known harmful substances found");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let analysis = analyze_ingredients(Taxonomy::bundled(), &[]);
        assert_eq!(analysis, IngredientAnalysis::default());
    }

    #[test]
    fn lead_acetate_is_a_neurotoxin() {
        let candidate = parse_ingredient("Lead Acetate");
        let analysis = analyze_ingredients(Taxonomy::bundled(), &[candidate]);
        assert_eq!(analysis.neurotoxins, vec!["Lead Acetate"]);
        assert!(analysis.carcinogens.is_empty());
    }

    #[test]
    fn one_ingredient_can_land_in_several_groups() {
        let analysis = analyse("Acrylamide 2mg");
        assert_eq!(analysis.carcinogens, vec!["Acrylamide 2mg"]);
        assert_eq!(analysis.neurotoxins, vec!["Acrylamide 2mg"]);

        let mixed = analyse("benzene with mercury traces");
        assert_eq!(mixed.carcinogens.len(), 1);
        assert_eq!(mixed.neurotoxins.len(), 1);
    }

    #[test]
    fn original_text_is_recorded_and_amounts_ignored_for_matching() {
        let analysis = analyse("Sodium Benzoate 0.1%, BHT");
        assert_eq!(
            analysis.concern_for("Sodium Benzoate 0.1%"),
            Some("May form benzene when combined with vitamin C")
        );
        assert_eq!(analysis.concern_for("BHT"), Some("Possible carcinogen"));
        assert_eq!(
            analysis.summary(),
            "Warning: Found 2 concerning additive(s)"
        );
    }

    #[test]
    fn last_matching_additive_sets_the_concern() {
        // Matches "nitrates" then "nitrites" in table order.
        let analysis = analyse("nitrates and nitrites");
        assert_eq!(analysis.concerning_additives.len(), 1);
        assert_eq!(
            analysis.concern_for("nitrates and nitrites"),
            Some("Can form carcinogenic compounds")
        );

        let analysis = analyse("aspartame bha blend");
        assert_eq!(
            analysis.concern_for("aspartame bha blend"),
            Some("Possible carcinogen")
        );
    }

    #[test]
    fn repeated_ingredients_keep_first_position_in_additives() {
        let analysis = analyse("BHA, Carrageenan, BHA");
        let ingredients: Vec<&str> = analysis
            .concerning_additives
            .iter()
            .map(|f| f.ingredient.as_str())
            .collect();
        assert_eq!(ingredients, vec!["BHA", "Carrageenan"]);
    }

    #[test]
    fn substring_containment_reports_false_positives() {
        let analysis = analyse("Leadership blend");
        assert_eq!(analysis.neurotoxins, vec!["Leadership blend"]);
    }

    #[test]
    fn summary_lists_only_non_empty_groups() {
        let analysis = analyse("formaldehyde, lead, carrageenan");
        assert_eq!(
            analysis.summary(),
            "Warning: Found 1 carcinogen(s), 1 neurotoxin(s), 1 concerning additive(s)"
        );
    }

    #[test]
    fn risk_levels_follow_concern_text() {
        assert_eq!(RiskLevel::from_concern("Possible carcinogen"), RiskLevel::High);
        assert_eq!(
            RiskLevel::from_concern("Can form CARCINOGENIC compounds"),
            RiskLevel::High
        );
        assert_eq!(
            RiskLevel::from_concern("Potential inflammatory effects"),
            RiskLevel::Medium
        );
        assert_eq!(
            RiskLevel::from_concern("Associated with metabolic disorders"),
            RiskLevel::Low
        );

        let analysis = analyse("Carrageenan, Titanium Dioxide");
        let risks: Vec<RiskLevel> = analysis.additive_risks().into_iter().map(|(_, r)| r).collect();
        assert_eq!(risks, vec![RiskLevel::Medium, RiskLevel::High]);
    }
}
