//! Label service: the full pipeline from raw label text to a report.
//!
//! Holds the taxonomy chosen at startup. Every operation is synchronous and CPU-only, so callers
//! on an async runtime can invoke it directly from a handler.

use crate::analysis::{analyze_ingredients, IngredientAnalysis};
use crate::conditions::{self, HealthAnalysisResult};
use crate::harmful::{analyze_harmful_ingredients, NeurotoxinAnalysis};
use crate::matcher::{find_matches, highlight_text, AnnotatedText, HighlightedMatch};
use crate::profiles::HealthProfile;
use crate::taxonomy::Taxonomy;
use crate::tokenizer::{
    condition_words, extract_ingredients_section, parse_ingredient_list, IngredientCandidate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything derived from one label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelReport {
    /// Text after the ingredients trigger, or `None` when the label has no trigger and the
    /// whole text was analysed.
    pub section: Option<String>,
    pub ingredients: Vec<IngredientCandidate>,
    pub analysis: IngredientAnalysis,
    /// Highlights over the full label text.
    pub highlights: AnnotatedText,
    pub harmful: NeurotoxinAnalysis,
}

/// A label report, plus the health cross-reference when a profile was supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub label: LabelReport,
    pub health: Option<Vec<HealthAnalysisResult>>,
}

#[derive(Clone, Debug)]
pub struct LabelService {
    taxonomy: Arc<Taxonomy>,
}

impl LabelService {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Service over the bundled taxonomy.
    pub fn bundled() -> Self {
        Self::new(Taxonomy::shared())
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Parse the ingredients section (or the whole text) into candidates.
    pub fn ingredients(&self, text: &str) -> Vec<IngredientCandidate> {
        let section = extract_ingredients_section(text);
        parse_ingredient_list(section.as_deref().unwrap_or(text))
    }

    pub fn matches(&self, text: &str) -> Vec<HighlightedMatch> {
        find_matches(&self.taxonomy, text)
    }

    pub fn highlight(&self, text: &str) -> AnnotatedText {
        highlight_text(text, &self.matches(text))
    }

    pub fn analyze_label(&self, text: &str) -> LabelReport {
        let section = extract_ingredients_section(text);
        let ingredients = parse_ingredient_list(section.as_deref().unwrap_or(text));
        let analysis = analyze_ingredients(&self.taxonomy, &ingredients);

        tracing::debug!(
            ingredients = ingredients.len(),
            has_section = section.is_some(),
            "label analysed"
        );

        LabelReport {
            section,
            analysis,
            highlights: self.highlight(text),
            harmful: analyze_harmful_ingredients(text),
            ingredients,
        }
    }

    /// Cross-reference the label's ingredient words against the profile's conditions.
    pub fn cross_reference_profile(
        &self,
        profile: &HealthProfile,
        text: &str,
    ) -> Vec<HealthAnalysisResult> {
        let conditions = conditions::for_profile(&profile.conditions);
        conditions::cross_reference(&conditions, &condition_words(text))
    }

    /// Analyse a label and, when a profile is given, cross-reference it.
    pub fn scan(&self, text: &str, profile: Option<&HealthProfile>) -> ScanReport {
        ScanReport {
            label: self.analyze_label(text),
            health: profile.map(|p| self.cross_reference_profile(p, text)),
        }
    }
}

impl Default for LabelService {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::SubstanceCategory;

    const LABEL: &str = "Choco Bar. Ingredients: Sugar 50g, Peanut butter, Aspartame, Red 40.";

    #[test]
    fn analyze_label_uses_the_ingredients_section() {
        let report = LabelService::bundled().analyze_label(LABEL);

        assert_eq!(
            report.section.as_deref(),
            Some("Sugar 50g, Peanut butter, Aspartame, Red 40.")
        );
        let names: Vec<&str> = report
            .ingredients
            .iter()
            .map(|c| c.normalized_name.as_str())
            .collect();
        assert_eq!(names, vec!["Sugar", "Peanut butter", "Aspartame", "Red 40"]);
        assert!(report.analysis.neurotoxins.is_empty());
        assert!(report.analysis.concern_for("Aspartame").is_some());
        assert_eq!(report.harmful.found, vec!["Aspartame", "Red 40"]);
        assert_eq!(report.highlights.plain_text(), LABEL);
    }

    #[test]
    fn bundled_services_share_one_taxonomy() {
        let first = LabelService::bundled();
        let second = LabelService::default();
        assert!(std::ptr::eq(first.taxonomy(), second.taxonomy()));
        assert!(std::ptr::eq(first.taxonomy(), Taxonomy::bundled()));
    }

    #[test]
    fn decimal_amounts_split_into_separate_ingredients() {
        let report = LabelService::bundled().analyze_label("Ingredients: Sugar 2.5g, Salt");
        let names: Vec<&str> = report
            .ingredients
            .iter()
            .map(|c| c.normalized_name.as_str())
            .collect();
        assert_eq!(names, vec!["Sugar 2", "", "Salt"]);
        assert_eq!(report.ingredients[1].original_text, "5g");
    }

    #[test]
    fn highlights_cover_text_before_the_trigger() {
        let service = LabelService::bundled();
        let text = "Flavoured with MSG. Ingredients: water";
        let report = service.analyze_label(text);

        assert_eq!(report.section.as_deref(), Some("water"));
        let highlighted: Vec<(&str, Option<SubstanceCategory>)> = report
            .highlights
            .highlighted()
            .map(|s| (s.text.as_str(), s.category))
            .collect();
        assert!(highlighted
            .iter()
            .any(|(text, category)| *text == "MSG"
                && *category == Some(SubstanceCategory::ConcerningAdditive)));
    }

    #[test]
    fn label_without_trigger_falls_back_to_full_text() {
        let report = LabelService::bundled().analyze_label("water, salt");
        assert!(report.section.is_none());
        assert_eq!(report.ingredients.len(), 2);
        assert!(!report.analysis.has_harmful_substances());
        assert!(report.harmful.is_clean());
    }

    #[test]
    fn empty_label_gives_empty_report() {
        let report = LabelService::bundled().analyze_label("");
        assert!(report.ingredients.is_empty());
        assert!(report.highlights.spans.is_empty());
        assert!(report.harmful.is_clean());
    }

    #[test]
    fn scan_without_profile_skips_health() {
        let report = LabelService::bundled().scan(LABEL, None);
        assert!(report.health.is_none());
    }

    #[test]
    fn scan_with_profile_cross_references_conditions() {
        let profile = HealthProfile::new(
            "Ada",
            30,
            vec!["Peanut Allergy".into(), "Diabetes".into(), "Pregnancy".into()],
        )
        .unwrap();

        let health = LabelService::bundled()
            .scan(LABEL, Some(&profile))
            .health
            .unwrap();

        let summary: Vec<(&str, Vec<&str>)> = health
            .iter()
            .map(|r| {
                (
                    r.condition.name.as_str(),
                    r.concerns.iter().map(String::as_str).collect(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![("Peanut Allergy", vec!["Peanut"]), ("Diabetes", vec!["Sugar"])]
        );
    }
}
