use cleanlabel_core::{
    AdditiveFinding, AnnotatedText, HealthAnalysisResult, HealthCondition, HealthProfile,
    HighlightedMatch, IngredientAnalysis, IngredientCandidate, LabelReport, NeurotoxinAnalysis,
    NeurotoxinInfo, NutritionAnalysis, RiskLevel, ScanReport, Span,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw label text, as read from a package.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LabelTextReq {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub original_text: String,
    pub normalized_name: String,
    /// Quantity such as `50g`, when the segment carried one.
    pub amount: Option<String>,
}

impl From<&IngredientCandidate> for Ingredient {
    fn from(c: &IngredientCandidate) -> Self {
        Self {
            original_text: c.original_text.clone(),
            normalized_name: c.normalized_name.clone(),
            amount: c.amount.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientsRes {
    pub section: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdditiveRisk {
    pub ingredient: String,
    pub concern: String,
    /// `low`, `medium` or `high`.
    pub risk: String,
}

impl From<&AdditiveFinding> for AdditiveRisk {
    fn from(f: &AdditiveFinding) -> Self {
        let risk = match RiskLevel::from_concern(&f.concern) {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        Self {
            ingredient: f.ingredient.clone(),
            concern: f.concern.clone(),
            risk: risk.to_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientAnalysisRes {
    pub carcinogens: Vec<String>,
    pub neurotoxins: Vec<String>,
    pub concerning_additives: Vec<AdditiveRisk>,
    pub has_harmful_substances: bool,
    pub summary: String,
}

impl From<&IngredientAnalysis> for IngredientAnalysisRes {
    fn from(a: &IngredientAnalysis) -> Self {
        Self {
            carcinogens: a.carcinogens.clone(),
            neurotoxins: a.neurotoxins.clone(),
            concerning_additives: a.concerning_additives.iter().map(Into::into).collect(),
            has_harmful_substances: a.has_harmful_substances(),
            summary: a.summary(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Match {
    pub term: String,
    /// Byte offset into the submitted text.
    pub start: usize,
    pub end: usize,
    pub category: String,
}

impl From<&HighlightedMatch> for Match {
    fn from(m: &HighlightedMatch) -> Self {
        Self {
            term: m.term.clone(),
            start: m.start,
            end: m.end,
            category: m.category.as_str().to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextSpan {
    pub text: String,
    /// Substance category for highlighted spans; absent for plain text.
    pub category: Option<String>,
}

impl From<&Span> for TextSpan {
    fn from(s: &Span) -> Self {
        Self {
            text: s.text.clone(),
            category: s.category.map(|c| c.as_str().to_owned()),
        }
    }
}

fn spans(text: &AnnotatedText) -> Vec<TextSpan> {
    text.spans.iter().map(Into::into).collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HighlightRes {
    pub matches: Vec<Match>,
    /// Spans that concatenate back to the submitted text.
    pub spans: Vec<TextSpan>,
}

impl HighlightRes {
    pub fn new(matches: &[HighlightedMatch], text: &AnnotatedText) -> Self {
        Self {
            matches: matches.iter().map(Into::into).collect(),
            spans: spans(text),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HarmfulRes {
    pub found: Vec<String>,
    pub categories: Vec<String>,
    pub summary: String,
}

impl From<&NeurotoxinAnalysis> for HarmfulRes {
    fn from(a: &NeurotoxinAnalysis) -> Self {
        Self {
            found: a.found.clone(),
            categories: a.categories.clone(),
            summary: a.summary.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeLabelRes {
    pub section: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub analysis: IngredientAnalysisRes,
    pub spans: Vec<TextSpan>,
    pub harmful: HarmfulRes,
}

impl From<&LabelReport> for AnalyzeLabelRes {
    fn from(r: &LabelReport) -> Self {
        Self {
            section: r.section.clone(),
            ingredients: r.ingredients.iter().map(Into::into).collect(),
            analysis: (&r.analysis).into(),
            spans: spans(&r.highlights),
            harmful: (&r.harmful).into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema)]
pub struct NutritionReq {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NutritionRes {
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fat_percentage: f64,
    pub classification: String,
    pub is_high_protein: bool,
    pub is_low_carb: bool,
    pub is_low_fat: bool,
}

impl From<&NutritionAnalysis> for NutritionRes {
    fn from(n: &NutritionAnalysis) -> Self {
        Self {
            protein_percentage: n.protein_percentage,
            carbs_percentage: n.carbs_percentage,
            fat_percentage: n.fat_percentage,
            classification: n.classification.label().to_owned(),
            is_high_protein: n.is_high_protein,
            is_low_carb: n.is_low_carb,
            is_low_fat: n.is_low_fat,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl From<&HealthCondition> for Condition {
    fn from(c: &HealthCondition) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            category: c.category.as_str().to_owned(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListConditionsRes {
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NeurotoxinInfoRes {
    pub name: String,
    pub category: String,
    pub description: String,
    pub severity: String,
    pub effects: Vec<String>,
    pub source_url: String,
}

impl From<NeurotoxinInfo> for NeurotoxinInfoRes {
    fn from(info: NeurotoxinInfo) -> Self {
        Self {
            name: info.name,
            category: info.category,
            description: info.description,
            severity: info.severity,
            effects: info.effects,
            source_url: info.source_url,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub conditions: Vec<String>,
    /// RFC 3339 timestamp of the last change.
    pub updated_at: String,
}

impl From<&HealthProfile> for Profile {
    fn from(p: &HealthProfile) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.to_string(),
            age: p.age,
            conditions: p.conditions.clone(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProfileReq {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// Partial profile update; absent fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileReq {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub conditions: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ListProfilesRes {
    pub profiles: Vec<Profile>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteProfileRes {
    pub deleted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConditionConcern {
    pub condition: Condition,
    pub concerns: Vec<String>,
}

impl From<&HealthAnalysisResult> for ConditionConcern {
    fn from(r: &HealthAnalysisResult) -> Self {
        Self {
            condition: (&r.condition).into(),
            concerns: r.concerns.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ScanRes {
    pub label: AnalyzeLabelRes,
    /// Absent when no profile was used.
    pub health: Option<Vec<ConditionConcern>>,
}

impl From<&ScanReport> for ScanRes {
    fn from(r: &ScanReport) -> Self {
        Self {
            label: (&r.label).into(),
            health: r
                .health
                .as_ref()
                .map(|results| results.iter().map(Into::into).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleanlabel_core::{parse_ingredient, LabelService};

    #[test]
    fn ingredient_amount_is_rendered_as_text() {
        let dto = Ingredient::from(&parse_ingredient("Sugar 50g"));
        assert_eq!(dto.normalized_name, "Sugar");
        assert_eq!(dto.amount.as_deref(), Some("50g"));

        let dto = Ingredient::from(&parse_ingredient("Salt 1.50g"));
        assert_eq!(dto.amount.as_deref(), Some("1.50g"));
    }

    #[test]
    fn additive_risk_uses_concern_text() {
        let dto = AdditiveRisk::from(&AdditiveFinding {
            ingredient: "BHA".into(),
            concern: "Possible carcinogen".into(),
        });
        assert_eq!(dto.risk, "high");
    }

    #[test]
    fn label_report_flattens_categories_to_strings() {
        let report = LabelService::bundled().analyze_label("Ingredients: water, MSG");
        let dto = AnalyzeLabelRes::from(&report);

        let highlighted: Vec<(&str, &str)> = dto
            .spans
            .iter()
            .filter_map(|s| s.category.as_deref().map(|c| (s.text.as_str(), c)))
            .collect();
        assert_eq!(highlighted, vec![("MSG", "concerning_additive")]);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["harmful"]["found"][0], "MSG");
    }

    #[test]
    fn scan_without_profile_has_no_health() {
        let report = LabelService::bundled().scan("salt", None);
        let json = serde_json::to_value(ScanRes::from(&report)).unwrap();
        assert!(json["health"].is_null());
    }
}
