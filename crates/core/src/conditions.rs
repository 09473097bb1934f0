//! Health-condition catalog and ingredient cross-referencing.
//!
//! The catalog is a fixed list of conditions a profile can select. Each allergy, dietary and
//! chronic condition with a known trigger has a keyword rule; an ingredient word that contains
//! any keyword (ignoring case) is a concern for that condition.

use serde::{Deserialize, Serialize};

/// Grouping of health conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Allergy,
    Dietary,
    Chronic,
    Other,
}

impl ConditionCategory {
    pub const ALL: [ConditionCategory; 4] = [
        ConditionCategory::Allergy,
        ConditionCategory::Dietary,
        ConditionCategory::Chronic,
        ConditionCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionCategory::Allergy => "allergy",
            ConditionCategory::Dietary => "dietary",
            ConditionCategory::Chronic => "chronic",
            ConditionCategory::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConditionCategory::Allergy => "Allergies",
            ConditionCategory::Dietary => "Dietary",
            ConditionCategory::Chronic => "Chronic",
            ConditionCategory::Other => "Other",
        }
    }
}

impl std::str::FromStr for ConditionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConditionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted || c.display_name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown condition category '{s}'"))
    }
}

/// A selectable health condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCondition {
    pub id: String,
    pub name: String,
    pub category: ConditionCategory,
}

impl HealthCondition {
    /// Keywords that make an ingredient a concern for this condition, if a rule exists.
    pub fn keywords(&self) -> Option<&'static [&'static str]> {
        condition_keywords(self.category, &self.name)
    }
}

/// Result of cross-referencing one condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAnalysisResult {
    pub condition: HealthCondition,
    /// Matching ingredient words, deduplicated, in first-seen order.
    pub concerns: Vec<String>,
}

const CATALOG: &[(&str, &str, ConditionCategory)] = &[
    ("peanut_allergy", "Peanut Allergy", ConditionCategory::Allergy),
    ("tree_nut_allergy", "Tree Nut Allergy", ConditionCategory::Allergy),
    ("milk_allergy", "Milk Allergy", ConditionCategory::Allergy),
    ("egg_allergy", "Egg Allergy", ConditionCategory::Allergy),
    ("soy_allergy", "Soy Allergy", ConditionCategory::Allergy),
    ("wheat_allergy", "Wheat Allergy", ConditionCategory::Allergy),
    ("fish_allergy", "Fish Allergy", ConditionCategory::Allergy),
    ("shellfish_allergy", "Shellfish Allergy", ConditionCategory::Allergy),
    ("sesame_allergy", "Sesame Allergy", ConditionCategory::Allergy),
    ("vegetarian", "Vegetarian", ConditionCategory::Dietary),
    ("vegan", "Vegan", ConditionCategory::Dietary),
    ("gluten_free", "Gluten-Free", ConditionCategory::Dietary),
    ("dairy_free", "Dairy-Free", ConditionCategory::Dietary),
    ("kosher", "Kosher", ConditionCategory::Dietary),
    ("halal", "Halal", ConditionCategory::Dietary),
    ("diabetes", "Diabetes", ConditionCategory::Chronic),
    ("celiac", "Celiac Disease", ConditionCategory::Chronic),
    ("lactose_intolerance", "Lactose Intolerance", ConditionCategory::Chronic),
    ("high_blood_pressure", "High Blood Pressure", ConditionCategory::Chronic),
    ("high_cholesterol", "High Cholesterol", ConditionCategory::Chronic),
    ("asthma", "Asthma", ConditionCategory::Chronic),
    ("migraines", "Migraines", ConditionCategory::Chronic),
    ("osteoporosis", "Osteoporosis", ConditionCategory::Chronic),
    ("acid_reflux", "Acid Reflux (GERD)", ConditionCategory::Chronic),
    ("ibs", "Irritable Bowel Syndrome (IBS)", ConditionCategory::Chronic),
    ("heart_disease", "Heart Disease", ConditionCategory::Chronic),
    ("kidney_disease", "Kidney Disease", ConditionCategory::Chronic),
    ("pregnancy", "Pregnancy", ConditionCategory::Other),
    ("medication", "Medication", ConditionCategory::Other),
];

/// Keyword rule for a condition, dispatched on category and name.
///
/// Conditions in [`ConditionCategory::Other`] and names without a rule return `None`.
pub fn condition_keywords(
    category: ConditionCategory,
    name: &str,
) -> Option<&'static [&'static str]> {
    let keywords: &'static [&'static str] = match (category, name) {
        (ConditionCategory::Allergy, "Peanut Allergy") => &["peanut"],
        (ConditionCategory::Allergy, "Tree Nut Allergy") => &["almond", "walnut", "cashew"],
        (ConditionCategory::Allergy, "Milk Allergy") => &["milk", "whey", "casein"],
        (ConditionCategory::Allergy, "Egg Allergy") => &["egg"],
        (ConditionCategory::Allergy, "Soy Allergy") => &["soy"],
        (ConditionCategory::Allergy, "Wheat Allergy") => &["wheat"],
        (ConditionCategory::Allergy, "Fish Allergy") => &["fish"],
        (ConditionCategory::Allergy, "Shellfish Allergy") => &["shellfish"],
        (ConditionCategory::Allergy, "Sesame Allergy") => &["sesame"],
        (ConditionCategory::Dietary, "Vegetarian") => &["meat", "fish", "chicken"],
        (ConditionCategory::Dietary, "Vegan") => &["milk", "egg", "honey"],
        (ConditionCategory::Dietary, "Gluten-Free") => &["wheat", "barley", "rye"],
        (ConditionCategory::Dietary, "Dairy-Free") => &["milk", "cheese", "yogurt"],
        (ConditionCategory::Chronic, "Diabetes") => &["sugar", "glucose", "fructose"],
        (ConditionCategory::Chronic, "High Blood Pressure") => &["sodium", "salt"],
        (ConditionCategory::Chronic, "High Cholesterol") => &["cholesterol", "saturated fat"],
        (ConditionCategory::Chronic, "Heart Disease") => &["trans fat", "hydrogenated"],
        _ => return None,
    };
    Some(keywords)
}

/// The full condition catalog, in display order.
pub fn catalog() -> Vec<HealthCondition> {
    CATALOG.iter().map(to_condition).collect()
}

fn to_condition(&(id, name, category): &(&str, &str, ConditionCategory)) -> HealthCondition {
    HealthCondition {
        id: id.to_owned(),
        name: name.to_owned(),
        category,
    }
}

/// Look up a condition by its exact display name.
pub fn find_by_name(name: &str) -> Option<HealthCondition> {
    CATALOG.iter().find(|(_, n, _)| *n == name).map(to_condition)
}

pub fn find_by_id(id: &str) -> Option<HealthCondition> {
    CATALOG.iter().find(|(i, _, _)| *i == id).map(to_condition)
}

pub fn by_category(category: ConditionCategory) -> Vec<HealthCondition> {
    CATALOG
        .iter()
        .filter(|(_, _, c)| *c == category)
        .map(to_condition)
        .collect()
}

/// Conditions whose name or category identifier contains `query`, ignoring case.
pub fn search(query: &str) -> Vec<HealthCondition> {
    let query = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|(_, name, category)| {
            name.to_lowercase().contains(&query) || category.as_str().contains(&query)
        })
        .map(to_condition)
        .collect()
}

/// Optional search followed by an optional category filter; both absent gives the catalog.
pub fn find(query: Option<&str>, category: Option<ConditionCategory>) -> Vec<HealthCondition> {
    let found = match query {
        Some(q) => search(q),
        None => catalog(),
    };
    found
        .into_iter()
        .filter(|c| category.map_or(true, |wanted| c.category == wanted))
        .collect()
}

/// Resolve the condition names stored on a profile. Unknown names are dropped.
pub fn for_profile<S: AsRef<str>>(names: &[S]) -> Vec<HealthCondition> {
    names
        .iter()
        .filter_map(|name| find_by_name(name.as_ref()))
        .collect()
}

/// Cross-reference ingredient words against each condition's keyword rule.
///
/// Conditions without a rule, and conditions with no matching word, are omitted.
pub fn cross_reference<S: AsRef<str>>(
    conditions: &[HealthCondition],
    words: &[S],
) -> Vec<HealthAnalysisResult> {
    let lowered: Vec<(String, &str)> = words
        .iter()
        .map(|w| (w.as_ref().to_lowercase(), w.as_ref()))
        .collect();

    conditions
        .iter()
        .filter_map(|condition| {
            let keywords = condition.keywords()?;
            let mut concerns: Vec<String> = Vec::new();
            for (lower, original) in &lowered {
                if keywords.iter().any(|k| lower.contains(k))
                    && !concerns.iter().any(|c| c == original)
                {
                    concerns.push((*original).to_owned());
                }
            }
            if concerns.is_empty() {
                return None;
            }
            Some(HealthAnalysisResult {
                condition: condition.clone(),
                concerns,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(name: &str) -> HealthCondition {
        find_by_name(name).expect("condition should be in catalog")
    }

    #[test]
    fn catalog_has_expected_shape() {
        let all = catalog();
        assert_eq!(all.len(), 29);
        assert_eq!(by_category(ConditionCategory::Allergy).len(), 9);
        assert_eq!(by_category(ConditionCategory::Dietary).len(), 6);
        assert_eq!(by_category(ConditionCategory::Chronic).len(), 12);
        assert_eq!(by_category(ConditionCategory::Other).len(), 2);
        assert_eq!(find_by_id("ibs").unwrap().name, "Irritable Bowel Syndrome (IBS)");
    }

    #[test]
    fn peanut_allergy_concerns_are_deduplicated() {
        let results = cross_reference(
            &[condition("Peanut Allergy")],
            &["peanut", "butter", "peanut"],
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].concerns, vec!["peanut"]);
    }

    #[test]
    fn matching_is_case_insensitive_containment() {
        let results = cross_reference(
            &[condition("Diabetes"), condition("Milk Allergy")],
            &["Cane", "SUGAR", "Glucose-syrup", "Buttermilk", "Whey"],
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].condition.id, "diabetes");
        assert_eq!(results[0].concerns, vec!["SUGAR", "Glucose-syrup"]);
        assert_eq!(results[1].concerns, vec!["Buttermilk", "Whey"]);
    }

    #[test]
    fn conditions_without_matches_or_rules_are_omitted() {
        let words = ["eggs", "honey", "oats"];
        let results = cross_reference(
            &[
                condition("Vegan"),
                condition("Pregnancy"),
                condition("Kosher"),
                condition("Soy Allergy"),
            ],
            &words,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].condition.name, "Vegan");
        assert_eq!(results[0].concerns, vec!["eggs", "honey"]);
    }

    #[test]
    fn rule_dispatch_requires_matching_category() {
        assert!(condition_keywords(ConditionCategory::Other, "Peanut Allergy").is_none());
        assert!(condition_keywords(ConditionCategory::Chronic, "Asthma").is_none());
        assert_eq!(
            condition_keywords(ConditionCategory::Dietary, "Gluten-Free"),
            Some(&["wheat", "barley", "rye"][..])
        );
    }

    #[test]
    fn empty_inputs_yield_no_results() {
        let empty: [&str; 0] = [];
        assert!(cross_reference(&catalog(), &empty).is_empty());
        assert!(cross_reference(&[], &["peanut"]).is_empty());
    }

    #[test]
    fn search_matches_name_or_category() {
        let nuts = search("nut");
        let names: Vec<&str> = nuts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Peanut Allergy", "Tree Nut Allergy"]);

        assert_eq!(search("CHRONIC").len(), 12);
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn find_combines_query_and_category() {
        assert_eq!(find(None, None).len(), catalog().len());
        assert_eq!(find(None, Some(ConditionCategory::Other)).len(), 2);

        let names: Vec<String> = find(Some("free"), Some(ConditionCategory::Dietary))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Gluten-Free", "Dairy-Free"]);
        assert!(find(Some("nut"), Some(ConditionCategory::Chronic)).is_empty());
    }

    #[test]
    fn for_profile_skips_unknown_names() {
        let resolved = for_profile(&["Diabetes", "Made Up", "Vegan"]);
        let ids: Vec<&str> = resolved.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["diabetes", "vegan"]);
    }

    #[test]
    fn category_parses_from_identifier_or_display_name() {
        assert_eq!("allergy".parse::<ConditionCategory>(), Ok(ConditionCategory::Allergy));
        assert_eq!("Allergies".parse::<ConditionCategory>(), Ok(ConditionCategory::Allergy));
        assert!("unknown".parse::<ConditionCategory>().is_err());
    }
}
