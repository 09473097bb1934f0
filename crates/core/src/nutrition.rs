//! Macro-nutrient percentage classifier.
//!
//! This is not a nutrition-label parser: callers supply the four values already read from the
//! label.

use crate::error::{LabelError, LabelResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionClass {
    HighProteinLowCarb,
    HighCarb,
    HighFat,
    Balanced,
    Standard,
}

impl NutritionClass {
    pub fn label(self) -> &'static str {
        match self {
            NutritionClass::HighProteinLowCarb => "High Protein, Low Carb",
            NutritionClass::HighCarb => "High Carb",
            NutritionClass::HighFat => "High Fat",
            NutritionClass::Balanced => "Balanced",
            NutritionClass::Standard => "Standard",
        }
    }

    /// First matching rule wins.
    fn classify(protein: f64, carbs: f64, fat: f64) -> Self {
        if protein > 30.0 && carbs < 30.0 {
            NutritionClass::HighProteinLowCarb
        } else if carbs > 50.0 {
            NutritionClass::HighCarb
        } else if fat > 35.0 {
            NutritionClass::HighFat
        } else if protein > 20.0 && carbs > 40.0 && fat < 30.0 {
            NutritionClass::Balanced
        } else {
            NutritionClass::Standard
        }
    }
}

impl std::fmt::Display for NutritionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fat_percentage: f64,
    pub classification: NutritionClass,
    pub is_high_protein: bool,
    pub is_low_carb: bool,
    pub is_low_fat: bool,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Split protein, carbs and fat into percentages of their total and classify the product.
///
/// Percentages are all zero when the macro total is zero.
///
/// # Errors
///
/// Returns `LabelError::InvalidInput` if any value is negative, NaN or infinite.
pub fn analyze_nutrition(
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> LabelResult<NutritionAnalysis> {
    for (field, value) in [
        ("calories", calories),
        ("protein", protein),
        ("carbs", carbs),
        ("fat", fat),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(LabelError::InvalidInput(format!(
                "{field} must be a non-negative number"
            )));
        }
    }

    let total = protein + carbs + fat;
    let share = |value: f64| {
        if total > 0.0 {
            value / total * 100.0
        } else {
            0.0
        }
    };
    let protein_percentage = share(protein);
    let carbs_percentage = share(carbs);
    let fat_percentage = share(fat);

    Ok(NutritionAnalysis {
        protein_percentage,
        carbs_percentage,
        fat_percentage,
        classification: NutritionClass::classify(
            protein_percentage,
            carbs_percentage,
            fat_percentage,
        ),
        is_high_protein: protein_percentage > 30.0,
        is_low_carb: carbs_percentage < 30.0,
        is_low_fat: fat_percentage < 20.0,
        calories,
        protein,
        carbs,
        fat,
    })
}
