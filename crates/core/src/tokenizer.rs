//! Ingredient tokenizer.
//!
//! Turns raw label text (usually OCR output) into ingredient candidates:
//!
//! - locating the ingredient block behind a trigger phrase such as `Ingredients:`
//! - splitting the block into candidate segments
//! - pulling an optional quantity (`50g`, `5 mg`, `10%`) out of each segment
//!
//! Every function here is total: text that does not look like an ingredient list simply yields
//! fewer (or no) candidates.

use crate::constants::{INGREDIENT_TRIGGERS, MIN_CONDITION_WORD_CHARS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Number, optional decimal fraction, optional whitespace, then a unit.
///
/// Unit alternatives are tried in the order of [`crate::constants::AMOUNT_UNITS`].
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(g|mg|kg|ml|l|oz|%|mcg)")
        .expect("amount pattern is a valid regex")
});

/// A quantity found in an ingredient segment.
///
/// Displays as the number and unit exactly as written, without the whitespace between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// The number as written on the label, e.g. `1.50` or `050`.
    pub quantity: String,
    pub value: f64,
    /// Unit as written on the label.
    pub unit: String,
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.quantity, self.unit)
    }
}

/// A tokenized, not-yet-classified ingredient segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientCandidate {
    /// The segment exactly as it was passed to [`parse_ingredient`].
    pub original_text: String,
    /// The segment with its quantity removed, trimmed.
    pub normalized_name: String,
    pub amount: Option<Amount>,
}

/// Byte range of the earliest trigger phrase at or after `from`.
///
/// `lower` must be an ASCII-lowercased copy of the text so offsets line up with the original.
fn find_trigger(lower: &str, from: usize) -> Option<(usize, usize)> {
    let haystack = lower.get(from..)?;
    INGREDIENT_TRIGGERS
        .iter()
        .filter_map(|trigger| {
            haystack
                .find(trigger)
                .map(|idx| (from + idx, from + idx + trigger.len()))
        })
        .min_by_key(|(start, _)| *start)
}

/// Locate the ingredient block of a label.
///
/// Searches case-insensitively for the first occurrence of any phrase in
/// [`INGREDIENT_TRIGGERS`] and returns the trimmed text that follows it. Returns `None` when no
/// trigger is present; callers should then analyse the full text.
pub fn extract_ingredients_section(text: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    let (_, end) = find_trigger(&lower, 0)?;
    Some(text[end..].trim().to_owned())
}

/// Split label text into ingredient segments on every `,`, `;` and `.`.
///
/// Decimal points split too, so `2.5g` becomes `2` and `5g`. Segments are trimmed and empty
/// segments are dropped; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split([',', ';', '.'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split text on whitespace, for searching a whole label word by word.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Words used for health-condition cross-referencing.
///
/// Takes the text between the first trigger phrase and the next one (or the whole text when
/// there is no trigger), splits it on whitespace, and drops words of at most
/// [`MIN_CONDITION_WORD_CHARS`] characters and words containing a digit, so quantities and units
/// are never treated as ingredients.
pub fn condition_words(text: &str) -> Vec<String> {
    let lower = text.to_ascii_lowercase();
    let section = match find_trigger(&lower, 0) {
        Some((_, end)) => {
            let stop = find_trigger(&lower, end).map_or(text.len(), |(next, _)| next);
            &text[end..stop]
        }
        None => text,
    };

    tokenize_words(section)
        .into_iter()
        .filter(|word| word.chars().count() > MIN_CONDITION_WORD_CHARS)
        .filter(|word| !word.chars().any(|c| c.is_ascii_digit()))
        .collect()
}

/// Parse one ingredient segment, separating an optional quantity from the name.
///
/// The first quantity in the text is taken as the amount; every occurrence of that matched
/// substring is removed from the name.
pub fn parse_ingredient(text: &str) -> IngredientCandidate {
    let found = AMOUNT_PATTERN.captures(text).and_then(|caps| {
        let whole = caps.get(0)?.as_str();
        let quantity = caps.get(1)?.as_str();
        let value = quantity.parse::<f64>().ok()?;
        let unit = caps.get(2)?.as_str().to_owned();
        Some((
            whole,
            Amount {
                quantity: quantity.to_owned(),
                value,
                unit,
            },
        ))
    });

    match found {
        Some((whole, amount)) => IngredientCandidate {
            original_text: text.to_owned(),
            normalized_name: text.replace(whole, "").trim().to_owned(),
            amount: Some(amount),
        },
        None => IngredientCandidate {
            original_text: text.to_owned(),
            normalized_name: text.trim().to_owned(),
            amount: None,
        },
    }
}

/// Tokenize label text and parse every segment.
pub fn parse_ingredient_list(text: &str) -> Vec<IngredientCandidate> {
    tokenize(text)
        .iter()
        .map(|segment| parse_ingredient(segment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_section_strips_trigger_and_trims() {
        assert_eq!(
            extract_ingredients_section("Ingredients: Water, Salt.").as_deref(),
            Some("Water, Salt.")
        );
    }

    #[test]
    fn extract_section_uses_earliest_trigger_case_insensitively() {
        let text = "Nutrition facts MADE WITH: oats, honey. Contains: milk";
        assert_eq!(
            extract_ingredients_section(text).as_deref(),
            Some("oats, honey. Contains: milk")
        );
        assert_eq!(
            extract_ingredients_section("Contains of: nuts").as_deref(),
            Some("nuts")
        );
    }

    #[test]
    fn extract_section_absent_without_trigger() {
        assert_eq!(extract_ingredients_section("Water, Salt"), None);
        assert_eq!(extract_ingredients_section(""), None);
    }

    #[test]
    fn tokenize_splits_on_delimiters_and_drops_empties() {
        assert_eq!(
            tokenize(" Water ,Salt;; Sugar. Yeast ,"),
            vec!["Water", "Salt", "Sugar", "Yeast"]
        );
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,;. ").is_empty());
    }

    #[test]
    fn tokenize_splits_on_every_period() {
        assert_eq!(tokenize("Sugar 2.5g, Salt"), vec!["Sugar 2", "5g", "Salt"]);
        assert_eq!(tokenize("Vitamin C. 5mg"), vec!["Vitamin C", "5mg"]);
    }

    #[test]
    fn tokenize_keeps_duplicates() {
        assert_eq!(tokenize("salt, salt"), vec!["salt", "salt"]);
    }

    #[test]
    fn tokenize_is_stable_on_clean_input() {
        let text = "Ingredients list: Water, Sugar 2.5g; Salt. Red 40, Sugar";
        let first = tokenize(text);
        let second = tokenize(&first.join(", "));
        assert_eq!(first, second);
    }

    #[test]
    fn tokenize_words_splits_on_any_whitespace() {
        assert_eq!(tokenize_words("a  b\tc\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn condition_words_filters_short_and_numeric_words() {
        assert_eq!(
            condition_words("Ingredients: peanut oil, 50g of sugar 2x salt"),
            vec!["peanut", "oil,", "sugar", "salt"]
        );
    }

    #[test]
    fn condition_words_stops_at_next_trigger() {
        assert_eq!(
            condition_words("Brand Ingredients: wheat flour Contains: milk"),
            vec!["wheat", "flour"]
        );
        assert_eq!(condition_words("whey protein"), vec!["whey", "protein"]);
    }

    #[test]
    fn parse_ingredient_extracts_amount() {
        let candidate = parse_ingredient("Sugar 50g");
        assert_eq!(candidate.normalized_name, "Sugar");
        assert_eq!(candidate.original_text, "Sugar 50g");
        let amount = candidate.amount.expect("amount should be found");
        assert_eq!(amount.to_string(), "50g");
        assert_eq!(amount.value, 50.0);
        assert_eq!(amount.unit, "g");
    }

    #[test]
    fn parse_ingredient_without_amount() {
        let candidate = parse_ingredient("  Salt ");
        assert_eq!(candidate.normalized_name, "Salt");
        assert_eq!(candidate.original_text, "  Salt ");
        assert!(candidate.amount.is_none());
    }

    #[test]
    fn parse_ingredient_handles_spacing_decimals_and_units() {
        let candidate = parse_ingredient("Caffeine 1.5 MG per serving");
        assert_eq!(candidate.normalized_name, "Caffeine  per serving");
        let amount = candidate.amount.unwrap();
        assert_eq!(amount.value, 1.5);
        assert_eq!(amount.unit, "MG");

        let percent = parse_ingredient("Cocoa 70%");
        assert_eq!(percent.amount.unwrap().to_string(), "70%");

        let micro = parse_ingredient("Vitamin D 10mcg");
        assert_eq!(micro.amount.unwrap().unit, "mcg");
    }

    #[test]
    fn parse_ingredient_list_parses_each_segment() {
        let list = parse_ingredient_list("Water, Sugar 10g; Salt 0.5g");
        let names: Vec<&str> = list.iter().map(|c| c.normalized_name.as_str()).collect();
        assert_eq!(names, vec!["Water", "Sugar", "Salt 0", ""]);
        assert!(list[2].amount.is_none());
        assert_eq!(list[3].amount.as_ref().unwrap().to_string(), "5g");
    }

    #[test]
    fn amount_renders_the_number_as_written() {
        let salt = parse_ingredient("Salt 1.50g").amount.unwrap();
        assert_eq!(salt.to_string(), "1.50g");
        assert_eq!(salt.quantity, "1.50");
        assert_eq!(salt.value, 1.5);

        let sugar = parse_ingredient("Sugar 050 G").amount.unwrap();
        assert_eq!(sugar.to_string(), "050G");
        assert_eq!(sugar.value, 50.0);
    }
}
