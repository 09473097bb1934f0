//! Constants used throughout the CleanLabel core crate.
//!
//! This module contains trigger phrases, unit lists, and default paths so that the tokenizer,
//! the binaries, and the tests agree on the same values.

/// Default directory for health profile storage when no explicit directory is configured.
pub const DEFAULT_PROFILE_DATA_DIR: &str = "profile_data";

/// File extension for stored health profiles.
pub const PROFILE_FILE_EXTENSION: &str = "json";

/// Phrases that introduce the ingredient block on a product label.
///
/// Matched case-insensitively against the label text.
pub const INGREDIENT_TRIGGERS: &[&str] = &["ingredients:", "contains:", "contains of:", "made with:"];

/// Units recognised after a quantity, in the order they are tried.
pub const AMOUNT_UNITS: &[&str] = &["g", "mg", "kg", "ml", "l", "oz", "%", "mcg"];

/// Ingredient words shorter than or equal to this many characters are ignored when
/// cross-referencing health conditions.
pub const MIN_CONDITION_WORD_CHARS: usize = 2;

/// Oldest age accepted for a health profile.
pub const MAX_PROFILE_AGE: u32 = 150;
