//! # CleanLabel Core
//!
//! Food-label analysis engine.
//!
//! This crate contains the pure analysis pipeline and profile storage:
//! - Ingredient tokenizing and quantity parsing ([`tokenizer`])
//! - Positional substance matching and highlight spans ([`matcher`])
//! - Ingredient analysis against the substance taxonomy ([`analysis`], [`harmful`])
//! - Health-condition cross-referencing ([`conditions`])
//! - Health profiles with in-memory and JSON file stores ([`profiles`])
//!
//! **No API concerns**: HTTP servers and command-line handling belong in `api-rest` and `cli`.

pub mod analysis;
pub mod conditions;
pub mod config;
pub mod constants;
pub mod error;
pub mod harmful;
pub mod label;
pub mod matcher;
pub mod nutrition;
pub mod profiles;
pub mod reference;
pub mod taxonomy;
pub mod tokenizer;

pub use analysis::{analyze_ingredients, AdditiveFinding, IngredientAnalysis, RiskLevel};
pub use cleanlabel_types::NonEmptyText;
pub use conditions::{
    cross_reference, ConditionCategory, HealthAnalysisResult, HealthCondition,
};
pub use config::CoreConfig;
pub use error::{LabelError, LabelResult};
pub use harmful::{analyze_harmful_ingredients, HarmfulGroup, NeurotoxinAnalysis};
pub use label::{LabelReport, LabelService, ScanReport};
pub use matcher::{find_matches, highlight_text, AnnotatedText, HighlightedMatch, Span};
pub use nutrition::{analyze_nutrition, NutritionAnalysis, NutritionClass};
pub use profiles::{
    parse_age, HealthProfile, InMemoryProfileStore, JsonProfileStore, ProfileId, ProfileStore,
};
pub use reference::{neurotoxin_info, NeurotoxinInfo};
pub use taxonomy::{AdditiveConcern, SubstanceCategory, SubstanceEntry, Taxonomy};
pub use tokenizer::{
    extract_ingredients_section, parse_ingredient, parse_ingredient_list, Amount,
    IngredientCandidate,
};
