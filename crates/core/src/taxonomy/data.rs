//! Bundled substance tables.
//!
//! Compiled from public listings by the National Toxicology Program (NTP), the International
//! Agency for Research on Cancer (IARC), the Environmental Protection Agency (EPA), the Agency for
//! Toxic Substances and Disease Registry (ATSDR) and the FDA food additive listings.

use super::SubstanceCategory;

/// Highlight markers, grouped by category. Group order is the scan order used by the matcher.
pub(crate) const MARKERS: &[(SubstanceCategory, &[&str])] = &[
    (
        SubstanceCategory::Carcinogen,
        &[
            "formaldehyde",
            "benzene",
            "asbestos",
            "arsenic",
            "cadmium",
            "chromium",
            "vinyl chloride",
            "ethylene oxide",
            "nickel compounds",
            "benzo[a]pyrene",
            "acrylamide",
        ],
    ),
    (
        SubstanceCategory::Neurotoxin,
        &[
            "lead",
            "mercury",
            "manganese",
            "aluminum",
            "toluene",
            "organophosphates",
            "ethanol",
            "methanol",
            "n-hexane",
            "tetrachloroethylene",
            "methylmercury",
        ],
    ),
    (
        SubstanceCategory::ArtificialSweetener,
        &["aspartame", "sucralose", "saccharin", "acesulfame", "neotame"],
    ),
    (
        SubstanceCategory::Preservative,
        &[
            "bha",
            "bht",
            "tbhq",
            "sodium benzoate",
            "potassium sorbate",
            "sodium nitrite",
            "sodium nitrate",
        ],
    ),
    (
        SubstanceCategory::ConcerningAdditive,
        &[
            "msg",
            "monosodium glutamate",
            "carrageenan",
            "red 40",
            "yellow 5",
            "yellow 6",
            "blue 1",
            "blue 2",
            "titanium dioxide",
        ],
    ),
];

pub(crate) const CARCINOGENS: &[&str] = &[
    "formaldehyde",
    "benzene",
    "asbestos",
    "arsenic",
    "cadmium",
    "chromium",
    "vinyl chloride",
    "ethylene oxide",
    "nickel compounds",
    "polycyclic aromatic hydrocarbons",
    "acrylamide",
    "benzo[a]pyrene",
];

pub(crate) const NEUROTOXINS: &[&str] = &[
    "lead",
    "mercury",
    "manganese",
    "aluminum",
    "toluene",
    "organophosphates",
    "ethanol",
    "methanol",
    "n-hexane",
    "tetrachloroethylene",
    "methylmercury",
    "acrylamide",
];

/// Additive name and the concern reported when it is found.
pub(crate) const CONCERNING_ADDITIVES: &[(&str, &str)] = &[
    (
        "artificial colors",
        "Potential behavioral effects and hyperactivity",
    ),
    (
        "aspartame",
        "Controversial artificial sweetener with mixed evidence on safety",
    ),
    ("bha", "Possible carcinogen"),
    ("bht", "Possible carcinogen"),
    ("carrageenan", "Potential inflammatory effects"),
    (
        "high fructose corn syrup",
        "Associated with metabolic disorders",
    ),
    (
        "monosodium glutamate",
        "May cause adverse reactions in sensitive individuals",
    ),
    ("nitrates", "Can form carcinogenic compounds"),
    ("nitrites", "Can form carcinogenic compounds"),
    ("potassium bromate", "Possible carcinogen"),
    (
        "sodium benzoate",
        "May form benzene when combined with vitamin C",
    ),
    ("titanium dioxide", "Possible carcinogen"),
];

/// Flat harmful-ingredient list scanned against raw label text, in report order.
pub(crate) const HARMFUL_INGREDIENTS: &[&str] = &[
    "MSG",
    "Aspartame",
    "Monosodium Glutamate",
    "Red 40",
    "Red 3",
    "Red 2",
    "Red 1",
    "Yellow 5",
    "Yellow 6",
    "Yellow 1",
    "Yellow 2",
    "Blue 1",
    "Blue 2",
    "Green 3",
    "Citrus Red 2",
    "Orange B",
    "Brilliant Black BN",
    "Brown HT",
    "Tartrazine",
    "Allura Red",
    "Brilliant Blue FCF",
    "Erythrosine",
    "Fast Green FCF",
    "Indigotine",
    "Sunset Yellow FCF",
    "Artificial Colors",
    "BHA",
    "BHT",
    "TBHQ",
    "Sodium Benzoate",
    "Potassium Benzoate",
    "Sodium Nitrite",
    "Sodium Nitrate",
    "Potassium Bromate",
    "Propylene Glycol",
    "Carrageenan",
    "High Fructose Corn Syrup",
];

pub(crate) const HARMFUL_NEUROTOXINS: &[&str] = &["MSG", "Aspartame", "Monosodium Glutamate"];

pub(crate) const DYE_COLOUR_WORDS: &[&str] =
    &["red", "yellow", "blue", "green", "orange", "brown", "black"];

pub(crate) const NAMED_DYES: &[&str] = &[
    "Tartrazine",
    "Allura Red",
    "Brilliant Blue FCF",
    "Erythrosine",
    "Fast Green FCF",
    "Indigotine",
    "Sunset Yellow FCF",
    "Artificial Colors",
];

pub(crate) const HARMFUL_PRESERVATIVES: &[&str] = &[
    "BHA",
    "BHT",
    "TBHQ",
    "Sodium Benzoate",
    "Potassium Benzoate",
    "Sodium Nitrite",
    "Sodium Nitrate",
    "Potassium Bromate",
    "Propylene Glycol",
];

pub(crate) const HARMFUL_OTHER_ADDITIVES: &[&str] = &["Carrageenan", "High Fructose Corn Syrup"];
