//! Reference details for well-known neurotoxins.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeurotoxinInfo {
    pub name: String,
    pub category: String,
    pub description: String,
    pub severity: String,
    pub effects: Vec<String>,
    pub source_url: String,
}

struct InfoRecord {
    key: &'static str,
    name: &'static str,
    category: &'static str,
    description: &'static str,
    severity: &'static str,
    effects: &'static [&'static str],
    source_url: &'static str,
}

const RECORDS: &[InfoRecord] = &[
    InfoRecord {
        key: "lead",
        name: "Lead",
        category: "Heavy Metals",
        description: "A highly toxic metal that can cause severe neurological damage",
        severity: "High Risk",
        effects: &[
            "Brain development impairment",
            "Cognitive function deterioration",
            "Behavioral problems",
            "Nervous system damage",
        ],
        source_url: "https://www.epa.gov/lead",
    },
    InfoRecord {
        key: "mercury",
        name: "Mercury",
        category: "Heavy Metals",
        description: "Toxic metal that can severely impact the nervous system",
        severity: "High Risk",
        effects: &[
            "Brain damage",
            "Vision and hearing problems",
            "Memory loss",
            "Tremors",
        ],
        source_url: "https://www.epa.gov/mercury",
    },
    InfoRecord {
        key: "aluminum",
        name: "Aluminum",
        category: "Heavy Metals",
        description: "Metal that can accumulate in brain tissue",
        severity: "Medium Risk",
        effects: &[
            "Memory impairment",
            "Learning difficulties",
            "Coordination problems",
        ],
        source_url: "https://www.atsdr.cdc.gov/toxprofiles/tp22.pdf",
    },
    InfoRecord {
        key: "aspartame",
        name: "Aspartame",
        category: "Artificial Sweeteners",
        description: "Controversial artificial sweetener with potential neurological effects",
        severity: "Medium Risk",
        effects: &["Headaches", "Dizziness", "Mood changes", "Memory problems"],
        source_url:
            "https://www.fda.gov/food/food-additives-petitions/aspartame-artificial-sweetener",
    },
    InfoRecord {
        key: "msg",
        name: "Monosodium Glutamate (MSG)",
        category: "Flavor Enhancers",
        description: "Food additive that may affect sensitive individuals",
        severity: "Low Risk",
        effects: &[
            "Headaches",
            "Numbness or tingling",
            "Flushing",
            "Muscle weakness",
        ],
        source_url: "https://www.fda.gov/food/food-additives-petitions/questions-and-answers-monosodium-glutamate-msg",
    },
];

impl From<&InfoRecord> for NeurotoxinInfo {
    fn from(record: &InfoRecord) -> Self {
        Self {
            name: record.name.to_owned(),
            category: record.category.to_owned(),
            description: record.description.to_owned(),
            severity: record.severity.to_owned(),
            effects: record.effects.iter().map(|e| (*e).to_owned()).collect(),
            source_url: record.source_url.to_owned(),
        }
    }
}

/// Look up neurotoxin details by key (`lead`, `mercury`, `aluminum`, `aspartame`, `msg`),
/// ignoring case and surrounding whitespace.
pub fn neurotoxin_info(name: &str) -> Option<NeurotoxinInfo> {
    let key = name.trim().to_ascii_lowercase();
    RECORDS.iter().find(|r| r.key == key).map(NeurotoxinInfo::from)
}
