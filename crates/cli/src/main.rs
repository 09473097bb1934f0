use clap::{Parser, Subcommand};
use cleanlabel_core::{
    analyze_harmful_ingredients, analyze_nutrition, conditions, extract_ingredients_section,
    neurotoxin_info, parse_age, ConditionCategory, CoreConfig, HealthAnalysisResult,
    HealthProfile, IngredientCandidate, LabelReport, LabelService, NeurotoxinInfo, ProfileId,
    ProfileStore,
};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "cleanlabel")]
#[command(about = "Food label analysis CLI")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full label report: ingredients, findings and the harmful-list scan
    Analyze {
        /// Label text file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Scan a label against the harmful-ingredient list
    Harmful { file: Option<PathBuf> },
    /// Show the label with known substances marked
    Highlight { file: Option<PathBuf> },
    /// Parse the ingredient list
    Ingredients { file: Option<PathBuf> },
    /// Classify macro-nutrients (grams)
    Nutrition {
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
    },
    /// List health conditions
    Conditions {
        /// Search names and category identifiers
        #[arg(long, short)]
        query: Option<String>,
        /// allergy, dietary, chronic or other
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Reference details for a neurotoxin (lead, mercury, aluminum, aspartame, msg)
    Neurotoxin { name: String },
    /// Manage health profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Analyse a label and cross-reference it with a health profile
    Scan {
        file: Option<PathBuf>,
        /// Profile id (defaults to the first stored profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Create a profile
    Add {
        name: String,
        age: String,
        /// Condition name from `cleanlabel conditions` (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<String>,
    },
    /// List stored profiles
    List,
    /// Show one profile
    Show { id: String },
    /// Change a profile; omitted options keep their value
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        /// Replaces the whole condition list (repeatable)
        #[arg(long = "condition")]
        conditions: Option<Vec<String>>,
    },
    /// Delete a profile
    Delete { id: String },
}

fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = CoreConfig::from_env_values(
        std::env::var("CLEANLABEL_DATA_DIR").ok(),
        std::env::var("CLEANLABEL_TAXONOMY").ok(),
    )?;
    let json = cli.json;

    match cli.command {
        Some(Commands::Analyze { file }) => {
            let text = read_label(file)?;
            let report = service(&cfg)?.analyze_label(&text);
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Some(Commands::Harmful { file }) => {
            let analysis = analyze_harmful_ingredients(&read_label(file)?);
            if json {
                print_json(&analysis)?;
            } else {
                println!("{}", analysis.summary);
                for name in &analysis.found {
                    println!("  - {name}");
                }
                if !analysis.categories.is_empty() {
                    println!("Categories: {}", analysis.categories.join(", "));
                }
            }
        }
        Some(Commands::Highlight { file }) => {
            let text = read_label(file)?;
            let service = service(&cfg)?;
            if json {
                print_json(&service.matches(&text))?;
            } else {
                let marked: String = service
                    .highlight(&text)
                    .spans
                    .iter()
                    .map(|span| match span.category {
                        Some(category) => format!("[{}: {}]", category.as_str(), span.text),
                        None => span.text.clone(),
                    })
                    .collect();
                println!("{marked}");
            }
        }
        Some(Commands::Ingredients { file }) => {
            let text = read_label(file)?;
            let ingredients = service(&cfg)?.ingredients(&text);
            if json {
                print_json(&ingredients)?;
            } else {
                if extract_ingredients_section(&text).is_none() {
                    println!("No ingredients heading found; parsed the whole text.");
                }
                print_ingredients(&ingredients);
            }
        }
        Some(Commands::Nutrition {
            calories,
            protein,
            carbs,
            fat,
        }) => {
            let analysis = analyze_nutrition(calories, protein, carbs, fat)?;
            if json {
                print_json(&analysis)?;
            } else {
                println!("Classification: {}", analysis.classification);
                println!(
                    "Protein {:.1}%, Carbs {:.1}%, Fat {:.1}%",
                    analysis.protein_percentage,
                    analysis.carbs_percentage,
                    analysis.fat_percentage
                );
            }
        }
        Some(Commands::Conditions { query, category }) => {
            let category = category
                .map(|c| c.parse::<ConditionCategory>())
                .transpose()?;
            let found = conditions::find(query.as_deref(), category);

            if json {
                print_json(&found)?;
            } else if found.is_empty() {
                println!("No conditions found.");
            } else {
                for condition in found {
                    println!(
                        "{} ({}) [{}]",
                        condition.name,
                        condition.id,
                        condition.category.display_name()
                    );
                }
            }
        }
        Some(Commands::Neurotoxin { name }) => {
            let info = neurotoxin_details(&name)?;
            if json {
                print_json(&info)?;
            } else {
                println!("{} ({}, {})", info.name, info.category, info.severity);
                println!("{}", info.description);
                for effect in &info.effects {
                    println!("  - {effect}");
                }
                println!("Source: {}", info.source_url);
            }
        }
        Some(Commands::Profile { command }) => run_profile(&cfg, command, json)?,
        Some(Commands::Scan { file, profile }) => {
            let text = read_label(file)?;
            let store = cfg.open_profile_store()?;
            let profile = match profile {
                Some(id) => Some(store.require(&ProfileId::parse(&id)?)?),
                None => store.default_profile()?,
            };
            let report = service(&cfg)?.scan(&text, profile.as_ref());

            if json {
                print_json(&report)?;
            } else {
                print_report(&report.label);
                match (&profile, &report.health) {
                    (Some(profile), Some(health)) => print_health(profile, health),
                    _ => println!("No health profile; skipped condition check."),
                }
            }
        }
        None => {
            println!("Use --help for usage");
        }
    }

    Ok(())
}

fn run_profile(cfg: &CoreConfig, command: ProfileCommands, json: bool) -> CliResult<()> {
    let store = cfg.open_profile_store()?;

    match command {
        ProfileCommands::Add {
            name,
            age,
            conditions,
        } => {
            warn_unknown_conditions(&conditions);
            let profile = HealthProfile::new(&name, parse_age(&age)?, conditions)?;
            store.upsert(&profile)?;
            println!("Created profile {} with id: {}", profile.name, profile.id);
        }
        ProfileCommands::List => {
            let profiles = store.list_profiles()?;
            if json {
                print_json(&profiles)?;
            } else if profiles.is_empty() {
                println!("No profiles found.");
            } else {
                for profile in profiles {
                    print_profile_line(&profile);
                }
            }
        }
        ProfileCommands::Show { id } => {
            let profile = store.require(&ProfileId::parse(&id)?)?;
            if json {
                print_json(&profile)?;
            } else {
                print_profile_line(&profile);
            }
        }
        ProfileCommands::Update {
            id,
            name,
            age,
            conditions,
        } => {
            if let Some(conditions) = &conditions {
                warn_unknown_conditions(conditions);
            }
            let age = age.as_deref().map(parse_age).transpose()?;
            let current = store.require(&ProfileId::parse(&id)?)?;
            let updated = current.updated(name.as_deref(), age, conditions)?;
            store.upsert(&updated)?;
            println!("Updated profile {}", updated.id);
        }
        ProfileCommands::Delete { id } => {
            if store.delete(&ProfileId::parse(&id)?)? {
                println!("Deleted profile {id}");
            } else {
                eprintln!("No profile with id {id}");
            }
        }
    }

    Ok(())
}

fn service(cfg: &CoreConfig) -> CliResult<LabelService> {
    Ok(LabelService::new(cfg.resolve_taxonomy()?))
}

/// Read label text from `file`, or from stdin when no file is given.
fn read_label(file: Option<PathBuf>) -> CliResult<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn neurotoxin_details(name: &str) -> CliResult<NeurotoxinInfo> {
    neurotoxin_info(name).ok_or_else(|| format!("no reference details for '{name}'").into())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_ingredients(ingredients: &[IngredientCandidate]) {
    for ingredient in ingredients {
        match &ingredient.amount {
            Some(amount) => println!("  - {} ({amount})", ingredient.normalized_name),
            None => println!("  - {}", ingredient.normalized_name),
        }
    }
}

fn print_report(report: &LabelReport) {
    println!("Ingredients:");
    print_ingredients(&report.ingredients);

    println!("{}", report.analysis.summary());
    if !report.analysis.carcinogens.is_empty() {
        println!("Carcinogens: {}", report.analysis.carcinogens.join(", "));
    }
    if !report.analysis.neurotoxins.is_empty() {
        println!("Neurotoxins: {}", report.analysis.neurotoxins.join(", "));
    }
    for (finding, risk) in report.analysis.additive_risks() {
        println!("  {} [{risk}]: {}", finding.ingredient, finding.concern);
    }
    println!("{}", report.harmful.summary);
}

fn print_health(profile: &HealthProfile, health: &[HealthAnalysisResult]) {
    if health.is_empty() {
        println!("No concerns for {}.", profile.name);
        return;
    }
    println!("Concerns for {}:", profile.name);
    for result in health {
        println!(
            "  {}: {}",
            result.condition.name,
            result.concerns.join(", ")
        );
    }
}

fn print_profile_line(profile: &HealthProfile) {
    println!(
        "ID: {}, Name: {}, Age: {}, Conditions: {}",
        profile.id,
        profile.name,
        profile.age,
        profile.conditions.join(", ")
    );
}

fn warn_unknown_conditions(names: &[String]) {
    for name in names {
        if conditions::find_by_name(name.trim()).is_none() {
            eprintln!("Warning: '{name}' is not a known condition and will not be checked");
        }
    }
}
