//! Command-line interface for mockgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Write a starter configuration and edit it
//! mockgen init --config user_input.json
//!
//! # Indexed (positionally paired) records for one model
//! mockgen generate --model Model_1 --indexed
//!
//! # Five random records drawn across all sections, one file each
//! mockgen generate --count 5 --split
//!
//! # Merge the master template underneath the user sections
//! mockgen enhanced --master master.json --output-format split
//!
//! # Positive-scenario records for every model base
//! mockgen scenario positive --count 3
//!
//! # Show which scenarios each model declares
//! mockgen list
//! ```
//!
//! Reproducibility: every random mode accepts `--seed N`; the same
//! seed and configuration produce the same records.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mockgen::{ConfigOpts, OutputFormat, OutputOpts, ScenarioArg, SeedOpts};
use mockgen_core::schema::{Document, Record};
use mockgen_core::{generate, select, Profile};
use mockgen_output::{write_starter_template, OutputDir};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mockgen")]
#[command(about = "Generate synthetic claims-data JSON records from value-pool configurations")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration template and exit
    Init {
        /// Path to write the template to
        #[arg(long, default_value = "user_input.json")]
        config: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate records from the user configuration
    Generate {
        #[command(flatten)]
        config: ConfigOpts,

        #[command(flatten)]
        output: OutputOpts,

        #[command(flatten)]
        seed: SeedOpts,

        /// Generate for one named model/section only
        #[arg(long)]
        model: Option<String>,

        /// Restrict random generation to these sections (comma-separated)
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,

        /// Number of records to generate
        #[arg(long, default_value = "1")]
        count: usize,

        /// Write each record to its own file instead of one combined file
        #[arg(long)]
        split: bool,

        /// Pair field values positionally by index instead of drawing
        /// randomly (requires --model)
        #[arg(long, requires = "model")]
        indexed: bool,
    },

    /// Merge the master template with the user configuration, then generate
    Enhanced {
        #[command(flatten)]
        config: ConfigOpts,

        #[command(flatten)]
        output: OutputOpts,

        #[command(flatten)]
        seed: SeedOpts,

        /// Path to the master template JSON file
        #[arg(long, default_value = "master.json")]
        master: PathBuf,

        /// Specific models to generate for (comma-separated, empty = all)
        #[arg(long, value_delimiter = ',')]
        models: Vec<String>,

        /// How output is arranged across files
        #[arg(long, value_enum, default_value_t = OutputFormat::Single)]
        output_format: OutputFormat,

        /// Number of batches for the multiple output format
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Generate records for probability scenarios by naming suffix
    Scenario {
        /// Which scenario type(s) to generate
        #[arg(value_enum)]
        scenario: ScenarioArg,

        #[command(flatten)]
        config: ConfigOpts,

        #[command(flatten)]
        output: OutputOpts,

        #[command(flatten)]
        seed: SeedOpts,

        /// Generate for one model base name only
        #[arg(long)]
        model: Option<String>,

        /// Number of records per scenario file
        #[arg(long, default_value = "1")]
        count: usize,

        /// Write each record to its own file
        #[arg(long)]
        split: bool,
    },

    /// List model base names and the scenarios each declares
    List {
        #[command(flatten)]
        config: ConfigOpts,
    },
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { config, force } => {
            if write_starter_template(&config, force)? {
                println!(
                    "Wrote template to '{}'. Edit it, then rerun.",
                    config.display()
                );
            } else {
                println!(
                    "'{}' already exists; pass --force to overwrite.",
                    config.display()
                );
            }
            Ok(())
        }
        Commands::Generate {
            config,
            output,
            seed,
            model,
            models,
            count,
            split,
            indexed,
        } => run_generate(
            config, output, seed, model, models, count, split, indexed,
        ),
        Commands::Enhanced {
            config,
            output,
            seed,
            master,
            models,
            output_format,
            count,
        } => run_enhanced(config, output, seed, master, models, output_format, count),
        Commands::Scenario {
            scenario,
            config,
            output,
            seed,
            model,
            count,
            split,
        } => run_scenario(scenario, config, output, seed, model, count, split),
        Commands::List { config } => run_list(config),
    }
}

fn load(config: &ConfigOpts) -> anyhow::Result<(Document, Profile)> {
    let profile = config.profile();
    let document = mockgen_core::load_document(&config.config, &profile)?;
    tracing::info!(
        "Loaded {} sections from '{}': {}",
        document.len(),
        config.config.display(),
        document.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok((document, profile))
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    config: ConfigOpts,
    output: OutputOpts,
    seed: SeedOpts,
    model: Option<String>,
    models: Vec<String>,
    count: usize,
    split: bool,
    indexed: bool,
) -> anyhow::Result<()> {
    let (document, profile) = load(&config)?;
    let out = OutputDir::new(&output.output_dir);
    tracing::info!("Writing outputs to '{}'", out.path().display());
    let mut rng = seed.rng();

    if let Some(model) = model {
        let section = select::require_model(&document, &model)?;
        if indexed {
            let records = generate::indexed_batch(section, &profile);
            if records.is_empty() {
                tracing::warn!(
                    "no records could be built for model '{model}': none of its required fields carry values"
                );
                return Ok(());
            }
            for (i, record) in records.iter().enumerate() {
                let i = i + 1;
                let payload = named_payload(format!("{model}_output_{i}"), record.clone());
                let outfile = out.write_payload("output", Some(&format!("_{i}")), &payload)?;
                println!("Generated: {}", outfile.display());
            }
        } else {
            let records = generate::model_records(section, &profile.nested_field, count, &mut rng);
            for (i, record) in records.iter().enumerate() {
                let i = i + 1;
                let payload = named_payload(format!("{model}_record_{i}"), record.clone());
                let outfile = out.write_payload(
                    &format!("{model}_output"),
                    Some(&format!("_record_{i}")),
                    &payload,
                )?;
                println!("Generated: {}", outfile.display());
            }
        }
        return Ok(());
    }

    let document = restrict(document, &models);
    if split && count > 1 {
        for i in 1..=count {
            let payload = generate::random_payload(&document, &profile.nested_field, 1, &mut rng);
            let outfile = out.write_payload("output", Some(&format!("_{i}")), &payload)?;
            println!("Generated: {}", outfile.display());
        }
    } else {
        let payload = generate::random_payload(&document, &profile.nested_field, count, &mut rng);
        let outfile = out.write_payload("output", None, &payload)?;
        println!("Generated: {}", outfile.display());
    }
    Ok(())
}

fn run_enhanced(
    config: ConfigOpts,
    output: OutputOpts,
    seed: SeedOpts,
    master: PathBuf,
    models: Vec<String>,
    output_format: OutputFormat,
    count: usize,
) -> anyhow::Result<()> {
    let master_doc = mockgen_core::load_master(&master)
        .with_context(|| format!("failed to load master template '{}'", master.display()))?;
    tracing::info!("Loaded master template from '{}'", master.display());
    let (user_doc, profile) = load(&config)?;

    let merged = mockgen_core::merge_with_master(&master_doc, &user_doc);
    tracing::info!("Merged master template with user configuration");

    let explicit = (!models.is_empty()).then_some(models.as_slice());
    let selected = select::selected_models(&merged, explicit);
    tracing::info!("Processing models: {}", selected.join(", "));

    let out = OutputDir::new(&output.output_dir);
    tracing::info!("Writing outputs to '{}'", out.path().display());
    let mut rng = seed.rng();

    match output_format {
        OutputFormat::Split => {
            for model in &selected {
                if !merged.contains_key(model) {
                    tracing::warn!("model '{model}' not present after merge; skipping");
                    continue;
                }
                let payload = generate::model_outputs(
                    &merged,
                    std::slice::from_ref(model),
                    &profile.nested_field,
                    &mut rng,
                );
                let outfile =
                    out.write_payload("enhanced_output", Some(&format!("_{model}")), &payload)?;
                println!("Generated: {}", outfile.display());
            }
        }
        OutputFormat::Multiple => {
            for i in 1..=count.max(1) {
                let payload =
                    generate::model_outputs(&merged, &selected, &profile.nested_field, &mut rng);
                let outfile =
                    out.write_payload("enhanced_output", Some(&format!("_batch_{i}")), &payload)?;
                println!("Generated: {}", outfile.display());
            }
        }
        OutputFormat::Single => {
            let payload =
                generate::model_outputs(&merged, &selected, &profile.nested_field, &mut rng);
            let outfile = out.write_payload("enhanced_output", None, &payload)?;
            println!("Generated: {}", outfile.display());
        }
    }
    Ok(())
}

fn run_scenario(
    scenario: ScenarioArg,
    config: ConfigOpts,
    output: OutputOpts,
    seed: SeedOpts,
    model: Option<String>,
    count: usize,
    split: bool,
) -> anyhow::Result<()> {
    let (document, profile) = load(&config)?;
    let out = OutputDir::new(&output.output_dir);
    tracing::info!("Writing outputs to '{}'", out.path().display());
    let mut rng = seed.rng();

    let bases = match model {
        Some(base) => vec![base],
        None => select::base_model_names(&document),
    };

    for kind in scenario.scenarios() {
        for base in &bases {
            let Some((key, section)) = select::scenario_section(&document, base, kind) else {
                tracing::warn!("no {kind} data found for model '{base}'");
                continue;
            };
            let prefix = format!("{base}_{kind}");
            if split {
                for i in 1..=count.max(1) {
                    let record = generate::random_record(section, &profile.nested_field, &mut rng);
                    let payload = named_payload(key.to_string(), record);
                    let outfile = out.write_payload(&prefix, Some(&format!("_{i}")), &payload)?;
                    println!("Generated: {}", outfile.display());
                }
            } else if count > 1 {
                let records: Vec<Record> = (0..count)
                    .map(|_| generate::random_record(section, &profile.nested_field, &mut rng))
                    .collect();
                let outfile = out.write_payload(&prefix, None, &records)?;
                println!("Generated: {}", outfile.display());
            } else {
                let record = generate::random_record(section, &profile.nested_field, &mut rng);
                let payload = named_payload(key.to_string(), record);
                let outfile = out.write_payload(&prefix, None, &payload)?;
                println!("Generated: {}", outfile.display());
            }
        }
    }

    Ok(())
}

fn run_list(config: ConfigOpts) -> anyhow::Result<()> {
    let (document, _) = load(&config)?;

    println!("Available models and scenarios:");
    for base in select::base_model_names(&document) {
        let marks: Vec<String> = mockgen_core::Scenario::ALL
            .iter()
            .map(|kind| {
                let present = select::scenario_section(&document, &base, *kind).is_some();
                format!("{kind}={}", if present { "yes" } else { "no" })
            })
            .collect();
        println!("  {base}: {}", marks.join(" "));
    }
    Ok(())
}

fn named_payload(name: String, record: Record) -> BTreeMap<String, Record> {
    let mut payload = BTreeMap::new();
    payload.insert(name, record);
    payload
}

/// Restrict a document to an explicit section list; an empty list
/// keeps everything.
fn restrict(document: Document, models: &[String]) -> Document {
    if models.is_empty() {
        return document;
    }
    document
        .into_iter()
        .filter(|(name, _)| models.contains(name))
        .collect()
}
