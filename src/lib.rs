//! mockgen library surface.
//!
//! Holds the CLI option structs shared across subcommands. The
//! engine itself lives in `mockgen-core`; file output lives in
//! `mockgen-output`.

use clap::{Args, ValueEnum};
use mockgen_core::{Profile, Scenario};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Configuration-file options shared by every generating subcommand.
#[derive(Args, Clone, Debug)]
pub struct ConfigOpts {
    /// Path to the user configuration JSON file
    #[arg(long, default_value = "user_input.json", env = "MOCKGEN_CONFIG")]
    pub config: PathBuf,

    /// Required-field contract the configuration must satisfy
    #[arg(long, value_enum, default_value_t = SchemaProfile::Claims)]
    pub profile: SchemaProfile,
}

impl ConfigOpts {
    pub fn profile(&self) -> Profile {
        match self.profile {
            SchemaProfile::Claims => Profile::claims(),
            SchemaProfile::Contacts => Profile::contacts(),
        }
    }
}

/// Output-directory options shared by every generating subcommand.
#[derive(Args, Clone, Debug)]
pub struct OutputOpts {
    /// Directory generated JSON files are written into
    #[arg(long, default_value = "mock_outputs", env = "MOCKGEN_OUTPUT_DIR")]
    pub output_dir: PathBuf,
}

/// Seeding options for the random selection modes.
#[derive(Args, Clone, Debug)]
pub struct SeedOpts {
    /// Random seed for reproducible generation (entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SeedOpts {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// The supported required-field contracts.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaProfile {
    /// Claims-data schema (PRICNG_ZIP_STATE, CLM_TYPE, ..., ClaimDetails)
    Claims,
    /// Simple contact-record schema (name, mail_id, address, city)
    Contacts,
}

/// How enhanced-mode output is arranged across files.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One file containing every selected model
    Single,
    /// `count` batch files, each containing every selected model
    Multiple,
    /// One file per selected model
    Split,
}

/// Scenario selection for the `scenario` subcommand.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioArg {
    Positive,
    Negative,
    Exclusion,
    /// All three scenario types in one run
    All,
}

impl ScenarioArg {
    pub fn scenarios(&self) -> Vec<Scenario> {
        match self {
            ScenarioArg::Positive => vec![Scenario::Positive],
            ScenarioArg::Negative => vec![Scenario::Negative],
            ScenarioArg::Exclusion => vec![Scenario::Exclusion],
            ScenarioArg::All => Scenario::ALL.to_vec(),
        }
    }
}
