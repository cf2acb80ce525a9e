//! Starter-template bootstrap.
//!
//! `mockgen init` writes a worked example configuration covering one
//! model and its three probability scenarios, so a new user can edit
//! real value pools instead of starting from an empty document.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Write the starter configuration to `path`.
///
/// Returns `false` without touching the file when it already exists
/// and `overwrite` is not set.
pub fn write_starter_template(path: &Path, overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        return Ok(false);
    }
    let mut contents = serde_json::to_string_pretty(&starter_config())
        .context("failed to serialize starter template")?;
    contents.push('\n');
    fs::write(path, contents)
        .with_context(|| format!("failed to write starter template to '{}'", path.display()))?;
    Ok(true)
}

fn starter_config() -> Value {
    json!({
        "Model_1": {
            "PRICNG_ZIP_STATE": ["TN", "KL", "AP", "KT"],
            "CLM_TYPE": ["P", "C", "D"],
            "SRVC_FROM_DT": ["04/20/2025"],
            "HCID": ["ABCDEFGHI", "ABCDEFGHI", "ABCDE5555", "555DEFGHI"],
            "PAT_BRTH_DT": ["01/01/1990", "01/02/1990", "01/03/1990", "01/04/1990"],
            "PAT_FRST_NME": ["Mohan", "Raj", "Rajesh", "Rajeshwari"],
            "PAT_LAST_NME": ["Kumar", "AJ", "VP", "D"],
            "ClaimDetails": [
                {
                    "SRVC_FROM_DT": ["12/12/2024"],
                    "proc_cd": ["12345", "67890", "12394", "30009"],
                    "BILL_TYPE": ["P"]
                }
            ]
        },
        "Model_1_positive": {
            "PRICNG_ZIP_STATE": ["TN", "KL"],
            "CLM_TYPE": ["P"],
            "SRVC_FROM_DT": ["04/20/2025"],
            "HCID": ["ABCDEFGHI", "ABCDEFGHI"],
            "PAT_BRTH_DT": ["01/01/1990"],
            "PAT_FRST_NME": ["Mohan", "Raj"],
            "PAT_LAST_NME": ["Kumar", "AJ"],
            "ClaimDetails": [
                {
                    "SRVC_FROM_DT": ["12/12/2024"],
                    "proc_cd": ["12345", "67890", "12394", "30009"],
                    "BILL_TYPE": ["P"]
                }
            ]
        },
        "Model_1_negative": {
            "PRICNG_ZIP_STATE": ["AP", "KT"],
            "CLM_TYPE": ["C", "D"],
            "SRVC_FROM_DT": ["04/20/2025"],
            "HCID": ["ABCDE5555", "555DEFGHI"],
            "PAT_BRTH_DT": ["01/03/1990", "01/04/1990"],
            "PAT_FRST_NME": ["Rajesh", "Rajeshwari"],
            "PAT_LAST_NME": ["VP", "D"],
            "ClaimDetails": [
                {
                    "SRVC_FROM_DT": ["12/12/2024"],
                    "proc_cd": ["12345", "67890", "12394", "30009"],
                    "BILL_TYPE": ["P"]
                }
            ]
        },
        "Model_1_exclusion": {
            "PRICNG_ZIP_STATE": ["KT"],
            "CLM_TYPE": ["P", "D"],
            "SRVC_FROM_DT": ["04/20/2025"],
            "HCID": ["555DEFGHI"],
            "PAT_BRTH_DT": ["01/04/1990"],
            "PAT_FRST_NME": ["Rajeshwari"],
            "PAT_LAST_NME": ["AJ"],
            "ClaimDetails": [
                {
                    "SRVC_FROM_DT": ["12/12/2024"],
                    "proc_cd": ["12345", "30009"],
                    "BILL_TYPE": ["P"]
                }
            ]
        }
    })
}
