use crate::core::{DEFAULT_TRIALS, Tier, default_tiers};
use crate::evaluation::DEFAULT_BINS;
use crate::simulation::ExportFormat;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::prompt_tiers;
use crate::ui::types::choices::UIChoice;
use anyhow::Result;
use chrono::Local;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_bins() -> u64 {
    DEFAULT_BINS as u64
}

/// `revenue-YYYYmmdd-HHMMSS.<ext>` in the working directory.
pub fn default_export_path(format: ExportFormat) -> String {
    format!(
        "revenue-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SimulateParameters {
    #[serde(default = "default_trials")]
    #[schemars(
        title = "Number of Simulations",
        description = "Trials to run",
        range(min = 1),
        default = "default_trials"
    )]
    pub trials: u64,

    #[serde(default)]
    #[schemars(
        title = "Parallel Chunks",
        description = "Split the run over this many worker chunks"
    )]
    pub chunks: Option<u64>,

    #[serde(default = "default_tiers")]
    #[schemars(skip)]
    pub tiers: Vec<Tier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct SummaryParameters {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SaveParameters {
    #[schemars(title = "File", description = "Where to write the results")]
    pub path: String,

    #[serde(default)]
    #[schemars(
        with = "String",
        title = "Format",
        description = "csv (Revenue column) or json (array)"
    )]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HistogramParameters {
    #[serde(default = "default_bins")]
    #[schemars(
        title = "Bins",
        description = "Number of equal-width bins",
        range(min = 1),
        default = "default_bins"
    )]
    pub bins: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct ReseedParameters {
    #[schemars(title = "Seed", description = "PRNG seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct QuitParameters {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants, PartialEq)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ActionKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ActionChoice {
    #[strum_discriminants(strum(
        message = "Simulate",
        detailed_message = "Draw every tier once per trial and summarize the totals."
    ))]
    Simulate(SimulateParameters),

    #[strum_discriminants(strum(
        message = "Show Summary",
        detailed_message = "Print the statistics of the last run again."
    ))]
    Summary(SummaryParameters),

    #[strum_discriminants(strum(
        message = "Save Results",
        detailed_message = "Export the last run, one revenue per row."
    ))]
    Save(SaveParameters),

    #[strum_discriminants(strum(
        message = "Visualize Results",
        detailed_message = "Bin counts of the last run with the 5th/95th percentiles marked."
    ))]
    Histogram(HistogramParameters),

    #[strum_discriminants(strum(
        message = "Reseed",
        detailed_message = "Restart the random generator from a fixed seed."
    ))]
    Reseed(ReseedParameters),

    #[strum_discriminants(strum(message = "Quit"))]
    Quit(QuitParameters),
}

impl UIChoice for ActionChoice {
    type Kind = ActionKind;

    fn schema() -> Schema {
        schema_for!(ActionChoice)
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            ActionKind::Simulate => json!({ "trials": DEFAULT_TRIALS, "chunks": null }),
            ActionKind::Save => json!({
                "path": default_export_path(ExportFormat::Csv),
                "format": ExportFormat::Csv,
            }),
            ActionKind::Histogram => json!({ "bins": DEFAULT_BINS }),
            ActionKind::Reseed => json!({ "seed": 42 }),
            ActionKind::Summary | ActionKind::Quit => json!({}),
        }
    }

    fn subprompts<D: PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> Result<Option<Map<String, Value>>> {
        match kind {
            ActionKind::Simulate => {
                let tiers = prompt_tiers(driver, &default_tiers())?;
                let mut m = Map::new();
                m.insert("tiers".into(), serde_json::to_value(tiers)?);
                Ok(Some(m))
            }
            _ => Ok(None),
        }
    }
}
