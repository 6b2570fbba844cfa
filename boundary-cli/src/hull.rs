//! Hull command implementation for the boundary CLI.

use std::io::Write;

use boundary_core::{
    BoundaryAdapter, Crs, Driver, ExportReport, ExportRequest, HullEngine, Sink, SourceReader,
};
use boundary_data::{GeoJsonReader, GeoJsonSink};
use boundary_hull::DelaunayHullEngine;
use camino::Utf8PathBuf;
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CRS, ARG_DRIVER, ARG_INPUT, ARG_LAYER, ARG_OUTPUT, ARG_OUTPUT_LAYER, ARG_PERCENTILE,
    ARG_TOLERANCE, CliError, ENV_INPUT,
};

/// CLI arguments for the `hull` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Ingest one or more point layers, in order, and write the \
                 concave hull of every point read as a single polygon \
                 feature. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Compute the concave hull of point layers"
)]
#[ortho_config(prefix = "BOUNDARY")]
pub(crate) struct HullArgs {
    /// Point layer to ingest; repeat to accumulate several inputs.
    #[arg(long = ARG_INPUT, value_name = "path")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) input: Vec<Utf8PathBuf>,
    /// Layer to read from each input.
    #[arg(long = ARG_LAYER, value_name = "name")]
    #[serde(default)]
    pub(crate) layer: Option<String>,
    /// Output dataset path; defaults to `concave_hull` next to the last input.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Output layer name.
    #[arg(long = ARG_OUTPUT_LAYER, value_name = "name")]
    #[serde(default)]
    pub(crate) output_layer: Option<String>,
    /// Output driver; defaults to the driver of the last input.
    #[arg(long = ARG_DRIVER, value_name = "name")]
    #[serde(default)]
    pub(crate) driver: Option<String>,
    /// Output CRS; defaults to the CRS of the last input.
    #[arg(long = ARG_CRS, value_name = "definition")]
    #[serde(default)]
    pub(crate) crs: Option<String>,
    /// Edge-length percentile used to estimate the tolerance.
    #[arg(long = ARG_PERCENTILE, value_name = "0-100")]
    #[serde(default)]
    pub(crate) percentile: Option<f64>,
    /// Explicit edge-length tolerance.
    #[arg(long = ARG_TOLERANCE, value_name = "length")]
    #[serde(default)]
    pub(crate) tolerance: Option<f64>,
}

impl HullArgs {
    pub(crate) fn into_config(self) -> Result<HullConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        HullConfig::try_from(merged)
    }
}

/// Resolved `hull` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HullConfig {
    /// Inputs in ingestion order.
    pub(crate) inputs: Vec<Utf8PathBuf>,
    /// Layer requested from every input.
    pub(crate) layer: Option<String>,
    /// Export parameters.
    pub(crate) request: ExportRequest,
}

impl TryFrom<HullArgs> for HullConfig {
    type Error = CliError;

    fn try_from(args: HullArgs) -> Result<Self, Self::Error> {
        if args.input.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_INPUT,
                env: ENV_INPUT,
            });
        }
        if let (Some(percentile), Some(tolerance)) = (args.percentile, args.tolerance) {
            warn!(
                "--{ARG_PERCENTILE} {percentile} takes precedence over --{ARG_TOLERANCE} {tolerance}"
            );
        }
        Ok(Self {
            inputs: args.input,
            layer: args.layer,
            request: ExportRequest {
                output_path: args.output,
                output_layer: args.output_layer,
                driver: args.driver.map(Driver::new),
                crs: args.crs.map(Crs::new),
                percentile: args.percentile,
                tolerance: args.tolerance,
            },
        })
    }
}

pub(crate) fn run_hull(args: HullArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_hull_with(args, &mut stdout)
}

pub(crate) fn run_hull_with(args: HullArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut adapter =
        BoundaryAdapter::new(GeoJsonReader, DelaunayHullEngine::new(), GeoJsonSink);
    let report = execute_hull(&config, &mut adapter)?;
    write_report(writer, &report)
}

/// Ingest every input in order, then export once.
pub(crate) fn execute_hull<R, H, S>(
    config: &HullConfig,
    adapter: &mut BoundaryAdapter<R, H, S>,
) -> Result<ExportReport, CliError>
where
    R: SourceReader,
    H: HullEngine,
    S: Sink,
{
    for input in &config.inputs {
        adapter
            .ingest(input, config.layer.as_deref())
            .map_err(|source| CliError::Ingest {
                path: input.clone(),
                source,
            })?;
    }
    let report = adapter.export(&config.request)?;
    info!(
        "wrote {} layer {:?} to {}",
        report.driver, report.layer, report.path
    );
    Ok(report)
}

pub(crate) fn write_report(writer: &mut dyn Write, report: &ExportReport) -> Result<(), CliError> {
    let payload = serde_json::to_string(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<HullConfig, CliError> {
    let merged = HullArgs::merge_from_layers(layers).map_err(CliError::from)?;
    HullConfig::try_from(merged)
}
