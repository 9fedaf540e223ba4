//! Sequence command implementation for the dropline CLI.

use std::fmt;
use std::io::{BufReader, Read, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use dropline_core::{LatLng, SequenceRequest, SequenceResponse, Sequencer, Stop};
use dropline_fs::{create_utf8_file, open_utf8_file};
use dropline_sequencer::{CodeOrderSequencer, NearestNeighbourSequencer};
use geo::Coord;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{
    ARG_OUTPUT, ARG_REQUEST, ARG_START_LAT, ARG_START_LNG, ARG_STRATEGY, CliError, ENV_REQUEST,
};

/// Ordering strategy selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Greedy nearest-neighbour from the start point.
    #[default]
    Nearest,
    /// Ascending by the digits of each stop's order code.
    #[value(name = "code")]
    #[serde(rename = "code")]
    CodeOrder,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "nearest",
            Self::CodeOrder => "code",
        })
    }
}

/// CLI arguments for the `sequence` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops in a JSON manifest into a driving route. \
                 The manifest is either a request object with optional \
                 start and stops, or a bare array of stops. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Sequence delivery stops"
)]
#[ortho_config(prefix = "DROPLINE")]
pub(crate) struct SequenceArgs {
    /// Path to a JSON stop manifest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Latitude of the driver's start point; requires --start-lng.
    ///
    /// The two halves are merged independently, so one may come from the
    /// environment and the other from a configuration file.
    #[arg(long = ARG_START_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the driver's start point; requires --start-lat.
    #[arg(long = ARG_START_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) start_lng: Option<f64>,
    /// Ordering strategy (default: nearest).
    #[arg(long = ARG_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Write the route to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SequenceArgs {
    pub(crate) fn into_config(self) -> Result<SequenceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SequenceConfig::try_from(merged)
    }
}

/// Resolved `sequence` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SequenceConfig {
    /// Path to the JSON stop manifest.
    pub(crate) request_path: Utf8PathBuf,
    /// Start point overriding the manifest's own.
    pub(crate) start: Option<Coord<f64>>,
    pub(crate) strategy: Strategy,
    /// Destination file; `None` writes to stdout.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SequenceConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match dropline_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<SequenceArgs> for SequenceConfig {
    type Error = CliError;

    fn try_from(args: SequenceArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;
        let start = match (args.start_lat, args.start_lng) {
            (Some(lat), Some(lng)) => Some(Coord { x: lng, y: lat }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(CliError::IncompleteStart {
                    given: ARG_START_LAT,
                    missing: ARG_START_LNG,
                });
            }
            (None, Some(_)) => {
                return Err(CliError::IncompleteStart {
                    given: ARG_START_LNG,
                    missing: ARG_START_LAT,
                });
            }
        };

        Ok(Self {
            request_path,
            start,
            strategy: args.strategy.unwrap_or_default(),
            output: args.output,
        })
    }
}

/// Builds a sequencer for the current invocation.
pub(super) trait SequencerBuilder {
    fn build(&self, config: &SequenceConfig) -> Box<dyn Sequencer>;
}

pub(super) struct DefaultSequencerBuilder;

impl SequencerBuilder for DefaultSequencerBuilder {
    fn build(&self, config: &SequenceConfig) -> Box<dyn Sequencer> {
        match config.strategy {
            Strategy::Nearest => Box::new(NearestNeighbourSequencer::new()),
            Strategy::CodeOrder => Box::new(CodeOrderSequencer::new()),
        }
    }
}

/// Route as printed by the `sequence` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SequenceOutput {
    pub(crate) start: LatLng,
    pub(crate) stops: Vec<Stop>,
    pub(crate) total_distance_km: f64,
    pub(crate) directions_url: String,
    pub(crate) diagnostics: DiagnosticsOutput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DiagnosticsOutput {
    pub(crate) solve_time_ms: u64,
    pub(crate) distance_evaluations: u64,
}

impl TryFrom<SequenceResponse> for SequenceOutput {
    type Error = CliError;

    fn try_from(response: SequenceResponse) -> Result<Self, Self::Error> {
        let directions_url = response.route.directions_url()?.into();
        Ok(Self {
            start: response.start.into(),
            stops: response.route.into_stops(),
            total_distance_km: response.total_distance_km,
            directions_url,
            diagnostics: DiagnosticsOutput {
                solve_time_ms: millis(response.diagnostics.solve_time),
                distance_evaluations: response.diagnostics.distance_evaluations,
            },
        })
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub(super) fn run_sequence(args: SequenceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_sequence_with(args, &DefaultSequencerBuilder, &mut stdout)
}

pub(super) fn run_sequence_with(
    args: SequenceArgs,
    builder: &dyn SequencerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_sequence_config(args)?;
    let response = execute_sequence(&config, builder)?;
    let output = SequenceOutput::try_from(response)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_sequence_output(&mut file, &output)
        }
        None => write_sequence_output(writer, &output),
    }
}

fn resolve_sequence_config(args: SequenceArgs) -> Result<SequenceConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_sequence(
    config: &SequenceConfig,
    builder: &dyn SequencerBuilder,
) -> Result<SequenceResponse, CliError> {
    let mut request = load_sequence_request(&config.request_path)?;
    if let Some(start) = config.start {
        request.start = Some(start);
    }
    debug!(
        "sequencing {} stops from {} with the {} strategy",
        request.stops.len(),
        config.request_path,
        config.strategy
    );
    builder
        .build(config)
        .sequence(&request)
        .map_err(|source| CliError::Sequence { source })
}

/// Loads a JSON stop manifest from disk.
///
/// A manifest whose first token is `[` is a bare array of stops; anything
/// else is decoded as a full request.
pub(super) fn load_sequence_request(path: &Utf8Path) -> Result<SequenceRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let mut text = String::new();
    BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(|source| CliError::ReadRequest {
            path: path.to_path_buf(),
            source,
        })?;

    if text.trim_start().starts_with('[') {
        decode::<Vec<Stop>>(path, &text).map(SequenceRequest::new)
    } else {
        decode::<SequenceRequest>(path, &text)
    }
}

/// Decodes `text`, reporting the location of the first bad value.
fn decode<T: DeserializeOwned>(path: &Utf8Path, text: &str) -> Result<T, CliError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        CliError::ParseRequest {
            path: path.to_path_buf(),
            field: err.path().to_string(),
            source: err.into_inner(),
        }
    })?;
    deserializer
        .end()
        .map_err(|source| CliError::ParseRequest {
            path: path.to_path_buf(),
            field: ".".to_owned(),
            source,
        })?;
    Ok(value)
}

fn write_sequence_output(writer: &mut dyn Write, output: &SequenceOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SequenceConfig, CliError> {
    let merged = SequenceArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SequenceConfig::try_from(merged)
}
