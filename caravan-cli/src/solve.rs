//! Solve command implementation for the Caravan CLI.

use std::fmt;
use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use caravan_core::{SolveRequest, SolveResponse, Solver, validate_request};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fs::{file_is_file, open_utf8_file};
use crate::output::SolveOutput;
use crate::{
    ARG_SOLVE_DEADLINE_MS, ARG_SOLVE_MAX_GENERATIONS, ARG_SOLVE_REQUEST, ARG_SOLVE_STRATEGY,
    CliError, ENV_SOLVE_REQUEST,
};

/// Generation cap applied to the `vrp` strategy when none is configured.
pub(crate) const DEFAULT_MAX_GENERATIONS: usize = 200;

/// Solving strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Exhaustive search returning a proven optimum.
    #[default]
    Exact,
    /// `vrp-core` metaheuristics returning a best-effort plan.
    Vrp,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Vrp => f.write_str("vrp"),
        }
    }
}

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a delivery request read from a JSON file holding \
                 `vehicles`, `jobs`, and a square duration `matrix`. Options \
                 can come from CLI flags, configuration files, or \
                 CARAVAN_-prefixed environment variables.",
    about = "Solve a delivery routing request"
)]
#[ortho_config(prefix = "CARAVAN")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing the request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Solving strategy (default: exact).
    #[arg(long = ARG_SOLVE_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Search budget in milliseconds. Without one the exact strategy runs to
    /// completion.
    #[arg(long = ARG_SOLVE_DEADLINE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) deadline_ms: Option<u64>,
    /// Generation cap for the `vrp` strategy (default: 200).
    #[arg(long = ARG_SOLVE_MAX_GENERATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_generations: Option<usize>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Strategy used to solve the request.
    pub(crate) strategy: Strategy,
    /// Optional search budget.
    pub(crate) deadline: Option<Duration>,
    /// Generation cap for the `vrp` strategy.
    pub(crate) max_generations: usize,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
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

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;
        let max_generations = args.max_generations.unwrap_or(DEFAULT_MAX_GENERATIONS);
        if max_generations == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_SOLVE_MAX_GENERATIONS,
                reason: "must be at least 1",
            });
        }
        Ok(Self {
            request_path,
            strategy: args.strategy.unwrap_or_default(),
            deadline: args.deadline_ms.map(Duration::from_millis),
            max_generations,
        })
    }
}

/// Builds a solver instance for the current solve invocation.
pub(crate) trait SolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(crate) struct DefaultSolveSolverBuilder;

impl SolveSolverBuilder for DefaultSolveSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
        match config.strategy {
            Strategy::Exact => build_exact(),
            Strategy::Vrp => build_vrp(config),
        }
    }
}

#[cfg(feature = "solver-exact")]
fn build_exact() -> Result<Box<dyn Solver>, CliError> {
    Ok(Box::new(caravan_solver_exact::ExactSolver::new()))
}

#[cfg(not(feature = "solver-exact"))]
const fn build_exact() -> Result<Box<dyn Solver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-exact",
        action: "the exact strategy",
    })
}

#[cfg(feature = "solver-vrp")]
fn build_vrp(config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
    use caravan_solver_vrp::{VrpSolver, VrpSolverConfig};

    Ok(Box::new(VrpSolver::with_config(VrpSolverConfig {
        max_generations: config.max_generations,
    })))
}

#[cfg(not(feature = "solver-vrp"))]
const fn build_vrp(_config: &SolveConfig) -> Result<Box<dyn Solver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-vrp",
        action: "the vrp strategy",
    })
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultSolveSolverBuilder;
    run_solve_with(args, &builder, &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_solve(args, builder)?;
    write_solve_response(writer, &response)
}

fn execute_solve(
    args: SolveArgs,
    builder: &dyn SolveSolverBuilder,
) -> Result<SolveResponse, CliError> {
    let config = resolve_solve_config(args)?;
    let mut request = load_solve_request(&config.request_path)?;
    validate_request(&request).map_err(|source| CliError::InvalidSolveRequest {
        path: config.request_path.clone(),
        source,
    })?;
    request.deadline = config.deadline;

    let solver = builder.build(&config)?;
    info!(
        strategy = %config.strategy,
        vehicles = request.vehicles.len(),
        jobs = request.jobs.len(),
        "solving request"
    );
    let response = solver
        .solve(&request)
        .map_err(|source| CliError::Solve { source })?;
    info!(
        feasible = response.solution.is_feasible(),
        best_effort = response.solution.is_best_effort(),
        total = ?response.solution.total_duration(),
        elapsed = ?response.diagnostics.solve_time,
        "solve finished"
    );
    Ok(response)
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`SolveRequest`] from disk.
pub(crate) fn load_solve_request(path: &Utf8Path) -> Result<SolveRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenSolveRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseSolveRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_solve_response(writer: &mut dyn Write, response: &SolveResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(&SolveOutput::new(response))
        .map_err(CliError::SerialiseSolveOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteSolveOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteSolveOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
