use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapf_core::{assign, plan, AgentSpec, AssignMethod, Grid, PlanOptions, Planner, Task};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Runs one MAPF/MRTA scenario from a JSON file and prints the resulting plan.
///
/// This binary is a thin harness over the library: it owns JSON I/O only, never map/scenario
/// file formats, CSV reporting, or random map generation (those stay with the host).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to a JSON scenario file (see [`Scenario`]).
    scenario: PathBuf,

    /// Which planner to run: cooperative, prioritized, or cbs.
    #[arg(long, default_value = "cbs")]
    planner: String,

    /// If set, also run task allocation and print agent -> task assignments instead of paths.
    #[arg(long)]
    assign: bool,

    /// Task-allocation method, used only with --assign.
    #[arg(long, default_value = "hungarian")]
    method: String,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    grid: Vec<Vec<u8>>,
    agents: Vec<AgentSpec>,
    #[serde(default)]
    tasks: Vec<Task>,
}

fn parse_method(s: &str) -> Result<AssignMethod> {
    match s {
        "hungarian" => Ok(AssignMethod::Hungarian),
        "greedy" => Ok(AssignMethod::Greedy),
        "cbba" => Ok(AssignMethod::Cbba),
        other => Err(anyhow::anyhow!("unknown assignment method: {other}")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.scenario)
        .with_context(|| format!("reading scenario file {}", cli.scenario.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&raw).context("parsing scenario file as JSON")?;
    let grid = Grid::from_u8(scenario.grid).context("building grid")?;

    if cli.assign {
        let method = parse_method(&cli.method)?;
        let assignment = assign(&scenario.agents, &scenario.tasks, method);
        println!("{}", serde_json::to_string_pretty(&assignment)?);
        return Ok(());
    }

    let planner: Planner = cli
        .planner
        .parse()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    let paths = plan(&grid, &scenario.agents, planner, &PlanOptions::default())
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(())
}
