// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;
mod input;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use config::Mode;
use log::{debug, info};

use output::SvgChart;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Band definitions: .toml scenario, .csv band list, or [RAT1 UL]-style section file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Highest distortion order to sweep (overrides the scenario)
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..))]
    max_order: Option<u32>,

    /// Planning mode (overrides the scenario)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Write the JSON report to PATH ("-" for stdout); default when no output is given
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write an SVG chart to PATH
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Save the loaded scenario, with overrides applied, as TOML
    #[arg(long, value_name = "PATH")]
    save_scenario: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut scenario = input::load_scenario(&args.input)?;
    if let Some(max_order) = args.max_order {
        scenario.max_order = max_order;
    }
    if let Some(mode) = args.mode {
        scenario.mode = mode;
    }
    debug!("Scenario: {scenario:?}");
    if let Some(path) = &args.save_scenario {
        scenario.save(path)?;
        info!("Saved scenario to {}", path.display());
    }

    let systems = scenario.systems();
    let report = scenario.plan().run();
    let summary = report.summary();
    info!(
        "{} distortion products with victims (max order {}, max frequency {})",
        report.len(),
        summary.max_order,
        summary.max_frequency
    );

    let json_target = match (&args.json, &args.svg) {
        (Some(path), _) => Some(path.as_path()),
        (None, None) => Some(Path::new("-")),
        (None, Some(_)) => None,
    };
    if let Some(target) = json_target {
        output::write_output(target, &output::to_json(&systems, &report)?)?;
    }
    if let Some(path) = &args.svg {
        output::write_output(path, &SvgChart::new(&systems, &report).to_string())?;
    }

    Ok(())
}
