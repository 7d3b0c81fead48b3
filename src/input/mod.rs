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

//! Band input adapters.
//!
//! Three on-disk formats produce a [`ScenarioConfig`]:
//!
//! - `.toml`: a full scenario, see [`crate::config`]
//! - `.csv`: `system,link,name,f_low,f_high` rows
//! - anything else: section files with `[RAT1 UL]`-style headers and
//!   `name = f_low f_high` entries

mod csv_bands;
mod sections;

use csv_bands::read_csv;
use sections::parse_sections;

use std::fs;
use std::path::{Path, PathBuf};

use imd_core::BandError;
use log::info;
use thiserror::Error;

use crate::config::ScenarioConfig;

/// Errors that can occur while reading band definitions.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: invalid value for field '{field}': {value}")]
    InvalidValue {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: '{value}' is not a number for field '{field}'")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("line {line}: {source}")]
    Band {
        line: usize,
        #[source]
        source: BandError,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario error: {0}")]
    Config(#[from] confy::ConfyError),
}

/// Input format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Csv,
    Sections,
}

impl Format {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("csv") => Self::Csv,
            _ => Self::Sections,
        }
    }
}

/// Load a scenario from any supported format.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, InputError> {
    // confy writes a default file for missing paths; treat absence as an error instead
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }

    let format = Format::from_path(path);
    let scenario = match format {
        Format::Toml => ScenarioConfig::load(path)?,
        Format::Csv => ScenarioConfig::from_systems(read_csv(path)?),
        Format::Sections => {
            let text = fs::read_to_string(path).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            ScenarioConfig::from_systems(parse_sections(&text)?)
        }
    };

    let systems = scenario.systems();
    info!(
        "Loaded {:?} scenario from {}: RAT1 {} UL / {} DL, RAT2 {} UL / {} DL",
        format,
        path.display(),
        systems.first.uplink.len(),
        systems.first.downlink.len(),
        systems.second.uplink.len(),
        systems.second.downlink.len()
    );
    Ok(scenario)
}

/// Which radio system a parsed band belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SystemSlot {
    First,
    Second,
}

/// Which list within a radio system a parsed band belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Uplink,
    Downlink,
}

fn parse_system(value: &str) -> Option<SystemSlot> {
    match value.trim().to_ascii_uppercase().as_str() {
        "1" | "RAT1" => Some(SystemSlot::First),
        "2" | "RAT2" => Some(SystemSlot::Second),
        _ => None,
    }
}

fn parse_link(value: &str) -> Option<Link> {
    match value.trim().to_ascii_uppercase().as_str() {
        "UL" | "UPLINK" | "TX" => Some(Link::Uplink),
        "DL" | "DOWNLINK" | "RX" => Some(Link::Downlink),
        _ => None,
    }
}

fn target<'a>(
    systems: &'a mut imd_core::SystemPair,
    slot: SystemSlot,
    link: Link,
) -> &'a mut Vec<imd_core::Band> {
    let system = match slot {
        SystemSlot::First => &mut systems.first,
        SystemSlot::Second => &mut systems.second,
    };
    match link {
        Link::Uplink => &mut system.uplink,
        Link::Downlink => &mut system.downlink,
    }
}
