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

//! Scenario configuration.
//!
//! A scenario names the bands of up to two radio systems, the highest
//! distortion order to sweep, and which planning mode to run. TOML scenario
//! files map directly onto [`ScenarioConfig`]; the other input formats build
//! one through [`ScenarioConfig::from_systems`].

use std::path::Path;

use clap::ValueEnum;
use imd_core::{Aggregator, RadioSystem, SystemPair};
use log::warn;
use serde::{Deserialize, Serialize};

/// Default highest order swept
pub const DEFAULT_MAX_ORDER: u32 = 4;

/// Which transmitters are checked against which receivers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Each system's uplink against the other's downlink, plus mixing of
    /// the two uplinks against both downlinks
    #[default]
    CrossSystem,
    /// The first system's uplink against its own downlink
    SingleSystem,
}

/// Scenario stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Highest distortion order to sweep (2 or more)
    #[serde(default = "default_max_order")]
    pub max_order: u32,

    /// Planning mode
    #[serde(default)]
    pub mode: Mode,

    /// First radio system (RAT1)
    #[serde(default)]
    pub system1: RadioSystem,

    /// Second radio system (RAT2)
    #[serde(default)]
    pub system2: RadioSystem,
}

fn default_max_order() -> u32 {
    DEFAULT_MAX_ORDER
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            max_order: default_max_order(),
            mode: Mode::default(),
            system1: RadioSystem::default(),
            system2: RadioSystem::default(),
        }
    }
}

impl ScenarioConfig {
    /// Scenario with default settings around already-parsed systems
    pub fn from_systems(systems: SystemPair) -> Self {
        Self {
            system1: systems.first,
            system2: systems.second,
            ..Self::default()
        }
    }

    /// Load a TOML scenario from an explicit path
    pub fn load(path: &Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    /// Save the scenario as TOML
    pub fn save(&self, path: &Path) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }

    pub fn systems(&self) -> SystemPair {
        SystemPair::new(self.system1.clone(), self.system2.clone())
    }

    /// Mode actually run: cross-system needs a second system
    pub fn effective_mode(&self) -> Mode {
        if self.mode == Mode::CrossSystem && self.systems().is_single_system() {
            warn!("Scenario has no second system; running single-system analysis");
            return Mode::SingleSystem;
        }
        self.mode
    }

    /// Build the sweep for this scenario
    pub fn plan(&self) -> Aggregator {
        match self.effective_mode() {
            Mode::CrossSystem => self.systems().cross_system_plan(self.max_order),
            Mode::SingleSystem => self.system1.self_interference_plan(self.max_order),
        }
    }
}
