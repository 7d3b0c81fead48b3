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

//! Radio system groupings and the standard coexistence plans.
//!
//! A radio access technology (RAT) owns an uplink (transmit) and a downlink
//! (receive) band list. Planning two RATs side by side means checking each
//! system's transmitters against the other's receivers, and the two
//! systems' transmitters mixing with each other against both receivers.

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregator;
use crate::band::Band;
use crate::selector::{CrossSystem, Pooled};

/// Uplink and downlink band lists of one radio system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadioSystem {
    #[serde(default)]
    pub uplink: Vec<Band>,
    #[serde(default)]
    pub downlink: Vec<Band>,
}

impl RadioSystem {
    #[must_use]
    pub fn new(uplink: Vec<Band>, downlink: Vec<Band>) -> Self {
        Self { uplink, downlink }
    }

    /// Harmonics and pooled IMD of this system's uplink against its own
    /// downlink.
    #[must_use]
    pub fn self_interference_plan(&self, max_order: u32) -> Aggregator {
        Aggregator::new(max_order)
            .with_harmonics(self.uplink.clone(), self.downlink.clone())
            .with_imd(Pooled::new(self.uplink.clone()), self.downlink.clone())
    }

    fn is_empty(&self) -> bool {
        self.uplink.is_empty() && self.downlink.is_empty()
    }
}

/// Two radio systems operating side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemPair {
    pub first: RadioSystem,
    pub second: RadioSystem,
}

impl SystemPair {
    #[must_use]
    pub fn new(first: RadioSystem, second: RadioSystem) -> Self {
        Self { first, second }
    }

    /// Inter-system plan:
    ///
    /// - harmonics of the first uplink against the second downlink
    /// - harmonics of the second uplink against the first downlink
    /// - first x second uplink IMD against the first downlink
    /// - first x second uplink IMD against the second downlink
    #[must_use]
    pub fn cross_system_plan(&self, max_order: u32) -> Aggregator {
        let mixing = || CrossSystem::new(self.first.uplink.clone(), self.second.uplink.clone());
        Aggregator::new(max_order)
            .with_harmonics(self.first.uplink.clone(), self.second.downlink.clone())
            .with_harmonics(self.second.uplink.clone(), self.first.downlink.clone())
            .with_imd(mixing(), self.first.downlink.clone())
            .with_imd(mixing(), self.second.downlink.clone())
    }

    /// True when the second system carries no bands at all.
    #[must_use]
    pub fn is_single_system(&self) -> bool {
        self.second.is_empty()
    }

    /// Every input band, uplinks before downlinks, first system first.
    pub fn all_bands(&self) -> impl Iterator<Item = &Band> {
        self.first
            .uplink
            .iter()
            .chain(&self.second.uplink)
            .chain(&self.first.downlink)
            .chain(&self.second.downlink)
    }
}
