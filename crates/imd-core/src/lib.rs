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

//! Harmonic and intermodulation distortion calculator for RF band planning.
//!
//! Given transmitter (uplink) and receiver (downlink) bands, this library
//! computes the frequency ranges of harmonic and intermodulation (IMD)
//! products up to a chosen order, and reports the products that land on a
//! receiver band (the "victims"). Everything here is a pure, deterministic
//! transform; reading band files and rendering results live in the caller.
//!
//! The crate is layered so each piece can be used on its own:
//!
//! - **Band layer**: [`Band`] interval with center, bandwidth and overlap
//! - **Partition layer**: integer compositions and sign vectors that become
//!   IMD coefficient vectors
//! - **Selector layer**: which uplink bands mix ([`Pooled`], [`CrossSystem`])
//! - **Synthesis layer**: product frequency range and label
//! - **Victim layer**: overlap filtering against downlink bands
//! - **Aggregation layer**: the order sweep producing a [`Report`]
//!
//! # Quick Start
//!
//! ```
//! use imd_core::{Band, RadioSystem, SystemPair};
//!
//! let pair = SystemPair::new(
//!     RadioSystem::new(
//!         vec![Band::new("B1", 1920.0, 1980.0).unwrap()],
//!         vec![Band::new("B1", 2110.0, 2170.0).unwrap()],
//!     ),
//!     RadioSystem::new(
//!         vec![Band::new("n78", 3300.0, 3800.0).unwrap()],
//!         vec![Band::new("n78", 3300.0, 3800.0).unwrap()],
//!     ),
//! );
//!
//! let report = pair.cross_system_plan(3).run();
//! for product in report.bands() {
//!     println!(
//!         "{:?} order {} {} [{:.1}, {:.1}]",
//!         product.kind(),
//!         product.order(),
//!         product.name(),
//!         product.f_low(),
//!         product.f_high()
//!     );
//! }
//! assert!(report.bands().iter().all(|p| !p.victims().is_empty()));
//! ```
//!
//! # Using Individual Layers
//!
//! ```
//! use imd_core::{partition, synth, victim, Band};
//!
//! let a = Band::new("A", 100.0, 110.0).unwrap();
//! let b = Band::new("B", 200.0, 210.0).unwrap();
//! let rx = [Band::new("V", 415.0, 425.0).unwrap()];
//!
//! let hits: Vec<_> = partition::signed_coefficients(3, 2)
//!     .iter()
//!     .filter_map(|coeffs| synth::intermod(&[&a, &b], coeffs))
//!     .filter_map(|product| victim::detect(product, &rx))
//!     .collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name(), "2A+B");
//! ```

pub mod aggregate;
pub mod band;
pub mod partition;
pub mod selector;
pub mod synth;
pub mod system;
pub mod victim;

pub use aggregate::{Aggregator, Report, Summary, MIN_ORDER};
pub use band::{Band, BandError};
pub use selector::{CrossSystem, Pooled, Selector};
pub use synth::{DistortionBand, DistortionKind};
pub use system::{RadioSystem, SystemPair};
