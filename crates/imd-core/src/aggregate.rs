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

//! Order sweep and result aggregation.
//!
//! The [`Aggregator`] holds a set of jobs, each pairing an uplink source with
//! the downlink list it threatens, and sweeps every order from 2 up to the
//! configured maximum. The result is a [`Report`]: harmonics followed by IMD
//! products, stably sorted by order, plus the summary scalars a renderer
//! needs to size its canvas.

use log::{debug, info, warn};
use serde::Serialize;

use crate::band::{self, Band};
use crate::partition::signed_coefficients;
use crate::selector::Selector;
use crate::synth::{self, DistortionBand, DistortionKind};
use crate::victim;

/// Lowest order a distortion product can have.
pub const MIN_ORDER: u32 = 2;

/// Harmonics of every `uplink` band checked against `downlink`.
#[derive(Debug, Clone)]
struct HarmonicJob {
    uplink: Vec<Band>,
    downlink: Vec<Band>,
}

/// IMD products of the selector's combinations checked against `downlink`.
#[derive(Debug)]
struct ImdJob {
    selector: Box<dyn Selector>,
    downlink: Vec<Band>,
}

/// Extremes over inputs and retained products.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Largest upper edge seen, floored at zero.
    pub max_frequency: f64,
    /// Highest order among retained products, zero if none.
    pub max_order: u32,
}

/// Outcome of one sweep.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Report {
    bands: Vec<DistortionBand>,
    summary: Summary,
}

impl Report {
    /// All retained products, ascending by order.
    #[must_use]
    pub fn bands(&self) -> &[DistortionBand] {
        &self.bands
    }

    pub fn harmonics(&self) -> impl Iterator<Item = &DistortionBand> {
        self.of_kind(DistortionKind::Harmonic)
    }

    pub fn imd(&self) -> impl Iterator<Item = &DistortionBand> {
        self.of_kind(DistortionKind::Imd)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    fn of_kind(&self, kind: DistortionKind) -> impl Iterator<Item = &DistortionBand> {
        self.bands.iter().filter(move |b| b.kind() == kind)
    }
}

/// Drives harmonic and IMD generation across orders.
///
/// ```
/// use imd_core::{Aggregator, Band, Pooled};
///
/// let ul = vec![
///     Band::new("A", 100.0, 110.0).unwrap(),
///     Band::new("B", 200.0, 210.0).unwrap(),
/// ];
/// let dl = vec![Band::new("V", 415.0, 425.0).unwrap()];
///
/// let report = Aggregator::new(3)
///     .with_imd(Pooled::new(ul), dl)
///     .run();
/// assert_eq!(report.bands()[0].name(), "2A+B");
/// ```
#[derive(Debug)]
pub struct Aggregator {
    max_order: u32,
    harmonic_jobs: Vec<HarmonicJob>,
    imd_jobs: Vec<ImdJob>,
}

impl Aggregator {
    #[must_use]
    pub fn new(max_order: u32) -> Self {
        Self {
            max_order,
            harmonic_jobs: Vec::new(),
            imd_jobs: Vec::new(),
        }
    }

    #[must_use]
    pub fn max_order(&self) -> u32 {
        self.max_order
    }

    /// Register harmonics of `uplink` against `downlink`.
    #[must_use]
    pub fn with_harmonics(mut self, uplink: Vec<Band>, downlink: Vec<Band>) -> Self {
        self.harmonic_jobs.push(HarmonicJob { uplink, downlink });
        self
    }

    /// Register IMD over `selector`'s combinations against `downlink`.
    #[must_use]
    pub fn with_imd(mut self, selector: impl Selector + 'static, downlink: Vec<Band>) -> Self {
        self.imd_jobs.push(ImdJob {
            selector: Box::new(selector),
            downlink,
        });
        self
    }

    /// Run the full sweep. Calling this repeatedly yields identical reports.
    #[must_use]
    pub fn run(&self) -> Report {
        if self.max_order < MIN_ORDER {
            warn!(
                "Maximum order {} is below {MIN_ORDER}; nothing to compute",
                self.max_order
            );
            return Report {
                bands: Vec::new(),
                summary: Summary {
                    max_frequency: self.input_max_frequency(),
                    max_order: 0,
                },
            };
        }

        let mut harmonics = Vec::new();
        let mut imd = Vec::new();

        for order in MIN_ORDER..=self.max_order {
            for job in &self.harmonic_jobs {
                let before = harmonics.len();
                harmonics.extend(
                    job.uplink
                        .iter()
                        .filter_map(|ul| synth::harmonic(ul, order))
                        .filter_map(|product| victim::detect(product, &job.downlink)),
                );
                debug!(
                    "Order {order} harmonics: {} of {} uplink bands hit a victim",
                    harmonics.len() - before,
                    job.uplink.len()
                );
            }

            for num_bands in MIN_ORDER..=order {
                let selections: Vec<(&ImdJob, Vec<Vec<&Band>>)> = self
                    .imd_jobs
                    .iter()
                    .map(|job| (job, job.selector.select(num_bands)))
                    .filter(|(_, combos)| !combos.is_empty())
                    .collect();
                // Skip band counts no job can fill
                if selections.is_empty() {
                    continue;
                }

                let coeffs = signed_coefficients(order, num_bands);
                if coeffs.is_empty() {
                    debug!("No coefficient vectors for order {order} over {num_bands} bands");
                    continue;
                }
                for (job, combos) in &selections {
                    let before = imd.len();
                    for combo in combos {
                        imd.extend(
                            coeffs
                                .iter()
                                .filter_map(|coeff| synth::intermod(combo, coeff))
                                .filter_map(|product| victim::detect(product, &job.downlink)),
                        );
                    }
                    debug!(
                        "Order {order}, {num_bands} bands: {} combinations x {} coefficient vectors, {} retained",
                        combos.len(),
                        coeffs.len(),
                        imd.len() - before
                    );
                }
            }
        }

        info!(
            "Sweep to order {} retained {} harmonic and {} IMD products",
            self.max_order,
            harmonics.len(),
            imd.len()
        );

        let mut bands = harmonics;
        bands.append(&mut imd);
        // Vec::sort_by_key is stable
        bands.sort_by_key(DistortionBand::order);

        let max_frequency = self
            .input_max_frequency()
            .max(band::max_frequency(bands.iter().map(DistortionBand::band)));
        let max_order = bands.iter().map(DistortionBand::order).max().unwrap_or(0);

        Report {
            bands,
            summary: Summary {
                max_frequency,
                max_order,
            },
        }
    }

    fn input_max_frequency(&self) -> f64 {
        let harmonic_inputs = self
            .harmonic_jobs
            .iter()
            .flat_map(|job| job.uplink.iter().chain(&job.downlink));
        let imd_inputs = self
            .imd_jobs
            .iter()
            .flat_map(|job| job.selector.bands().into_iter().chain(&job.downlink));
        band::max_frequency(harmonic_inputs.chain(imd_inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{CrossSystem, Pooled};

    fn band(name: &str, f_low: f64, f_high: f64) -> Band {
        Band::new(name, f_low, f_high).unwrap()
    }

    #[test]
    fn test_below_min_order_is_empty() {
        let report = Aggregator::new(1)
            .with_harmonics(vec![band("A", 100.0, 110.0)], vec![band("V", 0.0, 1000.0)])
            .run();
        assert!(report.is_empty());
        assert_eq!(report.summary().max_order, 0);
        assert!((report.summary().max_frequency - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_harmonics_across_orders() {
        let report = Aggregator::new(4)
            .with_harmonics(vec![band("A", 100.0, 110.0)], vec![band("V", 0.0, 1000.0)])
            .run();
        let orders: Vec<u32> = report.harmonics().map(DistortionBand::order).collect();
        assert_eq!(orders, vec![2, 3, 4]);
        assert_eq!(report.imd().count(), 0);
        assert_eq!(report.summary().max_order, 4);
        assert!((report.summary().max_frequency - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_harmonics_precede_imd_within_order() {
        let ul = vec![band("A", 100.0, 110.0), band("B", 200.0, 210.0)];
        let dl = vec![band("wide", 0.0, 2000.0)];
        let report = Aggregator::new(2)
            .with_imd(Pooled::new(ul.clone()), dl.clone())
            .with_harmonics(ul, dl)
            .run();

        let kinds: Vec<DistortionKind> = report.bands().iter().map(DistortionBand::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DistortionKind::Harmonic,
                DistortionKind::Harmonic,
                DistortionKind::Imd,
                DistortionKind::Imd,
            ]
        );
        let names: Vec<&str> = report.bands().iter().map(DistortionBand::name).collect();
        // Only A+B and -A+B land in [0, 2000]
        assert_eq!(names, vec!["A", "B", "A+B", "-A+B"]);
    }

    #[test]
    fn test_max_frequency_includes_products() {
        let report = Aggregator::new(3)
            .with_harmonics(vec![band("A", 100.0, 110.0)], vec![band("V", 320.0, 340.0)])
            .run();
        assert_eq!(report.len(), 1);
        assert!((report.summary().max_frequency - 340.0).abs() < 1e-9);
        assert_eq!(report.summary().max_order, 3);
    }

    #[test]
    fn test_cross_system_only_uses_pairs() {
        let report = Aggregator::new(3)
            .with_imd(
                CrossSystem::new(vec![band("A", 100.0, 110.0)], vec![band("B", 200.0, 210.0)]),
                vec![band("V", 415.0, 425.0)],
            )
            .run();
        let names: Vec<&str> = report.bands().iter().map(DistortionBand::name).collect();
        assert_eq!(names, vec!["2A+B"]);
        assert_eq!(report.bands()[0].order(), 3);
    }

    #[test]
    fn test_high_order_cross_system_sweep_completes() {
        let report = Aggregator::new(30)
            .with_imd(
                CrossSystem::new(vec![band("A", 100.0, 110.0)], vec![band("B", 200.0, 210.0)]),
                vec![band("wide", 0.0, 1.0e5)],
            )
            .run();
        assert!(!report.is_empty());
        assert!(report.bands().iter().all(|p| p.kind() == DistortionKind::Imd));
        assert_eq!(report.summary().max_order, 30);
    }

    #[test]
    fn test_overflowing_products_skipped() {
        let huge = band("X", 0.0, 1.7e308);
        let report = Aggregator::new(3)
            .with_harmonics(vec![huge.clone()], vec![huge.clone()])
            .with_imd(Pooled::new(vec![huge.clone(), band("A", 1.0, 2.0)]), vec![huge])
            .run();
        assert!(report
            .bands()
            .iter()
            .all(|p| p.f_low().is_finite() && p.f_high().is_finite() && p.f_low() <= p.f_high()));
        assert!(report.harmonics().next().is_none());
    }

    #[test]
    fn test_report_serializes_summary() {
        let report = Aggregator::new(2)
            .with_harmonics(vec![band("A", 100.0, 110.0)], vec![band("V", 200.0, 201.0)])
            .run();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["summary"]["maxOrder"], 2);
        assert_eq!(value["bands"][0]["kind"], "Harmonic");
    }
}
