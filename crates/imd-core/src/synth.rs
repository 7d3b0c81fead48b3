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

//! Distortion product synthesis.
//!
//! A product's center is the signed, coefficient-weighted sum of the
//! contributing centers. Its bandwidth is the magnitude-weighted sum of the
//! contributing bandwidths, so the product spans every frequency the mix can
//! reach.

use std::fmt::Write as _;

use serde::Serialize;

use crate::band::Band;

/// Distortion mechanism that produced a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DistortionKind {
    /// Integer multiple of a single uplink band.
    Harmonic,
    /// Signed mix of two or more uplink bands.
    #[serde(rename = "IMD")]
    Imd,
}

/// A computed distortion product and the downlink bands it lands on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistortionBand {
    #[serde(flatten)]
    band: Band,
    kind: DistortionKind,
    order: u32,
    victims: Vec<Band>,
}

impl DistortionBand {
    /// The frequency range and label of the product.
    #[must_use]
    pub fn band(&self) -> &Band {
        &self.band
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.band.name()
    }

    #[must_use]
    pub fn f_low(&self) -> f64 {
        self.band.f_low()
    }

    #[must_use]
    pub fn f_high(&self) -> f64 {
        self.band.f_high()
    }

    #[must_use]
    pub fn kind(&self) -> DistortionKind {
        self.kind
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Downlink bands overlapped by this product, in detection order.
    #[must_use]
    pub fn victims(&self) -> &[Band] {
        &self.victims
    }

    pub(crate) fn push_victim(&mut self, victim: Band) {
        self.victims.push(victim);
    }
}

/// `order`-th harmonic of `band`: center and bandwidth both scale by `order`.
///
/// The label is the source band's name; the order is carried separately.
/// Returns `None` when the scaled range no longer fits in an `f64`.
#[must_use]
pub fn harmonic(band: &Band, order: u32) -> Option<DistortionBand> {
    let factor = f64::from(order);
    let center = factor * band.center_frequency();
    let bandwidth = factor * band.bandwidth();
    Some(DistortionBand {
        band: span(band.name().to_string(), center, bandwidth)?,
        kind: DistortionKind::Harmonic,
        order,
        victims: Vec::new(),
    })
}

/// Intermodulation product of `bands` weighted by signed `coeffs`.
///
/// The order is the sum of coefficient magnitudes. Returns `None` when the
/// mixed range overflows. Panics if the two slices differ in length.
///
/// ```
/// use imd_core::{synth, Band};
///
/// let a = Band::new("A", 100.0, 110.0).unwrap();
/// let b = Band::new("B", 200.0, 210.0).unwrap();
/// let product = synth::intermod(&[&a, &b], &[1, -2]).unwrap();
/// assert_eq!(product.name(), "A-2B");
/// assert_eq!(product.order(), 3);
/// ```
#[must_use]
pub fn intermod(bands: &[&Band], coeffs: &[i32]) -> Option<DistortionBand> {
    assert_eq!(
        bands.len(),
        coeffs.len(),
        "band combination and coefficient vector differ in length"
    );

    let mut center = 0.0;
    let mut bandwidth = 0.0;
    for (band, &coeff) in bands.iter().zip(coeffs) {
        center += f64::from(coeff) * band.center_frequency();
        bandwidth += f64::from(coeff.unsigned_abs()) * band.bandwidth();
    }

    Some(DistortionBand {
        band: span(product_name(bands, coeffs), center, bandwidth)?,
        kind: DistortionKind::Imd,
        order: coeffs.iter().map(|c| c.unsigned_abs()).sum(),
        victims: Vec::new(),
    })
}

/// Label like `A-2B+C`: one signed term per band, magnitude omitted when 1,
/// leading `+` dropped.
fn product_name(bands: &[&Band], coeffs: &[i32]) -> String {
    let mut name = String::new();
    for (band, &coeff) in bands.iter().zip(coeffs) {
        name.push(if coeff > 0 { '+' } else { '-' });
        let magnitude = coeff.unsigned_abs();
        if magnitude != 1 {
            let _ = write!(name, "{magnitude}");
        }
        name.push_str(band.name());
    }
    match name.strip_prefix('+') {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

fn span(name: String, center: f64, bandwidth: f64) -> Option<Band> {
    let f_low = center - bandwidth / 2.0;
    let f_high = f_low + bandwidth;
    (f_low.is_finite() && f_high.is_finite()).then(|| Band::from_ordered(name, f_low, f_high))
}
