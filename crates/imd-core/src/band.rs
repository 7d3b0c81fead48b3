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

//! Frequency band primitive.
//!
//! A [`Band`] is a labelled closed interval `[f_low, f_high]`. Units are
//! whatever the caller uses consistently (MHz in every bundled scenario).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a band from untrusted edges.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BandError {
    #[error("band '{name}' has f_low {f_low} above f_high {f_high}")]
    Inverted { name: String, f_low: f64, f_high: f64 },

    #[error("band '{name}' has a non-finite edge")]
    NonFinite { name: String },

    #[error("band '{name}' is too wide to represent")]
    UnboundedWidth { name: String },
}

/// A contiguous frequency interval with a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand", rename_all = "camelCase")]
pub struct Band {
    name: String,
    f_low: f64,
    f_high: f64,
}

/// Unchecked serde shape, validated through [`Band::new`].
#[derive(Deserialize)]
struct RawBand {
    name: String,
    #[serde(alias = "fLow")]
    f_low: f64,
    #[serde(alias = "fHigh")]
    f_high: f64,
}

impl TryFrom<RawBand> for Band {
    type Error = BandError;

    fn try_from(raw: RawBand) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.f_low, raw.f_high)
    }
}

impl Band {
    /// Create a band, rejecting inverted or non-finite edges and widths.
    pub fn new(name: impl Into<String>, f_low: f64, f_high: f64) -> Result<Self, BandError> {
        let name = name.into();
        if !f_low.is_finite() || !f_high.is_finite() {
            return Err(BandError::NonFinite { name });
        }
        if f_low > f_high {
            return Err(BandError::Inverted { name, f_low, f_high });
        }
        if !(f_high - f_low).is_finite() {
            return Err(BandError::UnboundedWidth { name });
        }
        Ok(Self { name, f_low, f_high })
    }

    /// Build a band whose edges are already known to be ordered.
    pub(crate) fn from_ordered(name: String, f_low: f64, f_high: f64) -> Self {
        debug_assert!(f_low <= f_high, "band edges out of order");
        Self { name, f_low, f_high }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn f_low(&self) -> f64 {
        self.f_low
    }

    #[must_use]
    pub fn f_high(&self) -> f64 {
        self.f_high
    }

    /// Midpoint of the band.
    #[must_use]
    pub fn center_frequency(&self) -> f64 {
        (self.f_low + self.f_high) / 2.0
    }

    /// Width of the band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.f_high - self.f_low
    }

    /// Closed-interval overlap test. Bands that only touch at an edge overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Band) -> bool {
        self.f_low <= other.f_high && other.f_low <= self.f_high
    }
}

/// Largest upper edge among `bands`, floored at zero.
#[must_use]
pub fn max_frequency<'a>(bands: impl IntoIterator<Item = &'a Band>) -> f64 {
    bands.into_iter().fold(0.0, |acc, band| acc.max(band.f_high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn band(name: &str, f_low: f64, f_high: f64) -> Band {
        Band::new(name, f_low, f_high).unwrap()
    }

    #[test]
    fn test_derived_quantities() {
        let b = band("B1", 1920.0, 1980.0);
        assert!((b.center_frequency() - 1950.0).abs() < 1e-9);
        assert!((b.bandwidth() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_width_rejected() {
        let err = Band::new("X", -1.7e308, 1.7e308).unwrap_err();
        assert_eq!(err, BandError::UnboundedWidth { name: "X".to_string() });
        assert!(Band::new("X", 0.0, 1.7e308).is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = Band::new("bad", 200.0, 100.0).unwrap_err();
        assert!(matches!(err, BandError::Inverted { ref name, .. } if name == "bad"));
    }

    #[test]
    fn test_non_finite_band_rejected() {
        assert!(matches!(
            Band::new("nan", f64::NAN, 1.0),
            Err(BandError::NonFinite { .. })
        ));
        assert!(matches!(
            Band::new("inf", 1.0, f64::INFINITY),
            Err(BandError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_zero_width_band_allowed() {
        let b = band("CW", 100.0, 100.0);
        assert!(b.bandwidth().abs() < f64::EPSILON);
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = band("A", 100.0, 110.0);
        let b = band("B", 110.0, 120.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_disjoint_bands_do_not_overlap() {
        let a = band("A", 100.0, 110.0);
        let b = band("B", 110.5, 120.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = band("outer", 100.0, 200.0);
        let inner = band("inner", 140.0, 150.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_max_frequency_floor() {
        assert!(max_frequency(std::iter::empty::<&Band>()).abs() < f64::EPSILON);
        let bands = [band("A", -50.0, -10.0)];
        assert!(max_frequency(&bands).abs() < f64::EPSILON);
        let bands = [band("A", 1.0, 5.0), band("B", 2.0, 9.0)];
        assert!((max_frequency(&bands) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Band = serde_json::from_str(r#"{"name":"B3","f_low":1710,"f_high":1785}"#).unwrap();
        assert_eq!(ok.name(), "B3");
        let camel: Band = serde_json::from_str(r#"{"name":"B3","fLow":1710,"fHigh":1785}"#).unwrap();
        assert_eq!(ok, camel);
        assert!(serde_json::from_str::<Band>(r#"{"name":"x","f_low":2,"f_high":1}"#).is_err());
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&band("B1", 1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"name":"B1","fLow":1.0,"fHigh":2.0}"#);
    }

    fn arb_band() -> impl Strategy<Value = Band> {
        (-1.0e4f64..1.0e4, 0.0f64..1.0e3).prop_map(|(f_low, width)| band("p", f_low, f_low + width))
    }

    proptest! {
        /// Overlap is symmetric.
        #[test]
        fn overlap_symmetric(a in arb_band(), b in arb_band()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        /// Every band overlaps itself.
        #[test]
        fn overlap_reflexive(a in arb_band()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
