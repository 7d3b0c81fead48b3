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

//! Victim detection against protected downlink bands.

use crate::band::Band;
use crate::synth::DistortionBand;

/// Attach every downlink band that `candidate` overlaps, in list order.
///
/// Returns `None` when nothing overlaps; a product with no victims is not
/// reported.
#[must_use]
pub fn detect(mut candidate: DistortionBand, downlink: &[Band]) -> Option<DistortionBand> {
    for victim in downlink {
        if candidate.band().overlaps(victim) {
            candidate.push_victim(victim.clone());
        }
    }

    if candidate.victims().is_empty() {
        None
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{harmonic, intermod};

    fn band(name: &str, f_low: f64, f_high: f64) -> Band {
        Band::new(name, f_low, f_high).unwrap()
    }

    #[test]
    fn test_no_overlap_discarded() {
        let a = band("A", 100.0, 110.0);
        let b = band("B", 200.0, 210.0);
        let v = band("V", 605.0, 615.0);
        assert!(detect(intermod(&[&a, &b], &[1, 2]).unwrap(), &[v.clone()]).is_none());
        assert!(detect(intermod(&[&a, &b], &[2, 1]).unwrap(), &[v]).is_none());
    }

    #[test]
    fn test_overlap_retained() {
        let a = band("A", 100.0, 110.0);
        let b = band("B", 200.0, 210.0);
        let v = band("V", 415.0, 425.0);
        let hit = detect(intermod(&[&a, &b], &[2, 1]).unwrap(), &[v.clone()]).unwrap();
        assert_eq!(hit.victims(), &[v]);
    }

    #[test]
    fn test_victims_in_downlink_order() {
        let product = harmonic(&band("B", 100.0, 110.0), 2).unwrap();
        let downlink = [
            band("late", 215.0, 230.0),
            band("miss", 300.0, 310.0),
            band("early", 190.0, 201.0),
        ];
        let hit = detect(product, &downlink).unwrap();
        let names: Vec<&str> = hit.victims().iter().map(Band::name).collect();
        assert_eq!(names, vec!["late", "early"]);
    }

    #[test]
    fn test_empty_downlink_discards() {
        assert!(detect(harmonic(&band("B", 100.0, 110.0), 2).unwrap(), &[]).is_none());
    }

    #[test]
    fn test_edge_touch_counts() {
        let product = harmonic(&band("B", 100.0, 110.0), 2).unwrap();
        let hit = detect(product, &[band("V", 220.0, 230.0)]);
        assert!(hit.is_some());
    }
}
