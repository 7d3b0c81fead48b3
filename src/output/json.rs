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

//! JSON dump of a sweep.

use imd_core::{DistortionBand, Report, Summary, SystemPair};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Distortion<'a> {
    harmonics: Vec<&'a DistortionBand>,
    imd: Vec<&'a DistortionBand>,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    systems: &'a SystemPair,
    distortion: Distortion<'a>,
    summary: Summary,
}

/// Pretty-printed `{ systems, distortion: { harmonics, imd }, summary }`.
pub fn to_json(systems: &SystemPair, report: &Report) -> serde_json::Result<String> {
    let doc = JsonReport {
        systems,
        distortion: Distortion {
            harmonics: report.harmonics().collect(),
            imd: report.imd().collect(),
        },
        summary: report.summary(),
    };
    serde_json::to_string_pretty(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imd_core::{Band, RadioSystem};

    #[test]
    fn test_json_layout() {
        let systems = SystemPair::new(
            RadioSystem::new(
                vec![Band::new("A", 100.0, 110.0).unwrap()],
                vec![Band::new("RXA", 400.0, 430.0).unwrap()],
            ),
            RadioSystem::new(
                vec![Band::new("B", 200.0, 210.0).unwrap()],
                vec![Band::new("RXB", 205.0, 215.0).unwrap()],
            ),
        );
        let report = systems.cross_system_plan(3).run();
        let text = to_json(&systems, &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["systems"]["first"]["uplink"][0]["name"], "A");
        assert_eq!(value["distortion"]["harmonics"][0]["name"], "A");
        assert_eq!(value["distortion"]["harmonics"][0]["victims"][0]["name"], "RXB");
        assert!(value["distortion"]["imd"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["kind"] == "IMD"));
        assert_eq!(value["summary"]["maxOrder"], 3);
    }
}
