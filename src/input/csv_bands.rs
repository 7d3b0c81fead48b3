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

//! CSV band lists.
//!
//! One band per row with a header line:
//! ```text
//! system,link,name,f_low,f_high
//! 1,UL,B3,1710,1785
//! 2,DL,n78,3300,3800
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use imd_core::{Band, SystemPair};
use log::info;
use serde::Deserialize;

use super::{parse_link, parse_system, target, InputError};

/// Raw CSV row before validation
#[derive(Debug, Deserialize)]
struct BandRow {
    system: String,
    link: String,
    name: String,
    f_low: f64,
    f_high: f64,
}

/// Load bands from a CSV file
pub fn read_csv(path: &Path) -> Result<SystemPair, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv(BufReader::new(file))
}

/// Load bands from any CSV reader
pub fn parse_csv<R: Read>(reader: R) -> Result<SystemPair, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut systems = SystemPair::default();
    let mut count = 0;
    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: BandRow = result?;
        // Header is line 1
        let line = idx + 2;

        let slot = parse_system(&row.system).ok_or_else(|| InputError::InvalidValue {
            line,
            field: "system",
            value: row.system.clone(),
        })?;
        let link = parse_link(&row.link).ok_or_else(|| InputError::InvalidValue {
            line,
            field: "link",
            value: row.link.clone(),
        })?;
        let band = Band::new(row.name, row.f_low, row.f_high)
            .map_err(|source| InputError::Band { line, source })?;

        target(&mut systems, slot, link).push(band);
        count += 1;
    }

    info!("Loaded {count} bands from CSV");
    Ok(systems)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let data = "\
system,link,name,f_low,f_high
1,UL,B3,1710,1785
1, DL ,B3,1805,1880
RAT2,ul,n78,3300,3800
2,DL,n78,3300,3800
";
        let systems = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(systems.first.uplink[0], Band::new("B3", 1710.0, 1785.0).unwrap());
        assert_eq!(systems.first.downlink[0].name(), "B3");
        assert_eq!(systems.second.uplink[0].name(), "n78");
        assert_eq!(systems.second.downlink.len(), 1);
    }

    #[test]
    fn test_unknown_link_is_error() {
        let data = "system,link,name,f_low,f_high\n1,UL,A,1,2\n1,XX,B,1,2\n";
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            InputError::InvalidValue { line: 3, field: "link", .. }
        ));
    }

    #[test]
    fn test_inverted_band_is_error() {
        let data = "system,link,name,f_low,f_high\n2,DL,B,9,2\n";
        assert!(matches!(
            parse_csv(data.as_bytes()).unwrap_err(),
            InputError::Band { line: 2, .. }
        ));
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let data = "system,link,name,f_low,f_high\n1,UL,A,low,2\n";
        assert!(matches!(parse_csv(data.as_bytes()).unwrap_err(), InputError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = read_csv(Path::new("/nonexistent/imd-planner/bands.csv")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
