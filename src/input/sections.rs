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

//! Section file parser.
//!
//! Format:
//! ```text
//! ; comment
//! [RAT1 UL]
//! B1 = 1920 1980
//! [RAT1 DL]
//! B1 = 2110 2170
//! ```
//!
//! Section headers name a system (`RAT1`/`RAT2`) and a link (`UL`/`DL`).
//! Entries use `=` or `:` between band name and the two edge frequencies.

use imd_core::{Band, SystemPair};
use log::{debug, warn};

use super::{parse_link, parse_system, target, InputError, Link, SystemSlot};

/// Parse a section file into the two radio systems it describes.
///
/// Entries that do not hold exactly two values are skipped with a warning.
/// Unparseable numbers and inverted bands are errors.
pub fn parse_sections(text: &str) -> Result<SystemPair, InputError> {
    let mut systems = SystemPair::default();
    let mut section: Option<(SystemSlot, Link)> = None;
    let mut seen_header = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or_else(|| InputError::Syntax {
                line: line_no,
                message: format!("unterminated section header '{line}'"),
            })?;
            section = parse_header(header);
            seen_header = true;
            if section.is_none() {
                debug!("Ignoring section [{header}] on line {line_no}");
            }
            continue;
        }

        let Some((name, value)) = line.split_once(['=', ':']) else {
            return Err(InputError::Syntax {
                line: line_no,
                message: format!("expected 'name = f_low f_high', found '{line}'"),
            });
        };

        // Entries under an unrecognised section are skipped
        let Some((slot, link)) = section else {
            if !seen_header {
                return Err(InputError::Syntax {
                    line: line_no,
                    message: "entry outside of any section".to_string(),
                });
            }
            continue;
        };

        let name = name.trim();
        let values: Vec<&str> = value.split_whitespace().collect();
        if values.len() != 2 {
            warn!(
                "Skipping '{name}' on line {line_no}: expected 2 frequencies, found {}",
                values.len()
            );
            continue;
        }

        let f_low = parse_frequency(values[0], "f_low", line_no)?;
        let f_high = parse_frequency(values[1], "f_high", line_no)?;
        let band = Band::new(name, f_low, f_high).map_err(|source| InputError::Band {
            line: line_no,
            source,
        })?;
        target(&mut systems, slot, link).push(band);
    }

    Ok(systems)
}

/// `RAT1 UL`, `rat2 dl`, `RAT1-UL` and similar.
fn parse_header(header: &str) -> Option<(SystemSlot, Link)> {
    let mut parts = header.split([' ', '-', '_']).filter(|p| !p.is_empty());
    let slot = parse_system(parts.next()?)?;
    let link = parse_link(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((slot, link))
}

fn parse_frequency(value: &str, field: &'static str, line: usize) -> Result<f64, InputError> {
    value.parse::<f64>().map_err(|source| InputError::BadNumber {
        line,
        field,
        value: value.to_string(),
        source,
    })
}
