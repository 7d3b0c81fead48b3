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

//! Result renderers: JSON dump and SVG chart.

mod json;
mod svg;

pub use json::to_json;
pub use svg::SvgChart;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::info;

/// Write `contents` to `target`, or to stdout when `target` is `-`.
pub fn write_output(target: &Path, contents: &str) -> io::Result<()> {
    if target == Path::new("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(contents.as_bytes())?;
        if !contents.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        return stdout.flush();
    }

    fs::write(target, contents)?;
    info!("Wrote {} bytes to {}", contents.len(), target.display());
    Ok(())
}
