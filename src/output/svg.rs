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

//! SVG band chart.
//!
//! The x axis is frequency, one unit per pixel. The top strip shows the
//! input bands (uplinks above downlinks). Below it, one row per distortion
//! product, grouped by order; each group ends with an axis line labelled
//! with the order and the product edges. Harmonics are stroked blue and IMD
//! products red.

use std::fmt;

use imd_core::{band, Band, DistortionBand, DistortionKind, Report, SystemPair};

const INPUT_STROKE: &str = "#000";
const HARMONIC_STROKE: &str = "#00f";
const IMD_STROKE: &str = "#f00";

/// Chart geometry in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgLayout {
    /// Height of one product row; input rows are half this
    pub rect_height: f64,
    /// Gap between order groups
    pub y_margin: f64,
    /// Vertical step between stacked labels
    pub text_offset: f64,
    /// Extra width right of the highest frequency
    pub right_padding: f64,
}

impl Default for SvgLayout {
    fn default() -> Self {
        Self {
            rect_height: 50.0,
            y_margin: 50.0,
            text_offset: 15.0,
            right_padding: 100.0,
        }
    }
}

/// Renders a sweep as an SVG document via [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct SvgChart<'a> {
    systems: &'a SystemPair,
    report: &'a Report,
    layout: SvgLayout,
}

impl<'a> SvgChart<'a> {
    #[must_use]
    pub fn new(systems: &'a SystemPair, report: &'a Report) -> Self {
        Self {
            systems,
            report,
            layout: SvgLayout::default(),
        }
    }

    /// Covers every drawn input band, including ones the sweep did not use.
    #[must_use]
    pub fn width(&self) -> f64 {
        let inputs = band::max_frequency(self.systems.all_bands());
        self.report.summary().max_frequency.max(inputs) + self.layout.right_padding
    }

    /// Top of the first product row
    fn products_top(&self) -> f64 {
        self.layout.rect_height + self.layout.text_offset + self.layout.y_margin
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        let l = &self.layout;
        let bands = self.report.bands();
        if bands.is_empty() {
            return self.products_top();
        }
        let rows = bands.len() as f64;
        let groups = order_groups(bands) as f64;
        let last_top = self.products_top() + (rows - 1.0) * l.rect_height + (groups - 1.0) * l.y_margin;
        // Closing axis plus its two label lines
        last_top + l.rect_height + 3.0 * l.text_offset
    }

    fn write_inputs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.layout;
        let half = l.rect_height / 2.0;
        let uplinks = self.systems.first.uplink.iter().chain(&self.systems.second.uplink);
        let downlinks = self.systems.first.downlink.iter().chain(&self.systems.second.downlink);

        for (bands, top) in [(uplinks, 0.0), (downlinks, half)] {
            for band in bands {
                write_rect(f, band, top, half, INPUT_STROKE)?;
                write_text(f, band.f_low(), top, band.name())?;
                write_text(f, band.f_low(), l.rect_height, &band.f_low().to_string())?;
                write_text(f, band.f_high(), l.rect_height + l.text_offset, &band.f_high().to_string())?;
            }
        }
        write_line(f, l.rect_height, self.width())
    }

    fn write_products(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.layout;
        let mut y = self.products_top();
        let mut group: Vec<&DistortionBand> = Vec::new();

        for (idx, product) in self.report.bands().iter().enumerate() {
            if idx > 0 {
                y += l.rect_height;
                if group.last().is_some_and(|prev| prev.order() != product.order()) {
                    self.write_axis(f, y, &group)?;
                    group.clear();
                    y += l.y_margin;
                }
            }

            let stroke = match product.kind() {
                DistortionKind::Harmonic => HARMONIC_STROKE,
                DistortionKind::Imd => IMD_STROKE,
            };
            write_rect(f, product.band(), y, l.rect_height, stroke)?;
            write_text(f, product.f_low(), y, product.name())?;
            write_text(f, product.f_low(), y + l.text_offset, &format!("{:.1}", product.f_low()))?;
            write_text(
                f,
                product.f_high(),
                y + 2.0 * l.text_offset,
                &format!("{:.1}", product.f_high()),
            )?;
            group.push(product);
        }

        if !group.is_empty() {
            self.write_axis(f, y + l.rect_height, &group)?;
        }
        Ok(())
    }

    fn write_axis(&self, f: &mut fmt::Formatter<'_>, y: f64, group: &[&DistortionBand]) -> fmt::Result {
        let Some(first) = group.first() else {
            return Ok(());
        };
        write_line(f, y, self.width())?;
        write_text(f, 0.0, y, &format!("Order: {}", first.order()))?;
        for product in group {
            write_text(f, product.f_low(), y, &format!("{:.1}", product.f_low()))?;
            write_text(
                f,
                product.f_high(),
                y + self.layout.text_offset,
                &format!("{:.1}", product.f_high()),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SvgChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif" font-size="10">"#,
            self.width(),
            self.height()
        )?;
        self.write_inputs(f)?;
        self.write_products(f)?;
        writeln!(f, "</svg>")
    }
}

/// Number of runs of equal order in an order-sorted list
fn order_groups(bands: &[DistortionBand]) -> usize {
    if bands.is_empty() {
        return 0;
    }
    1 + bands
        .windows(2)
        .filter(|pair| pair[0].order() != pair[1].order())
        .count()
}

/// Products may start below zero; only the visible part is drawn.
fn write_rect(f: &mut fmt::Formatter<'_>, band: &Band, y: f64, height: f64, stroke: &str) -> fmt::Result {
    let x = band.f_low().max(0.0);
    let width = (band.f_high() - x).max(0.0);
    writeln!(
        f,
        r#"  <rect x="{x}" y="{y}" width="{width}" height="{height}" stroke="{stroke}" fill="none"/>"#
    )
}

fn write_text(f: &mut fmt::Formatter<'_>, x: f64, y: f64, text: &str) -> fmt::Result {
    writeln!(
        f,
        r#"  <text x="{}" y="{y}" dominant-baseline="hanging">{}</text>"#,
        x.max(0.0),
        escape(text)
    )
}

fn write_line(f: &mut fmt::Formatter<'_>, y: f64, width: f64) -> fmt::Result {
    writeln!(
        f,
        r#"  <line x1="0" y1="{y}" x2="{width}" y2="{y}" stroke="{INPUT_STROKE}" stroke-width="1"/>"#
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use imd_core::RadioSystem;

    fn systems() -> SystemPair {
        SystemPair::new(
            RadioSystem::new(
                vec![Band::new("A", 100.0, 110.0).unwrap()],
                vec![Band::new("RXA", 400.0, 430.0).unwrap()],
            ),
            RadioSystem::new(
                vec![Band::new("B", 200.0, 210.0).unwrap()],
                vec![Band::new("RX<B>", 205.0, 215.0).unwrap()],
            ),
        )
    }

    #[test]
    fn test_document_shape() {
        let systems = systems();
        let report = systems.cross_system_plan(3).run();
        let svg = SvgChart::new(&systems, &report).to_string();

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="530""#));
        // A (order 2) and B (order 2) harmonics, 2A+B (order 3) IMD
        assert_eq!(svg.matches(HARMONIC_STROKE).count(), 2);
        assert_eq!(svg.matches(IMD_STROKE).count(), 1);
        assert!(svg.contains(">Order: 2<"));
        assert!(svg.contains(">Order: 3<"));
        assert!(svg.contains(">2A+B<"));
        assert!(svg.contains("RX&lt;B&gt;"));
    }

    #[test]
    fn test_height_accounts_for_groups() {
        let systems = systems();
        let report = systems.cross_system_plan(3).run();
        let chart = SvgChart::new(&systems, &report);
        // top 115; three rows, two groups: last top 115 + 100 + 50 = 265
        assert!((chart.height() - (265.0 + 50.0 + 45.0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let systems = SystemPair::default();
        let report = systems.cross_system_plan(3).run();
        let chart = SvgChart::new(&systems, &report);
        assert!((chart.height() - 115.0).abs() < 1e-9);
        let svg = chart.to_string();
        assert!(!svg.contains("Order:"));
    }

    #[test]
    fn test_negative_edge_clamped() {
        let systems = SystemPair::new(
            RadioSystem::new(
                vec![
                    Band::new("A", 100.0, 110.0).unwrap(),
                    Band::new("B", 105.0, 115.0).unwrap(),
                ],
                vec![Band::new("DC", 0.0, 20.0).unwrap()],
            ),
            RadioSystem::default(),
        );
        let report = systems.first.self_interference_plan(2).run();
        let svg = SvgChart::new(&systems, &report).to_string();
        // -A+B spans [-5, 15]
        assert!(svg.contains(r#"<rect x="0" y="115" width="15""#));
        assert!(svg.contains(">-5.0<"));
    }

    #[test]
    fn test_width_covers_unused_second_system() {
        let systems = systems();
        // Single-system sweep never sees RAT2, whose downlink still gets drawn
        let report = systems.first.self_interference_plan(3).run();
        assert!((report.summary().max_frequency - 430.0).abs() < 1e-9);

        let wide = SystemPair::new(
            systems.first.clone(),
            RadioSystem::new(vec![], vec![Band::new("far", 900.0, 950.0).unwrap()]),
        );
        let chart = SvgChart::new(&wide, &report);
        assert!((chart.width() - 1050.0).abs() < 1e-9);
        assert!(chart.to_string().contains(r#"width="1050""#));
    }

    #[test]
    fn test_order_groups() {
        assert_eq!(order_groups(&[]), 0);
    }
}
