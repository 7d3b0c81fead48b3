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

//! Combination selection for intermodulation products.
//!
//! A selector decides which tuples of uplink bands mix together. Two
//! strategies ship with the crate:
//!
//! - [`Pooled`]: every unordered choice of `k` distinct bands from one list
//! - [`CrossSystem`]: one band from each of two systems (`k == 2` only)

use std::fmt;

use crate::band::Band;

/// Strategy for picking the band tuples that participate in a product.
///
/// Implement this trait to model other mixing scenarios.
pub trait Selector: fmt::Debug {
    /// Every tuple of `num_bands` bands to mix, in a stable order.
    fn select(&self, num_bands: u32) -> Vec<Vec<&Band>>;

    /// All uplink bands this selector draws from.
    fn bands(&self) -> Vec<&Band>;
}

/// Unordered choices of distinct bands from a single pooled list.
#[derive(Debug, Clone, Default)]
pub struct Pooled {
    bands: Vec<Band>,
}

impl Pooled {
    #[must_use]
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }
}

impl Selector for Pooled {
    fn select(&self, num_bands: u32) -> Vec<Vec<&Band>> {
        choose(&self.bands, num_bands as usize)
    }

    fn bands(&self) -> Vec<&Band> {
        self.bands.iter().collect()
    }
}

/// One band from each of two uplink systems.
#[derive(Debug, Clone, Default)]
pub struct CrossSystem {
    first: Vec<Band>,
    second: Vec<Band>,
}

impl CrossSystem {
    #[must_use]
    pub fn new(first: Vec<Band>, second: Vec<Band>) -> Self {
        Self { first, second }
    }
}

impl Selector for CrossSystem {
    /// Pairs `(a, b)` with `a` from the first system (outer loop) and `b`
    /// from the second. Any other tuple size yields nothing.
    fn select(&self, num_bands: u32) -> Vec<Vec<&Band>> {
        if num_bands != 2 {
            return Vec::new();
        }
        self.first
            .iter()
            .flat_map(|a| self.second.iter().map(move |b| vec![a, b]))
            .collect()
    }

    fn bands(&self) -> Vec<&Band> {
        self.first.iter().chain(&self.second).collect()
    }
}

/// `k`-combinations of `items` in lexicographic index order.
fn choose<T>(items: &[T], k: usize) -> Vec<Vec<&T>> {
    let n = items.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.iter().map(|&i| &items[i]).collect());

        // Rightmost slot that can still advance
        let Some(slot) = (0..k).rev().find(|&s| idx[s] != s + n - k) else {
            break;
        };
        idx[slot] += 1;
        for next in slot + 1..k {
            idx[next] = idx[next - 1] + 1;
        }
    }
    out
}
