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

//! Coefficient enumeration for intermodulation products.
//!
//! An IMD product of order `n` over `k` bands is described by `k` non-zero
//! integer coefficients whose magnitudes sum to `n`. The magnitudes are the
//! integer compositions of `n` into `k` parts; the signs are every
//! `+1`/`-1` assignment over the `k` slots.

/// Ordered integer compositions of `target_sum` into `num_parts` parts, each
/// part at least 1.
///
/// Output is ascending by first element, recursively. Returns an empty list
/// when no composition exists (`target_sum < num_parts`, or zero parts).
///
/// ```
/// use imd_core::partition::compositions;
///
/// assert_eq!(compositions(4, 2), vec![vec![1, 3], vec![2, 2], vec![3, 1]]);
/// assert!(compositions(2, 3).is_empty());
/// ```
#[must_use]
pub fn compositions(target_sum: u32, num_parts: u32) -> Vec<Vec<u32>> {
    if num_parts == 0 || target_sum < num_parts {
        return Vec::new();
    }
    if num_parts == 1 {
        return vec![vec![target_sum]];
    }

    let mut combs = Vec::new();
    for first in 1..=target_sum - (num_parts - 1) {
        for rest in compositions(target_sum - first, num_parts - 1) {
            let mut comb = Vec::with_capacity(num_parts as usize);
            comb.push(first);
            comb.extend(rest);
            combs.push(comb);
        }
    }
    combs
}

/// All `2^num_parts` sign assignments over `num_parts` slots.
///
/// Vector `idx` carries `-1` in slot `i` exactly when bit `i` of `idx` is
/// set, so the first slot flips fastest: `[+,+], [-,+], [+,-], [-,-]`.
#[must_use]
pub fn sign_vectors(num_parts: u32) -> Vec<Vec<i32>> {
    let count = 1_usize << num_parts;
    (0..count)
        .map(|idx| {
            (0..num_parts)
                .map(|slot| if (idx >> slot) & 1 == 0 { 1 } else { -1 })
                .collect()
        })
        .collect()
}

/// Every signed coefficient vector for an `order`-th product over
/// `num_bands` bands, composition-major then sign-minor.
///
/// Mirror images (`[1, -2]` and `[-1, 2]`) are both present.
#[must_use]
pub fn signed_coefficients(order: u32, num_bands: u32) -> Vec<Vec<i32>> {
    let magnitudes = compositions(order, num_bands);
    if magnitudes.is_empty() {
        return Vec::new();
    }
    let signs = sign_vectors(num_bands);

    let mut out = Vec::with_capacity(magnitudes.len() * signs.len());
    for parts in &magnitudes {
        for sign in &signs {
            out.push(
                parts
                    .iter()
                    .zip(sign)
                    .map(|(&mag, &s)| s * i32::try_from(mag).unwrap_or(i32::MAX))
                    .collect(),
            );
        }
    }
    out
}
