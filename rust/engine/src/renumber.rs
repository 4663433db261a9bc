// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global renumbering.
//!
//! Two steps: sort all assignments into one (zone, ordering key) sequence,
//! then fold a single counter over it. The counter never resets per zone.

use crate::classifier::Assignment;
use crate::error::{ConfigurationError, Result};

/// An assignment with its new label.
#[derive(Debug)]
pub struct Labeled<'a, T> {
    pub assignment: Assignment<'a, T>,
    /// 1-based position in the global sequence.
    pub sequence: u64,
    pub label: String,
}

/// Largest counter value that fits in `pad_width` digits.
///
/// `None` when the width is too large to ever overflow.
pub fn label_capacity(pad_width: usize) -> Option<u64> {
    u32::try_from(pad_width)
        .ok()
        .and_then(|w| 10u64.checked_pow(w))
        .map(|limit| limit - 1)
}

/// Format one label: prefix followed by the zero-padded counter.
pub fn format_label(prefix: &str, counter: u64, pad_width: usize) -> String {
    format!("{}{:0width$}", prefix, counter, width = pad_width)
}

/// Sort assignments globally and label them `prefix + counter`.
///
/// Zones sort by name (plain string order), assets within a zone by
/// ordering key; equal keys keep their input order. Fails instead of
/// producing a label wider than `pad_width`.
pub fn renumber<'a, T>(
    assignments: Vec<Assignment<'a, T>>,
    prefix: &str,
    pad_width: usize,
) -> Result<Vec<Labeled<'a, T>>> {
    if pad_width < 1 {
        return Err(ConfigurationError::PadWidth(pad_width).into());
    }
    if let Some(capacity) = label_capacity(pad_width) {
        if assignments.len() as u64 > capacity {
            return Err(ConfigurationError::CounterOverflow {
                count: assignments.len(),
                pad_width,
                capacity,
            }
            .into());
        }
    }

    let mut ordered = assignments;
    ordered.sort_by(|a, b| {
        a.zone
            .cmp(&b.zone)
            .then_with(|| a.ordering_key.total_cmp(&b.ordering_key))
    });

    let labeled: Vec<_> = ordered
        .into_iter()
        .zip(1u64..)
        .map(|(assignment, sequence)| Labeled {
            label: format_label(prefix, sequence, pad_width),
            sequence,
            assignment,
        })
        .collect();

    tracing::debug!(count = labeled.len(), prefix, pad_width, "Renumbered assets");
    Ok(labeled)
}
