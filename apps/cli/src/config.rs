// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zoning configuration loaded from a file, environment variables and flags.
//!
//! Later sources win: defaults, then `--config`, then `POLELINE_*`
//! variables, then individual flags.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use poleline_engine::{OutputShape, UnassignedFallback, ZoningConfig};

pub const ENV_THRESHOLD_METERS: &str = "POLELINE_THRESHOLD_METERS";
pub const ENV_PREFIX: &str = "POLELINE_PREFIX";
pub const ENV_PAD_WIDTH: &str = "POLELINE_PAD_WIDTH";
pub const ENV_OUTPUT_SHAPE: &str = "POLELINE_OUTPUT_SHAPE";
pub const ENV_FALLBACK: &str = "POLELINE_FALLBACK";

/// Zoning flags shared by the subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ZoningArgs {
    /// JSON file holding a zoning configuration (markers included).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum distance to a line's distribution cable, in meters.
    #[arg(long, value_name = "METERS")]
    pub threshold: Option<f64>,

    /// Prefix of the generated labels.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Digits of the zero-padded counter.
    #[arg(long, value_name = "DIGITS")]
    pub pad_width: Option<usize>,

    /// Output shape: flat or boundary-nested.
    #[arg(long, value_name = "SHAPE")]
    pub shape: Option<OutputShape>,

    /// Unassigned asset policy: none or nearest-boundary-exterior.
    #[arg(long, value_name = "MODE")]
    pub fallback: Option<UnassignedFallback>,
}

impl ZoningArgs {
    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<ZoningConfig> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve with a custom variable lookup.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ZoningConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ZoningConfig::default(),
        };

        override_from(&lookup, ENV_THRESHOLD_METERS, &mut config.threshold_meters);
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.prefix = prefix;
        }
        override_from(&lookup, ENV_PAD_WIDTH, &mut config.pad_width);
        override_from(&lookup, ENV_OUTPUT_SHAPE, &mut config.output_shape);
        override_from(&lookup, ENV_FALLBACK, &mut config.unassigned_fallback);

        if let Some(threshold) = self.threshold {
            config.threshold_meters = threshold;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(pad_width) = self.pad_width {
            config.pad_width = pad_width;
        }
        if let Some(shape) = self.shape {
            config.output_shape = shape;
        }
        if let Some(fallback) = self.fallback {
            config.unassigned_fallback = fallback;
        }

        tracing::debug!(
            threshold_meters = config.threshold_meters,
            prefix = %config.prefix,
            pad_width = config.pad_width,
            shape = %config.output_shape,
            fallback = %config.unassigned_fallback,
            "Resolved zoning configuration"
        );
        Ok(config)
    }
}

/// Read a JSON zoning configuration; missing fields take their defaults.
pub fn load_config_file(path: &Path) -> Result<ZoningConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Unparsable values are ignored with a warning, keeping the previous value.
fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(variable = key, value = %raw, "Ignoring unparsable setting"),
    }
}
