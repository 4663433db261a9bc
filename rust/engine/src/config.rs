// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Default proximity admission distance to a reference path.
pub const DEFAULT_THRESHOLD_METERS: f64 = 30.0;

/// Default number of digits in a generated label.
pub const DEFAULT_PAD_WIDTH: usize = 3;

/// Shape of the rebuilt hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputShape {
    /// Zone → asset group → assets.
    #[default]
    Flat,
    /// Zone → one subgroup per boundary → assets.
    BoundaryNested,
}

/// What to do with assets that match neither rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnassignedFallback {
    /// Leave them unassigned.
    #[default]
    None,
    /// Assign to the zone owning the nearest boundary edge.
    NearestBoundaryExterior,
}

impl FromStr for OutputShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(OutputShape::Flat),
            "boundary-nested" => Ok(OutputShape::BoundaryNested),
            other => Err(format!(
                "unknown output shape '{}', expected 'flat' or 'boundary-nested'",
                other
            )),
        }
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputShape::Flat => "flat",
            OutputShape::BoundaryNested => "boundary-nested",
        })
    }
}

impl FromStr for UnassignedFallback {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(UnassignedFallback::None),
            "nearest-boundary-exterior" => Ok(UnassignedFallback::NearestBoundaryExterior),
            other => Err(format!(
                "unknown fallback '{}', expected 'none' or 'nearest-boundary-exterior'",
                other
            )),
        }
    }
}

impl fmt::Display for UnassignedFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnassignedFallback::None => "none",
            UnassignedFallback::NearestBoundaryExterior => "nearest-boundary-exterior",
        })
    }
}

/// Name markers used to recognise folders and records.
///
/// Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Prefix of zone folder names (`LINE A`, `LINE B`, ...).
    pub zone: String,
    /// Substring of the reference path record label.
    pub reference_path: String,
    /// Substring of boundary record labels.
    pub boundary: String,
    /// Name of folders holding assets; also names the flat output group.
    pub asset_group: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            zone: "LINE".into(),
            reference_path: "DISTRIBUTION CABLE".into(),
            boundary: "BOUNDARY".into(),
            asset_group: "POLE".into(),
        }
    }
}

/// Configuration of a classification and renumbering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningConfig {
    /// Maximum distance from a reference path, in meters.
    pub threshold_meters: f64,
    /// Label prefix; may be empty.
    pub prefix: String,
    /// Zero-padded digit count of the label counter.
    pub pad_width: usize,
    pub output_shape: OutputShape,
    pub unassigned_fallback: UnassignedFallback,
    pub markers: Markers,
}

impl Default for ZoningConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            prefix: String::new(),
            pad_width: DEFAULT_PAD_WIDTH,
            output_shape: OutputShape::default(),
            unassigned_fallback: UnassignedFallback::default(),
            markers: Markers::default(),
        }
    }
}

impl ZoningConfig {
    /// Check every option that can be checked before reading the document.
    pub fn validate(&self) -> Result<()> {
        if self.pad_width < 1 {
            return Err(ConfigurationError::PadWidth(self.pad_width).into());
        }
        if !self.threshold_meters.is_finite() || self.threshold_meters < 0.0 {
            return Err(ConfigurationError::Threshold(self.threshold_meters).into());
        }

        let markers = [
            ("zone", &self.markers.zone),
            ("reference path", &self.markers.reference_path),
            ("boundary", &self.markers.boundary),
            ("asset group", &self.markers.asset_group),
        ];
        for (what, value) in markers {
            if value.trim().is_empty() {
                return Err(ConfigurationError::EmptyMarker(what).into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_are_valid() {
        let config = ZoningConfig::default();
        assert_eq!(config.threshold_meters, 30.0);
        assert_eq!(config.pad_width, 3);
        assert!(config.prefix.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_pad_width_is_fatal() {
        let config = ZoningConfig {
            pad_width: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(Error::Configuration(ConfigurationError::PadWidth(0)))
        );
    }

    #[test]
    fn bad_threshold_is_fatal() {
        for threshold in [-1.0, f64::NAN, f64::INFINITY] {
            let config = ZoningConfig {
                threshold_meters: threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{threshold} accepted");
        }
    }

    #[test]
    fn blank_marker_is_fatal() {
        let mut config = ZoningConfig::default();
        config.markers.boundary = "  ".into();
        assert_eq!(
            config.validate(),
            Err(Error::Configuration(ConfigurationError::EmptyMarker(
                "boundary"
            )))
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ZoningConfig = serde_json::from_str(
            r#"{ "prefix": "MR.OATKRP.P", "output_shape": "boundary-nested",
                 "markers": { "zone": "JALUR" } }"#,
        )
        .unwrap();
        assert_eq!(config.prefix, "MR.OATKRP.P");
        assert_eq!(config.output_shape, OutputShape::BoundaryNested);
        assert_eq!(config.markers.zone, "JALUR");
        assert_eq!(config.markers.asset_group, "POLE");
        assert_eq!(config.pad_width, 3);
    }

    #[test]
    fn enum_names_parse() {
        assert_eq!("Boundary-Nested".parse(), Ok(OutputShape::BoundaryNested));
        assert_eq!(
            "nearest-boundary-exterior".parse(),
            Ok(UnassignedFallback::NearestBoundaryExterior)
        );
        assert!("nested".parse::<OutputShape>().is_err());
        assert_eq!(OutputShape::BoundaryNested.to_string(), "boundary-nested");
    }
}
