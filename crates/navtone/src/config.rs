//! Detector tuning: timings, sample geometry and classification thresholds.
//!
//! Every field has a default matching the behavior a 60fps marketing site
//! header expects, so a YAML file only needs to name what it changes:
//!
//! ```rust
//! use navtone::DetectorConfig;
//!
//! let config = DetectorConfig::from_yaml("debounce_ms: 33\nroot_route: /home").unwrap();
//! assert_eq!(config.debounce_ms, 33);
//! assert_eq!(config.settle_ms, 100);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Tuning knobs for the contrast detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Shared debounce window for scroll, resize and mutation triggers.
    pub debounce_ms: u64,
    /// Delay before the first pass after mount, letting layout settle.
    pub settle_ms: u64,
    /// Navigation bar height assumed until the bar has measured itself.
    pub default_nav_height: f64,
    /// Distance below the navigation bar at which the top samples are taken.
    pub below_nav_offset: f64,
    /// Horizontal inset of the left and right samples.
    pub edge_inset: f64,
    /// Distance from the viewport bottom of the lower sample.
    pub bottom_inset: f64,
    /// Scroll offset beyond which the root route counts as scrolled.
    pub scroll_threshold: f64,
    /// Brightness below which a solid color is dark.
    pub brightness_threshold: f64,
    /// How many ancestors are inspected when an element is not dark itself.
    pub ancestor_depth: usize,
    /// The route on which the bar may be transparent.
    pub root_route: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 16, // one frame at 60fps
            settle_ms: 100,
            default_nav_height: 80.0,
            below_nav_offset: 10.0,
            edge_inset: 100.0,
            bottom_inset: 100.0,
            scroll_threshold: 10.0,
            brightness_threshold: 150.0,
            ancestor_depth: 3,
            root_route: "/".to_string(),
        }
    }
}

impl DetectorConfig {
    /// Parses a config from YAML, filling omitted fields with defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DetectorConfig =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
                what: "detector config",
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// The debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The settle delay as a [`Duration`].
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// True if `route` is the root route.
    pub fn is_root(&self, route: &str) -> bool {
        normalize_route(route) == normalize_route(&self.root_route)
    }

    /// Checks that distances and thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("default_nav_height", self.default_nav_height),
            ("below_nav_offset", self.below_nav_offset),
            ("edge_inset", self.edge_inset),
            ("bottom_inset", self.bottom_inset),
            ("scroll_threshold", self.scroll_threshold),
            ("brightness_threshold", self.brightness_threshold),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    message: format!("expected a finite non-negative number, got {}", value),
                });
            }
        }
        if self.brightness_threshold > 255.0 {
            return Err(ConfigError::Invalid {
                field: "brightness_threshold",
                message: format!("must be at most 255, got {}", self.brightness_threshold),
            });
        }
        if !self.root_route.starts_with('/') {
            return Err(ConfigError::Invalid {
                field: "root_route",
                message: format!("must start with '/', got '{}'", self.root_route),
            });
        }
        Ok(())
    }
}

/// Strips query, fragment and trailing slashes so `/about/?x=1` equals `/about`.
fn normalize_route(route: &str) -> &str {
    let path = route.split(['?', '#']).next().unwrap_or(route);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
