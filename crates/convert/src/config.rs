//! Converter configuration
//!
//! [`ConvertOptions`] holds user overrides, every field optional, in the same
//! camelCase shape as a JSON options file. [`Config::from_options`] fills in
//! the defaults, validates, and compiles the prop list and selector
//! blacklist once for the whole run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::blacklist::{BlacklistEntry, SelectorBlacklist};
use crate::error::{ConfigError, ConfigResult};
use crate::props::PropMatcher;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 320.0;
pub const DEFAULT_UNIT_PRECISION: u32 = 5;
pub const DEFAULT_VIEWPORT_UNIT: &str = "vw";
pub const DEFAULT_MIN_PIXEL_VALUE: f64 = 1.0;

/// Largest accepted `unitPrecision`. An `f64` carries about 17 significant
/// digits, so more fractional digits cannot change the output.
pub const MAX_UNIT_PRECISION: u32 = 20;

/// User overrides. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertOptions {
    pub viewport_width: Option<f64>,
    pub unit_precision: Option<u32>,
    pub viewport_unit: Option<String>,
    #[serde(alias = "selectorBlackList")]
    pub selector_blacklist: Option<Vec<BlacklistEntry>>,
    pub prop_list: Option<Vec<String>>,
    pub min_pixel_value: Option<f64>,
    pub media_query: Option<bool>,
}

impl ConvertOptions {
    /// Parse options from a JSON document
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: ConvertOptions) -> Self {
        Self {
            viewport_width: other.viewport_width.or(self.viewport_width),
            unit_precision: other.unit_precision.or(self.unit_precision),
            viewport_unit: other.viewport_unit.or(self.viewport_unit),
            selector_blacklist: other.selector_blacklist.or(self.selector_blacklist),
            prop_list: other.prop_list.or(self.prop_list),
            min_pixel_value: other.min_pixel_value.or(self.min_pixel_value),
            media_query: other.media_query.or(self.media_query),
        }
    }
}

/// Validated, immutable configuration for one conversion run
#[derive(Debug, Clone)]
pub struct Config {
    viewport_width: f64,
    unit_precision: u32,
    viewport_unit: String,
    selector_blacklist: SelectorBlacklist,
    prop_list: PropMatcher,
    min_pixel_value: f64,
    media_query: bool,
}

impl Config {
    /// Apply overrides to the defaults
    pub fn from_options(options: ConvertOptions) -> ConfigResult<Self> {
        let viewport_width = options.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(ConfigError::InvalidViewportWidth(viewport_width));
        }

        let min_pixel_value = options.min_pixel_value.unwrap_or(DEFAULT_MIN_PIXEL_VALUE);
        if min_pixel_value.is_nan() {
            return Err(ConfigError::InvalidMinPixelValue(min_pixel_value));
        }

        let unit_precision = options.unit_precision.unwrap_or(DEFAULT_UNIT_PRECISION);
        if unit_precision > MAX_UNIT_PRECISION {
            return Err(ConfigError::InvalidUnitPrecision(unit_precision));
        }

        let selector_blacklist = match &options.selector_blacklist {
            Some(entries) => SelectorBlacklist::from_entries(entries)?,
            None => SelectorBlacklist::default(),
        };

        let prop_list = PropMatcher::new(options.prop_list.as_deref().unwrap_or_default());

        let config = Self {
            viewport_width,
            unit_precision,
            viewport_unit: options
                .viewport_unit
                .unwrap_or_else(|| DEFAULT_VIEWPORT_UNIT.to_string()),
            selector_blacklist,
            prop_list,
            min_pixel_value,
            media_query: options.media_query.unwrap_or(false),
        };
        log::debug!(
            "Converting px to {} against a {}px viewport ({} blacklist entries)",
            config.viewport_unit,
            config.viewport_width,
            config.selector_blacklist.len()
        );

        Ok(config)
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn unit_precision(&self) -> u32 {
        self.unit_precision
    }

    pub fn viewport_unit(&self) -> &str {
        &self.viewport_unit
    }

    pub fn selector_blacklist(&self) -> &SelectorBlacklist {
        &self.selector_blacklist
    }

    pub fn prop_list(&self) -> &PropMatcher {
        &self.prop_list
    }

    pub fn min_pixel_value(&self) -> f64 {
        self.min_pixel_value
    }

    pub fn media_query(&self) -> bool {
        self.media_query
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            unit_precision: DEFAULT_UNIT_PRECISION,
            viewport_unit: DEFAULT_VIEWPORT_UNIT.to_string(),
            selector_blacklist: SelectorBlacklist::default(),
            prop_list: PropMatcher::default(),
            min_pixel_value: DEFAULT_MIN_PIXEL_VALUE,
            media_query: false,
        }
    }
}
