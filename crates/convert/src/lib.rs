//! pxvw Converter
//!
//! Rewrites pixel lengths in stylesheet values into viewport units.
//!
//! The engine is a set of pure functions over a [`Config`]:
//! [`convert_value`] and [`convert_at_rule_params`] rewrite text,
//! [`is_property_eligible`] and [`is_selector_blacklisted`] decide which
//! declarations get rewritten. [`Processor`] drives them over a parsed
//! [`pxvw_css::Stylesheet`].

pub mod blacklist;
pub mod config;
pub mod converter;
pub mod error;
pub mod processor;
pub mod props;
pub mod scanner;

pub use blacklist::{is_selector_blacklisted, BlacklistEntry, SelectorBlacklist, SelectorPattern};
pub use config::{Config, ConvertOptions};
pub use converter::{contains_pixels, convert_at_rule_params, convert_value, to_fixed};
pub use error::{ConfigError, ConfigResult, ProcessError};
pub use processor::{convert_stylesheet, ProcessStats, Processor};
pub use props::{is_property_eligible, PropMatchKind, PropMatcher, PropRule};
pub use scanner::{Scanner, Segment, SegmentKind};
