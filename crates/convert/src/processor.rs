//! Stylesheet walker
//!
//! Applies the converter to every eligible declaration of a parsed
//! stylesheet and, when enabled, to `@media` params.

use pxvw_css::{AtRule, Declaration, Node, Rule, Stylesheet};

use crate::blacklist::is_selector_blacklisted;
use crate::config::Config;
use crate::converter::{contains_pixels, convert_at_rule_params, convert_value};
use crate::error::ProcessError;
use crate::props::is_property_eligible;

/// Counters for one processing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Declarations whose value was rewritten
    pub declarations: usize,
    /// Original declarations kept in front of a rewritten one
    pub fallbacks: usize,
    /// At-rules whose params were rewritten
    pub at_rules: usize,
}

/// Walks a stylesheet and rewrites pixel values in place
pub struct Processor<'a> {
    config: &'a Config,
    keep_original: bool,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config, keep_original: true }
    }

    /// Keep a copy of each original declaration before its converted
    /// version, so browsers without viewport units fall back to pixels.
    pub fn keep_original(mut self, keep: bool) -> Self {
        self.keep_original = keep;
        self
    }

    /// Process a stylesheet in place
    pub fn process(&self, stylesheet: &mut Stylesheet) -> ProcessStats {
        let mut stats = ProcessStats::default();
        self.walk(&mut stylesheet.nodes, &mut stats);
        log::debug!(
            "Converted {} declarations ({} fallbacks kept) and {} at-rules",
            stats.declarations,
            stats.fallbacks,
            stats.at_rules
        );
        stats
    }

    fn walk(&self, nodes: &mut [Node], stats: &mut ProcessStats) {
        for node in nodes {
            match node {
                Node::Rule(rule) => self.process_rule(rule, stats),
                Node::AtRule(at_rule) => self.process_at_rule(at_rule, stats),
                Node::Declaration(_) | Node::Comment(_) => {}
            }
        }
    }

    fn process_rule(&self, rule: &mut Rule, stats: &mut ProcessStats) {
        let mut nodes = Vec::with_capacity(rule.nodes.len());

        for node in std::mem::take(&mut rule.nodes) {
            match node {
                Node::Declaration(decl) => match self.convert_declaration(&rule.selector, &decl) {
                    Some(converted) => {
                        stats.declarations += 1;
                        if self.keep_original {
                            stats.fallbacks += 1;
                            nodes.push(Node::Declaration(decl));
                        }
                        nodes.push(Node::Declaration(converted));
                    }
                    None => nodes.push(Node::Declaration(decl)),
                },
                Node::Rule(mut inner) => {
                    self.process_rule(&mut inner, stats);
                    nodes.push(Node::Rule(inner));
                }
                Node::AtRule(mut at_rule) => {
                    self.process_at_rule(&mut at_rule, stats);
                    nodes.push(Node::AtRule(at_rule));
                }
                comment @ Node::Comment(_) => nodes.push(comment),
            }
        }

        rule.nodes = nodes;
    }

    fn process_at_rule(&self, at_rule: &mut AtRule, stats: &mut ProcessStats) {
        if self.config.media_query()
            && at_rule.name == "media"
            && contains_pixels(&at_rule.params)
        {
            let converted = convert_at_rule_params(&at_rule.params, self.config);
            if converted != at_rule.params {
                log::trace!("@media {} -> {}", at_rule.params, converted);
                at_rule.params = converted;
                stats.at_rules += 1;
            }
        }

        if let Some(nodes) = &mut at_rule.nodes {
            self.walk(nodes, stats);
        }
    }

    /// Converted copy of a declaration, or `None` when it is left alone
    fn convert_declaration(&self, selector: &str, decl: &Declaration) -> Option<Declaration> {
        if !contains_pixels(&decl.value) {
            return None;
        }
        if !is_property_eligible(&decl.property, self.config.prop_list()) {
            return None;
        }
        if is_selector_blacklisted(Some(selector), self.config.selector_blacklist()) {
            log::debug!("Skipping {} in blacklisted selector {:?}", decl.property, selector);
            return None;
        }

        let value = convert_value(&decl.value, self.config);
        if value == decl.value {
            return None;
        }

        log::trace!("{}: {} -> {}", decl.property, decl.value, value);
        Some(Declaration { value, ..decl.clone() })
    }
}

/// Parse, convert and serialize a stylesheet in one go
pub fn convert_stylesheet(input: &str, config: &Config) -> Result<String, ProcessError> {
    let mut stylesheet = Stylesheet::parse(input)?;
    Processor::new(config).process(&mut stylesheet);
    Ok(stylesheet.to_string())
}
