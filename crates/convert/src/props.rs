//! Property list matching
//!
//! Entries use a small marker syntax:
//!
//! | entry        | matches                                  |
//! |--------------|------------------------------------------|
//! | `*`          | every property                           |
//! | `width`      | exactly `width`                          |
//! | `*radius*`   | names containing `radius`                |
//! | `margin*`    | names starting with `margin`             |
//! | `*-width`    | names ending with `-width`               |
//! | `!<entry>`   | excludes whatever `<entry>` would match  |
//!
//! Exclusions always win over inclusions.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// How a prop list entry is anchored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropMatchKind {
    Exact,
    Contains,
    StartsWith,
    EndsWith,
    WildcardAll,
}

/// A single parsed prop list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropRule {
    pub kind: PropMatchKind,
    pub negated: bool,
    pub pattern: String,
}

impl PropRule {
    /// Parse a raw entry. Returns `None` for entries that match nothing
    /// (empty, `!*`, `**`, or stray markers).
    pub fn parse(entry: &str) -> Option<Self> {
        let (negated, rest) = match entry.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, entry),
        };

        if rest.is_empty() || rest.starts_with('!') {
            return None;
        }

        let (kind, pattern) = if rest == "*" {
            if negated {
                return None;
            }
            (PropMatchKind::WildcardAll, "")
        } else {
            match (rest.strip_prefix('*'), rest.strip_suffix('*')) {
                (Some(_), Some(_)) => (PropMatchKind::Contains, rest.get(1..rest.len() - 1)?),
                (Some(tail), None) => (PropMatchKind::EndsWith, tail),
                (None, Some(head)) => (PropMatchKind::StartsWith, head),
                (None, None) => (PropMatchKind::Exact, rest),
            }
        };

        if kind != PropMatchKind::WildcardAll && (pattern.is_empty() || invalid_pattern(kind, pattern)) {
            return None;
        }

        Some(Self { kind, negated, pattern: pattern.to_string() })
    }

    /// Whether the property name satisfies this rule, ignoring negation
    pub fn matches(&self, name: &str) -> bool {
        match self.kind {
            PropMatchKind::Exact => name == self.pattern,
            PropMatchKind::Contains => name.contains(self.pattern.as_str()),
            PropMatchKind::StartsWith => name.starts_with(self.pattern.as_str()),
            PropMatchKind::EndsWith => name.ends_with(self.pattern.as_str()),
            PropMatchKind::WildcardAll => true,
        }
    }
}

/// Anchored patterns may not carry further markers
fn invalid_pattern(kind: PropMatchKind, pattern: &str) -> bool {
    match kind {
        PropMatchKind::Contains => false,
        _ => pattern.contains('*') || pattern.contains('!'),
    }
}

/// Compiled prop list
#[derive(Debug, Clone, Default)]
pub struct PropMatcher {
    /// The list is exactly `["*"]`
    match_all: bool,
    has_wildcard: bool,
    exact: FxHashSet<String>,
    not_exact: FxHashSet<String>,
    include: SmallVec<[PropRule; 4]>,
    exclude: SmallVec<[PropRule; 4]>,
}

impl PropMatcher {
    /// Build a matcher from raw prop list entries
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut matcher = Self {
            match_all: entries.len() == 1 && entries[0].as_ref() == "*",
            ..Self::default()
        };

        for entry in entries {
            let entry = entry.as_ref();
            let Some(rule) = PropRule::parse(entry) else {
                log::warn!("Ignoring prop list entry {:?}: it matches no property", entry);
                continue;
            };

            match (rule.kind, rule.negated) {
                (PropMatchKind::WildcardAll, _) => matcher.has_wildcard = true,
                (PropMatchKind::Exact, false) => {
                    matcher.exact.insert(rule.pattern);
                }
                (PropMatchKind::Exact, true) => {
                    matcher.not_exact.insert(rule.pattern);
                }
                (_, false) => matcher.include.push(rule),
                (_, true) => matcher.exclude.push(rule),
            }
        }

        matcher
    }

    /// Whether a declaration with this property may be converted
    pub fn eligible(&self, name: &str) -> bool {
        if self.match_all {
            return true;
        }

        let included = self.has_wildcard
            || self.exact.contains(name)
            || self.include.iter().any(|rule| rule.matches(name));

        included && !self.excluded(name)
    }

    fn excluded(&self, name: &str) -> bool {
        self.not_exact.contains(name) || self.exclude.iter().any(|rule| rule.matches(name))
    }
}

/// Whether `name` is eligible under `prop_list`
pub fn is_property_eligible(name: &str, prop_list: &PropMatcher) -> bool {
    prop_list.eligible(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: PropMatchKind, negated: bool, pattern: &str) -> Option<PropRule> {
        Some(PropRule { kind, negated, pattern: pattern.to_string() })
    }

    #[test]
    fn test_parse_entries() {
        assert_eq!(PropRule::parse("width"), rule(PropMatchKind::Exact, false, "width"));
        assert_eq!(PropRule::parse("*radius*"), rule(PropMatchKind::Contains, false, "radius"));
        assert_eq!(PropRule::parse("margin*"), rule(PropMatchKind::StartsWith, false, "margin"));
        assert_eq!(PropRule::parse("*-width"), rule(PropMatchKind::EndsWith, false, "-width"));
        assert_eq!(PropRule::parse("!font*"), rule(PropMatchKind::StartsWith, true, "font"));
        assert_eq!(PropRule::parse("!*-x*"), rule(PropMatchKind::Contains, true, "-x"));
        assert_eq!(PropRule::parse("*"), rule(PropMatchKind::WildcardAll, false, ""));
    }

    #[test]
    fn test_parse_rejects_empty_entries() {
        assert_eq!(PropRule::parse(""), None);
        assert_eq!(PropRule::parse("!"), None);
        assert_eq!(PropRule::parse("**"), None);
        assert_eq!(PropRule::parse("!*"), None);
        assert_eq!(PropRule::parse("!!width"), None);
        assert_eq!(PropRule::parse("a*b*"), None);
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let matcher = PropMatcher::new::<&str>(&[]);
        assert!(!matcher.eligible("width"));
        assert!(!matcher.eligible(""));
    }

    #[test]
    fn test_lone_wildcard_matches_all() {
        let matcher = PropMatcher::new(&["*"]);
        assert!(matcher.eligible("width"));
        assert!(matcher.eligible("--custom"));
    }

    #[test]
    fn test_negation_overrides_wildcard() {
        let matcher = PropMatcher::new(&["*", "!font*"]);
        assert!(matcher.eligible("width"));
        assert!(!matcher.eligible("font-size"));
        assert!(!matcher.eligible("font"));
    }

    #[test]
    fn test_negation_overrides_exact() {
        let matcher = PropMatcher::new(&["width", "!width"]);
        assert!(!matcher.eligible("width"));
    }

    #[test]
    fn test_anchors() {
        let matcher = PropMatcher::new(&["height", "*radius*", "margin*", "*-width"]);
        assert!(matcher.eligible("height"));
        assert!(!matcher.eligible("max-height"));
        assert!(matcher.eligible("border-top-left-radius"));
        assert!(matcher.eligible("margin-top"));
        assert!(!matcher.eligible("scroll-margin"));
        assert!(matcher.eligible("border-width"));
        assert!(!matcher.eligible("width"));
    }

    #[test]
    fn test_repeated_suffix_still_ends_with() {
        let matcher = PropMatcher::new(&["*ab"]);
        assert!(matcher.eligible("abab"));
        assert!(!matcher.eligible("b"));
    }

    #[test]
    fn test_negated_anchors() {
        let matcher = PropMatcher::new(&["*", "!*-top", "!*line*", "!border"]);
        assert!(!matcher.eligible("margin-top"));
        assert!(!matcher.eligible("line-height"));
        assert!(!matcher.eligible("border"));
        assert!(matcher.eligible("border-left"));
    }

    #[test]
    fn test_eligible_is_stable() {
        let matcher = PropMatcher::new(&["font*", "!font-weight"]);
        for _ in 0..3 {
            assert!(matcher.eligible("font-size"));
            assert!(!matcher.eligible("font-weight"));
        }
        assert!(is_property_eligible("font-size", &matcher));
    }
}
