//! Naming utilities for deriving wire-format keys from schema names.
//!
//! All derivations are write-through cached: the first call for a distinct
//! input computes and stores, subsequent calls are O(1) lookups. The cache is
//! injected by the caller rather than held as process-global state, so tests
//! and embedders control its lifetime.
//!
//! Cache keys are namespaced per derivation; `pluralize` and `camelize` of
//! the same input never collide.

mod cache;

pub use cache::NameCache;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Nouns whose plural form is the singular form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "news",
    "series",
    "species",
    "sheep",
    "fish",
    "deer",
    "moose",
];

/// Irregular singular/plural pairs checked before the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

/// Suffix rewrite rules, first match wins.
static PLURAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(quiz)$", "${1}zes"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"([^f])fe$", "${1}ves"),
        (r"([lr])f$", "${1}ves"),
        (r"(tomat|potat|her|ech)o$", "${1}oes"),
        (r"(x|ch|ss|sh|s|z)$", "${1}es"),
        (r"$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

static UNDERSCORE_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z\d])([A-Z]+)").unwrap());
static UNDERSCORE_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Returns the English plural form of a singular noun. Cached.
pub fn pluralize(names: &NameCache, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let key = format!("plural:{name}");
    if let Some(hit) = names.get(&key) {
        return hit;
    }

    trace!(input = name, "pluralize cache miss");
    names.set(key, pluralize_uncached(name))
}

/// Converts a dash/underscore-delimited identifier to camel case, optionally
/// capitalizing the first letter. Dashes are normalized to underscores before
/// lookup, so `cool-hand-luke` and `cool_hand_luke` share a cache entry.
pub fn camelize(names: &NameCache, name: &str, upper_first: bool) -> String {
    if name.is_empty() {
        return String::new();
    }

    let normalized = name.replace('-', "_");
    let key = if upper_first {
        format!("camelize.upper:{normalized}")
    } else {
        format!("camelize:{normalized}")
    };
    if let Some(hit) = names.get(&key) {
        return hit;
    }

    trace!(input = name, "camelize cache miss");
    names.set(key, camelize_uncached(&normalized, upper_first))
}

/// Converts a camel-cased or dash/space-delimited identifier to snake case.
/// Cached.
pub fn underscore(names: &NameCache, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let key = format!("underscore:{name}");
    if let Some(hit) = names.get(&key) {
        return hit;
    }

    trace!(input = name, "underscore cache miss");
    names.set(key, underscore_uncached(name))
}

fn pluralize_uncached(name: &str) -> String {
    if UNCOUNTABLE.contains(&name) {
        return name.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == name) {
        return (*plural).to_string();
    }

    for (rule, replacement) in PLURAL_RULES.iter() {
        if rule.is_match(name) {
            return rule.replace(name, *replacement).into_owned();
        }
    }

    // unreachable: the last rule matches every string
    name.to_string()
}

fn camelize_uncached(normalized: &str, upper_first: bool) -> String {
    let mut out = String::with_capacity(normalized.len());

    for (i, segment) in normalized.split('_').filter(|s| !s.is_empty()).enumerate() {
        let mut chars = segment.chars();
        let first = chars.next().unwrap();

        if i == 0 && !upper_first {
            out.extend(first.to_lowercase());
        } else {
            out.extend(first.to_uppercase());
        }
        out.push_str(chars.as_str());
    }

    out
}

fn underscore_uncached(name: &str) -> String {
    let spaced = UNDERSCORE_BOUNDARY.replace_all(name, "${1}_${2}");
    let joined = UNDERSCORE_SEPARATORS.replace_all(&spaced, "_");
    joined.to_lowercase()
}
