//! Handlebars helpers available to CSS templates
//!
//! | Helper | Example | Result |
//! |--------|---------|--------|
//! | `replaceSeparator` | `replaceSeparator "a , b" "," "-"` | `a-b` |
//! | `sortedEntries` | `sortedEntries codepoints` | `[[key, value], ...]` by key |
//! | `stripSizePrefix` | `stripSizePrefix "24px_arrow"` | `arrow` |
//! | `codepoint` | `codepoint 61697` | `\f101` |

use handlebars::{handlebars_helper, Handlebars};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static SIZE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:px)?[_\-\s]+").unwrap());

/// Split `value` on the `split` pattern, trim every part, drop empty parts,
/// and join the rest with `separator`.
///
/// `split` is a regular expression; an invalid pattern is matched literally.
pub fn replace_separator(value: &str, split: &str, separator: &str) -> String {
    let parts: Vec<&str> = match Regex::new(split) {
        Ok(re) => re.split(value).collect(),
        Err(_) => value.split(split).collect(),
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `[key, value]` pairs of an object sorted by key; anything else is empty.
///
/// Keys compare case-insensitively, with lowercase first on a tie, so
/// `apple` < `Apple` < `banana`.
pub fn sorted_entries(value: &Value) -> Value {
    let Value::Object(map) = value else {
        return Value::Array(Vec::new());
    };

    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| {
        a.0.to_lowercase()
            .cmp(&b.0.to_lowercase())
            .then_with(|| b.0.cmp(a.0))
    });

    Value::Array(
        entries
            .into_iter()
            .map(|(k, v)| Value::Array(vec![Value::String(k.clone()), v.clone()]))
            .collect(),
    )
}

/// Remove a leading size marker such as `24px_`, `16-` or `24_` from an icon name
pub fn strip_size_prefix(name: &str) -> String {
    SIZE_PREFIX.replace(name, "").into_owned()
}

/// CSS escape for a codepoint, e.g. `61697` -> `\f101`
pub fn codepoint(value: u64) -> String {
    format!("\\{:x}", value)
}

handlebars_helper!(replace_separator_helper: |value: str, split: str, separator: str| {
    replace_separator(value, split, separator)
});
handlebars_helper!(sorted_entries_helper: |value: Json| sorted_entries(value));
handlebars_helper!(strip_size_prefix_helper: |name: str| strip_size_prefix(name));
handlebars_helper!(codepoint_helper: |value: u64| codepoint(value));

/// Register every helper on `registry`.
///
/// Called once when a renderer is built; registries are never shared.
pub fn register_helpers(registry: &mut Handlebars<'_>) {
    registry.register_helper("replaceSeparator", Box::new(replace_separator_helper));
    registry.register_helper("sortedEntries", Box::new(sorted_entries_helper));
    registry.register_helper("stripSizePrefix", Box::new(strip_size_prefix_helper));
    registry.register_helper("codepoint", Box::new(codepoint_helper));
}
