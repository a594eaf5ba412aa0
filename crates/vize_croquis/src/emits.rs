//! Lexical scan for emitted event names.
//!
//! Event names are frequently computed at runtime, so this is a best-effort
//! text scan rather than an AST walk: every `$emit('name'` / `emit("name"`
//! whose first argument is a string literal contributes `name`.

use once_cell::sync::Lazy;
use regex::Regex;
use vize_carton::{CompactString, FxHashSet};

static EMIT_CALL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"\bemit\(\s*['"`]([\w:.\-]+)['"`]"#).ok());

/// Scan script text for emitted event names, deduplicated, in first-seen
/// order.
pub fn scan_emitted_event_names(script: &str) -> Vec<CompactString> {
    let Some(re) = EMIT_CALL.as_ref() else {
        return Vec::new();
    };

    let mut seen = FxHashSet::default();
    re.captures_iter(script)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(CompactString::new)
        .collect()
}
