//! Path resolution and pattern matching for route paths.

use std::collections::HashMap;

use labnav_sdk::types::{ROOT, SEPARATOR};

/// Resolve a node's path fragment against its parent's resolved path.
///
/// - `"/x"` is absolute and returned unchanged.
/// - `""` resolves to the parent itself, so index entries highlight at
///   the parent's URL.
/// - Otherwise the two are joined with exactly one separator.
pub fn resolve_path(segment: &str, parent: &str) -> String {
    if segment.starts_with(SEPARATOR) {
        return segment.to_string();
    }

    if segment.is_empty() {
        return if parent.is_empty() {
            ROOT.to_string()
        } else {
            parent.to_string()
        };
    }

    let mut resolved = String::with_capacity(parent.len() + segment.len() + 1);
    resolved.push_str(parent);
    if !parent.ends_with(SEPARATOR) {
        resolved.push(SEPARATOR);
    }
    resolved.push_str(segment);
    resolved
}

/// Split a path into its non-empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "/test-item/:id/field/list"
/// Path: "/test-item/42/field/list"
/// Result: Some({"id": "42"})
///
/// A `*` segment captures the remainder (possibly empty) under the key `"*"`.
pub fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts = segments(pattern);
    let path_parts = segments(path);
    let mut params = HashMap::new();

    let consumed = match_segments(&pattern_parts, &path_parts, &mut params)?;
    (consumed == path_parts.len()).then_some(params)
}

/// Match a route pattern against the leading segments of a path.
///
/// Used to decide whether a node can be an ancestor of the requested
/// location. Returns the captured parameters and the number of path
/// segments the pattern consumed.
pub fn match_prefix(pattern: &str, path: &str) -> Option<(HashMap<String, String>, usize)> {
    let pattern_parts = segments(pattern);
    let path_parts = segments(path);
    let mut params = HashMap::new();

    let consumed = match_segments(&pattern_parts, &path_parts, &mut params)?;
    Some((params, consumed))
}

/// Ranking of a route pattern among siblings that match the same path.
///
/// Literal segments outrank `:param` segments, and a pattern without a `*`
/// outranks one with it. Fields compare in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    literals: usize,
    params: usize,
    bounded: bool,
}

/// Rank `pattern` for choosing between matching routes.
pub fn specificity(pattern: &str) -> Specificity {
    let parts = segments(pattern);
    Specificity {
        literals: parts
            .iter()
            .filter(|s| **s != "*" && !s.starts_with(':'))
            .count(),
        params: parts.iter().filter(|s| s.starts_with(':')).count(),
        bounded: !parts.contains(&"*"),
    }
}

fn match_segments(
    pattern: &[&str],
    path: &[&str],
    params: &mut HashMap<String, String>,
) -> Option<usize> {
    for (i, pat) in pattern.iter().enumerate() {
        if *pat == "*" {
            params.insert("*".to_string(), path.get(i..).unwrap_or_default().join("/"));
            return Some(path.len());
        }

        let actual = path.get(i)?;
        if let Some(param_name) = pat.strip_prefix(':') {
            // Parameter segment
            params.insert(param_name.to_string(), (*actual).to_string());
        } else if pat != actual {
            // Literal segment doesn't match
            return None;
        }
    }

    Some(pattern.len())
}
