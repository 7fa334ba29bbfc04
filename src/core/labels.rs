//! core::labels
//!
//! Label reconciliation.
//!
//! Content items may reference labels that are not declared in
//! `labels.json`. Before any content is created the engine needs the full
//! set of labels that must exist: every explicit label, plus a default
//! label for each referenced name that was not declared.
//!
//! Everything here is pure; no network access.

use std::collections::HashSet;

use super::types::{Content, ContentSet, Label};

/// Color given to labels that are referenced but not declared.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";

/// Description given to labels that are referenced but not declared.
pub const DEFAULT_LABEL_DESCRIPTION: &str = "Created automatically for demo content";

/// Lookup key for a label name. GitHub matches label names case-insensitively.
pub fn label_key(name: &str) -> String {
    name.to_lowercase()
}

/// Whether two names refer to the same repository label.
pub fn same_label(a: &str, b: &str) -> bool {
    label_key(a) == label_key(b)
}

/// Build the default label for a referenced but undeclared name.
pub fn default_label(name: &str) -> Label {
    Label::new(name, DEFAULT_LABEL_COLOR).with_description(DEFAULT_LABEL_DESCRIPTION)
}

/// Collect label names referenced by the given items, deduplicated,
/// in first-seen order.
pub fn referenced_labels<'a, T: Content + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    for item in items {
        for name in item.labels() {
            if seen.insert(name.clone()) {
                out.push(name.clone());
            }
        }
    }
}

/// Label names referenced by any issue, discussion or pull request.
pub fn referenced_label_names(content: &ContentSet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    referenced_labels(&content.issues, &mut seen, &mut names);
    referenced_labels(&content.discussions, &mut seen, &mut names);
    referenced_labels(&content.pull_requests, &mut seen, &mut names);
    names
}

/// Merge explicit labels with defaults for referenced-but-undeclared names.
///
/// The result holds exactly one label per name. Explicit definitions win
/// over synthesized defaults; if `explicit` itself repeats a name the first
/// definition is kept. Explicit labels come first, in declaration order,
/// followed by synthesized ones in reference order.
pub fn reconcile_labels(explicit: &[Label], referenced: &[String]) -> Vec<Label> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut labels = Vec::with_capacity(explicit.len() + referenced.len());

    for label in explicit {
        if seen.insert(label.name.as_str()) {
            labels.push(label.clone());
        }
    }

    for name in referenced {
        if seen.insert(name.as_str()) {
            labels.push(default_label(name));
        }
    }

    labels
}

/// Reconcile the labels of a whole configuration.
pub fn reconcile_content_labels(content: &ContentSet) -> Vec<Label> {
    reconcile_labels(&content.labels, &referenced_label_names(content))
}
