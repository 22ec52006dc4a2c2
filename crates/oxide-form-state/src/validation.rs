//! Rule evaluation.
//!
//! [`validate`] walks a field's declared rules in order and reports the
//! first one the value violates. It is a pure function of its inputs.

use thiserror::Error;
use tracing::trace;

use crate::rules::{self, RuleCatalog, REQUIRED};

/// Separator between rule names in a rule declaration.
pub const RULE_SEPARATOR: char = '|';

/// A declared rule name that no catalog knows about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule {0:?}")]
pub struct UnresolvedRule(pub String);

/// Splits a pipe-delimited declaration such as `"required|numeric"` into
/// rule names.
///
/// Surrounding whitespace is trimmed and empty segments are dropped, so
/// `""` yields no rules.
#[must_use]
pub fn parse_rules(declaration: &str) -> Vec<String> {
    declaration
        .split(RULE_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates `value` against `rules` and returns the first failure message.
///
/// Returns `Ok(None)` when every rule passes (or there are no rules).
/// Rules other than [`REQUIRED`] are not evaluated against an empty value,
/// so an optional field only has its format checked once something has
/// been entered. Evaluation stops at the first violated rule.
///
/// # Errors
///
/// Returns [`UnresolvedRule`] for a rule name found in neither `custom`
/// nor the built-in catalog.
pub fn validate<S: AsRef<str>>(
    value: &str,
    rules: &[S],
    label: &str,
    custom: &RuleCatalog,
) -> Result<Option<String>, UnresolvedRule> {
    for name in rules {
        let name = name.as_ref();
        let rule = rules::resolve(name, custom).ok_or_else(|| UnresolvedRule(name.to_string()))?;

        if name != REQUIRED && value.is_empty() {
            continue;
        }

        if !rule.is_satisfied_by(value) {
            trace!(rule = name, label, "rule violated");
            return Ok(Some(rule.message(label)));
        }
    }
    Ok(None)
}
