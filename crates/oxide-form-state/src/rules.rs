//! Rule catalog.
//!
//! A [`Rule`] pairs a pattern factory with a message formatter. Rules are
//! looked up by name, first in a field's own [`RuleCatalog`] and then in the
//! built-in catalog, so a field can replace a built-in rule for itself
//! without affecting any other field.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::error::{FormError, Result};

/// Name of the built-in rule that rejects blank values.
pub const REQUIRED: &str = "required";

/// Name of the built-in rule that accepts decimal digits only.
pub const NUMERIC: &str = "numeric";

/// Placeholder replaced by the field label in message templates.
pub const LABEL_PLACEHOLDER: &str = "{label}";

type PatternFactory = Arc<dyn Fn() -> Regex + Send + Sync>;
type MessageFormatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

static NON_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S").expect("built-in pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("built-in pattern is valid"));

static BUILTIN: LazyLock<RuleCatalog> = LazyLock::new(|| {
    RuleCatalog::new()
        .with(
            REQUIRED,
            Rule::new(|| NON_BLANK.clone(), |label| format!("{label} is required.")),
        )
        .with(
            NUMERIC,
            Rule::new(
                || DIGITS.clone(),
                |label| format!("{label} may only contain numbers."),
            ),
        )
});

/// A named check: a pattern the value must match and the message shown
/// when it does not.
#[derive(Clone)]
pub struct Rule {
    pattern: PatternFactory,
    formatter: MessageFormatter,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("pattern", &(self.pattern)().as_str())
            .finish_non_exhaustive()
    }
}

impl Rule {
    /// Creates a rule from a pattern factory and a message formatter.
    ///
    /// The formatter receives the field label (display name or id).
    pub fn new(
        pattern: impl Fn() -> Regex + Send + Sync + 'static,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            pattern: Arc::new(pattern),
            formatter: Arc::new(formatter),
        }
    }

    /// Compiles `pattern` once and builds a rule around it.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] if the pattern does not compile.
    pub fn from_pattern(
        name: &str,
        pattern: &str,
        formatter: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self::new(move || regex.clone(), formatter))
    }

    /// Builds a rule whose message is a template containing `{label}`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] if the pattern does not compile.
    pub fn with_template(name: &str, pattern: &str, template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        Self::from_pattern(name, pattern, move |label| {
            template.replace(LABEL_PLACEHOLDER, label)
        })
    }

    /// Produces the pattern tested against a value.
    #[must_use]
    pub fn pattern(&self) -> Regex {
        (self.pattern)()
    }

    /// Returns whether `value` satisfies this rule.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        self.pattern().is_match(value)
    }

    /// Formats the failure message for a field label.
    #[must_use]
    pub fn message(&self, label: &str) -> String {
        (self.formatter)(label)
    }
}

/// Declarative form of a custom rule, as found in form definitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    /// Regular expression the value must match.
    pub pattern: String,
    /// Message template; `{label}` is replaced by the field label.
    pub message: String,
}

impl RuleSpec {
    /// Compiles the spec into a [`Rule`] registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPattern`] if the pattern does not compile.
    pub fn compile(&self, name: &str) -> Result<Rule> {
        Rule::with_template(name, &self.pattern, self.message.clone())
    }
}

/// Rules addressable by name.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: HashMap<String, Rule>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a rule.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
        self.rules.insert(name.into(), rule);
    }

    /// Builder method to add or replace a rule.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.insert(name, rule);
        self
    }

    /// Returns the rule registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns whether a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Returns the registered rule names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the catalog has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<HashMap<String, RuleSpec>> for RuleCatalog {
    type Error = FormError;

    fn try_from(specs: HashMap<String, RuleSpec>) -> Result<Self> {
        let mut catalog = Self::new();
        for (name, spec) in specs {
            let rule = spec.compile(&name)?;
            catalog.insert(name, rule);
        }
        Ok(catalog)
    }
}

/// Returns the built-in catalog (`required`, `numeric`).
#[must_use]
pub fn builtin() -> &'static RuleCatalog {
    &BUILTIN
}

/// Resolves a rule name against a field's custom catalog, then the built-ins.
///
/// A custom rule fully replaces a built-in rule of the same name.
#[must_use]
pub fn resolve<'a>(name: &str, custom: &'a RuleCatalog) -> Option<&'a Rule> {
    custom.get(name).or_else(|| builtin().get(name))
}
