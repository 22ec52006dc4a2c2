//! Field registry.
//!
//! Holds one [`FieldDescriptor`] per field id. Registering an id that is
//! already present merges the incoming declaration into the stored
//! descriptor instead of adding a second entry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{FormError, Result};
use crate::rules::{Rule, RuleCatalog};
use crate::validation::parse_rules;

/// Default number of rows for a textarea field.
pub const DEFAULT_TEXTAREA_ROWS: usize = 2;

/// Input type that renders as a textarea.
pub const TEXTAREA_TYPE: &str = "textarea";

/// The widget a field is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Single-line `<input>`.
    #[default]
    Input,
    /// Multi-line `<textarea>`.
    Textarea,
}

/// CSS classes applied when rendering a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldClasses {
    /// Class of the wrapping container.
    pub container: Option<String>,
    /// Class of the input element itself.
    pub field: Option<String>,
    /// Class of the error message paragraph.
    pub error: Option<String>,
}

/// Registration input for a field.
///
/// Every member except `id` is optional. When the id is already
/// registered, members that are set replace the stored ones and members
/// left unset keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDeclaration {
    /// Field id. Must not be empty.
    pub id: String,
    /// Explicit value. New fields start at `""` when unset.
    pub value: Option<String>,
    /// Label used in validation messages.
    pub display_name: Option<String>,
    /// Pipe-delimited rule names, e.g. `"required|numeric"`.
    pub validate: Option<String>,
    /// Rules visible to this field only, consulted before the built-ins.
    ///
    /// Declarative `customRules` are compiled by
    /// [`crate::FormDefinition::from_json`], not deserialized here.
    #[serde(skip)]
    pub custom_rules: Option<RuleCatalog>,
    /// Widget used when rendering.
    pub kind: Option<WidgetKind>,
    /// HTML input type. `"textarea"` selects [`WidgetKind::Textarea`].
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Number of rows for [`WidgetKind::Textarea`]; `0` means the default.
    pub rows: Option<usize>,
    /// Text rendered before the widget.
    pub label: Option<String>,
    /// CSS classes.
    pub classes: Option<FieldClasses>,
}

impl FieldDeclaration {
    /// Creates a declaration for the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets an explicit value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the label used in validation messages.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the pipe-delimited rule declaration.
    #[must_use]
    pub fn validate(mut self, rules: impl Into<String>) -> Self {
        self.validate = Some(rules.into());
        self
    }

    /// Adds a field-local rule.
    #[must_use]
    pub fn custom_rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.custom_rules
            .get_or_insert_with(RuleCatalog::new)
            .insert(name, rule);
        self
    }

    /// Replaces the field-local rules.
    #[must_use]
    pub fn custom_rules(mut self, catalog: RuleCatalog) -> Self {
        self.custom_rules = Some(catalog);
        self
    }

    /// Renders the field as a textarea with the given number of rows.
    #[must_use]
    pub fn textarea(mut self, rows: usize) -> Self {
        self.kind = Some(WidgetKind::Textarea);
        self.rows = Some(rows);
        self
    }

    /// Sets the HTML input type.
    #[must_use]
    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Sets the text rendered before the widget.
    #[must_use]
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.label = Some(text.into());
        self
    }

    /// Sets the CSS classes.
    #[must_use]
    pub fn classes(mut self, classes: FieldClasses) -> Self {
        self.classes = Some(classes);
        self
    }
}

/// Stored state of one field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field id.
    pub id: String,
    /// Current value.
    pub value: String,
    /// Declared rule names, in evaluation order.
    pub rules: Vec<String>,
    /// Label used in validation messages.
    pub display_name: Option<String>,
    /// Field-local rules.
    pub custom_rules: RuleCatalog,
    /// Widget used when rendering.
    pub kind: WidgetKind,
    /// HTML input type.
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
    /// Textarea rows.
    pub rows: usize,
    /// Text rendered before the widget.
    pub label: String,
    /// CSS classes.
    pub classes: FieldClasses,
}

impl FieldDescriptor {
    fn new(id: String) -> Self {
        Self {
            id,
            value: String::new(),
            rules: Vec::new(),
            display_name: None,
            custom_rules: RuleCatalog::new(),
            kind: WidgetKind::Input,
            input_type: "text".to_string(),
            placeholder: None,
            rows: DEFAULT_TEXTAREA_ROWS,
            label: String::new(),
            classes: FieldClasses::default(),
        }
    }

    fn merge(&mut self, declaration: FieldDeclaration) {
        let FieldDeclaration {
            id: _,
            value,
            display_name,
            validate,
            custom_rules,
            kind,
            input_type,
            placeholder,
            rows,
            label,
            classes,
        } = declaration;

        if let Some(value) = value {
            self.value = value;
        }
        if let Some(rules) = validate {
            self.rules = parse_rules(&rules);
        }
        if display_name.is_some() {
            self.display_name = display_name;
        }
        if let Some(custom_rules) = custom_rules {
            self.custom_rules = custom_rules;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        if let Some(input_type) = input_type {
            if input_type == TEXTAREA_TYPE {
                self.kind = WidgetKind::Textarea;
            }
            self.input_type = input_type;
        }
        if placeholder.is_some() {
            self.placeholder = placeholder;
        }
        if let Some(rows) = rows {
            self.rows = if rows == 0 { DEFAULT_TEXTAREA_ROWS } else { rows };
        }
        if let Some(label) = label {
            self.label = label;
        }
        if let Some(classes) = classes {
            self.classes = classes;
        }
    }

    /// Returns the label used in validation messages: the display name if
    /// set, otherwise the id.
    #[must_use]
    pub fn message_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// Returns whether the field declares any rules.
    #[must_use]
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }
}

/// Descriptors keyed by field id, remembering registration order.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldDescriptor>,
    order: Vec<String>,
}

impl FieldRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new descriptor or merges into the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingIdentifier`] if the declaration has an
    /// empty id. The registry is left unchanged in that case.
    pub fn register(&mut self, declaration: FieldDeclaration) -> Result<&FieldDescriptor> {
        if declaration.id.is_empty() {
            return Err(FormError::MissingIdentifier);
        }

        let id = declaration.id.clone();
        let descriptor = match self.fields.entry(id) {
            Entry::Occupied(entry) => {
                debug!(field = %entry.key(), "re-registering field");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(field = %entry.key(), "registering field");
                self.order.push(entry.key().clone());
                let id = entry.key().clone();
                entry.insert(FieldDescriptor::new(id))
            }
        };
        descriptor.merge(declaration);
        Ok(&*descriptor)
    }

    /// Replaces the value of a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `id` was never registered.
    pub fn update_value(&mut self, id: &str, value: impl Into<String>) -> Result<()> {
        let descriptor = self
            .fields
            .get_mut(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        descriptor.value = value.into();
        Ok(())
    }

    /// Returns the descriptor for `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id)
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Iterates over descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.order.iter().filter_map(|id| self.fields.get(id))
    }

    /// Returns the descriptors keyed by id.
    #[must_use]
    pub const fn as_map(&self) -> &HashMap<String, FieldDescriptor> {
        &self.fields
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defaults() {
        let mut registry = FieldRegistry::new();
        let field = registry
            .register(FieldDeclaration::new("age").validate("required|numeric"))
            .unwrap();
        assert_eq!(field.id, "age");
        assert_eq!(field.value, "");
        assert_eq!(field.rules, vec!["required", "numeric"]);
        assert_eq!(field.message_label(), "age");
        assert_eq!(field.kind, WidgetKind::Input);
        assert_eq!(field.input_type, "text");
    }

    #[test]
    fn test_register_without_id() {
        let mut registry = FieldRegistry::new();
        let err = registry
            .register(FieldDeclaration::default().validate("required"))
            .unwrap_err();
        assert!(matches!(err, FormError::MissingIdentifier));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_reregister_is_idempotent() {
        let mut registry = FieldRegistry::new();
        let declaration = FieldDeclaration::new("age").validate("required");
        registry.register(declaration.clone()).unwrap();
        registry.update_value("age", "30").unwrap();
        registry.register(declaration).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("age").unwrap().value, "30");
    }

    #[test]
    fn test_reregister_merges() {
        let mut registry = FieldRegistry::new();
        registry
            .register(
                FieldDeclaration::new("age")
                    .validate("required")
                    .display_name("Age"),
            )
            .unwrap();
        registry
            .register(FieldDeclaration::new("age").validate("numeric").value("7"))
            .unwrap();

        let field = registry.get("age").unwrap();
        assert_eq!(field.rules, vec!["numeric"]);
        assert_eq!(field.value, "7");
        assert_eq!(field.message_label(), "Age");
    }

    #[test]
    fn test_update_unknown_field() {
        let mut registry = FieldRegistry::new();
        let err = registry.update_value("ghost", "1").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref id) if id == "ghost"));
    }

    #[test]
    fn test_iter_keeps_registration_order() {
        let mut registry = FieldRegistry::new();
        for id in ["c", "a", "b"] {
            registry.register(FieldDeclaration::new(id)).unwrap();
        }
        registry.register(FieldDeclaration::new("a")).unwrap();
        let ids: Vec<_> = registry.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_declaration_from_json() {
        let declaration: FieldDeclaration = serde_json::from_str(
            r#"{
                "id": "bio",
                "displayName": "Biography",
                "validate": "required",
                "kind": "textarea",
                "rows": 5,
                "classes": {"error": "text-danger"}
            }"#,
        )
        .unwrap();
        assert_eq!(declaration.id, "bio");
        assert_eq!(declaration.kind, Some(WidgetKind::Textarea));
        assert_eq!(declaration.rows, Some(5));
        assert_eq!(
            declaration.classes.unwrap().error.as_deref(),
            Some("text-danger")
        );
    }

    #[test]
    fn test_textarea_from_input_type() {
        let mut registry = FieldRegistry::new();
        let declaration: FieldDeclaration =
            serde_json::from_str(r#"{"id": "bio", "type": "textarea"}"#).unwrap();
        let field = registry.register(declaration).unwrap();
        assert_eq!(field.kind, WidgetKind::Textarea);
        assert_eq!(field.rows, DEFAULT_TEXTAREA_ROWS);
    }

    #[test]
    fn test_zero_rows_uses_default() {
        let mut registry = FieldRegistry::new();
        let field = registry
            .register(FieldDeclaration::new("notes").textarea(0))
            .unwrap();
        assert_eq!(field.rows, DEFAULT_TEXTAREA_ROWS);
    }

    #[test]
    fn test_textarea_builder() {
        let mut registry = FieldRegistry::new();
        let field = registry
            .register(FieldDeclaration::new("notes").textarea(6))
            .unwrap();
        assert_eq!(field.kind, WidgetKind::Textarea);
        assert_eq!(field.rows, 6);
    }
}
