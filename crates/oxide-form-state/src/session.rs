//! Form session.
//!
//! A [`FormSession`] owns a [`FieldRegistry`] and an [`ErrorStore`] and is
//! the only write path to either. Every value change revalidates the
//! changed field and records the outcome before the call returns.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::definition::FormDefinition;
use crate::error::{ErrorStore, FormError, Result};
use crate::registry::{FieldDeclaration, FieldDescriptor, FieldRegistry};
use crate::validation::validate;

/// Mutable state of one form: its fields and their latest errors.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    registry: FieldRegistry,
    errors: ErrorStore,
}

impl FormSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with every field of `definition` registered.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingIdentifier`] if a field has no id.
    pub fn from_definition(definition: FormDefinition) -> Result<Self> {
        let mut session = Self::new();
        for declaration in definition.fields {
            session.add_field(declaration)?;
        }
        Ok(session)
    }

    /// Registers a field, or merges into it if the id is already known.
    ///
    /// Registration does not validate; call [`Self::validate_field`] to
    /// populate the initial error.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingIdentifier`] if the declaration has an
    /// empty id.
    pub fn add_field(&mut self, declaration: FieldDeclaration) -> Result<&FieldDescriptor> {
        self.registry.register(declaration).inspect_err(|err| {
            warn!(error = %err, "field registration rejected");
        })
    }

    /// Sets a field's value and revalidates that field.
    ///
    /// The value and its error are committed together: if validation cannot
    /// run, neither is changed.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `id` was never registered, or
    /// [`FormError::UnresolvedRule`] if the field declares a rule no catalog
    /// knows.
    pub fn set_field(&mut self, id: &str, raw_value: impl Into<String>) -> Result<()> {
        let value = raw_value.into();
        let descriptor = self.descriptor(id)?;
        let message = check(descriptor, &value)?;

        self.registry.update_value(id, value)?;
        debug!(field = id, error = %message, "field updated");
        self.errors.set(id, message);
        Ok(())
    }

    /// Revalidates a field against its current value.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `id` was never registered, or
    /// [`FormError::UnresolvedRule`] if the field declares a rule no catalog
    /// knows.
    pub fn validate_field(&mut self, id: &str) -> Result<()> {
        let descriptor = self.descriptor(id)?;
        let message = check(descriptor, &descriptor.value)?;

        debug!(field = id, error = %message, "field validated");
        self.errors.set(id, message);
        Ok(())
    }

    /// Returns all field descriptors keyed by id.
    #[must_use]
    pub const fn fields(&self) -> &HashMap<String, FieldDescriptor> {
        self.registry.as_map()
    }

    /// Returns all recorded error messages keyed by id.
    #[must_use]
    pub const fn errors(&self) -> &HashMap<String, String> {
        self.errors.as_map()
    }

    /// Returns the field registry.
    #[must_use]
    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Returns the error store.
    #[must_use]
    pub const fn error_store(&self) -> &ErrorStore {
        &self.errors
    }

    /// Returns the descriptor for `id`.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.registry.get(id)
    }

    /// Returns the current value of `id`.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&str> {
        self.registry.get(id).map(|field| field.value.as_str())
    }

    /// Returns the latest error for `id`, or `""` if there is none.
    #[must_use]
    pub fn error(&self, id: &str) -> &str {
        self.errors.get(id)
    }

    /// Returns whether `id` currently has no error message.
    #[must_use]
    pub fn is_valid(&self, id: &str) -> bool {
        self.error(id).is_empty()
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn descriptor(&self, id: &str) -> Result<&FieldDescriptor> {
        self.registry.get(id).ok_or_else(|| {
            warn!(field = id, "operation on unregistered field");
            FormError::UnknownField(id.to_string())
        })
    }
}

/// Runs the field's rules against `value`, returning the message to store.
fn check(field: &FieldDescriptor, value: &str) -> Result<String> {
    if !field.has_rules() {
        return Ok(String::new());
    }

    validate(value, &field.rules, field.message_label(), &field.custom_rules)
        .map(Option::unwrap_or_default)
        .map_err(|unresolved| {
            warn!(field = %field.id, rule = %unresolved.0, "unresolved rule");
            FormError::UnresolvedRule {
                field: field.id.clone(),
                rule: unresolved.0,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    fn age_session() -> FormSession {
        let mut session = FormSession::new();
        session
            .add_field(FieldDeclaration::new("age").validate("required|numeric"))
            .unwrap();
        session
    }

    #[test]
    fn test_add_field_does_not_validate() {
        let session = age_session();
        assert_eq!(session.len(), 1);
        assert!(session.errors().is_empty());
        assert_eq!(session.value("age"), Some(""));
    }

    #[test]
    fn test_age_scenario() {
        let mut session = age_session();

        session.set_field("age", "").unwrap();
        assert_eq!(session.error("age"), "age is required.");

        session.set_field("age", "ab").unwrap();
        assert_eq!(session.error("age"), "age may only contain numbers.");

        session.set_field("age", "30").unwrap();
        assert_eq!(session.error("age"), "");
        assert!(session.is_valid("age"));
        assert_eq!(session.value("age"), Some("30"));
    }

    #[test]
    fn test_set_unknown_field_leaves_state_untouched() {
        let mut session = age_session();
        session.set_field("age", "x").unwrap();
        let before = session.errors().clone();

        let err = session.set_field("ghost", "1").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref id) if id == "ghost"));
        assert_eq!(session.errors(), &before);
        assert!(session.field("ghost").is_none());
    }

    #[test]
    fn test_validate_unknown_field() {
        let mut session = FormSession::new();
        let err = session.validate_field("ghost").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(_)));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_validate_field_after_registration() {
        let mut session = age_session();
        session.validate_field("age").unwrap();
        assert_eq!(session.error("age"), "age is required.");
    }

    #[test]
    fn test_field_without_rules_always_valid() {
        let mut session = FormSession::new();
        session.add_field(FieldDeclaration::new("notes")).unwrap();
        session.set_field("notes", "anything at all").unwrap();
        assert_eq!(session.error("notes"), "");
        assert!(session.errors().contains_key("notes"));
    }

    #[test]
    fn test_unresolved_rule_is_atomic() {
        let mut session = FormSession::new();
        session
            .add_field(FieldDeclaration::new("username").validate("required|isFoo"))
            .unwrap();
        session.set_field("username", "").unwrap();
        assert_eq!(session.error("username"), "username is required.");

        let err = session.set_field("username", "jp").unwrap_err();
        assert!(matches!(
            err,
            FormError::UnresolvedRule { ref field, ref rule } if field == "username" && rule == "isFoo"
        ));
        assert_eq!(session.value("username"), Some(""));
        assert_eq!(session.error("username"), "username is required.");
    }

    #[test]
    fn test_custom_rule_with_display_name() {
        let mut session = FormSession::new();
        session
            .add_field(
                FieldDeclaration::new("username")
                    .validate("isFoo")
                    .display_name("jp")
                    .custom_rule(
                        "isFoo",
                        Rule::with_template("isFoo", r"^\d+$", "Foo. Bar. I am {label}.").unwrap(),
                    ),
            )
            .unwrap();

        session.set_field("username", "abc").unwrap();
        assert_eq!(session.error("username"), "Foo. Bar. I am jp.");
        session.set_field("username", "123").unwrap();
        assert_eq!(session.error("username"), "");
    }

    #[test]
    fn test_fields_are_independent() {
        let mut session = age_session();
        session
            .add_field(FieldDeclaration::new("name").validate("required"))
            .unwrap();

        session.set_field("age", "1").unwrap();
        assert!(session.errors().contains_key("age"));
        assert!(!session.errors().contains_key("name"));
    }

    #[test]
    fn test_reregistration_keeps_value_and_error() {
        let mut session = age_session();
        session.set_field("age", "ab").unwrap();
        session
            .add_field(FieldDeclaration::new("age").validate("required|numeric"))
            .unwrap();

        assert_eq!(session.len(), 1);
        assert_eq!(session.value("age"), Some("ab"));
        assert_eq!(session.error("age"), "age may only contain numbers.");
    }
}
