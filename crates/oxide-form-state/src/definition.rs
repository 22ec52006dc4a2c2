//! Declarative form definitions.
//!
//! A definition is a list of field declarations, typically loaded from
//! JSON:
//!
//! ```json
//! {
//!   "fields": [
//!     { "id": "age", "validate": "required|numeric" },
//!     {
//!       "id": "username",
//!       "displayName": "jp",
//!       "validate": "isFoo",
//!       "customRules": {
//!         "isFoo": { "pattern": "^\\d+$", "message": "Foo. Bar. I am {label}." }
//!       }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;
use crate::registry::FieldDeclaration;
use crate::rules::{RuleCatalog, RuleSpec};

/// Field declarations for a whole form, in registration order.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
    /// Fields to register.
    pub fields: Vec<FieldDeclaration>,
}

#[derive(Deserialize)]
struct RawDefinition {
    #[serde(default)]
    fields: Vec<RawField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(flatten)]
    declaration: FieldDeclaration,
    #[serde(default)]
    custom_rules: HashMap<String, RuleSpec>,
}

impl RawField {
    fn compile(self) -> Result<FieldDeclaration> {
        let Self {
            declaration,
            custom_rules,
        } = self;
        if custom_rules.is_empty() {
            return Ok(declaration);
        }
        Ok(declaration.custom_rules(RuleCatalog::try_from(custom_rules)?))
    }
}

impl FormDefinition {
    /// Parses a definition from JSON and compiles its custom rules.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FormError::Definition`] if the JSON is malformed, or
    /// [`crate::FormError::InvalidPattern`] if a custom rule pattern does not
    /// compile.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDefinition = serde_json::from_str(json)?;
        let fields = raw
            .fields
            .into_iter()
            .map(RawField::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }
}
