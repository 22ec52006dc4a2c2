//! # oxide-form-state
//!
//! A form-state container: a registry of named fields, their current
//! values, and the latest validation message for each one.
//!
//! This crate provides:
//! - A field registry with idempotent, merging registration
//! - Pipe-delimited rule declarations (`"required|numeric"`)
//! - Built-in and per-field custom rules
//! - Revalidation of a field on every value change
//! - HTML rendering of registered fields
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_form_state::{FieldDeclaration, FormSession};
//!
//! let mut session = FormSession::new();
//! session
//!     .add_field(FieldDeclaration::new("age").validate("required|numeric"))
//!     .unwrap();
//!
//! session.set_field("age", "").unwrap();
//! assert_eq!(session.error("age"), "age is required.");
//!
//! session.set_field("age", "ab").unwrap();
//! assert_eq!(session.error("age"), "age may only contain numbers.");
//!
//! session.set_field("age", "30").unwrap();
//! assert_eq!(session.error("age"), "");
//! ```
//!
//! ## Custom Rules
//!
//! A field can add rules of its own, or replace a built-in rule for itself.
//! The rule's message receives the field's display name, or its id.
//!
//! ```rust
//! use oxide_form_state::{FieldDeclaration, FormSession, Rule};
//!
//! let mut session = FormSession::new();
//! session
//!     .add_field(
//!         FieldDeclaration::new("username")
//!             .validate("isFoo")
//!             .display_name("jp")
//!             .custom_rule(
//!                 "isFoo",
//!                 Rule::with_template("isFoo", r"^\d+$", "Foo. Bar. I am {label}.").unwrap(),
//!             ),
//!     )
//!     .unwrap();
//!
//! session.set_field("username", "abc").unwrap();
//! assert_eq!(session.error("username"), "Foo. Bar. I am jp.");
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use oxide_form_state::{render_field, FieldDeclaration, FormSession};
//!
//! let mut session = FormSession::new();
//! session
//!     .add_field(FieldDeclaration::new("bio").textarea(4).validate("required"))
//!     .unwrap();
//! session.validate_field("bio").unwrap();
//!
//! let html = render_field(&session, "bio").unwrap();
//! assert!(html.contains("bio is required."));
//! ```

mod definition;
mod error;
mod registry;
mod render;
pub mod rules;
mod session;
pub mod validation;
pub mod widgets;

pub use definition::FormDefinition;
pub use error::{ErrorStore, FormError, Result};
pub use registry::{FieldClasses, FieldDeclaration, FieldDescriptor, FieldRegistry, WidgetKind};
pub use render::{render_field, render_form};
pub use rules::{Rule, RuleCatalog, RuleSpec};
pub use session::FormSession;
pub use validation::{parse_rules, validate, UnresolvedRule};
