//! Widgets for rendering field inputs as HTML.

use std::collections::BTreeMap;

use crate::registry::{FieldDescriptor, WidgetKind};

/// Attributes that can be applied to a widget.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// HTML attributes, rendered in key order.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Renders attributes as an HTML attribute string.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, html_escape(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    fn to_suffix(&self) -> String {
        if self.attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", self.to_html())
        }
    }
}

/// Trait for widgets that render an HTML input.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    ///
    /// # Arguments
    /// * `name` - The field name (used for the name attribute)
    /// * `value` - The current value (if any)
    /// * `attrs` - Additional HTML attributes
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Single-line input widget.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type (text, email, password, etc.).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();
        format!(
            r#"<input type="{}" name="{}"{value_attr}{placeholder_attr}{}>"#,
            html_escape(&self.input_type),
            html_escape(name),
            attrs.to_suffix()
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Multi-line textarea widget.
#[derive(Debug, Clone)]
pub struct Textarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Widget for Textarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();
        format!(
            r#"<textarea name="{}" rows="{}"{placeholder_attr}{}>{content}</textarea>"#,
            html_escape(name),
            self.rows,
            attrs.to_suffix()
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Builds the widget a descriptor asks for.
#[must_use]
pub fn widget_for(field: &FieldDescriptor) -> Box<dyn Widget> {
    match field.kind {
        WidgetKind::Input => Box::new(TextInput {
            input_type: field.input_type.clone(),
            placeholder: field.placeholder.clone(),
        }),
        WidgetKind::Textarea => Box::new(Textarea {
            rows: field.rows,
            placeholder: field.placeholder.clone(),
        }),
    }
}

/// Escapes HTML special characters.
#[must_use]
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
