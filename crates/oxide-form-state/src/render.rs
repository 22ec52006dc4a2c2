//! Rendering registered fields as HTML.
//!
//! Rendering only reads session state. Callers re-render after every
//! mutating call to pick up the new value and error.

use ironhtml::html;
use ironhtml_elements::{Div, P};

use crate::error::{FormError, Result};
use crate::session::FormSession;
use crate::widgets::{widget_for, WidgetAttrs};

/// Renders one field: its label, widget, and current error message.
///
/// # Errors
///
/// Returns [`FormError::UnknownField`] if `id` was never registered.
pub fn render_field(session: &FormSession, id: &str) -> Result<String> {
    let field = session
        .field(id)
        .ok_or_else(|| FormError::UnknownField(id.to_string()))?;

    let mut attrs = WidgetAttrs::new().with("id", &field.id);
    if let Some(class) = &field.classes.field {
        attrs.set("class", class);
    }
    let widget_html = widget_for(field).render(&field.id, Some(&field.value), &attrs);

    let error_class = field.classes.error.as_deref();
    let error = session.error(id);

    let mut container = match field.classes.container.as_deref() {
        Some(container_class) => html! { div.class(#container_class) },
        None => html! { div {} },
    };
    if !field.label.is_empty() {
        let field_id = field.id.as_str();
        let label_text = field.label.as_str();
        let label_el = html! {
            label.for_(#field_id) { #label_text }
        };
        container = container.raw(label_el.render());
    }

    Ok(container
        .raw(&widget_html)
        .child::<P, _>(|p| match error_class {
            Some(class) => p.class(class).text(error),
            None => p.text(error),
        })
        .render())
}

/// Renders every registered field, in registration order, inside a form.
///
/// # Errors
///
/// Propagates errors from [`render_field`].
pub fn render_form(session: &FormSession, action: &str, method: &str) -> Result<String> {
    let mut form = html! {
        form.action(#action).method(#method)
    };
    for field in session.registry().iter() {
        let field_html = render_field(session, &field.id)?;
        form = form.child::<Div, _>(|d| d.raw(&field_html));
    }
    Ok(form.render())
}
