//! Drives a small profile form through a few edits and prints the
//! rendered HTML after each one.
//!
//! Logs the registration and validation trace at DEBUG.

use oxide_form_state::{render_form, FieldDeclaration, FormSession, Rule};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut session = FormSession::new();
    session.add_field(
        FieldDeclaration::new("username")
            .label("Username")
            .validate("isFoo")
            .display_name("jp")
            .custom_rule(
                "isFoo",
                Rule::with_template("isFoo", r"^\d+$", "Foo. Bar. I am {label}.")?,
            ),
    )?;
    session.add_field(
        FieldDeclaration::new("age")
            .label("Age")
            .validate("required|numeric"),
    )?;
    session.add_field(FieldDeclaration::new("bio").label("About you").textarea(3))?;

    for (id, value) in [("username", "abc"), ("age", ""), ("age", "30"), ("username", "7")] {
        session.set_field(id, value)?;
        info!(field = id, value, error = session.error(id), "edited");
        println!("{}\n", render_form(&session, "", "post")?);
    }

    Ok(())
}
