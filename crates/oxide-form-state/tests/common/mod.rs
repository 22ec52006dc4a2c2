#![allow(dead_code)]

use oxide_form_state::{FieldDeclaration, FormDefinition, FormSession};

pub fn session_with(declarations: Vec<FieldDeclaration>) -> FormSession {
    let mut session = FormSession::new();
    for declaration in declarations {
        let id = declaration.id.clone();
        session
            .add_field(declaration)
            .unwrap_or_else(|e| panic!("Failed to register {id}: {e}"));
    }
    session
}

pub fn session_from_json(json: &str) -> FormSession {
    let definition = FormDefinition::from_json(json)
        .unwrap_or_else(|e| panic!("Failed to parse definition: {json}\nError: {e}"));
    FormSession::from_definition(definition)
        .unwrap_or_else(|e| panic!("Failed to build session: {e}"))
}

pub fn set(session: &mut FormSession, id: &str, value: &str) -> String {
    session
        .set_field(id, value)
        .unwrap_or_else(|e| panic!("Failed to set {id} = {value:?}: {e}"));
    session.error(id).to_string()
}
