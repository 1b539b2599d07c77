//! Success payload assembly.

use serde_json::{Value, json};

use crate::pipeline::IssueOutcome;

/// Build the success body. The identifier key depends on the document
/// kind (`factura_id`, `boleta_id` or `nota_id`).
pub fn success_body(outcome: &IssueOutcome) -> Value {
    let kind = outcome.document.kind;
    let id = outcome.document.id.to_string();

    let mut body = json!({
        "success": true,
        "message": format!("{} {} procesada con éxito", kind.title(), id),
        "cdr_codigo": outcome.cdr.code,
        "cdr_descripcion": outcome.cdr.description,
        "notas": outcome.cdr.notes,
        "xml_url": outcome.artifacts.xml_url,
        "pdf_url": outcome.artifacts.pdf_url,
        "cdr_url": outcome.artifacts.cdr_url,
        "ticket_url": outcome.artifacts.ticket_url,
    });
    body[kind.id_key()] = Value::String(id);
    body
}
