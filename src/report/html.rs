//! HTML bodies for the PDF renderer.
//!
//! One layout per [`Template`], assembled from shared blocks. The
//! rendering engine consumes the HTML as-is; styling is inline so no
//! asset resolution happens at render time.

use quick_xml::escape::escape;

use crate::core::SaleDocument;

use super::template::Template;

/// Footer mandated by the Reglamento de Comprobantes de Pago.
const FOOTER_LEGEND: &str = "Emitido conforme a lo dispuesto en el Reglamento de \
Comprobantes de Pago - SUNAT.<br>Consulte la validez de este comprobante en: \
<a href=\"https://e-consulta.sunat.gob.pe\">https://e-consulta.sunat.gob.pe</a>";

/// Render the HTML body for `document` using `template`.
pub fn render(document: &SaleDocument, template: Template) -> String {
    let width = match template {
        Template::Ticket | Template::NoteCreditTicket => "72mm",
        _ => "190mm",
    };

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head>");
    html.push_str(&format!(
        "<body style=\"font-family:sans-serif;font-size:12px;width:{width};margin:0 auto;\">"
    ));

    header_block(&mut html, document);
    if matches!(
        template,
        Template::NoteCreditTicket | Template::NoteCreditPdf | Template::Voided
    ) {
        note_block(&mut html, document);
    }
    client_block(&mut html, document);
    items_block(&mut html, document);
    totals_block(&mut html, document);

    for legend in &document.legends {
        html.push_str(&format!("<p><i>{}</i></p>", escape(&legend.value)));
    }
    html.push_str(&format!(
        "<div style=\"font-size:10px;text-align:left;\">{FOOTER_LEGEND}</div>"
    ));
    html.push_str("</body></html>");
    html
}

fn header_block(html: &mut String, document: &SaleDocument) {
    let issuer = &document.issuer;
    html.push_str(&format!(
        "<div style=\"text-align:center;\"><h2>{}</h2><p>{}<br>RUC {}<br>{}</p></div>",
        escape(&issuer.trade_name),
        escape(&issuer.legal_name),
        escape(&issuer.ruc),
        escape(&issuer.address.street),
    ));
    html.push_str(&format!(
        "<div style=\"text-align:center;border:1px solid #000;padding:4px;\">\
         <b>{} ELECTRÓNICA</b><br>{}</div>",
        escape(document.kind.title()).to_uppercase(),
        document.id,
    ));
    html.push_str(&format!(
        "<p>Fecha de emisión: {}<br>Moneda: {}</p>",
        document.issue_date.format("%d/%m/%Y %H:%M"),
        document.currency.code(),
    ));
    if let Some(terms) = document.payment_terms {
        html.push_str(&format!("<p>Forma de pago: {}</p>", terms.label()));
    }
}

fn note_block(html: &mut String, document: &SaleDocument) {
    if let Some(reference) = &document.reference {
        html.push_str(&format!(
            "<p>Documento que modifica: {} {}</p>",
            escape(reference.kind.title()),
            reference.id,
        ));
    }
    if let Some(reason) = &document.reason {
        html.push_str(&format!(
            "<p>Motivo ({}): {}</p>",
            escape(&reason.code),
            escape(&reason.description),
        ));
    }
}

fn client_block(html: &mut String, document: &SaleDocument) {
    let client = &document.client;
    html.push_str(&format!(
        "<p><b>Cliente:</b> {}<br>Doc. ({}) {}<br>{}</p>",
        escape(&client.name),
        escape(&client.doc_type),
        escape(&client.doc_number),
        escape(&client.address),
    ));
}

fn items_block(html: &mut String, document: &SaleDocument) {
    html.push_str(
        "<table style=\"width:100%;border-collapse:collapse;\" border=\"1\" cellpadding=\"3\">\
         <tr><th>Cant.</th><th>Descripción</th><th>V. Unit.</th><th>Importe</th></tr>",
    );
    for item in &document.items {
        html.push_str(&format!(
            "<tr><td>{} {}</td><td>{}</td>\
             <td style=\"text-align:right;\">{:.2}</td>\
             <td style=\"text-align:right;\">{:.2}</td></tr>",
            item.quantity,
            escape(&item.unit),
            escape(&item.description),
            item.unit_value,
            item.line_value,
        ));
    }
    html.push_str("</table>");
}

fn totals_block(html: &mut String, document: &SaleDocument) {
    let totals = &document.totals;
    let currency = document.currency.code();
    html.push_str(&format!(
        "<p style=\"text-align:right;\">Op. gravadas: {currency} {:.2}<br>\
         Op. exoneradas: {currency} {:.2}<br>\
         IGV: {currency} {:.2}<br>\
         <b>Total: {currency} {:.2}</b></p>",
        totals.taxed, totals.exempt, totals.tax, totals.total,
    ));
}
