//! Template selection policy.
//!
//! Each document kind + print variant maps to exactly one template;
//! the match is exhaustive so adding a kind forces a decision here.

use crate::core::DocumentKind;

/// Print variant of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Full-page (A4) output.
    Full,
    /// Condensed 80mm thermal-printer output.
    Ticket,
}

/// Available print templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Boleta, ticket layout.
    Ticket,
    /// Boleta, full-page layout.
    TicketPdf,
    /// Factura, full-page layout (also used for factura tickets).
    InvoicePdf,
    /// Nota de crédito, ticket layout.
    NoteCreditTicket,
    /// Nota de crédito, full-page layout.
    NoteCreditPdf,
    /// Fallback for kinds without a dedicated layout.
    Voided,
}

/// Select the template for a document kind and variant.
pub fn select(kind: DocumentKind, variant: Variant) -> Template {
    match (kind, variant) {
        (DocumentKind::Receipt, Variant::Ticket) => Template::Ticket,
        (DocumentKind::Receipt, Variant::Full) => Template::TicketPdf,
        (DocumentKind::Invoice, _) => Template::InvoicePdf,
        (DocumentKind::CreditNote, Variant::Ticket) => Template::NoteCreditTicket,
        (DocumentKind::CreditNote, Variant::Full) => Template::NoteCreditPdf,
        (DocumentKind::DebitNote, _) => Template::Voided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_templates_follow_variant() {
        assert_eq!(select(DocumentKind::Receipt, Variant::Ticket), Template::Ticket);
        assert_eq!(select(DocumentKind::Receipt, Variant::Full), Template::TicketPdf);
    }

    #[test]
    fn invoice_uses_one_template_for_both_variants() {
        assert_eq!(select(DocumentKind::Invoice, Variant::Full), Template::InvoicePdf);
        assert_eq!(select(DocumentKind::Invoice, Variant::Ticket), Template::InvoicePdf);
    }

    #[test]
    fn credit_note_templates_follow_variant() {
        assert_eq!(
            select(DocumentKind::CreditNote, Variant::Ticket),
            Template::NoteCreditTicket
        );
        assert_eq!(
            select(DocumentKind::CreditNote, Variant::Full),
            Template::NoteCreditPdf
        );
    }

    #[test]
    fn other_kinds_fall_back_to_voided() {
        assert_eq!(select(DocumentKind::DebitNote, Variant::Full), Template::Voided);
        assert_eq!(select(DocumentKind::DebitNote, Variant::Ticket), Template::Voided);
    }
}
