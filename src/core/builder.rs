//! Document builder: validated request → canonical [`SaleDocument`].
//!
//! Pure mapping, no I/O. The issue date comes from an injected [`Clock`]
//! so builds are deterministic under test.

use chrono::NaiveDateTime;

use super::types::{
    DocumentKind, DocumentRequest, IssuerProfile, Legend, PaymentTerms, SaleDocument,
};

/// Source of the document issue timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Catálogo 52 code for the amount-in-words legend.
const LEGEND_AMOUNT_IN_WORDS: &str = "1000";

/// Catálogo 51 operation type for ordinary domestic sales.
const OPERATION_DOMESTIC_SALE: &str = "0101";

/// Build the canonical document for `request`.
///
/// Kind-specific structure: invoices and receipts carry the domestic
/// sale operation type; only invoices carry payment terms; only notes
/// carry the amended-document reference and reason.
pub fn build_document(
    request: DocumentRequest,
    issuer: &IssuerProfile,
    clock: &dyn Clock,
) -> SaleDocument {
    let operation_type = match request.kind {
        DocumentKind::Invoice | DocumentKind::Receipt => {
            Some(OPERATION_DOMESTIC_SALE.to_string())
        }
        DocumentKind::CreditNote | DocumentKind::DebitNote => None,
    };

    let payment_terms = match request.kind {
        DocumentKind::Invoice => Some(PaymentTerms::Cash),
        _ => None,
    };

    SaleDocument {
        kind: request.kind,
        id: request.id,
        issue_date: clock.now(),
        currency: request.currency,
        ubl_version: "2.1".to_string(),
        operation_type,
        payment_terms,
        issuer: issuer.clone(),
        client: request.client,
        totals: request.totals,
        items: request.items,
        legends: vec![Legend {
            code: LEGEND_AMOUNT_IN_WORDS.to_string(),
            value: request.legend,
        }],
        reference: request.reference,
        reason: request.reason,
    }
}
