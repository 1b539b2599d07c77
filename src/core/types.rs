use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// SUNAT catálogo 01 — document kinds handled by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// 01 — Factura.
    Invoice,
    /// 03 — Boleta de venta.
    Receipt,
    /// 07 — Nota de crédito.
    CreditNote,
    /// 08 — Nota de débito.
    DebitNote,
}

impl DocumentKind {
    /// Catálogo 01 two-digit type code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "01",
            Self::Receipt => "03",
            Self::CreditNote => "07",
            Self::DebitNote => "08",
        }
    }

    /// Parse from a catálogo 01 code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Invoice),
            "03" => Some(Self::Receipt),
            "07" => Some(Self::CreditNote),
            "08" => Some(Self::DebitNote),
            _ => None,
        }
    }

    /// True for credit and debit notes, which amend a prior document.
    pub fn is_note(&self) -> bool {
        matches!(self, Self::CreditNote | Self::DebitNote)
    }

    /// Key under which the document identifier is returned in the
    /// response payload (`factura_id`, `boleta_id`, `nota_id`).
    pub fn id_key(&self) -> &'static str {
        match self {
            Self::Invoice => "factura_id",
            Self::Receipt => "boleta_id",
            Self::CreditNote | Self::DebitNote => "nota_id",
        }
    }

    /// Display name used in response messages.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Invoice => "Factura",
            Self::Receipt => "Boleta",
            Self::CreditNote => "Nota de Crédito",
            Self::DebitNote => "Nota de Débito",
        }
    }
}

/// Series + correlative pair forming a document's public identifier.
///
/// The series is exactly four characters, uppercased, and its first
/// character encodes the document family (F = factura series,
/// B = boleta series, N = nota series). The correlative is numeric,
/// one to eight digits, stored zero-padded to eight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentId {
    series: String,
    number: String,
}

impl DocumentId {
    /// Normalize and validate a series/correlative pair.
    pub fn new(series: &str, correlative: &str) -> Result<Self, ValidationError> {
        let series = series.trim().to_uppercase();
        if series.chars().count() != 4 {
            return Err(ValidationError::new(
                "serie",
                format!("serie '{series}' must be exactly 4 characters"),
            ));
        }
        if !series.starts_with(['F', 'B', 'N']) {
            return Err(ValidationError::new(
                "serie",
                format!("serie '{series}' must start with F, B or N"),
            ));
        }

        let correlative = correlative.trim();
        if correlative.is_empty()
            || correlative.len() > 8
            || !correlative.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::new(
                "correlativo",
                format!("correlativo '{correlative}' must be numeric with 1 to 8 digits"),
            ));
        }

        Ok(Self {
            series,
            number: format!("{correlative:0>8}"),
        })
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    /// Zero-padded eight-digit correlative.
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.series, self.number)
    }
}

/// Currencies accepted by the service (catálogo 02 subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    /// PEN — Sol.
    Pen,
    /// USD — US Dollar.
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pen => "PEN",
            Self::Usd => "USD",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PEN" => Some(Self::Pen),
            "USD" => Some(Self::Usd),
            _ => None,
        }
    }
}

/// Receiving party of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientParty {
    /// Catálogo 06 identity document type ("1" = DNI, "6" = RUC, ...).
    pub doc_type: String,
    /// Identity document number.
    pub doc_number: String,
    /// Legal or personal name.
    pub name: String,
    /// Fiscal address free text.
    pub address: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One line of the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Internal product code.
    pub code: String,
    /// UNECE Rec 20 unit of measure ("NIU" = unit).
    pub unit: String,
    pub description: String,
    pub quantity: Decimal,
    /// Unit value before IGV.
    pub unit_value: Decimal,
    /// Unit price including IGV.
    pub unit_price: Decimal,
    /// Line value before IGV (quantity * unit_value).
    pub line_value: Decimal,
    /// IGV taxable base for the line.
    pub tax_base: Decimal,
    /// IGV rate percentage (usually 18).
    pub tax_rate: Decimal,
    /// IGV amount for the line.
    pub tax_amount: Decimal,
    /// Catálogo 07 affectation code ("10" = gravado).
    pub tax_affectation: String,
    /// Total taxes for the line.
    pub total_taxes: Decimal,
}

/// Document-level monetary totals as declared by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    /// Operaciones gravadas (IGV-taxed base).
    pub taxed: Decimal,
    /// Operaciones exoneradas.
    pub exempt: Decimal,
    /// Total IGV.
    pub tax: Decimal,
    /// Valor de venta (net sale value).
    pub sale_value: Decimal,
    /// Subtotal including IGV.
    pub subtotal: Decimal,
    /// Importe total.
    pub total: Decimal,
}

/// Reference from a note to the document it amends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteReference {
    /// Kind of the amended document; restricted to invoice or receipt.
    pub kind: DocumentKind,
    pub id: DocumentId,
}

/// Reason a note was issued (catálogo 09 / 10 code plus free text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteReason {
    pub code: String,
    pub description: String,
}

/// Normalized, validated issuance request — output of the normalizer,
/// input of the document builder. Created per incoming call and
/// discarded once the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub id: DocumentId,
    pub currency: Currency,
    pub client: ClientParty,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    /// Legal legend text (amount in words).
    pub legend: String,
    /// Present iff `kind.is_note()`.
    pub reference: Option<NoteReference>,
    /// Present iff `kind.is_note()`.
    pub reason: Option<NoteReason>,
}

/// Fixed identity of the issuing business. Loaded once from
/// configuration and shared immutably across requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerProfile {
    /// 11-digit RUC.
    pub ruc: String,
    pub legal_name: String,
    pub trade_name: String,
    pub address: IssuerAddress,
}

/// Issuer fiscal address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuerAddress {
    /// INEI district code.
    pub ubigeo: String,
    pub department: String,
    pub province: String,
    pub district: String,
    pub urbanization: String,
    pub street: String,
}

/// Legal legend attached to the printed document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legend {
    /// Catálogo 52 code; "1000" = amount in words.
    pub code: String,
    pub value: String,
}

/// Payment terms; only cash sales are issued through this gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerms {
    Cash,
}

impl PaymentTerms {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Contado",
        }
    }
}

/// Canonical in-memory document handed to the submission client and
/// the renderer. Built from a [`DocumentRequest`] plus the issuer
/// profile and an injected clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDocument {
    pub kind: DocumentKind,
    pub id: DocumentId,
    pub issue_date: NaiveDateTime,
    pub currency: Currency,
    /// UBL schema version; fixed at "2.1".
    pub ubl_version: String,
    /// Catálogo 51 operation type; "0101" for invoices and receipts.
    pub operation_type: Option<String>,
    /// Only invoices carry payment terms.
    pub payment_terms: Option<PaymentTerms>,
    pub issuer: IssuerProfile,
    pub client: ClientParty,
    pub totals: Totals,
    pub items: Vec<LineItem>,
    pub legends: Vec<Legend>,
    pub reference: Option<NoteReference>,
    pub reason: Option<NoteReason>,
}

impl SaleDocument {
    /// Wire filename stem required by SUNAT:
    /// `{RUC}-{tipoDoc}-{serie}-{correlativo}`.
    pub fn filename(&self) -> String {
        format!("{}-{}-{}", self.issuer.ruc, self.kind.code(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_round_trip() {
        for kind in [
            DocumentKind::Invoice,
            DocumentKind::Receipt,
            DocumentKind::CreditNote,
            DocumentKind::DebitNote,
        ] {
            assert_eq!(DocumentKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(DocumentKind::from_code("09"), None);
    }

    #[test]
    fn series_is_normalized() {
        let id = DocumentId::new("fc01", "7").unwrap();
        assert_eq!(id.series(), "FC01");
        assert_eq!(id.number(), "00000007");
        assert_eq!(id.to_string(), "FC01-00000007");
    }

    #[test]
    fn series_rejects_bad_prefix_and_length() {
        assert!(DocumentId::new("XC01", "1").is_err());
        assert!(DocumentId::new("FC1", "1").is_err());
        assert!(DocumentId::new("FC011", "1").is_err());
    }

    #[test]
    fn series_length_counts_characters_not_bytes() {
        assert!(DocumentId::new("FÑ01", "1").is_ok());
        assert!(DocumentId::new("FÑ011", "1").is_err());
    }

    #[test]
    fn correlative_limits() {
        assert!(DocumentId::new("F001", "12345678").is_ok());
        assert!(DocumentId::new("F001", "123456789").is_err());
        assert!(DocumentId::new("F001", "12a").is_err());
        assert!(DocumentId::new("F001", "").is_err());
    }

    #[test]
    fn only_notes_amend() {
        assert!(!DocumentKind::Invoice.is_note());
        assert!(!DocumentKind::Receipt.is_note());
        assert!(DocumentKind::CreditNote.is_note());
        assert!(DocumentKind::DebitNote.is_note());
    }
}
