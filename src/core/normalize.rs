//! Request normalizer: typed wire payload → validated [`DocumentRequest`].
//!
//! Pure function, no side effects. Validation is fail-fast: the first
//! violated rule is returned. Missing optional fields receive the
//! documented defaults; required fields produce a [`ValidationError`]
//! naming the field.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::catalogs;
use super::error::ValidationError;
use super::types::{
    ClientParty, Currency, DocumentId, DocumentKind, DocumentRequest, LineItem, NoteReason,
    NoteReference, Totals,
};

/// Legend used when the caller omits `leyenda`.
pub const DEFAULT_LEGEND: &str = "Monto en letras";

/// Placeholder address when the client's is not given.
const DEFAULT_ADDRESS: &str = "SIN DIRECCIÓN";

/// Absolute tolerance for the totals coherence check.
fn total_tolerance() -> Decimal {
    dec!(0.02)
}

/// JSON scalar that callers send either as a number or as a string
/// (correlatives, document type codes, reason codes).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CodeValue {
    Number(u64),
    Text(String),
}

impl CodeValue {
    fn into_text(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Raw issuance request as received over HTTP. Field names follow the
/// public wire contract (Spanish, camelCase where the original used it).
#[derive(Debug, Clone, Deserialize)]
pub struct RawDocument {
    pub serie: Option<String>,
    pub correlativo: Option<CodeValue>,
    pub moneda: Option<String>,
    pub cliente: Option<RawClient>,
    pub items: Option<Vec<RawItem>>,
    #[serde(default)]
    pub gravadas: Option<Decimal>,
    #[serde(default)]
    pub exoneradas: Option<Decimal>,
    #[serde(default)]
    pub igv: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default, rename = "valorVenta")]
    pub valor_venta: Option<Decimal>,
    #[serde(default, rename = "subTotal")]
    pub sub_total: Option<Decimal>,
    pub leyenda: Option<String>,
    /// Notes only: the amended document.
    pub comprobante_modifica: Option<RawReference>,
    /// Notes only: free-text reason.
    pub motivo: Option<String>,
    /// Notes only: catálogo 09/10 reason code.
    pub tipo_motivo: Option<CodeValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClient {
    #[serde(rename = "tipoDoc")]
    pub tipo_doc: Option<CodeValue>,
    #[serde(rename = "numDoc")]
    pub num_doc: Option<CodeValue>,
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub codigo: Option<String>,
    pub unidad: Option<String>,
    pub descripcion: Option<String>,
    pub cantidad: Option<Decimal>,
    #[serde(rename = "valorUnitario")]
    pub valor_unitario: Option<Decimal>,
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: Option<Decimal>,
    #[serde(rename = "valorVenta")]
    pub valor_venta: Option<Decimal>,
    #[serde(rename = "baseIgv")]
    pub base_igv: Option<Decimal>,
    #[serde(rename = "porcentajeIgv")]
    pub porcentaje_igv: Option<Decimal>,
    pub igv: Option<Decimal>,
    #[serde(rename = "tipoAfectacionIgv")]
    pub tipo_afectacion_igv: Option<CodeValue>,
    #[serde(rename = "totalImpuestos")]
    pub total_impuestos: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReference {
    pub tipo: Option<CodeValue>,
    pub serie: Option<String>,
    pub correlativo: Option<CodeValue>,
}

/// Normalize a raw payload into a validated request for `kind`.
pub fn normalize(kind: DocumentKind, raw: RawDocument) -> Result<DocumentRequest, ValidationError> {
    let serie = raw.serie.ok_or_else(|| ValidationError::missing("serie"))?;
    let correlativo = raw
        .correlativo
        .ok_or_else(|| ValidationError::missing("correlativo"))?
        .into_text();
    let id = DocumentId::new(&serie, &correlativo)?;

    let currency = match raw.moneda {
        None => Currency::Pen,
        Some(code) => {
            let code = code.trim().to_uppercase();
            Currency::from_code(&code).ok_or_else(|| {
                ValidationError::new("moneda", format!("unsupported currency '{code}'"))
            })?
        }
    };

    let client = normalize_client(kind, raw.cliente)?;
    let items = normalize_items(raw.items)?;
    let totals = normalize_totals(
        raw.gravadas,
        raw.exoneradas,
        raw.igv,
        raw.total,
        raw.valor_venta,
        raw.sub_total,
    )?;

    let (reference, reason) = if kind.is_note() {
        let reference = normalize_reference(raw.comprobante_modifica)?;
        let reason = normalize_reason(kind, raw.tipo_motivo, raw.motivo)?;
        (Some(reference), Some(reason))
    } else {
        (None, None)
    };

    let legend = raw
        .leyenda
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LEGEND.to_string());

    Ok(DocumentRequest {
        kind,
        id,
        currency,
        client,
        items,
        totals,
        legend,
        reference,
        reason,
    })
}

fn normalize_client(
    kind: DocumentKind,
    raw: Option<RawClient>,
) -> Result<ClientParty, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::missing("cliente"))?;

    let doc_number = raw
        .num_doc
        .map(CodeValue::into_text)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ValidationError::missing("cliente.numDoc"))?;
    let name = raw
        .nombre
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ValidationError::missing("cliente.nombre"))?;

    let doc_type = match raw.tipo_doc {
        Some(code) => {
            let code = code.into_text();
            if !catalogs::is_client_doc_type(&code) {
                return Err(ValidationError::new(
                    "cliente.tipoDoc",
                    format!("unknown identity document type '{code}'"),
                ));
            }
            code
        }
        // Receipts go to final consumers (DNI); everything else assumes RUC.
        None => match kind {
            DocumentKind::Receipt => "1".to_string(),
            _ => "6".to_string(),
        },
    };

    Ok(ClientParty {
        doc_type,
        doc_number,
        name,
        address: raw
            .direccion
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        email: raw.email.filter(|e| !e.trim().is_empty()),
        phone: raw.telefono.filter(|t| !t.trim().is_empty()),
    })
}

fn normalize_items(raw: Option<Vec<RawItem>>) -> Result<Vec<LineItem>, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::missing("items"))?;
    if raw.is_empty() {
        return Err(ValidationError::new("items", "at least one item is required"));
    }

    let mut items = Vec::with_capacity(raw.len());
    for (i, item) in raw.into_iter().enumerate() {
        let index = i + 1;

        let description = item
            .descripcion
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                ValidationError::new(
                    format!("items[{index}].descripcion"),
                    "item description must not be empty",
                )
            })?;

        let quantity = item.cantidad.unwrap_or(Decimal::ONE);
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::new(
                format!("items[{index}].cantidad"),
                format!("quantity {quantity} must be greater than 0"),
            ));
        }

        let tax_affectation = match item.tipo_afectacion_igv {
            Some(code) => {
                let code = code.into_text();
                if !catalogs::is_tax_affectation(&code) {
                    return Err(ValidationError::new(
                        format!("items[{index}].tipoAfectacionIgv"),
                        format!("unknown IGV affectation code '{code}'"),
                    ));
                }
                code
            }
            None => "10".to_string(),
        };

        items.push(LineItem {
            code: item
                .codigo
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| format!("P{index:03}")),
            unit: item
                .unidad
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| "NIU".to_string()),
            description,
            quantity,
            unit_value: item.valor_unitario.unwrap_or_default(),
            unit_price: item.precio_unitario.unwrap_or_default(),
            line_value: item.valor_venta.unwrap_or_default(),
            tax_base: item.base_igv.unwrap_or_default(),
            tax_rate: item.porcentaje_igv.unwrap_or(dec!(18)),
            tax_amount: item.igv.unwrap_or_default(),
            tax_affectation,
            total_taxes: item.total_impuestos.unwrap_or_default(),
        });
    }

    Ok(items)
}

fn normalize_totals(
    gravadas: Option<Decimal>,
    exoneradas: Option<Decimal>,
    igv: Option<Decimal>,
    total: Option<Decimal>,
    valor_venta: Option<Decimal>,
    sub_total: Option<Decimal>,
) -> Result<Totals, ValidationError> {
    let taxed = gravadas.unwrap_or_default();
    let exempt = exoneradas.unwrap_or_default();
    let tax = igv.unwrap_or_default();
    let total = total.unwrap_or_default();

    // Coherence: total must equal the taxable amount plus IGV.
    let taxable = taxed + exempt;
    if (total - (taxable + tax)).abs() > total_tolerance() {
        return Err(ValidationError::new(
            "total",
            format!("total {total} does not match taxable {taxable} + igv {tax}"),
        ));
    }

    Ok(Totals {
        taxed,
        exempt,
        tax,
        sale_value: valor_venta.unwrap_or(taxable),
        subtotal: sub_total.unwrap_or(total),
        total,
    })
}

fn normalize_reference(
    raw: Option<RawReference>,
) -> Result<NoteReference, ValidationError> {
    let raw = raw.ok_or_else(|| ValidationError::missing("comprobante_modifica"))?;

    let code = raw
        .tipo
        .map(CodeValue::into_text)
        .ok_or_else(|| ValidationError::missing("comprobante_modifica.tipo"))?;
    let kind = DocumentKind::from_code(&code)
        .filter(|k| !k.is_note())
        .ok_or_else(|| {
            ValidationError::new(
                "comprobante_modifica.tipo",
                format!("amended document type '{code}' must be 01 (factura) or 03 (boleta)"),
            )
        })?;

    let serie = raw
        .serie
        .ok_or_else(|| ValidationError::missing("comprobante_modifica.serie"))?;
    let correlativo = raw
        .correlativo
        .map(CodeValue::into_text)
        .ok_or_else(|| ValidationError::missing("comprobante_modifica.correlativo"))?;
    let id = DocumentId::new(&serie, &correlativo)
        .map_err(|e| ValidationError::new(format!("comprobante_modifica.{}", e.field), e.message))?;

    Ok(NoteReference { kind, id })
}

fn normalize_reason(
    kind: DocumentKind,
    tipo_motivo: Option<CodeValue>,
    motivo: Option<String>,
) -> Result<NoteReason, ValidationError> {
    let code = tipo_motivo
        .map(CodeValue::into_text)
        .ok_or_else(|| ValidationError::missing("tipo_motivo"))?;

    let known = match kind {
        DocumentKind::CreditNote => catalogs::is_credit_note_reason(&code),
        DocumentKind::DebitNote => catalogs::is_debit_note_reason(&code),
        _ => false,
    };
    if !known {
        return Err(ValidationError::new(
            "tipo_motivo",
            format!("unknown reason code '{code}' for {}", kind.title()),
        ));
    }

    let description = motivo
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ValidationError::missing("motivo"))?;

    Ok(NoteReason { code, description })
}
