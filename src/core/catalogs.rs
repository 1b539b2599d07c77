//! SUNAT catálogo code validation.
//!
//! Catálogo 09 defines credit note reason codes, catálogo 10 debit note
//! reason codes, catálogo 06 identity document types and catálogo 07
//! IGV affectation codes.

/// Check whether `code` is a known catálogo 09 credit note reason.
pub fn is_credit_note_reason(code: &str) -> bool {
    CREDIT_NOTE_REASONS.binary_search(&code).is_ok()
}

/// Check whether `code` is a known catálogo 10 debit note reason.
pub fn is_debit_note_reason(code: &str) -> bool {
    DEBIT_NOTE_REASONS.binary_search(&code).is_ok()
}

/// Check whether `code` is a known catálogo 06 identity document type.
pub fn is_client_doc_type(code: &str) -> bool {
    CLIENT_DOC_TYPES.binary_search(&code).is_ok()
}

/// Check whether `code` is a known catálogo 07 IGV affectation code.
pub fn is_tax_affectation(code: &str) -> bool {
    TAX_AFFECTATIONS.binary_search(&code).is_ok()
}

/// Catálogo 09 — credit note reasons (sorted for binary search).
static CREDIT_NOTE_REASONS: &[&str] = &[
    "01", // Anulación de la operación
    "02", // Anulación por error en el RUC
    "03", // Corrección por error en la descripción
    "04", // Descuento global
    "05", // Descuento por ítem
    "06", // Devolución total
    "07", // Devolución por ítem
    "08", // Bonificación
    "09", // Disminución en el valor
    "10", // Otros conceptos
    "11", // Ajustes de operaciones de exportación
    "12", // Ajustes afectos al IVAP
    "13", // Ajustes - montos y/o fechas de pago
];

/// Catálogo 10 — debit note reasons (sorted for binary search).
static DEBIT_NOTE_REASONS: &[&str] = &[
    "01", // Intereses por mora
    "02", // Aumento en el valor
    "03", // Penalidades / otros conceptos
    "11", // Ajustes de operaciones de exportación
    "12", // Ajustes afectos al IVAP
];

/// Catálogo 06 — identity document types (sorted for binary search).
static CLIENT_DOC_TYPES: &[&str] = &[
    "0", // Sin documento
    "1", // DNI
    "4", // Carnet de extranjería
    "6", // RUC
    "7", // Pasaporte
    "A", // Cédula diplomática
    "B", // Doc. identidad país residencia
];

/// Catálogo 07 — IGV affectation codes (sorted for binary search).
static TAX_AFFECTATIONS: &[&str] = &[
    "10", // Gravado - operación onerosa
    "11", // Gravado - retiro por premio
    "12", // Gravado - retiro por donación
    "13", // Gravado - retiro
    "14", // Gravado - retiro por publicidad
    "15", // Gravado - bonificaciones
    "16", // Gravado - retiro por entrega a trabajadores
    "17", // Gravado - IVAP
    "20", // Exonerado - operación onerosa
    "21", // Exonerado - transferencia gratuita
    "30", // Inafecto - operación onerosa
    "31", // Inafecto - retiro por bonificación
    "32", // Inafecto - retiro
    "33", // Inafecto - retiro por muestras médicas
    "34", // Inafecto - retiro por convenio colectivo
    "35", // Inafecto - retiro por premio
    "36", // Inafecto - retiro por publicidad
    "40", // Exportación
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_credit_reasons() {
        assert!(is_credit_note_reason("01"));
        assert!(is_credit_note_reason("07"));
        assert!(is_credit_note_reason("13"));
    }

    #[test]
    fn unknown_credit_reasons() {
        assert!(!is_credit_note_reason("00"));
        assert!(!is_credit_note_reason("14"));
        assert!(!is_credit_note_reason(""));
        assert!(!is_credit_note_reason("ANULACION"));
    }

    #[test]
    fn known_debit_reasons() {
        assert!(is_debit_note_reason("01"));
        assert!(is_debit_note_reason("02"));
        assert!(is_debit_note_reason("11"));
    }

    #[test]
    fn unknown_debit_reasons() {
        assert!(!is_debit_note_reason("04"));
        assert!(!is_debit_note_reason("13"));
    }

    #[test]
    fn known_doc_types() {
        assert!(is_client_doc_type("1"));
        assert!(is_client_doc_type("6"));
        assert!(!is_client_doc_type("2"));
        assert!(!is_client_doc_type("RUC"));
    }

    #[test]
    fn known_affectations() {
        assert!(is_tax_affectation("10"));
        assert!(is_tax_affectation("20"));
        assert!(is_tax_affectation("40"));
        assert!(!is_tax_affectation("50"));
    }

    #[test]
    fn lists_are_sorted() {
        for list in [
            CREDIT_NOTE_REASONS,
            DEBIT_NOTE_REASONS,
            CLIENT_DOC_TYPES,
            TAX_AFFECTATIONS,
        ] {
            for window in list.windows(2) {
                assert!(
                    window[0] < window[1],
                    "codes not sorted: {} >= {}",
                    window[0],
                    window[1]
                );
            }
        }
    }
}
