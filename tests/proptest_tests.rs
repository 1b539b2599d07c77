//! Property tests over identifiers and totals coherence.

use facturador::core::{DocumentId, DocumentKind, RawDocument, normalize};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

fn payload(total: Decimal) -> RawDocument {
    serde_json::from_value(json!({
        "serie": "F001",
        "correlativo": 1,
        "cliente": { "numDoc": "20100100100", "nombre": "CLIENTE SAC" },
        "items": [{ "descripcion": "Producto", "valorVenta": 100 }],
        "gravadas": 100,
        "igv": 18,
        "total": total.to_string().parse::<f64>().unwrap()
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn correlatives_are_zero_padded_to_eight_digits(n in 1u64..=99_999_999) {
        let id = DocumentId::new("F001", &n.to_string()).unwrap();
        prop_assert_eq!(id.number().len(), 8);
        prop_assert_eq!(id.number().parse::<u64>().unwrap(), n);
    }

    #[test]
    fn normalized_ids_are_idempotent(n in 1u64..=99_999_999) {
        let once = DocumentId::new("F001", &n.to_string()).unwrap();
        let twice = DocumentId::new(once.series(), once.number()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn correlatives_over_eight_digits_are_rejected(n in 100_000_000u64..u64::MAX) {
        prop_assert!(DocumentId::new("F001", &n.to_string()).is_err());
    }

    #[test]
    fn totals_within_two_cents_pass(cents in -2i64..=2) {
        let total = Decimal::new(11800 + cents, 2);
        prop_assert!(normalize(DocumentKind::Invoice, payload(total)).is_ok());
    }

    #[test]
    fn totals_beyond_two_cents_fail(cents in 3i64..=1000) {
        let sign = if cents % 2 == 0 { 1 } else { -1 };
        let total = Decimal::new(11800 + sign * cents, 2);
        prop_assert!(normalize(DocumentKind::Invoice, payload(total)).is_err());
    }
}
