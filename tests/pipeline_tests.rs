//! End-to-end pipeline behavior with mocked collaborators.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use facturador::api::success_body;
use facturador::core::{
    Clock, DocumentKind, EmisionError, IssuerAddress, IssuerProfile, RawDocument, SaleDocument,
};
use facturador::pipeline::EmissionService;
use facturador::report::{ArtifactGenerator, PdfRenderer, RenderError, Variant};
use facturador::storage::{ArtifactStore, Publisher, StoreError};
use facturador::sunat::{Biller, CdrSummary, Submission, SubmissionError};
use serde_json::json;

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }
}

struct AcceptingBiller;

#[async_trait]
impl Biller for AcceptingBiller {
    async fn send(&self, document: &SaleDocument) -> Result<Submission, SubmissionError> {
        Ok(Submission {
            signed_xml: format!("<Invoice>{}</Invoice>", document.id).into_bytes(),
            cdr_zip: b"cdr-zip".to_vec(),
            cdr: CdrSummary {
                code: "0".into(),
                description: format!("La Factura numero {}, ha sido aceptada", document.id),
                notes: vec![],
            },
        })
    }
}

struct RejectingBiller;

#[async_trait]
impl Biller for RejectingBiller {
    async fn send(&self, _document: &SaleDocument) -> Result<Submission, SubmissionError> {
        Err(SubmissionError::Rejected {
            code: "2335".into(),
            message: "El documento electrónico ingresado ha sido alterado".into(),
        })
    }
}

struct StubRenderer;

#[async_trait]
impl PdfRenderer for StubRenderer {
    async fn render(&self, _html: &str, variant: Variant) -> Result<Vec<u8>, RenderError> {
        Ok(match variant {
            Variant::Full => b"%PDF full".to_vec(),
            Variant::Ticket => b"%PDF ticket".to_vec(),
        })
    }
}

#[derive(Default)]
struct RecordingStore {
    keys: Mutex<Vec<String>>,
}

#[async_trait]
impl ArtifactStore for RecordingStore {
    async fn put(&self, key: &str, _bytes: &[u8], _ct: &str) -> Result<(), StoreError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

fn issuer() -> IssuerProfile {
    IssuerProfile {
        ruc: "20123456789".into(),
        legal_name: "COMERCIAL ANDINA S.A.C.".into(),
        trade_name: "Comercial Andina".into(),
        address: IssuerAddress {
            ubigeo: "150101".into(),
            department: "LIMA".into(),
            province: "LIMA".into(),
            district: "LIMA".into(),
            urbanization: "-".into(),
            street: "Av. Arequipa 1234".into(),
        },
    }
}

fn service(biller: Arc<dyn Biller>, store: Arc<RecordingStore>, beta: bool) -> EmissionService {
    EmissionService::new(
        issuer(),
        Arc::new(FixedClock),
        biller,
        ArtifactGenerator::new(Arc::new(StubRenderer)),
        Publisher::new(store, "https://cdn.example.com", beta),
    )
}

fn invoice_payload() -> RawDocument {
    serde_json::from_value(json!({
        "serie": "F001",
        "correlativo": 1,
        "cliente": { "tipoDoc": "6", "numDoc": "20100100100", "nombre": "CLIENTE SAC" },
        "items": [{ "descripcion": "Producto", "valorVenta": 100 }],
        "gravadas": 100,
        "igv": 18,
        "total": 118
    }))
    .unwrap()
}

#[tokio::test]
async fn accepted_invoice_yields_four_urls_and_a_factura_id() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(Arc::new(AcceptingBiller), store.clone(), false);

    let outcome = svc
        .issue(DocumentKind::Invoice, invoice_payload())
        .await
        .unwrap();
    let body = success_body(&outcome);

    assert_eq!(body["success"], true);
    assert_eq!(body["factura_id"], "F001-00000001");
    assert_eq!(body["cdr_codigo"], "0");
    assert_eq!(
        body["xml_url"],
        "https://cdn.example.com/xml/F001-00000001.xml"
    );
    assert_eq!(
        body["cdr_url"],
        "https://cdn.example.com/cdr/R-F001-00000001.zip"
    );
    assert_eq!(
        body["ticket_url"],
        "https://cdn.example.com/ticket/F001-00000001-ticket.pdf"
    );
    assert_eq!(store.keys.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn beta_environment_marks_every_published_url() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(Arc::new(AcceptingBiller), store, true);

    let outcome = svc
        .issue(DocumentKind::Invoice, invoice_payload())
        .await
        .unwrap();

    for url in [
        &outcome.artifacts.xml_url,
        &outcome.artifacts.pdf_url,
        &outcome.artifacts.cdr_url,
        &outcome.artifacts.ticket_url,
    ] {
        assert!(url.contains("_beta"), "url without beta marker: {url}");
    }
}

#[tokio::test]
async fn rejection_publishes_nothing() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(Arc::new(RejectingBiller), store.clone(), false);

    let err = svc
        .issue(DocumentKind::Invoice, invoice_payload())
        .await
        .unwrap_err();

    match err {
        EmisionError::Rejection { code, message } => {
            assert_eq!(code, "2335");
            assert!(message.contains("alterado"));
        }
        other => panic!("expected rejection, got {other}"),
    }
    assert!(store.keys.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_payload_never_reaches_the_biller() {
    struct PanickingBiller;

    #[async_trait]
    impl Biller for PanickingBiller {
        async fn send(&self, _document: &SaleDocument) -> Result<Submission, SubmissionError> {
            panic!("biller must not be called for invalid input");
        }
    }

    let store = Arc::new(RecordingStore::default());
    let svc = service(Arc::new(PanickingBiller), store, false);

    let raw: RawDocument = serde_json::from_value(json!({
        "serie": "F001",
        "correlativo": 1,
        "cliente": { "numDoc": "20100100100", "nombre": "CLIENTE SAC" },
        "items": [{ "descripcion": "Producto" }],
        "gravadas": 100,
        "igv": 18,
        "total": 200
    }))
    .unwrap();

    let err = svc.issue(DocumentKind::Invoice, raw).await.unwrap_err();
    assert!(matches!(err, EmisionError::Validation(_)));
}

#[tokio::test]
async fn credit_note_uses_nota_id() {
    let store = Arc::new(RecordingStore::default());
    let svc = service(Arc::new(AcceptingBiller), store, false);

    let raw: RawDocument = serde_json::from_value(json!({
        "serie": "NC01",
        "correlativo": 9,
        "cliente": { "numDoc": "20100100100", "nombre": "CLIENTE SAC" },
        "items": [{ "descripcion": "Producto", "valorVenta": 100 }],
        "gravadas": 100,
        "igv": 18,
        "total": 118,
        "comprobante_modifica": { "tipo": "01", "serie": "F001", "correlativo": 1 },
        "tipo_motivo": "01",
        "motivo": "Anulación de la operación"
    }))
    .unwrap();

    let outcome = svc.issue(DocumentKind::CreditNote, raw).await.unwrap();
    let body = success_body(&outcome);
    assert_eq!(body["nota_id"], "NC01-00000009");
    assert!(body.get("factura_id").is_none());
}
