//! billService submission client.
//!
//! One external exchange per submission: the signed XML is zipped,
//! base64-encoded into a `sendBill` SOAP envelope and posted to the
//! configured endpoint. Authority rejections (SOAP faults and CDR
//! rejection codes) are distinguished from transport failures.

use std::io::{Cursor, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::core::SaleDocument;

use super::endpoints::Environment;
use super::signer::XmlSigner;
use super::soap::{self, CdrSummary, SoapReply};

/// SOL credentials for the billService WS-Security header.
#[derive(Debug, Clone)]
pub struct SolCredentials {
    pub ruc: String,
    pub user: String,
    pub password: String,
}

impl SolCredentials {
    /// WS-Security username: RUC concatenated with the SOL user.
    fn username(&self) -> String {
        format!("{}{}", self.ruc, self.user)
    }
}

/// Successful submission: the artifacts the rest of the pipeline needs.
#[derive(Debug, Clone)]
pub struct Submission {
    pub signed_xml: Vec<u8>,
    pub cdr_zip: Vec<u8>,
    pub cdr: CdrSummary,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmissionError {
    /// The authority declined the document.
    #[error("SUNAT rechazó el comprobante ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The external signer failed.
    #[error("signing failed: {0}")]
    Sign(String),

    /// Failed to package the signed XML for transport.
    #[error("packaging error: {0}")]
    Package(String),

    /// Endpoint unreachable, timeout, or HTTP-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered something that is not a billService reply.
    #[error("malformed billService response: {0}")]
    Protocol(String),
}

/// Signs and submits canonical documents.
#[async_trait]
pub trait Biller: Send + Sync {
    async fn send(&self, document: &SaleDocument) -> Result<Submission, SubmissionError>;
}

/// Production billService client over HTTPS.
pub struct WsBillClient {
    http: reqwest::Client,
    environment: Environment,
    credentials: SolCredentials,
    signer: Arc<dyn XmlSigner>,
}

impl WsBillClient {
    pub fn new(
        environment: Environment,
        credentials: SolCredentials,
        signer: Arc<dyn XmlSigner>,
        timeout: Duration,
    ) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            environment,
            credentials,
            signer,
        })
    }
}

#[async_trait]
impl Biller for WsBillClient {
    async fn send(&self, document: &SaleDocument) -> Result<Submission, SubmissionError> {
        let signed = self
            .signer
            .sign(document)
            .await
            .map_err(|e| SubmissionError::Sign(e.to_string()))?;

        let stem = document.filename();
        let zipped = zip_single(&format!("{stem}.xml"), &signed.xml)
            .map_err(SubmissionError::Package)?;

        let envelope = soap::send_bill_envelope(
            &self.credentials.username(),
            &self.credentials.password,
            &format!("{stem}.zip"),
            &STANDARD.encode(&zipped),
        );

        tracing::debug!(document = %stem, endpoint = self.environment.url(), "sending bill");

        let response = self
            .http
            .post(self.environment.url())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "")
            .body(envelope)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        // Faults arrive with non-2xx statuses; parse before judging the
        // status so rejections are not misreported as transport errors.
        let reply = match soap::parse_send_bill_reply(&body) {
            Ok(reply) => reply,
            Err(e) if !status.is_success() => {
                return Err(SubmissionError::Transport(format!("HTTP {status}: {e}")));
            }
            Err(e) => return Err(SubmissionError::Protocol(e)),
        };

        let cdr_zip = match reply {
            SoapReply::ApplicationResponse(zip) => zip,
            SoapReply::Fault { code, message } => {
                return Err(SubmissionError::Rejected { code, message });
            }
        };

        let cdr_xml = unzip_first_xml(&cdr_zip)
            .map_err(|e| SubmissionError::Protocol(format!("unreadable CDR zip: {e}")))?;
        let cdr_text = String::from_utf8_lossy(&cdr_xml);
        let cdr = soap::parse_cdr_xml(&cdr_text).map_err(SubmissionError::Protocol)?;

        // CDR codes 2000-3999 are rejections delivered inside a CDR
        // rather than as a fault.
        if let Ok(code) = cdr.code.parse::<u32>() {
            if (2000..4000).contains(&code) {
                return Err(SubmissionError::Rejected {
                    code: cdr.code,
                    message: cdr.description,
                });
            }
        }

        tracing::info!(document = %stem, code = %cdr.code, "document accepted");

        Ok(Submission {
            signed_xml: signed.xml,
            cdr_zip,
            cdr,
        })
    }
}

/// Zip a single file into an in-memory archive.
fn zip_single(name: &str, content: &[u8]) -> Result<Vec<u8>, String> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(name, SimpleFileOptions::default())
        .map_err(|e| e.to_string())?;
    writer.write_all(content).map_err(|e| e.to_string())?;
    let cursor = writer.finish().map_err(|e| e.to_string())?;
    Ok(cursor.into_inner())
}

/// Extract the first `.xml` entry of an in-memory zip.
fn unzip_first_xml(bytes: &[u8]) -> Result<Vec<u8>, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| e.to_string())?;
        if entry.name().to_ascii_lowercase().ends_with(".xml") {
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut buf).map_err(|e| e.to_string())?;
            return Ok(buf);
        }
    }
    Err("archive contains no XML entry".into())
}
