//! Emission pipeline.
//!
//! One parameterized flow serves every document kind: normalize the
//! request, build the canonical document, submit it to SUNAT, render
//! the printable PDFs and publish the four artifacts. Nothing is
//! published unless every prior stage succeeded.

use std::sync::Arc;

use crate::core::{Clock, DocumentKind, EmisionError, IssuerProfile, RawDocument, SaleDocument, build_document, normalize};
use crate::report::ArtifactGenerator;
use crate::storage::{ArtifactSet, PublishedArtifacts, Publisher};
use crate::sunat::{Biller, CdrSummary, SubmissionError};

/// Outcome of a successful emission.
#[derive(Debug)]
pub struct IssueOutcome {
    pub document: SaleDocument,
    pub cdr: CdrSummary,
    pub artifacts: PublishedArtifacts,
}

/// Owns the collaborators of the emission flow.
pub struct EmissionService {
    issuer: IssuerProfile,
    clock: Arc<dyn Clock>,
    biller: Arc<dyn Biller>,
    generator: ArtifactGenerator,
    publisher: Publisher,
}

impl EmissionService {
    pub fn new(
        issuer: IssuerProfile,
        clock: Arc<dyn Clock>,
        biller: Arc<dyn Biller>,
        generator: ArtifactGenerator,
        publisher: Publisher,
    ) -> Self {
        Self {
            issuer,
            clock,
            biller,
            generator,
            publisher,
        }
    }

    /// Run the full emission flow for one document.
    pub async fn issue(
        &self,
        kind: DocumentKind,
        raw: RawDocument,
    ) -> Result<IssueOutcome, EmisionError> {
        let request = normalize(kind, raw)?;
        let document = build_document(request, &self.issuer, self.clock.as_ref());

        tracing::info!(kind = kind.code(), id = %document.id, "issuing document");

        let submission = self.biller.send(&document).await.map_err(|e| match e {
            SubmissionError::Rejected { code, message } => {
                EmisionError::Rejection { code, message }
            }
            other => EmisionError::Infrastructure(other.to_string()),
        })?;

        let rendered = self
            .generator
            .generate(&document)
            .await
            .map_err(|e| EmisionError::Render(e.to_string()))?;

        let artifacts = self
            .publisher
            .publish(
                &document.id,
                ArtifactSet {
                    xml: &submission.signed_xml,
                    cdr_zip: &submission.cdr_zip,
                    pdf: &rendered.pdf,
                    ticket: &rendered.ticket,
                },
            )
            .await
            .map_err(|e| EmisionError::Storage(e.to_string()))?;

        tracing::info!(id = %document.id, cdr = %submission.cdr.code, "document issued");

        Ok(IssueOutcome {
            document,
            cdr: submission.cdr,
            artifacts,
        })
    }
}
