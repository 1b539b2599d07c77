//! Artifact storage and publication.
//!
//! A document publishes four objects (XML, PDF, CDR zip, ticket PDF)
//! under a fixed key layout; the backing store is pluggable.

mod local;
mod naming;
mod s3;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use local::LocalStore;
pub use naming::{ArtifactKind, public_url};
pub use s3::S3Store;

use crate::core::DocumentId;

/// Failure writing one object.
#[derive(Debug, Error)]
#[error("failed to store {key}: {source}")]
pub struct StoreError {
    pub key: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl StoreError {
    pub fn new(key: &str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            key: key.to_string(),
            source: Box::new(source),
        }
    }
}

/// Write-only object store.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StoreError>;
}

/// The four artifacts produced by one emission.
pub struct ArtifactSet<'a> {
    pub xml: &'a [u8],
    pub cdr_zip: &'a [u8],
    pub pdf: &'a [u8],
    pub ticket: &'a [u8],
}

/// Public URLs of the stored artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifacts {
    pub xml_url: String,
    pub pdf_url: String,
    pub cdr_url: String,
    pub ticket_url: String,
}

/// Publishes artifact sets to a store and derives their public URLs.
pub struct Publisher {
    store: Arc<dyn ArtifactStore>,
    base_url: String,
    beta: bool,
}

impl Publisher {
    pub fn new(store: Arc<dyn ArtifactStore>, base_url: impl Into<String>, beta: bool) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            beta,
        }
    }

    /// Store all four artifacts. Uploads run concurrently; any failure
    /// fails the publication as a whole.
    pub async fn publish(
        &self,
        id: &DocumentId,
        artifacts: ArtifactSet<'_>,
    ) -> Result<PublishedArtifacts, StoreError> {
        let xml_key = ArtifactKind::Xml.key(id, self.beta);
        let pdf_key = ArtifactKind::Pdf.key(id, self.beta);
        let cdr_key = ArtifactKind::Cdr.key(id, self.beta);
        let ticket_key = ArtifactKind::Ticket.key(id, self.beta);

        tokio::try_join!(
            self.store
                .put(&xml_key, artifacts.xml, ArtifactKind::Xml.content_type()),
            self.store
                .put(&pdf_key, artifacts.pdf, ArtifactKind::Pdf.content_type()),
            self.store
                .put(&cdr_key, artifacts.cdr_zip, ArtifactKind::Cdr.content_type()),
            self.store.put(
                &ticket_key,
                artifacts.ticket,
                ArtifactKind::Ticket.content_type()
            ),
        )?;

        tracing::debug!(document = %id, "artifacts published");

        Ok(PublishedArtifacts {
            xml_url: public_url(&self.base_url, &xml_key),
            pdf_url: public_url(&self.base_url, &pdf_key),
            cdr_url: public_url(&self.base_url, &cdr_key),
            ticket_url: public_url(&self.base_url, &ticket_key),
        })
    }
}
