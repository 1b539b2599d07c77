//! Object naming for published artifacts.
//!
//! Every document yields four objects: the signed XML, the full-page
//! PDF, the CDR zip and the ticket PDF. Names derive only from the
//! document series and number, so re-issuing a document overwrites its
//! previous artifacts.

use crate::core::DocumentId;

/// Kind of published artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Xml,
    Pdf,
    Cdr,
    Ticket,
}

impl ArtifactKind {
    /// Top-level directory the artifact lives under.
    pub fn dir(self) -> &'static str {
        match self {
            ArtifactKind::Xml => "xml",
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Cdr => "cdr",
            ArtifactKind::Ticket => "ticket",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ArtifactKind::Xml => "application/xml",
            ArtifactKind::Cdr => "application/zip",
            ArtifactKind::Pdf | ArtifactKind::Ticket => "application/pdf",
        }
    }

    /// File name for a document's artifact. `beta` inserts the `_beta`
    /// marker before the extension so test submissions never shadow
    /// production objects.
    pub fn filename(self, id: &DocumentId, beta: bool) -> String {
        let suffix = if beta { "_beta" } else { "" };
        match self {
            ArtifactKind::Xml => format!("{id}{suffix}.xml"),
            ArtifactKind::Pdf => format!("{id}{suffix}.pdf"),
            ArtifactKind::Cdr => format!("R-{id}{suffix}.zip"),
            ArtifactKind::Ticket => format!("{id}-ticket{suffix}.pdf"),
        }
    }

    /// Storage key: directory plus file name.
    pub fn key(self, id: &DocumentId, beta: bool) -> String {
        format!("{}/{}", self.dir(), self.filename(id, beta))
    }
}

/// Public URL for a stored key.
pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{key}", base.trim_end_matches('/'))
}
