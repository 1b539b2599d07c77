//! Printable artifact generation: template selection, HTML layout and
//! PDF rendering.

mod html;
mod pdf;
mod template;

use std::sync::Arc;

pub use pdf::{PdfRenderer, RenderError, WkhtmltopdfRenderer};
pub use template::{Template, Variant};

use crate::core::SaleDocument;

/// Both printable forms of a document.
#[derive(Debug, Clone)]
pub struct RenderedPdfs {
    /// Full-page (A4) PDF.
    pub pdf: Vec<u8>,
    /// 80mm ticket PDF.
    pub ticket: Vec<u8>,
}

/// Renders the full-page and ticket PDFs for a document.
pub struct ArtifactGenerator {
    renderer: Arc<dyn PdfRenderer>,
}

impl ArtifactGenerator {
    pub fn new(renderer: Arc<dyn PdfRenderer>) -> Self {
        Self { renderer }
    }

    pub async fn generate(&self, document: &SaleDocument) -> Result<RenderedPdfs, RenderError> {
        let pdf = self.render_variant(document, Variant::Full).await?;
        let ticket = self.render_variant(document, Variant::Ticket).await?;
        Ok(RenderedPdfs { pdf, ticket })
    }

    async fn render_variant(
        &self,
        document: &SaleDocument,
        variant: Variant,
    ) -> Result<Vec<u8>, RenderError> {
        let template = template::select(document.kind, variant);
        let body = html::render(document, template);
        self.renderer.render(&body, variant).await
    }
}
