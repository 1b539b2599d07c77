//! PDF rendering boundary.
//!
//! Rendering runs out of process through wkhtmltopdf: HTML goes in on
//! stdin, the PDF comes back on stdout. The trait keeps the pipeline
//! testable without the binary installed.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::template::Variant;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render process error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },

    #[error("render timed out after {0:?}")]
    Timeout(Duration),
}

/// Turns an HTML body into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str, variant: Variant) -> Result<Vec<u8>, RenderError>;
}

/// wkhtmltopdf-backed renderer.
pub struct WkhtmltopdfRenderer {
    program: PathBuf,
    timeout: Duration,
}

impl WkhtmltopdfRenderer {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn page_args(variant: Variant) -> &'static [&'static str] {
        match variant {
            // 80mm thermal roll; height leaves room for long item lists.
            Variant::Ticket => &["--page-width", "80mm", "--page-height", "200mm"],
            Variant::Full => &["--page-size", "A4"],
        }
    }
}

#[async_trait]
impl PdfRenderer for WkhtmltopdfRenderer {
    async fn render(&self, html: &str, variant: Variant) -> Result<Vec<u8>, RenderError> {
        let mut command = Command::new(&self.program);
        command
            .args([
                "--quiet",
                "--no-outline",
                "--print-media-type",
                "--disable-smart-shrinking",
            ])
            .args(Self::page_args(variant))
            .args(["-", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(html.as_bytes()).await?;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout))??;

        if !output.status.success() {
            return Err(RenderError::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_pages_are_thermal_width() {
        let args = WkhtmltopdfRenderer::page_args(Variant::Ticket);
        assert!(args.contains(&"80mm"));
    }

    #[test]
    fn full_pages_are_a4() {
        let args = WkhtmltopdfRenderer::page_args(Variant::Full);
        assert!(args.contains(&"A4"));
    }
}
