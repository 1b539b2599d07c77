//! UBL construction and XML-DSig signing boundary.
//!
//! Building the UBL 2.1 body and signing it with the issuer certificate
//! is the job of an external toolkit; this module defines its contract
//! and a production implementation that bridges to a signing command.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::core::SaleDocument;

/// Signed UBL document bytes.
#[derive(Debug, Clone)]
pub struct SignedXml {
    pub xml: Vec<u8>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignError {
    #[error("signer I/O error: {0}")]
    Io(String),

    #[error("signer exited with {status}: {stderr}")]
    Tool { status: i32, stderr: String },

    #[error("signer timed out after {0:?}")]
    Timeout(Duration),
}

/// Produces the signed UBL XML for a canonical document.
#[async_trait]
pub trait XmlSigner: Send + Sync {
    async fn sign(&self, document: &SaleDocument) -> Result<SignedXml, SignError>;
}

/// Bridges to an external signing tool: the canonical document is
/// written to the tool's stdin as JSON and the signed XML is read back
/// from its stdout.
#[derive(Debug, Clone)]
pub struct CommandSigner {
    program: PathBuf,
    timeout: Duration,
}

impl CommandSigner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl XmlSigner for CommandSigner {
    async fn sign(&self, document: &SaleDocument) -> Result<SignedXml, SignError> {
        let payload =
            serde_json::to_vec(document).map_err(|e| SignError::Io(e.to_string()))?;

        let mut child = tokio::process::Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SignError::Io(format!("failed to spawn {:?}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SignError::Io("signer stdin unavailable".into()))?;
        stdin
            .write_all(&payload)
            .await
            .map_err(|e| SignError::Io(e.to_string()))?;
        drop(stdin);

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| SignError::Timeout(self.timeout))?
            .map_err(|e| SignError::Io(e.to_string()))?;

        if !output.status.success() {
            return Err(SignError::Tool {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(SignedXml { xml: output.stdout })
    }
}
