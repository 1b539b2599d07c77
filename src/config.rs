//! Environment-driven configuration.
//!
//! Variables are read once at startup; a missing required variable
//! aborts with a message naming it. A `.env` file is honored when
//! present.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::core::{IssuerAddress, IssuerProfile};
use crate::sunat::{Environment, SolCredentials};

/// Storage backend selection.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    Local { dir: String },
    S3 {
        bucket: String,
        endpoint_url: Option<String>,
        region: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub credentials: SolCredentials,
    pub signer_cmd: String,
    pub wkhtmltopdf_bin: String,
    pub storage: StorageConfig,
    pub public_base_url: String,
    pub issuer: IssuerProfile,
    pub soap_timeout: Duration,
    pub signer_timeout: Duration,
    pub render_timeout: Duration,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("missing environment variable {name}"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        let environment = match optional("SUNAT_ENV").as_deref() {
            None => Environment::Beta,
            Some(name) => Environment::from_name(name)
                .with_context(|| format!("unknown SUNAT_ENV {name:?}, expected beta|production"))?,
        };

        let issuer_ruc = required("EMISOR_RUC")?;
        let credentials = SolCredentials {
            ruc: issuer_ruc.clone(),
            user: required("SOL_USER")?,
            password: required("SOL_PASS")?,
        };

        let storage = match optional("STORAGE_BACKEND").as_deref() {
            None | Some("local") => StorageConfig::Local {
                dir: optional("STORAGE_DIR").unwrap_or_else(|| "storage".to_string()),
            },
            Some("s3") => StorageConfig::S3 {
                bucket: required("S3_BUCKET")?,
                endpoint_url: optional("S3_ENDPOINT_URL"),
                region: optional("S3_REGION"),
            },
            Some(other) => anyhow::bail!("unknown STORAGE_BACKEND {other:?}, expected local|s3"),
        };

        let issuer = IssuerProfile {
            ruc: issuer_ruc,
            legal_name: required("EMISOR_RAZON_SOCIAL")?,
            trade_name: required("EMISOR_NOMBRE_COMERCIAL")?,
            address: IssuerAddress {
                ubigeo: required("EMISOR_UBIGEO")?,
                department: required("EMISOR_DEPARTAMENTO")?,
                province: required("EMISOR_PROVINCIA")?,
                district: required("EMISOR_DISTRITO")?,
                urbanization: optional("EMISOR_URBANIZACION").unwrap_or_else(|| "-".to_string()),
                street: required("EMISOR_DIRECCION")?,
            },
        };

        Ok(Self {
            bind_addr,
            environment,
            credentials,
            signer_cmd: required("SIGNER_CMD")?,
            wkhtmltopdf_bin: optional("WKHTMLTOPDF_BIN")
                .unwrap_or_else(|| "wkhtmltopdf".to_string()),
            storage,
            public_base_url: required("PUBLIC_BASE_URL")?,
            issuer,
            soap_timeout: Duration::from_secs(parse_secs("SOAP_TIMEOUT_SECS", 30)?),
            signer_timeout: Duration::from_secs(parse_secs("SIGNER_TIMEOUT_SECS", 30)?),
            render_timeout: Duration::from_secs(parse_secs("RENDER_TIMEOUT_SECS", 60)?),
        })
    }
}

fn parse_secs(name: &str, default: u64) -> anyhow::Result<u64> {
    match optional(name) {
        None => Ok(default),
        Some(v) => v
            .parse()
            .with_context(|| format!("{name} is not a number of seconds")),
    }
}
