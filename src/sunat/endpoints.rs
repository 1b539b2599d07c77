//! SUNAT billService endpoints.

/// Target SUNAT environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Homologation / testing endpoint. Artifacts published from beta
    /// submissions carry a `_beta` filename suffix.
    Beta,
    /// Production endpoint.
    Production,
}

/// Electronic invoicing beta endpoint.
pub const FE_BETA: &str = "https://e-beta.sunat.gob.pe/ol-ti-itcpfegem-beta/billService";

/// Electronic invoicing production endpoint.
pub const FE_PRODUCTION: &str = "https://e-factura.sunat.gob.pe/ol-ti-itcpfegem/billService";

impl Environment {
    pub fn url(&self) -> &'static str {
        match self {
            Self::Beta => FE_BETA,
            Self::Production => FE_PRODUCTION,
        }
    }

    pub fn is_beta(&self) -> bool {
        matches!(self, Self::Beta)
    }

    /// Parse from a configuration value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "beta" | "test" => Some(Self::Beta),
            "prod" | "produccion" | "production" => Some(Self::Production),
            _ => None,
        }
    }
}
