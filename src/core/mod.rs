//! Core document types, normalization, and building.
//!
//! This module provides the foundational types for Peruvian electronic
//! invoicing (CPE): document identifiers, the normalized issuance
//! request, and the canonical sale document handed to the submission
//! client and the renderer.

mod builder;
pub mod catalogs;
mod error;
mod normalize;
mod types;

pub use builder::*;
pub use error::*;
pub use normalize::*;
pub use types::*;
