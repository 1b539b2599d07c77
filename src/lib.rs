//! facturador — emisión de comprobantes de pago electrónicos (CPE).
//!
//! HTTP service that accepts invoice, receipt and note payloads as
//! JSON, validates and normalizes them, submits the signed UBL to the
//! SUNAT billService, renders printable PDFs and publishes the
//! resulting artifacts.
//!
//! | Module     | Responsibility                                      |
//! |------------|-----------------------------------------------------|
//! | `core`     | Document model, catalogs, normalization, building   |
//! | `sunat`    | Signing boundary, SOAP transport, submission client |
//! | `report`   | HTML templates and PDF rendering                    |
//! | `storage`  | Artifact naming, stores and the publisher           |
//! | `pipeline` | The end-to-end emission flow                        |
//! | `api`      | Axum routes, state and HTTP error mapping           |
//! | `config`   | Environment-driven configuration                    |

pub mod api;
pub mod config;
pub mod core;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod sunat;

pub use crate::core::{DocumentId, DocumentKind, EmisionError, RawDocument, SaleDocument};
