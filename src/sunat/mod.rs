//! SUNAT billService integration: endpoints, signing boundary, SOAP
//! transport and the submission client.

mod client;
mod endpoints;
mod signer;
mod soap;

pub use client::*;
pub use endpoints::*;
pub use signer::*;
pub use soap::{CdrSummary, SoapReply, parse_cdr_xml, parse_send_bill_reply, send_bill_envelope};
