//! SOAP 1.1 envelope construction and response parsing for the SUNAT
//! billService `sendBill` operation.
//!
//! Authentication is WS-Security UsernameToken, where the username is
//! the issuer RUC concatenated with the SOL user.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::Event;

/// Parsed CDR (constancia de recepción) summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdrSummary {
    /// Authority response code; "0" means accepted without remarks.
    pub code: String,
    pub description: String,
    /// Observations attached by the authority.
    pub notes: Vec<String>,
}

/// Outcome of a `sendBill` SOAP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapReply {
    /// The decoded CDR zip returned on acceptance.
    ApplicationResponse(Vec<u8>),
    /// SOAP fault — SUNAT declined the submission.
    Fault { code: String, message: String },
}

/// Build the `sendBill` request envelope. `zip_b64` is the base64 of
/// the zip containing the signed XML.
pub fn send_bill_envelope(username: &str, password: &str, filename: &str, zip_b64: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://service.sunat.gob.pe" xmlns:wsse="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd">
  <soapenv:Header>
    <wsse:Security>
      <wsse:UsernameToken>
        <wsse:Username>{username}</wsse:Username>
        <wsse:Password>{password}</wsse:Password>
      </wsse:UsernameToken>
    </wsse:Security>
  </soapenv:Header>
  <soapenv:Body>
    <ser:sendBill>
      <fileName>{filename}</fileName>
      <contentFile>{zip_b64}</contentFile>
    </ser:sendBill>
  </soapenv:Body>
</soapenv:Envelope>"#,
        username = escape(username),
        password = escape(password),
        filename = escape(filename),
        zip_b64 = zip_b64,
    )
}

/// Parse a `sendBill` response body into an application response or a
/// fault. Namespace prefixes vary between SUNAT environments, so
/// elements are matched by local name.
pub fn parse_send_bill_reply(body: &str) -> Result<SoapReply, String> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut fault_code = None;
    let mut fault_message = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"applicationResponse" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed applicationResponse: {e}"))?;
                    let decoded = STANDARD
                        .decode(text.trim())
                        .map_err(|e| format!("applicationResponse is not valid base64: {e}"))?;
                    return Ok(SoapReply::ApplicationResponse(decoded));
                }
                b"faultcode" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed faultcode: {e}"))?;
                    fault_code = Some(text.trim().to_string());
                }
                b"faultstring" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed faultstring: {e}"))?;
                    fault_message = Some(text.trim().to_string());
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("malformed SOAP response: {e}")),
            _ => {}
        }
    }

    match (fault_code, fault_message) {
        (Some(code), message) => Ok(SoapReply::Fault {
            code: normalize_fault_code(&code),
            message: message.unwrap_or_default(),
        }),
        (None, Some(message)) => Ok(SoapReply::Fault {
            code: String::new(),
            message,
        }),
        (None, None) => Err("response contains neither applicationResponse nor fault".into()),
    }
}

/// SUNAT fault codes arrive as "soap-env:Client.2335"; keep the numeric
/// part when present.
fn normalize_fault_code(raw: &str) -> String {
    raw.rsplit('.').next().unwrap_or(raw).to_string()
}

/// Extract the CDR summary from the ApplicationResponse XML inside the
/// CDR zip: the first ResponseCode/Description pair plus any Note
/// elements.
pub fn parse_cdr_xml(xml: &str) -> Result<CdrSummary, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut code = None;
    let mut description = None;
    let mut notes = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"ResponseCode" if code.is_none() => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed ResponseCode: {e}"))?;
                    code = Some(text.trim().to_string());
                }
                b"Description" if description.is_none() => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed Description: {e}"))?;
                    description = Some(text.trim().to_string());
                }
                b"Note" => {
                    let text = reader
                        .read_text(e.name())
                        .map_err(|e| format!("malformed Note: {e}"))?;
                    notes.push(text.trim().to_string());
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("malformed CDR XML: {e}")),
            _ => {}
        }
    }

    Ok(CdrSummary {
        code: code.ok_or("CDR has no ResponseCode")?,
        description: description.unwrap_or_default(),
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_credentials_and_payload() {
        let env = send_bill_envelope(
            "20000000001MODDATOS",
            "moddatos",
            "20000000001-01-F001-00000001.zip",
            "AAAA",
        );
        assert!(env.contains("<wsse:Username>20000000001MODDATOS</wsse:Username>"));
        assert!(env.contains("<wsse:Password>moddatos</wsse:Password>"));
        assert!(env.contains("<fileName>20000000001-01-F001-00000001.zip</fileName>"));
        assert!(env.contains("<contentFile>AAAA</contentFile>"));
    }

    #[test]
    fn envelope_escapes_credentials() {
        let env = send_bill_envelope("user", "p<&>w", "f.zip", "AAAA");
        assert!(env.contains("p&lt;&amp;&gt;w"));
        assert!(!env.contains("p<&>w"));
    }

    #[test]
    fn parses_application_response() {
        let b64 = STANDARD.encode(b"cdr-zip-bytes");
        let body = format!(
            r#"<soap-env:Envelope xmlns:soap-env="http://schemas.xmlsoap.org/soap/envelope/">
              <soap-env:Body>
                <ns2:sendBillResponse xmlns:ns2="http://service.sunat.gob.pe">
                  <applicationResponse>{b64}</applicationResponse>
                </ns2:sendBillResponse>
              </soap-env:Body>
            </soap-env:Envelope>"#
        );
        match parse_send_bill_reply(&body).unwrap() {
            SoapReply::ApplicationResponse(bytes) => assert_eq!(bytes, b"cdr-zip-bytes"),
            other => panic!("expected application response, got {other:?}"),
        }
    }

    #[test]
    fn parses_fault() {
        let body = r#"<soap-env:Envelope xmlns:soap-env="http://schemas.xmlsoap.org/soap/envelope/">
          <soap-env:Body>
            <soap-env:Fault>
              <faultcode>soap-env:Client.2335</faultcode>
              <faultstring>El documento electrónico ingresado ha sido alterado</faultstring>
            </soap-env:Fault>
          </soap-env:Body>
        </soap-env:Envelope>"#;
        match parse_send_bill_reply(body).unwrap() {
            SoapReply::Fault { code, message } => {
                assert_eq!(code, "2335");
                assert!(message.contains("alterado"));
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn rejects_body_with_neither() {
        let body = "<Envelope><Body/></Envelope>";
        assert!(parse_send_bill_reply(body).is_err());
    }

    #[test]
    fn parses_cdr_summary() {
        let xml = r#"<ar:ApplicationResponse xmlns:ar="urn:oasis:names:specification:ubl:schema:xsd:ApplicationResponse-2" xmlns:cbc="urn:oasis:names:specification:ubl:schema:xsd:CommonBasicComponents-2" xmlns:cac="urn:oasis:names:specification:ubl:schema:xsd:CommonAggregateComponents-2">
          <cbc:Note>La factura numero F001-00000001, ha sido aceptada</cbc:Note>
          <cac:DocumentResponse>
            <cac:Response>
              <cbc:ResponseCode>0</cbc:ResponseCode>
              <cbc:Description>La Factura numero F001-00000001, ha sido aceptada</cbc:Description>
            </cac:Response>
          </cac:DocumentResponse>
        </ar:ApplicationResponse>"#;
        let cdr = parse_cdr_xml(xml).unwrap();
        assert_eq!(cdr.code, "0");
        assert!(cdr.description.contains("aceptada"));
        assert_eq!(cdr.notes.len(), 1);
    }

    #[test]
    fn cdr_without_code_is_rejected() {
        assert!(parse_cdr_xml("<ApplicationResponse/>").is_err());
    }
}
