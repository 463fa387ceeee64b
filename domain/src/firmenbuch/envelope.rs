//! SOAP 1.2 envelope codec

use crate::core::error::{AdapterError, AdapterResult};
use crate::document::{AttributedNode, NodeValue, TEXT_KEY};

/// Namespace of the SOAP 1.2 envelope
pub const SOAP_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Content type for SOAP 1.2 requests
pub const SOAP_CONTENT_TYPE: &str = "application/soap+xml;charset=UTF-8";

/// Wrap a pre-serialized request fragment in a SOAP envelope.
///
/// `namespace` becomes the default namespace of the body content. Neither
/// argument is validated or escaped here.
pub fn wrap(content: &str, namespace: &str) -> String {
    let mut envelope = format!(
        r#"<soap:Envelope xmlns="{}" xmlns:soap="{}">"#,
        namespace, SOAP_ENVELOPE_NS
    );
    envelope.push_str("<soap:Header/>");
    envelope.push_str("<soap:Body>");
    envelope.push_str(content);
    envelope.push_str("</soap:Body>");
    envelope.push_str("</soap:Envelope>");
    envelope
}

/// Extract the body payload of a parsed envelope.
///
/// Expects namespace prefixes to be stripped already (`Envelope`, `Body`).
/// A body carrying a `Fault` is reported as [`AdapterError::UpstreamFault`].
pub fn unwrap(document: &AttributedNode) -> AdapterResult<&AttributedNode> {
    let envelope = document
        .node("Envelope")
        .ok_or_else(|| AdapterError::MalformedEnvelope("missing Envelope element".into()))?;
    let body = envelope
        .node("Body")
        .ok_or_else(|| AdapterError::MalformedEnvelope("missing Envelope.Body element".into()))?;

    if let Some(fault) = body.get("Fault") {
        return Err(AdapterError::UpstreamFault(fault_reason(fault)));
    }

    Ok(body)
}

fn fault_reason(fault: &NodeValue) -> String {
    let Some(fault) = fault.as_node() else {
        return fault
            .as_scalar()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unspecified fault".into());
    };

    // SOAP 1.2: Fault/Reason/Text (possibly several languages)
    if let Some(reason) = fault.node("Reason") {
        if let Some(text) = reason.plural("Text").first().and_then(|t| text_of(t)) {
            return text;
        }
    }

    // SOAP 1.2 code or SOAP 1.1 faultstring
    fault
        .node("Code")
        .and_then(|code| code.get("Value"))
        .and_then(text_of)
        .or_else(|| fault.get("faultstring").and_then(text_of))
        .unwrap_or_else(|| "unspecified fault".into())
}

fn text_of(value: &NodeValue) -> Option<String> {
    match value {
        NodeValue::Scalar(scalar) => Some(scalar.to_string()),
        NodeValue::Node(node) => node.scalar(TEXT_KEY).map(ToString::to_string),
        NodeValue::List(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_body(body: AttributedNode) -> AttributedNode {
        AttributedNode::new().with(
            "Envelope",
            AttributedNode::new()
                .with("Header", "")
                .with("Body", body),
        )
    }

    #[test]
    fn test_wrap() {
        let envelope = wrap("<PING/>", "ns://example/Ping");
        assert_eq!(
            envelope,
            "<soap:Envelope xmlns=\"ns://example/Ping\" xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
             <soap:Header/><soap:Body><PING/></soap:Body></soap:Envelope>"
        );
    }

    #[test]
    fn test_wrap_does_not_escape() {
        let envelope = wrap("<A>&amp;</A>", "ns");
        assert!(envelope.contains("<soap:Body><A>&amp;</A></soap:Body>"));
    }

    #[test]
    fn test_unwrap_returns_body() {
        let document = envelope_with_body(
            AttributedNode::new().with("SUCHEFIRMARESPONSE", AttributedNode::new()),
        );

        let body = unwrap(&document).unwrap();
        assert!(body.node("SUCHEFIRMARESPONSE").is_some());
    }

    #[test]
    fn test_unwrap_missing_envelope() {
        let document = AttributedNode::new().with("html", "Service unavailable");
        let err = unwrap(&document).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_unwrap_missing_body() {
        let document =
            AttributedNode::new().with("Envelope", AttributedNode::new().with("Header", ""));
        let err = unwrap(&document).unwrap_err();
        assert_eq!(
            err,
            AdapterError::MalformedEnvelope("missing Envelope.Body element".into())
        );
    }

    #[test]
    fn test_unwrap_fault_reason() {
        let fault = AttributedNode::new()
            .with(
                "Code",
                AttributedNode::new().with("Value", "soap:Sender"),
            )
            .with(
                "Reason",
                AttributedNode::new().with(
                    "Text",
                    AttributedNode::new()
                        .with_attribute("lang", "de")
                        .with(TEXT_KEY, "Ungültiger API-Key"),
                ),
            );
        let document = envelope_with_body(AttributedNode::new().with("Fault", fault));

        let err = unwrap(&document).unwrap_err();
        assert_eq!(err, AdapterError::UpstreamFault("Ungültiger API-Key".into()));
    }

    #[test]
    fn test_unwrap_fault_falls_back_to_code() {
        let fault = AttributedNode::new().with(
            "Code",
            AttributedNode::new().with("Value", "soap:Receiver"),
        );
        let document = envelope_with_body(AttributedNode::new().with("Fault", fault));

        let err = unwrap(&document).unwrap_err();
        assert_eq!(err, AdapterError::UpstreamFault("soap:Receiver".into()));
    }
}
