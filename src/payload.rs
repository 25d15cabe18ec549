use crate::NormalizedEvent;
use bytes::Bytes;
use serde::Serialize;

/// Content type of every relayed payload
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Wire shape of a relayed notification
#[derive(Debug, Serialize)]
struct Payload<'a> {
    package: Option<&'a str>,
    title: &'a str,
    text: &'a str,
}

/// Encodes an event into the JSON body sent to the endpoint.
///
/// Total and deterministic: absent title and body become [`crate::NO_TITLE`] and
/// [`crate::NO_TEXT`], an absent source becomes `null`.
pub fn encode(event: &NormalizedEvent) -> Bytes {
    let payload = Payload {
        package: event.source_id.as_deref(),
        title: event.title_or_default(),
        text: event.body_or_default(),
    };

    serde_json::to_vec(&payload)
        .map(Bytes::from)
        .expect("string-only payload always serializes")
}
