//! URL of the external service that turns a payload into a QR image.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_SIZE: &str = "300x300";

/// Characters escaped in a query component, matching `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds `<endpoint>?data=<payload>&size=<size>` with the payload escaped.
pub fn render_url(endpoint: &str, payload: &str, size: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint}{separator}data={}&size={}",
        utf8_percent_encode(payload, COMPONENT),
        utf8_percent_encode(size, COMPONENT)
    )
}
