use crate::domain::amount::Amount;
use crate::domain::crc::crc16_hex;
use crate::domain::field::{Field, MAX_VALUE_LEN, Payload, Tag};
use crate::domain::tlv;
use crate::error::MutationError;
use rust_decimal::Decimal;

/// Point-of-initiation value of a reusable payload without an amount.
pub const STATIC_MARKER: &str = "11";
/// Point-of-initiation value of a single-transaction payload.
pub const DYNAMIC_MARKER: &str = "12";
/// Tag and length of the trailing checksum field.
pub const CRC_PREFIX: &str = "6304";

/// Turns a static merchant payload into a dynamic one carrying `amount`.
///
/// `amount` must be a whole number of at least 1. The returned payload has
/// its point of initiation set to dynamic, an amount field right before the
/// country code, and a freshly computed checksum.
pub fn make_dynamic(template: &str, amount: Decimal) -> Result<String, MutationError> {
    make_dynamic_amount(template, Amount::new(amount)?)
}

/// Same as [`make_dynamic`] for an already validated amount.
pub fn make_dynamic_amount(template: &str, amount: Amount) -> Result<String, MutationError> {
    let body = dynamic_body(template, amount)?;
    Ok(append_checksum(body))
}

/// The dynamic payload up to and including the `6304` checksum prefix.
pub fn dynamic_body(template: &str, amount: Amount) -> Result<String, MutationError> {
    let payload = tlv::decode(template)?;
    ensure_static(&payload)?;

    let amount_field = amount_field(amount)?;

    let mut fields = Vec::with_capacity(payload.fields().len() + 1);
    for field in payload.into_fields() {
        match field.tag() {
            // The checksum is recomputed and a stray amount is replaced.
            Tag::CRC | Tag::TRANSACTION_AMOUNT => {}
            Tag::POINT_OF_INITIATION => {
                fields.push(Field::primitive(Tag::POINT_OF_INITIATION, DYNAMIC_MARKER)?)
            }
            _ => fields.push(field),
        }
    }

    let anchor = fields
        .iter()
        .position(|field| field.tag() == Tag::COUNTRY_CODE)
        .ok_or(MutationError::MissingAnchor)?;
    fields.insert(anchor, amount_field);

    let mut body = Payload::new(fields).encode();
    body.push_str(CRC_PREFIX);
    Ok(body)
}

/// Fails with `NotStatic` unless the point of initiation is the static marker.
pub fn ensure_static(payload: &Payload) -> Result<(), MutationError> {
    let initiation = payload
        .get(Tag::POINT_OF_INITIATION)
        .and_then(|field| field.value().as_str());
    if initiation == Some(STATIC_MARKER) {
        Ok(())
    } else {
        Err(MutationError::NotStatic)
    }
}

/// Appends the checksum of `body`, which must already end with `6304`.
pub fn append_checksum(mut body: String) -> String {
    let crc = crc16_hex(body.as_bytes());
    body.push_str(&crc);
    body
}

/// `Decimal` holds at most 29 digits, so `AmountTooLarge` is unreachable
/// for any `Amount` today.
fn amount_field(amount: Amount) -> Result<Field, MutationError> {
    let digits = amount.canonical();
    let count = digits.chars().count();
    if count > MAX_VALUE_LEN {
        return Err(MutationError::AmountTooLarge(count));
    }
    Ok(Field::primitive(Tag::TRANSACTION_AMOUNT, digits)?)
}
