use crate::domain::crc::crc16_hex;
use crate::domain::field::Tag;
use crate::domain::tlv;
use crate::error::{DecodeError, ValidationError};

/// Returns whether the trailing checksum of `payload` matches its content.
///
/// Structural problems are reported as errors; a missing or wrong checksum
/// is `Ok(false)`.
pub fn verify(payload: &str) -> Result<bool, DecodeError> {
    match verify_payload(payload) {
        Ok(()) => Ok(true),
        Err(ValidationError::Decode(e)) => Err(e),
        Err(ValidationError::MissingChecksum | ValidationError::ChecksumMismatch { .. }) => {
            Ok(false)
        }
    }
}

/// Like [`verify`], but says why a payload is rejected.
pub fn verify_payload(payload: &str) -> Result<(), ValidationError> {
    let decoded = tlv::decode(payload)?;

    let found = match decoded.last() {
        Some(field) if field.tag() == Tag::CRC && field.len() == 4 => {
            field.value().as_str().ok_or(ValidationError::MissingChecksum)?
        }
        _ => return Err(ValidationError::MissingChecksum),
    };

    // The checksum value is the tail of the payload.
    let body = &payload[..payload.len() - found.len()];
    let expected = crc16_hex(body.as_bytes());
    if expected == found {
        Ok(())
    } else {
        Err(ValidationError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        })
    }
}
