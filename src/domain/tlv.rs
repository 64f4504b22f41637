//! Tag-length-value codec for merchant-presented QR payloads.
//!
//! A payload is a flat run of `TTLLV...` units: a two-digit tag, a two-digit
//! decimal length and exactly that many characters of value. Some tags carry
//! a nested run of units as their value; which ones is decided by
//! [`TemplateTags`]. Lengths count characters, not bytes.

use crate::domain::field::{Field, Payload, Tag, Value};
use crate::error::DecodeError;

const HEADER_LEN: usize = 4;

/// Set of tags whose value is itself a TLV sequence.
///
/// Applies to top-level fields only. Values nested inside a template are
/// always decoded as primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateTags(u128);

impl TemplateTags {
    /// Merchant account information (`26`..=`51`), additional data (`62`),
    /// language template (`64`) and unreserved templates (`80`..=`99`).
    pub const EMVCO: Self = Self::none()
        .with_range(26, 51)
        .with(Tag::ADDITIONAL_DATA)
        .with(Tag::MERCHANT_LANGUAGE)
        .with_range(80, 99);

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn with(self, tag: Tag) -> Self {
        Self(self.0 | 1u128 << tag.id())
    }

    const fn with_range(self, from: u8, to: u8) -> Self {
        let mut set = self.0;
        let mut id = from;
        while id <= to {
            set |= 1u128 << id;
            id += 1;
        }
        Self(set)
    }

    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & (1u128 << tag.id()) != 0
    }
}

impl Default for TemplateTags {
    fn default() -> Self {
        Self::EMVCO
    }
}

/// Decodes `input` treating the EMVCo template tags as nested sequences.
pub fn decode(input: &str) -> Result<Payload, DecodeError> {
    decode_with(input, TemplateTags::EMVCO)
}

/// Decodes `input` with an explicit set of template tags.
pub fn decode_with(input: &str, templates: TemplateTags) -> Result<Payload, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    decode_fields(input, 0, templates).map(Payload::from)
}

/// Serializes `payload` back to its textual form.
pub fn encode(payload: &Payload) -> String {
    payload.encode()
}

fn decode_fields(
    input: &str,
    base_offset: usize,
    templates: TemplateTags,
) -> Result<Vec<Field>, DecodeError> {
    let mut fields = Vec::new();
    let mut rest = input;
    let mut offset = base_offset;

    while !rest.is_empty() {
        let Some((header, tail)) = split_chars(rest, HEADER_LEN) else {
            return Err(DecodeError::TrailingGarbage(rest.chars().count()));
        };
        let (raw_tag, raw_len) = split_chars(header, 2).unwrap_or((header, ""));

        let tag = Tag::parse(raw_tag).ok_or_else(|| DecodeError::InvalidTag {
            offset,
            tag: raw_tag.to_string(),
        })?;
        let len = parse_length(raw_len).ok_or_else(|| DecodeError::InvalidLength {
            offset: offset + 2,
            length: raw_len.to_string(),
        })?;
        let (raw_value, tail) = split_chars(tail, len).ok_or_else(|| DecodeError::Truncated {
            tag: tag.to_string(),
            declared: len,
            available: tail.chars().count(),
        })?;

        let value = if templates.contains(tag) {
            let nested = decode_fields(raw_value, offset + HEADER_LEN, TemplateTags::none())?;
            Value::Template(nested.into())
        } else {
            Value::Primitive(raw_value.to_string())
        };
        fields.push(Field::new(tag, value)?);

        offset += HEADER_LEN + len;
        rest = tail;
    }

    Ok(fields)
}

fn parse_length(s: &str) -> Option<usize> {
    match s.as_bytes() {
        [hi @ b'0'..=b'9', lo @ b'0'..=b'9'] => Some(usize::from((hi - b'0') * 10 + (lo - b'0'))),
        _ => None,
    }
}

/// Splits after the first `n` characters, `None` if fewer remain.
fn split_chars(s: &str, n: usize) -> Option<(&str, &str)> {
    match s.char_indices().nth(n) {
        Some((idx, _)) => Some(s.split_at(idx)),
        None if s.chars().count() == n => Some((s, "")),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "0002010102115802ID6304ABCD";

    #[test]
    fn test_decode_flat_payload() {
        let payload = decode(BASE).unwrap();
        let tags: Vec<String> = payload.fields().iter().map(|f| f.tag().to_string()).collect();
        assert_eq!(tags, ["00", "01", "58", "63"]);

        let values: Vec<&str> = payload
            .fields()
            .iter()
            .filter_map(|f| f.value().as_str())
            .collect();
        assert_eq!(values, ["01", "11", "ID", "ABCD"]);
    }

    #[test]
    fn test_decode_nested_template() {
        let input = "26280014ID.CO.QRIS.WWW0206ID10205802ID";
        let payload = decode(input).unwrap();
        let Value::Template(inner) = payload.fields()[0].value() else {
            panic!("tag 26 should decode as a template");
        };
        assert_eq!(inner.fields().len(), 2);
        assert_eq!(inner.fields()[0].value().as_str(), Some("ID.CO.QRIS.WWW"));
        assert_eq!(encode(&payload), input);
    }

    #[test]
    fn test_decode_flat_leaves_templates_opaque() {
        let input = "26280014ID.CO.QRIS.WWW0206ID1020";
        let payload = decode_with(input, TemplateTags::none()).unwrap();
        assert_eq!(
            payload.fields()[0].value().as_str(),
            Some("0014ID.CO.QRIS.WWW0206ID1020")
        );
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(decode(""), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_decode_invalid_length() {
        assert!(matches!(
            decode("000A01"),
            Err(DecodeError::InvalidLength { offset: 2, .. })
        ));
    }

    #[test]
    fn test_decode_invalid_tag() {
        assert!(matches!(
            decode("X00201"),
            Err(DecodeError::InvalidTag { offset: 0, .. })
        ));
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(
            decode("000201010511"),
            Err(DecodeError::Truncated {
                tag: "01".to_string(),
                declared: 5,
                available: 2,
            })
        );
    }

    #[test]
    fn test_decode_trailing_garbage() {
        assert_eq!(decode("000201XYZ"), Err(DecodeError::TrailingGarbage(3)));
    }

    #[test]
    fn test_decode_error_inside_template() {
        assert!(matches!(
            decode("2606000A015802ID"),
            Err(DecodeError::InvalidLength { offset: 6, .. })
        ));
    }

    #[test]
    fn test_decode_non_ascii_value() {
        let input = "5904Café6007Jakarta";
        let payload = decode(input).unwrap();
        assert_eq!(payload.fields()[0].value().as_str(), Some("Café"));
        assert_eq!(encode(&payload), input);
    }

    #[test]
    fn test_template_tags_membership() {
        assert!(TemplateTags::EMVCO.contains(Tag::new(26).unwrap()));
        assert!(TemplateTags::EMVCO.contains(Tag::new(51).unwrap()));
        assert!(TemplateTags::EMVCO.contains(Tag::ADDITIONAL_DATA));
        assert!(TemplateTags::EMVCO.contains(Tag::new(99).unwrap()));
        assert!(!TemplateTags::EMVCO.contains(Tag::COUNTRY_CODE));
        assert!(!TemplateTags::EMVCO.contains(Tag::CRC));
        assert!(!TemplateTags::none().contains(Tag::new(26).unwrap()));
    }

    fn primitive_field() -> impl Strategy<Value = String> {
        (0u8..100, "[ -~]{0,40}").prop_map(|(tag, value)| {
            format!("{:02}{:02}{}", tag, value.chars().count(), value)
        })
    }

    fn template_tag() -> impl Strategy<Value = u8> {
        prop_oneof![26u8..=51, Just(62u8), Just(64u8), 80u8..=99]
    }

    proptest! {
        #[test]
        fn prop_flat_round_trip(fields in prop::collection::vec(primitive_field(), 1..12)) {
            let input = fields.concat();
            let payload = decode_with(&input, TemplateTags::none()).unwrap();
            prop_assert_eq!(encode(&payload), input.clone());
            prop_assert_eq!(decode_with(&encode(&payload), TemplateTags::none()).unwrap(), payload);
        }

        #[test]
        fn prop_template_round_trip(
            tag in template_tag(),
            inner in prop::collection::vec(primitive_field(), 0..3),
        ) {
            let nested = inner.concat();
            prop_assume!(nested.chars().count() <= 99);
            let input = format!("{tag:02}{:02}{}5802ID", nested.chars().count(), nested);
            let payload = decode(&input).unwrap();
            let template = Tag::new(tag).unwrap();
            prop_assert!(TemplateTags::EMVCO.contains(template));
            prop_assert!(matches!(
                payload.get(template).map(Field::value),
                Some(Value::Template(_))
            ));
            prop_assert_eq!(encode(&payload), input);
        }
    }
}
