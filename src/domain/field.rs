use crate::error::DecodeError;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};

/// Largest value a two-digit length prefix can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// A two-digit field identifier (`00`..=`99`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u8);

impl Tag {
    pub const PAYLOAD_FORMAT_INDICATOR: Self = Self(0);
    pub const POINT_OF_INITIATION: Self = Self(1);
    pub const MERCHANT_CATEGORY_CODE: Self = Self(52);
    pub const TRANSACTION_CURRENCY: Self = Self(53);
    pub const TRANSACTION_AMOUNT: Self = Self(54);
    pub const TIP_INDICATOR: Self = Self(55);
    pub const COUNTRY_CODE: Self = Self(58);
    pub const MERCHANT_NAME: Self = Self(59);
    pub const MERCHANT_CITY: Self = Self(60);
    pub const POSTAL_CODE: Self = Self(61);
    pub const ADDITIONAL_DATA: Self = Self(62);
    pub const CRC: Self = Self(63);
    pub const MERCHANT_LANGUAGE: Self = Self(64);

    /// Returns `None` for numbers that do not fit in two digits.
    pub const fn new(id: u8) -> Option<Self> {
        if id < 100 { Some(Self(id)) } else { None }
    }

    pub const fn id(self) -> u8 {
        self.0
    }

    /// Parses exactly two ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        match s.as_bytes() {
            [hi @ b'0'..=b'9', lo @ b'0'..=b'9'] => Some(Self((hi - b'0') * 10 + (lo - b'0'))),
            _ => None,
        }
    }

    /// Human readable name of the well-known top-level tags.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "Payload Format Indicator",
            1 => "Point of Initiation Method",
            2..=25 => "Merchant Account Information (network reserved)",
            26..=51 => "Merchant Account Information",
            52 => "Merchant Category Code",
            53 => "Transaction Currency",
            54 => "Transaction Amount",
            55 => "Tip or Convenience Indicator",
            56 => "Value of Convenience Fee Fixed",
            57 => "Value of Convenience Fee Percentage",
            58 => "Country Code",
            59 => "Merchant Name",
            60 => "Merchant City",
            61 => "Postal Code",
            62 => "Additional Data Field Template",
            63 => "CRC",
            64 => "Merchant Information Language Template",
            80..=99 => "Unreserved Template",
            _ => return None,
        };
        Some(name)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Content of a field: an opaque string or a nested sequence of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Primitive(String),
    Template(Payload),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Primitive(s) => Some(s),
            Value::Template(_) => None,
        }
    }

    /// Number of characters this value occupies once encoded.
    pub fn char_len(&self) -> usize {
        match self {
            Value::Primitive(s) => s.chars().count(),
            Value::Template(payload) => payload.fields.iter().map(Field::encoded_len).sum(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Primitive(s) => f.write_str(s),
            Value::Template(payload) => Display::fmt(payload, f),
        }
    }
}

/// A single tag-length-value unit.
///
/// The length is derived from the value, so a constructed field always
/// encodes to a prefix that agrees with its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: Tag,
    value: Value,
    len: usize,
}

impl Field {
    pub fn new(tag: Tag, value: Value) -> Result<Self, DecodeError> {
        let len = value.char_len();
        if len > MAX_VALUE_LEN {
            return Err(DecodeError::ValueTooLong(len));
        }
        Ok(Self { tag, value, len })
    }

    pub fn primitive(tag: Tag, value: impl Into<String>) -> Result<Self, DecodeError> {
        Self::new(tag, Value::Primitive(value.into()))
    }

    pub fn template(tag: Tag, payload: Payload) -> Result<Self, DecodeError> {
        Self::new(tag, Value::Template(payload))
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Character count of the value, as written in the length prefix.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn encoded_len(&self) -> usize {
        4 + self.len
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.tag, self.len, self.value)
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Field", 4)?;
        state.serialize_field("tag", &self.tag)?;
        state.serialize_field("name", &self.tag.name())?;
        state.serialize_field("length", &self.len)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// An ordered sequence of fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Payload {
    fields: Vec<Field>,
}

impl Payload {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Index of the first field carrying `tag`.
    pub fn position(&self, tag: Tag) -> Option<usize> {
        self.fields.iter().position(|f| f.tag == tag)
    }

    pub fn get(&self, tag: Tag) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn last(&self) -> Option<&Field> {
        self.fields.last()
    }

    /// Serializes every field in order.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.into_iter().try_for_each(|field| Display::fmt(field, f))
    }
}

impl From<Vec<Field>> for Payload {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Payload {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
