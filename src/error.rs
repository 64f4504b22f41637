use thiserror::Error;

/// Malformed tag-length-value structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty payload")]
    EmptyInput,
    #[error("invalid tag {tag:?} at offset {offset}")]
    InvalidTag { offset: usize, tag: String },
    #[error("invalid length {length:?} at offset {offset}")]
    InvalidLength { offset: usize, length: String },
    #[error("field {tag} declares {declared} characters but only {available} remain")]
    Truncated {
        tag: String,
        declared: usize,
        available: usize,
    },
    #[error("{0} unconsumed characters after the last field")]
    TrailingGarbage(usize),
    #[error("value of {0} characters does not fit a two-digit length")]
    ValueTooLong(usize),
}

/// Failure to turn a static template into a dynamic payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("amount must be a positive whole number, got {0}")]
    InvalidAmount(String),
    #[error("template is not a static payload")]
    NotStatic,
    #[error("template has no country code field to anchor the amount")]
    MissingAnchor,
    #[error("amount has {0} digits, at most 99 fit in a field")]
    AmountTooLarge(usize),
    #[error("malformed template: {0}")]
    MalformedTemplate(#[from] DecodeError),
}

/// Reason a payload failed checksum validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("payload does not end with a checksum field")]
    MissingChecksum,
    #[error("checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
}

#[derive(Error, Debug)]
pub enum QrisError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("no merchant template configured")]
    MissingTemplate,
}

pub type Result<T> = std::result::Result<T, QrisError>;
