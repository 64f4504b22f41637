pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::mutator::make_dynamic;
pub use application::validator::verify;
pub use domain::crc::crc16;
pub use domain::tlv::{decode, encode};
