//! Edges of the system: CSV batch files and the QR image service URL.

pub mod csv;
pub mod render;
