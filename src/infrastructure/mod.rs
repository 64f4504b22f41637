//! Adapters for the ports declared in `domain::ports`.

pub mod in_memory;
