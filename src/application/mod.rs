//! Application layer: the static-to-dynamic transform and its checks.
//!
//! `mutator` and `validator` are pure functions over payload strings.
//! `PayloadEngine` wraps the mutator with a cache port so repeated renders of
//! the same `(template, amount)` pair are served without recomputation.

pub mod engine;
pub mod mutator;
pub mod validator;
