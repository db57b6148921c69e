//! Cross-cutting HTTP middleware: CORS policy and request tracing.

pub mod cors;
pub mod trace;
