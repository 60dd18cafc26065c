//! Shared utilities for the serpsink workspace.
//!
//! Today this is just [`observability`], the centralised tracing/logging
//! initialisation every binary goes through. It is intentionally lightweight
//! so that all crates can depend on it without heavy transitive costs.

pub mod observability;
