//! HTTP/JSON API server for a persistent page-view counter.
//!
//! Exposes a single resource, `/api/views`: GET returns the current count,
//! POST records a visit (deduplicated per visitor by a pluggable gate) and
//! returns the updated count. This crate contains the server framework,
//! API schema types, error handling, and route definitions; persistence
//! lives in `viewcount-storage`.

pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
