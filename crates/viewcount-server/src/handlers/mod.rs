//! HTTP handler functions, grouped by resource.

pub mod views;
