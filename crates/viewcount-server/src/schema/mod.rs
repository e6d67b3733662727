//! Request/response schema types for the API.

pub mod views;
