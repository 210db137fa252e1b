//! Data Transfer Objects for the HTTP introspection API.

pub mod http;
