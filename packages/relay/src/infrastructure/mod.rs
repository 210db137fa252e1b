//! Infrastructure layer: concrete registry and wire DTOs.

pub mod dto;
pub mod registry;
