//! Data Transfer Objects for request/response serialization.
//!
//! Field names follow the wire format already consumed by existing
//! clients (`lastKeepalive` is camel-case, everything else a single word).

pub mod status_dto;
pub mod update_dto;

pub use status_dto::*;
pub use update_dto::*;
