//! Infrastructure layer: repository, gateway and wire DTO implementations.

pub mod dto;
pub mod gateway;
pub mod repository;
