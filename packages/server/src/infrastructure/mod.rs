//! Infrastructure layer: persistence, in-memory stores, fan-out and wire DTOs.

pub mod broadcaster;
pub mod database;
pub mod dto;
pub mod repository;
