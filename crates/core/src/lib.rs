//! Domain logic for the file tracking platform.
//!
//! This crate has no database or HTTP dependencies so its rules (movement
//! status transitions, role mapping, serial formatting) can be used by the
//! repository layer, the API layer, and any future CLI tooling.

pub mod audit;
pub mod error;
pub mod movement;
pub mod roles;
pub mod serial;
pub mod types;
