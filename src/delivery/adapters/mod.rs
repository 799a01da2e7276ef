//! Adapter implementations for mail persistence and delivery ports.

pub mod memory;
pub mod postgres;
