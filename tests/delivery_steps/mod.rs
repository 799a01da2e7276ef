//! Step definitions for mail delivery BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
