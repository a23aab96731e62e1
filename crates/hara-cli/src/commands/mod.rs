//! CLI command implementations

pub mod assess;
pub mod classify;
pub mod combine;
pub mod situations;
