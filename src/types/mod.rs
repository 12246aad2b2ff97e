//! Core types for toolcall.

pub mod agent;
pub mod message;

pub use agent::*;
pub use message::*;
