//! Command implementations.

pub mod inspect;
pub mod servers;
pub mod verify;
