//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod configure;
pub mod evaluate;
pub mod open_subject;
pub mod pending;
pub mod shared;
pub mod status;
pub mod submit;
