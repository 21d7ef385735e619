//! Application-level configuration.
//!
//! - [`GateSettings`]: approver groups per gate and the committee trigger amount

pub mod gate_settings;

pub use gate_settings::GateSettings;
