//! Persistence adapters
//!
//! [`InMemoryGateStore`] implements every persistence port of the application
//! layer, the approver directory and the owning-loan gate. [`SnapshotFile`]
//! carries its state between CLI invocations, and [`StateSession`] holds it
//! exclusively for the length of one command.

mod memory;
mod session;
mod snapshot;
mod state;

pub use memory::InMemoryGateStore;
pub use session::StateSession;
pub use snapshot::{SnapshotError, SnapshotFile, SnapshotLock};
pub use state::{GateState, LoanRecord};
