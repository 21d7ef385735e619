//! Quorum evaluation
//!
//! Both policies are pure functions of `(pool or items, live submissions,
//! threshold)`. Nothing here reads storage; callers pass fresh inputs on
//! every evaluation.
//!
//! ```text
//! ┌──────────────────────────┬───────────────────────────────────────────┐
//! │ Unanimous-poll threshold │ total = |pool|                            │
//! │ (committee approval)     │ votes < total        → Pending            │
//! │                          │ approvals ≥ required → Approved           │
//! │                          │ otherwise            → Rejected           │
//! ├──────────────────────────┼───────────────────────────────────────────┤
//! │ Item-level quorum        │ item satisfied iff |checked_by| ≥ required│
//! │ (payout checklist)       │ all active items satisfied → Complete     │
//! │                          │ otherwise                  → Pending      │
//! └──────────────────────────┴───────────────────────────────────────────┘
//! ```

pub mod config;
pub mod evaluation;
pub mod item_quorum;
pub mod poll;
pub mod threshold;

pub use config::QuorumConfig;
pub use evaluation::Evaluation;
pub use item_quorum::{ApproverProgress, ChecklistTally, ItemTally, evaluate_checklist};
pub use poll::{Ballot, PollTally, evaluate_poll};
pub use threshold::RequiredApprovers;
