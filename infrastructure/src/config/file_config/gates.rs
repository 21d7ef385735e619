//! Gate configuration from TOML (`[gates]` section)
//!
//! Names the approver groups each gate draws its pool from and the loan
//! amount from which committee approval is required.
//!
//! ```toml
//! [gates]
//! committee_group = "committee_members"
//! staff_group = "staff"
//! committee_amount_threshold = 1000000
//! ```
//!
//! Required-approver thresholds are not file settings: they live in the
//! versioned quorum config table and are changed with `config set`.

use estate_quorum_application::GateSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatesConfig {
    /// Group whose members vote on committee approval
    pub committee_group: String,
    /// Group whose members sign off the payout checklist
    pub staff_group: String,
    /// Agreed amount at or above which a loan needs committee approval
    pub committee_amount_threshold: u64,
}

impl Default for FileGatesConfig {
    fn default() -> Self {
        let settings = GateSettings::default();
        Self {
            committee_group: settings.committee_group.as_str().to_string(),
            staff_group: settings.staff_group.as_str().to_string(),
            committee_amount_threshold: settings.committee_trigger.amount_threshold,
        }
    }
}

impl FileGatesConfig {
    pub fn to_settings(&self) -> GateSettings {
        GateSettings::default()
            .with_committee_group(self.committee_group.trim())
            .with_staff_group(self.staff_group.trim())
            .with_committee_threshold(self.committee_amount_threshold)
    }
}
