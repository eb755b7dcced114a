//! Planner configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and passed to the planner builder.

use crate::{FleetError, FleetResult};

/// Run-wide planner settings.  Every field has a default, so an empty JSON
/// object is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct PlannerConfig {
    /// Abort planning on the first package that cannot be assigned instead
    /// of reporting it and carrying on with the rest.
    pub fail_fast: bool,

    /// Worker thread count for the `parallel` itinerary replay.  `None` uses
    /// the global Rayon pool.
    pub num_threads: Option<usize>,
}

impl PlannerConfig {
    /// Reject settings that cannot be honoured.
    pub fn validate(&self) -> FleetResult<()> {
        if self.num_threads == Some(0) {
            return Err(FleetError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
