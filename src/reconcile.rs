//! Autonomous drift remediation.
//!
//! [`DriftReconciler`] layers a small decision tree over the transaction
//! primitives: detect whether the device has drifted from its committed
//! configuration, and if so try to commit the pending change, rolling back
//! when the commit fails. It never loops: one detection, at most one
//! commit, at most one compensating rollback.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::driver::DeviceDriver;

/// Reported when the diff is empty and there is nothing to reconcile.
const MSG_NOT_CHANGED: &str = "Configuration was not changed on the device.";

/// Outcome of a drift check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Whether the running configuration differs from the candidate state.
    pub changed: bool,
    /// Why no drift was reported: either the diff was empty or the
    /// comparison itself failed. Empty when drift was detected.
    pub reason: String,
}

/// Outcome of a reconcile attempt.
///
/// `changed` and `succeeded` are distinct on purpose: "no drift, nothing
/// done" is a success without a change, while "drift found but the commit
/// failed" is a change that did not succeed. A successful rollback after a
/// failed commit does not flip `succeeded` back to true; the original
/// commit still failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Whether drift was present when the reconciler ran.
    pub changed: bool,
    /// Whether the reconcile finished without failure (including the
    /// nothing-to-do case).
    pub succeeded: bool,
    /// Details when something went wrong, or why nothing was done.
    pub comment: String,
}

/// Detects configuration drift and drives commit-or-rollback remediation.
pub struct DriftReconciler {
    driver: Arc<dyn DeviceDriver>,
}

impl DriftReconciler {
    /// Create a reconciler over a device driver.
    pub fn new(driver: Arc<dyn DeviceDriver>) -> Self {
        Self { driver }
    }

    /// Check whether the device configuration has drifted.
    ///
    /// A failed comparison reports no drift, with the failure message as
    /// the reason; callers must not treat it as a clean device.
    pub async fn detect_drift(&self) -> DriftReport {
        let compared = self.driver.compare_config().await;
        if compared.is_failure() {
            return DriftReport {
                changed: false,
                reason: compared.message,
            };
        }
        match compared.output {
            Some(diff) if !diff.is_empty() => DriftReport {
                changed: true,
                reason: String::new(),
            },
            _ => DriftReport {
                changed: false,
                reason: MSG_NOT_CHANGED.to_string(),
            },
        }
    }

    /// Detect drift and, when present, attempt a commit; roll back on
    /// commit failure.
    pub async fn reconcile(&self) -> ReconcileOutcome {
        let drift = self.detect_drift().await;
        if !drift.changed {
            debug!(reason = %drift.reason, "no drift to reconcile");
            return ReconcileOutcome {
                changed: false,
                succeeded: true,
                comment: drift.reason,
            };
        }

        let committed = self.driver.commit_config().await;
        if committed.succeeded {
            debug!("drift committed");
            return ReconcileOutcome {
                changed: true,
                succeeded: true,
                comment: String::new(),
            };
        }

        let mut comment = format!(
            "Unable to commit the changes: {}.\nWill try to rollback now!",
            committed.message
        );
        warn!(message = %committed.message, "commit failed; rolling back");
        let rolled_back = self.driver.rollback().await;
        if rolled_back.is_failure() {
            comment.push_str(&format!("\nCannot rollback! {}", rolled_back.message));
        }
        // The failed commit keeps precedence even when the rollback worked.
        ReconcileOutcome {
            changed: true,
            succeeded: false,
            comment,
        }
    }
}
