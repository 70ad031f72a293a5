//! Result envelopes for driver and transaction operations.
//!
//! Every device driver call and every session operation reports its outcome
//! as a value rather than an error: remote failures are ordinary data that
//! callers inspect and act on. [`OperationResult`] is the uniform envelope;
//! [`ConfigTransactionResult`] is its transaction-specific extension carrying
//! the accumulated diff and the `already_configured` flag.

use serde::{Deserialize, Serialize};

/// Uniform envelope returned by every device driver call.
///
/// The `output` payload must not be trusted when `succeeded` is false, with
/// one exception: checking whether it is empty (used by the transaction
/// controller for diff-emptiness decisions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult<T = ()> {
    /// Whether the remote operation completed without error.
    pub succeeded: bool,
    /// Operation-specific payload, present only when meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<T>,
    /// Human-readable explanation; empty on unambiguous success.
    #[serde(default)]
    pub message: String,
}

impl<T> OperationResult<T> {
    /// A successful result carrying a payload.
    pub fn success(output: T) -> Self {
        Self {
            succeeded: true,
            output: Some(output),
            message: String::new(),
        }
    }

    /// A successful result with no payload.
    pub fn ok() -> Self {
        Self {
            succeeded: true,
            output: None,
            message: String::new(),
        }
    }

    /// A failed result carrying an explanation for the caller.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: None,
            message: message.into(),
        }
    }

    /// Attach a message to a result (e.g. device warnings on success).
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Whether the operation failed.
    pub fn is_failure(&self) -> bool {
        !self.succeeded
    }
}

impl<T> Default for OperationResult<T> {
    fn default() -> Self {
        Self::ok()
    }
}

/// Final record of a configuration transaction.
///
/// Constructed fresh from the staging result for each `load_config` /
/// `load_template` invocation, mutated in place as the transaction moves
/// through the diff, commit/discard, and rollback phases, and returned to
/// the caller by value once the transaction is finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTransactionResult {
    /// Whether the transaction as a whole succeeded. False only on failure:
    /// a dry run that staged, diffed, and discarded cleanly is a success,
    /// and so is a no-op load with nothing to commit.
    pub succeeded: bool,
    /// Accumulated human-readable account of what happened.
    pub message: String,
    /// True iff no net change was applied or intended: the diff was empty,
    /// or the discard/rollback path was taken without a commit.
    pub already_configured: bool,
    /// Textual difference between the running and candidate configuration.
    #[serde(default)]
    pub diff: String,
}

impl ConfigTransactionResult {
    /// Initialize the transaction record from the raw staging result.
    ///
    /// The staging payload (device echo, load warnings) is intentionally not
    /// carried over: once the diff is computed it supersedes the raw output.
    pub fn from_staging(staging: &OperationResult<String>) -> Self {
        Self {
            succeeded: staging.succeeded,
            message: staging.message.clone(),
            already_configured: false,
            diff: String::new(),
        }
    }

    /// Whether the transaction observed a non-empty configuration diff.
    pub fn has_diff(&self) -> bool {
        !self.diff.is_empty()
    }
}
