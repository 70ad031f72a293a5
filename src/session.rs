//! Device configuration session: the transaction controller.
//!
//! [`DeviceSession`] coordinates the configuration transaction lifecycle
//! against a single device:
//!
//! ```text
//! Staged ──> Diffed ──> { Committed | Discarded | RollbackAttempted }
//! ```
//!
//! A transaction starts by staging a candidate (inline text, file, or
//! rendered template), computes the running/candidate diff, then finishes
//! with exactly one of commit or discard. A failed commit triggers a
//! best-effort compensating discard so the device is never left holding a
//! staged-but-uncommitted candidate with its configuration session locked.
//! The commit failure keeps precedence in the final `succeeded` flag even
//! when the compensating action succeeds.
//!
//! Calls against the driver are sequential and fully awaited; the session
//! performs no locking, no timeouts, and no retries of its own.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::context::TemplateContext;
use crate::driver::{DeviceDriver, TemplateRequest};
use crate::outcome::{ConfigTransactionResult, OperationResult};
use crate::reconcile::DriftReconciler;

/// Appended when a discard fails without its own explanation.
const MSG_UNABLE_TO_DISCARD: &str = "Unable to discard config.";
/// Appended when a commit fails without its own explanation.
const MSG_UNABLE_TO_COMMIT: &str = "Unable to commit config.";
/// Appended after the candidate was discarded cleanly.
const MSG_DISCARDED: &str = "Configuration discarded.";
/// Terminal message when there was nothing to apply.
const MSG_ALREADY_CONFIGURED: &str = "Already configured.";

fn non_empty_or<'a>(message: &'a str, default: &'a str) -> &'a str {
    if message.is_empty() {
        default
    } else {
        message
    }
}

/// Options controlling how a staged candidate is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOptions {
    /// Dry run: stage, report the diff, then discard instead of committing.
    pub test: bool,
    /// Commit automatically once the diff is known. With `commit: false`
    /// the candidate stays staged and the caller owns the rest of the
    /// transaction (useful when several loads are batched into one commit).
    pub commit: bool,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            test: false,
            commit: true,
        }
    }
}

impl TransactionOptions {
    /// Stage and commit: the default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage, diff, and discard without touching the running configuration.
    pub fn dry_run() -> Self {
        Self {
            test: true,
            commit: true,
        }
    }

    /// Stage and leave the candidate pending for a later explicit commit.
    pub fn manual_commit() -> Self {
        Self {
            test: false,
            commit: false,
        }
    }
}

/// A configuration session against a single network device.
///
/// Wraps the [`DeviceDriver`] with the transaction state machine and the
/// caller-facing operations. The driver is shared behind an `Arc`; at most
/// one in-flight transaction per device connection is assumed, serialized
/// by the caller or the driver layer.
#[derive(Clone)]
pub struct DeviceSession {
    pub(crate) driver: Arc<dyn DeviceDriver>,
    pub(crate) context: TemplateContext,
}

impl DeviceSession {
    /// Create a session over a driver with an empty template context.
    pub fn new(driver: Arc<dyn DeviceDriver>) -> Self {
        Self {
            driver,
            context: TemplateContext::default(),
        }
    }

    /// Attach the externally supplied template context (inventory, facts,
    /// settings) injected into every template rendering.
    #[must_use]
    pub fn with_context(mut self, context: TemplateContext) -> Self {
        self.context = context;
        self
    }

    /// A drift reconciler sharing this session's driver.
    pub fn reconciler(&self) -> DriftReconciler {
        DriftReconciler::new(Arc::clone(&self.driver))
    }

    // ------------------------------------------------------------------------
    // Candidate loading
    // ------------------------------------------------------------------------

    /// Stage a merge candidate from a file or inline text and run the
    /// transaction to completion per `options`.
    ///
    /// If both `filename` and `text` are supplied the file takes precedence
    /// (driver contract). With no changes to apply the result comes back
    /// with `already_configured` set and nothing committed.
    pub async fn load_config(
        &self,
        filename: Option<&Path>,
        text: Option<&str>,
        options: TransactionOptions,
    ) -> ConfigTransactionResult {
        debug!(
            filename = ?filename,
            inline = text.is_some(),
            test = options.test,
            commit = options.commit,
            "loading merge candidate"
        );
        let staged = self.driver.load_merge_candidate(filename, text).await;
        self.apply_transaction(staged, options).await
    }

    /// Render a template on the driver side, stage the result, and run the
    /// transaction to completion per `options`.
    ///
    /// `template_vars` are merged with the injected [`TemplateContext`]
    /// before the request is forwarded; the reserved `inventory`, `facts`,
    /// and `settings` names always reflect the injected stores.
    pub async fn load_template(
        &self,
        template_name: &str,
        template_source: Option<&str>,
        template_path: Option<&Path>,
        template_vars: Map<String, Value>,
        options: TransactionOptions,
    ) -> ConfigTransactionResult {
        let mut vars = template_vars;
        self.context.inject_into(&mut vars);

        let mut request = TemplateRequest::new(template_name);
        request.template_source = template_source.map(str::to_string);
        request.template_path = template_path.map(Path::to_path_buf);
        request.vars = vars;

        debug!(
            template = template_name,
            inline = request.template_source.is_some(),
            test = options.test,
            commit = options.commit,
            "loading template candidate"
        );
        let staged = self.driver.load_template(&request).await;
        self.apply_transaction(staged, options).await
    }

    // ------------------------------------------------------------------------
    // Transaction state machine
    // ------------------------------------------------------------------------

    /// Drive a staged candidate through diff and commit-or-discard.
    ///
    /// Exposed so callers that stage through other means (for instance a
    /// driver extension) can still reuse the decision logic. The staging
    /// result seeds the returned record; its raw payload is replaced by the
    /// computed diff.
    pub async fn apply_transaction(
        &self,
        staging: OperationResult<String>,
        options: TransactionOptions,
    ) -> ConfigTransactionResult {
        let mut result = ConfigTransactionResult::from_staging(&staging);

        let compared = self.driver.compare_config().await;
        if compared.succeeded {
            result.diff = compared.output.unwrap_or_default();
        }
        debug!(
            staged = result.succeeded,
            diff_len = result.diff.len(),
            "candidate compared against running configuration"
        );

        if !result.succeeded || options.test {
            // Staging failed or this is a dry run: the candidate is
            // discarded either way. A dry run that discards cleanly still
            // reports overall success together with its diff.
            if !result.message.is_empty() {
                result.message.push('\n');
            }
            if !result.has_diff() {
                result.already_configured = true;
            }
            let discarded = self.driver.discard_config().await;
            if discarded.is_failure() {
                error!(
                    message = %discarded.message,
                    "failed to discard candidate; device session may be left locked"
                );
                result
                    .message
                    .push_str(non_empty_or(&discarded.message, MSG_UNABLE_TO_DISCARD));
                result.succeeded = false;
                return result;
            }
            result.message.push_str(MSG_DISCARDED);
            return result;
        }

        if options.commit {
            if result.has_diff() {
                let committed = self.driver.commit_config().await;
                if committed.is_failure() {
                    result
                        .message
                        .push_str(non_empty_or(&committed.message, MSG_UNABLE_TO_COMMIT));
                    result.succeeded = false;
                    // Compensating discard: leaving a staged candidate with
                    // a held session lock is a worse state than reporting a
                    // compound error. Its outcome is always appended and
                    // never overwrites the commit failure.
                    warn!(
                        message = %committed.message,
                        "commit failed; discarding staged candidate"
                    );
                    let discarded = self.driver.discard_config().await;
                    result.message.push('\n');
                    if discarded.succeeded {
                        result
                            .message
                            .push_str(non_empty_or(&discarded.message, MSG_DISCARDED));
                    } else {
                        error!(
                            message = %discarded.message,
                            "compensating discard failed; device session may be left locked"
                        );
                        result
                            .message
                            .push_str(non_empty_or(&discarded.message, MSG_UNABLE_TO_DISCARD));
                    }
                } else {
                    debug!("candidate committed");
                }
            } else {
                // Nothing to commit, but the device-side staged session
                // must still be released.
                let discarded = self.driver.discard_config().await;
                if discarded.is_failure() {
                    error!(
                        message = %discarded.message,
                        "failed to release staged session; device session may be left locked"
                    );
                    result
                        .message
                        .push_str(non_empty_or(&discarded.message, MSG_UNABLE_TO_DISCARD));
                    result.succeeded = false;
                    return result;
                }
                result.already_configured = true;
                result.message = MSG_ALREADY_CONFIGURED.to_string();
            }
        }
        // With commit disabled the candidate stays staged and the caller
        // finishes the transaction through the primitives below.

        result
    }

    // ------------------------------------------------------------------------
    // Transaction primitives
    // ------------------------------------------------------------------------

    /// Commit the staged candidate.
    pub async fn commit(&self) -> OperationResult {
        self.driver.commit_config().await
    }

    /// Discard the staged candidate and release the configuration session.
    pub async fn discard_config(&self) -> OperationResult {
        self.driver.discard_config().await
    }

    /// Diff the running configuration against the staged candidate.
    pub async fn compare_config(&self) -> OperationResult<String> {
        self.driver.compare_config().await
    }

    /// Revert to the last committed configuration.
    pub async fn rollback(&self) -> OperationResult {
        self.driver.rollback().await
    }
}
