//! # Netapply - Network Device Configuration Transactions
//!
//! Netapply is the control logic for staging, validating, and committing
//! configuration changes on a single network device through a uniform
//! driver abstraction, plus read-only retrieval and filtering of device
//! operational state (interfaces, ARP/MAC tables, LLDP neighbors,
//! environment sensors).
//!
//! ## Core Concepts
//!
//! - **Candidate configuration**: a staged, not-yet-applied configuration
//!   held in a device-side session pending commit or discard
//! - **Transaction**: stage → diff → commit-or-discard, with automatic
//!   compensation when a commit fails mid-sequence
//! - **Drift**: a non-empty diff between running and candidate state,
//!   remediated autonomously by the reconciler
//! - **Driver**: the vendor/transport-specific collaborator that renders
//!   commands and talks to hardware; everything behind [`DeviceDriver`]
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Caller                            │
//! │        (state engine, CLI binding, API layer)            │
//! └──────────────────────────────────────────────────────────┘
//!                  │                          │
//!                  ▼                          ▼
//! ┌────────────────────────────┐  ┌────────────────────────┐
//! │       DeviceSession        │  │    DriftReconciler     │
//! │  (transaction state machine│  │  (detect → commit or   │
//! │   + read-only queries)     │  │   rollback)            │
//! └────────────────────────────┘  └────────────────────────┘
//!                  │                          │
//!                  └────────────┬─────────────┘
//!                               ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                   DeviceDriver (trait)                   │
//! │     load / compare / commit / discard / rollback +       │
//! │     getters, over SSH/NETCONF/REST per implementation    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use netapply::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let driver: Arc<dyn DeviceDriver> = Arc::new(MyNetconfDriver::connect().await);
//!     let session = DeviceSession::new(driver);
//!
//!     // Dry run: stage, report the diff, discard.
//!     let preview = session
//!         .load_config(None, Some("ntp peer 192.0.2.1"), TransactionOptions::dry_run())
//!         .await;
//!     println!("would apply:\n{}", preview.diff);
//!
//!     // Apply for real.
//!     let applied = session
//!         .load_config(None, Some("ntp peer 192.0.2.1"), TransactionOptions::new())
//!         .await;
//!     assert!(applied.succeeded);
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export commonly used items in prelude
pub mod prelude {
    //! Convenient re-exports of the types most callers need.

    pub use crate::context::TemplateContext;
    pub use crate::driver::{
        DeviceDriver, GroupedRecords, PingRequest, Record, TemplateRequest, TracerouteRequest,
    };
    pub use crate::error::{DriverError, DriverResult};
    pub use crate::filter::{filter_grouped_records, filter_records};
    pub use crate::outcome::{ConfigTransactionResult, OperationResult};
    pub use crate::query::{ArpFilter, MacFilter};
    pub use crate::reconcile::{DriftReconciler, DriftReport, ReconcileOutcome};
    pub use crate::session::{DeviceSession, TransactionOptions};
}

pub mod context;
pub mod driver;
pub mod error;
pub mod filter;
pub mod outcome;
pub mod query;
pub mod reconcile;
pub mod session;

pub use context::TemplateContext;
pub use driver::{
    DeviceDriver, GroupedRecords, PingRequest, Record, TemplateRequest, TracerouteRequest,
};
pub use error::{DriverError, DriverResult};
pub use outcome::{ConfigTransactionResult, OperationResult};
pub use query::{ArpFilter, MacFilter};
pub use reconcile::{DriftReconciler, DriftReport, ReconcileOutcome};
pub use session::{DeviceSession, TransactionOptions};
