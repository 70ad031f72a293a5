//! Device driver facade.
//!
//! The narrow seam the transaction core depends on. A [`DeviceDriver`]
//! implementation owns everything vendor- and transport-specific: rendering
//! commands, holding the SSH/NETCONF/REST session, executing operations
//! against hardware, and rendering configuration templates. The core never
//! looks behind this trait.
//!
//! Every operation reports through the [`OperationResult`] envelope instead
//! of returning an error: the transaction controller inspects `succeeded`
//! and `message` and decides how to proceed, so a driver failure mid-sequence
//! never unwinds the state machine.
//!
//! ## Session pairing
//!
//! `load_merge_candidate` and `load_template` acquire a device-side
//! configuration lock (the candidate session). Each such call must
//! eventually be paired with either `commit_config` or `discard_config`;
//! [`crate::session::DeviceSession`] guarantees that pairing for the flows
//! it drives.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::outcome::OperationResult;

/// One row of device state (an ARP entry, a MAC entry, an interface).
///
/// Record contents are opaque to the core beyond the keys used for
/// filtering; their semantics belong to the device vendor.
pub type Record = serde_json::Map<String, Value>;

/// Device state grouped by a string key (e.g. LLDP neighbors per interface).
/// Iteration order follows insertion order.
pub type GroupedRecords = IndexMap<String, Vec<Record>>;

// ============================================================================
// Request Types
// ============================================================================

/// Rendering inputs forwarded verbatim to the driver's template engine.
///
/// The core does not render templates itself; it collects the name, the
/// optional inline source or search path, and the variable map (per-call
/// variables merged with the injected [`crate::context::TemplateContext`])
/// and hands the whole request to the driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateRequest {
    /// Identifies the template to render.
    pub template_name: String,
    /// Inline template source, rendered instead of a named template file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_source: Option<String>,
    /// Alternative directory to resolve the named template in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    /// Variables available during rendering.
    #[serde(default)]
    pub vars: serde_json::Map<String, Value>,
}

impl TemplateRequest {
    /// Create a request for a named template with no variables.
    pub fn new(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            ..Self::default()
        }
    }

    /// Render an inline template source instead of a named template.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.template_source = Some(source.into());
        self
    }

    /// Resolve the named template in a different directory.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Add a single rendering variable.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

/// Parameters for an on-device ICMP echo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PingRequest {
    /// Hostname or IP address of the remote host.
    pub destination: String,
    /// Source address of the echo request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// IP time-to-live (IPv6 hop limit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Maximum wait after the final packet, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Size of request packets, in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Number of echo requests to send.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl PingRequest {
    /// Ping a destination with the device defaults for every other knob.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set the source address.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the per-packet timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the request packet size.
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the number of requests to send.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }
}

/// Parameters for an on-device traceroute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TracerouteRequest {
    /// Hostname or IP address of the remote host.
    pub destination: String,
    /// Source address for outgoing probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Maximum time-to-live (IPv6 maximum hop limit).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Seconds to wait for each response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

impl TracerouteRequest {
    /// Trace a destination with the device defaults for every other knob.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set the source address.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the maximum time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the per-hop timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u32) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ============================================================================
// Driver Trait
// ============================================================================

/// Uniform interface to a single network device.
///
/// Implementations serialize access to the underlying configuration session:
/// the core assumes at most one in-flight transaction per device connection
/// and awaits each call fully before issuing the next. The core imposes no
/// timeouts and performs no retries; a call either succeeds or fails.
#[async_trait]
pub trait DeviceDriver: Send + Sync {
    // ------------------------------------------------------------------------
    // Configuration transaction primitives
    // ------------------------------------------------------------------------

    /// Stage configuration by merging it with the running configuration.
    ///
    /// When both a filename and inline text are supplied the file takes
    /// precedence. The payload, if any, carries device load output (echoes,
    /// warnings); the controller drops it once the diff is known.
    async fn load_merge_candidate(
        &self,
        filename: Option<&Path>,
        config: Option<&str>,
    ) -> OperationResult<String>;

    /// Render a template and stage the result as the candidate.
    async fn load_template(&self, request: &TemplateRequest) -> OperationResult<String>;

    /// Compute the diff between the running and candidate configuration.
    async fn compare_config(&self) -> OperationResult<String>;

    /// Atomically apply the staged candidate.
    async fn commit_config(&self) -> OperationResult;

    /// Abandon the staged candidate and release the configuration session.
    async fn discard_config(&self) -> OperationResult;

    /// Revert to the last committed configuration.
    async fn rollback(&self) -> OperationResult;

    // ------------------------------------------------------------------------
    // Operational state getters
    // ------------------------------------------------------------------------

    /// Whether the session to the device is currently usable.
    async fn is_alive(&self) -> bool;

    /// Device characteristics: vendor, model, OS version, uptime, serial
    /// number, hostname, FQDN, interface list.
    async fn get_facts(&self) -> OperationResult<Value>;

    /// Environment sensors: fans, temperatures, power, CPU, memory.
    async fn get_environment(&self) -> OperationResult<Value>;

    /// Per-interface details keyed by interface name.
    async fn get_interfaces(&self) -> OperationResult<Value>;

    /// Configured IPv4/IPv6 addresses keyed by interface name.
    async fn get_interfaces_ip(&self) -> OperationResult<Value>;

    /// Entries in the ARP table.
    async fn get_arp_table(&self) -> OperationResult<Vec<Record>>;

    /// Entries in the MAC address table.
    async fn get_mac_address_table(&self) -> OperationResult<Vec<Record>>;

    /// LLDP neighbor details grouped by local interface.
    async fn get_lldp_neighbors_detail(&self) -> OperationResult<GroupedRecords>;

    // ------------------------------------------------------------------------
    // Raw operations
    // ------------------------------------------------------------------------

    /// Execute raw CLI commands; the payload maps each command to its output.
    async fn cli(&self, commands: &[String]) -> OperationResult<IndexMap<String, String>>;

    /// Run a ping from the device.
    async fn ping(&self, request: &PingRequest) -> OperationResult<Value>;

    /// Run a traceroute from the device.
    async fn traceroute(&self, request: &TracerouteRequest) -> OperationResult<Value>;
}
