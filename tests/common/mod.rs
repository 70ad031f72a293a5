//! Shared test utilities for netapply integration tests.
//!
//! Provides [`MockDriver`], a scripted in-memory device driver: each facade
//! operation returns a preconfigured result, and every call is recorded so
//! tests can assert on the exact driver call sequence (e.g. "commit was
//! never attempted" or "discard ran exactly once").

#![allow(dead_code)]

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use netapply::driver::{
    DeviceDriver, GroupedRecords, PingRequest, Record, TemplateRequest, TracerouteRequest,
};
use netapply::outcome::OperationResult;

/// Build a record from key/value pairs.
pub fn record(pairs: &[(&str, Value)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// Build an ARP entry with the conventional fields.
pub fn arp_entry(interface: &str, mac: &str, ip: &str) -> Record {
    record(&[
        ("interface", Value::from(interface)),
        ("mac", Value::from(mac)),
        ("ip", Value::from(ip)),
    ])
}

/// Build a MAC table entry with the conventional fields.
pub fn mac_entry(mac: &str, interface: &str, vlan: u64) -> Record {
    record(&[
        ("mac", Value::from(mac)),
        ("interface", Value::from(interface)),
        ("vlan", Value::from(vlan)),
        ("static", Value::from(false)),
        ("active", Value::from(true)),
    ])
}

/// A scripted device driver for tests.
///
/// ```ignore
/// let driver = MockDriver::new();
/// driver.set_compare_result(OperationResult::success("+ntp peer 192.0.2.1".into()));
/// driver.set_commit_result(OperationResult::failure("commit check failed"));
///
/// // ... run the session, then:
/// assert_eq!(driver.call_count("commit_config"), 1);
/// ```
pub struct MockDriver {
    alive: AtomicBool,
    calls: RwLock<Vec<String>>,
    load_inputs: RwLock<Vec<(Option<PathBuf>, Option<String>)>>,
    template_requests: RwLock<Vec<TemplateRequest>>,
    cli_commands: RwLock<Vec<Vec<String>>>,

    load_result: RwLock<OperationResult<String>>,
    template_result: RwLock<OperationResult<String>>,
    compare_result: RwLock<OperationResult<String>>,
    commit_result: RwLock<OperationResult>,
    discard_result: RwLock<OperationResult>,
    rollback_result: RwLock<OperationResult>,

    facts_result: RwLock<OperationResult<Value>>,
    environment_result: RwLock<OperationResult<Value>>,
    interfaces_result: RwLock<OperationResult<Value>>,
    interfaces_ip_result: RwLock<OperationResult<Value>>,
    arp_result: RwLock<OperationResult<Vec<Record>>>,
    mac_result: RwLock<OperationResult<Vec<Record>>>,
    lldp_result: RwLock<OperationResult<GroupedRecords>>,
    cli_result: RwLock<OperationResult<IndexMap<String, String>>>,
    ping_result: RwLock<OperationResult<Value>>,
    traceroute_result: RwLock<OperationResult<Value>>,
}

impl MockDriver {
    /// A driver where everything succeeds and every table is empty.
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            calls: RwLock::new(Vec::new()),
            load_inputs: RwLock::new(Vec::new()),
            template_requests: RwLock::new(Vec::new()),
            cli_commands: RwLock::new(Vec::new()),

            load_result: RwLock::new(OperationResult::success(String::new())),
            template_result: RwLock::new(OperationResult::success(String::new())),
            compare_result: RwLock::new(OperationResult::success(String::new())),
            commit_result: RwLock::new(OperationResult::ok()),
            discard_result: RwLock::new(OperationResult::ok()),
            rollback_result: RwLock::new(OperationResult::ok()),

            facts_result: RwLock::new(OperationResult::success(Value::Null)),
            environment_result: RwLock::new(OperationResult::success(Value::Null)),
            interfaces_result: RwLock::new(OperationResult::success(Value::Null)),
            interfaces_ip_result: RwLock::new(OperationResult::success(Value::Null)),
            arp_result: RwLock::new(OperationResult::success(Vec::new())),
            mac_result: RwLock::new(OperationResult::success(Vec::new())),
            lldp_result: RwLock::new(OperationResult::success(GroupedRecords::new())),
            cli_result: RwLock::new(OperationResult::success(IndexMap::new())),
            ping_result: RwLock::new(OperationResult::success(Value::Null)),
            traceroute_result: RwLock::new(OperationResult::success(Value::Null)),
        }
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::SeqCst);
    }

    pub fn set_load_result(&self, result: OperationResult<String>) {
        *self.load_result.write() = result;
    }

    pub fn set_template_result(&self, result: OperationResult<String>) {
        *self.template_result.write() = result;
    }

    pub fn set_compare_result(&self, result: OperationResult<String>) {
        *self.compare_result.write() = result;
    }

    pub fn set_commit_result(&self, result: OperationResult) {
        *self.commit_result.write() = result;
    }

    pub fn set_discard_result(&self, result: OperationResult) {
        *self.discard_result.write() = result;
    }

    pub fn set_rollback_result(&self, result: OperationResult) {
        *self.rollback_result.write() = result;
    }

    pub fn set_facts_result(&self, result: OperationResult<Value>) {
        *self.facts_result.write() = result;
    }

    pub fn set_arp_table(&self, table: Vec<Record>) {
        *self.arp_result.write() = OperationResult::success(table);
    }

    pub fn set_arp_result(&self, result: OperationResult<Vec<Record>>) {
        *self.arp_result.write() = result;
    }

    pub fn set_mac_table(&self, table: Vec<Record>) {
        *self.mac_result.write() = OperationResult::success(table);
    }

    pub fn set_lldp_neighbors(&self, neighbors: GroupedRecords) {
        *self.lldp_result.write() = OperationResult::success(neighbors);
    }

    pub fn set_cli_result(&self, result: OperationResult<IndexMap<String, String>>) {
        *self.cli_result.write() = result;
    }

    /// Every driver call made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().clone()
    }

    /// How many times the named operation was called.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.read().iter().filter(|c| *c == operation).count()
    }

    /// The (filename, text) pairs passed to `load_merge_candidate`.
    pub fn load_inputs(&self) -> Vec<(Option<PathBuf>, Option<String>)> {
        self.load_inputs.read().clone()
    }

    /// The template requests passed to `load_template`.
    pub fn template_requests(&self) -> Vec<TemplateRequest> {
        self.template_requests.read().clone()
    }

    /// The command batches passed to `cli`.
    pub fn cli_commands(&self) -> Vec<Vec<String>> {
        self.cli_commands.read().clone()
    }

    fn record_call(&self, operation: &str) {
        self.calls.write().push(operation.to_string());
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceDriver for MockDriver {
    async fn load_merge_candidate(
        &self,
        filename: Option<&Path>,
        config: Option<&str>,
    ) -> OperationResult<String> {
        self.record_call("load_merge_candidate");
        self.load_inputs
            .write()
            .push((filename.map(Path::to_path_buf), config.map(str::to_string)));
        self.load_result.read().clone()
    }

    async fn load_template(&self, request: &TemplateRequest) -> OperationResult<String> {
        self.record_call("load_template");
        self.template_requests.write().push(request.clone());
        self.template_result.read().clone()
    }

    async fn compare_config(&self) -> OperationResult<String> {
        self.record_call("compare_config");
        self.compare_result.read().clone()
    }

    async fn commit_config(&self) -> OperationResult {
        self.record_call("commit_config");
        self.commit_result.read().clone()
    }

    async fn discard_config(&self) -> OperationResult {
        self.record_call("discard_config");
        self.discard_result.read().clone()
    }

    async fn rollback(&self) -> OperationResult {
        self.record_call("rollback");
        self.rollback_result.read().clone()
    }

    async fn is_alive(&self) -> bool {
        self.record_call("is_alive");
        self.alive.load(Ordering::SeqCst)
    }

    async fn get_facts(&self) -> OperationResult<Value> {
        self.record_call("get_facts");
        self.facts_result.read().clone()
    }

    async fn get_environment(&self) -> OperationResult<Value> {
        self.record_call("get_environment");
        self.environment_result.read().clone()
    }

    async fn get_interfaces(&self) -> OperationResult<Value> {
        self.record_call("get_interfaces");
        self.interfaces_result.read().clone()
    }

    async fn get_interfaces_ip(&self) -> OperationResult<Value> {
        self.record_call("get_interfaces_ip");
        self.interfaces_ip_result.read().clone()
    }

    async fn get_arp_table(&self) -> OperationResult<Vec<Record>> {
        self.record_call("get_arp_table");
        self.arp_result.read().clone()
    }

    async fn get_mac_address_table(&self) -> OperationResult<Vec<Record>> {
        self.record_call("get_mac_address_table");
        self.mac_result.read().clone()
    }

    async fn get_lldp_neighbors_detail(&self) -> OperationResult<GroupedRecords> {
        self.record_call("get_lldp_neighbors_detail");
        self.lldp_result.read().clone()
    }

    async fn cli(&self, commands: &[String]) -> OperationResult<IndexMap<String, String>> {
        self.record_call("cli");
        self.cli_commands.write().push(commands.to_vec());
        self.cli_result.read().clone()
    }

    async fn ping(&self, _request: &PingRequest) -> OperationResult<Value> {
        self.record_call("ping");
        self.ping_result.read().clone()
    }

    async fn traceroute(&self, _request: &TracerouteRequest) -> OperationResult<Value> {
        self.record_call("traceroute");
        self.traceroute_result.read().clone()
    }
}
