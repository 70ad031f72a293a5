//! Read-only device state queries.
//!
//! Thin pass-throughs to the driver getters, plus the predicate filtering
//! callers expect on the ARP table, the MAC address table, and the LLDP
//! neighbor map. A failed driver result is returned unchanged with its
//! payload untouched; filtering only ever applies to successful results.

use indexmap::IndexMap;
use serde_json::Value;

use crate::driver::{GroupedRecords, PingRequest, Record, TracerouteRequest};
use crate::filter::filter_records;
use crate::outcome::OperationResult;
use crate::session::DeviceSession;

/// Narrowing criteria for ARP table queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArpFilter {
    /// Interface name to filter on.
    pub interface: Option<String>,
    /// IP address to filter on.
    pub ip: Option<String>,
    /// MAC address to filter on.
    pub mac: Option<String>,
}

impl ArpFilter {
    /// Match every ARP entry.
    pub fn any() -> Self {
        Self::default()
    }

    /// Keep entries on the named interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Keep entries for the given IP address.
    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Keep entries for the given MAC address.
    #[must_use]
    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = Some(mac.into());
        self
    }
}

/// Narrowing criteria for MAC table queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacFilter {
    /// MAC address to filter on.
    pub address: Option<String>,
    /// Interface name to filter on.
    pub interface: Option<String>,
    /// VLAN identifier to filter on.
    pub vlan: Option<u64>,
}

impl MacFilter {
    /// Match every MAC table entry.
    pub fn any() -> Self {
        Self::default()
    }

    /// Keep entries for the given MAC address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Keep entries on the named interface.
    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Keep entries in the given VLAN.
    #[must_use]
    pub fn with_vlan(mut self, vlan: u64) -> Self {
        self.vlan = Some(vlan);
        self
    }
}

impl DeviceSession {
    /// Whether the driver's session to the device is currently usable.
    pub async fn connected(&self) -> bool {
        self.driver.is_alive().await
    }

    /// Device characteristics (vendor, model, OS version, uptime, ...).
    pub async fn facts(&self) -> OperationResult<Value> {
        self.driver.get_facts().await
    }

    /// Environment sensors (fans, temperatures, power, CPU, memory).
    pub async fn environment(&self) -> OperationResult<Value> {
        self.driver.get_environment().await
    }

    /// Per-interface details keyed by interface name.
    pub async fn interfaces(&self) -> OperationResult<Value> {
        self.driver.get_interfaces().await
    }

    /// Configured IPv4/IPv6 addresses keyed by interface name.
    pub async fn ip_addresses(&self) -> OperationResult<Value> {
        self.driver.get_interfaces_ip().await
    }

    /// The ARP table, narrowed by `filter`.
    ///
    /// Filters apply successively: an entry must match every set criterion.
    pub async fn arp(&self, filter: &ArpFilter) -> OperationResult<Vec<Record>> {
        let mut fetched = self.driver.get_arp_table().await;
        if fetched.is_failure() {
            return fetched;
        }

        let mut table = fetched.output.take().unwrap_or_default();
        if let Some(interface) = &filter.interface {
            table = filter_records(&table, "interface", &Value::from(interface.clone()));
        }
        if let Some(ip) = &filter.ip {
            table = filter_records(&table, "ip", &Value::from(ip.clone()));
        }
        if let Some(mac) = &filter.mac {
            table = filter_records(&table, "mac", &Value::from(mac.clone()));
        }
        fetched.output = Some(table);
        fetched
    }

    /// The MAC address table, narrowed by `filter`.
    pub async fn mac(&self, filter: &MacFilter) -> OperationResult<Vec<Record>> {
        let mut fetched = self.driver.get_mac_address_table().await;
        if fetched.is_failure() {
            return fetched;
        }

        let mut table = fetched.output.take().unwrap_or_default();
        if let Some(vlan) = filter.vlan {
            table = filter_records(&table, "vlan", &Value::from(vlan));
        }
        if let Some(address) = &filter.address {
            table = filter_records(&table, "mac", &Value::from(address.clone()));
        }
        if let Some(interface) = &filter.interface {
            table = filter_records(&table, "interface", &Value::from(interface.clone()));
        }
        fetched.output = Some(table);
        fetched
    }

    /// LLDP neighbor details grouped by local interface.
    ///
    /// With an interface given, only that group survives; an interface with
    /// no neighbors yields an empty map, consistent with the grouped-filter
    /// omission rule.
    pub async fn lldp(&self, interface: Option<&str>) -> OperationResult<GroupedRecords> {
        let mut fetched = self.driver.get_lldp_neighbors_detail().await;
        if fetched.is_failure() {
            return fetched;
        }

        if let Some(name) = interface {
            let neighbors = fetched.output.take().unwrap_or_default();
            let mut selected = GroupedRecords::new();
            if let Some(records) = neighbors.get(name) {
                if !records.is_empty() {
                    selected.insert(name.to_string(), records.clone());
                }
            }
            fetched.output = Some(selected);
        }
        fetched
    }

    /// Execute raw CLI commands on the device; the payload maps each
    /// command to its raw output.
    pub async fn cli(&self, commands: &[String]) -> OperationResult<IndexMap<String, String>> {
        self.driver.cli(commands).await
    }

    /// Run a ping from the device.
    pub async fn ping(&self, request: &PingRequest) -> OperationResult<Value> {
        self.driver.ping(request).await
    }

    /// Run a traceroute from the device.
    pub async fn traceroute(&self, request: &TracerouteRequest) -> OperationResult<Value> {
        self.driver.traceroute(request).await
    }
}
