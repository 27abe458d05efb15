//! Orchestrator records and the summaries built from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An edge as listed by `enterprise/getEnterpriseEdges`.
///
/// Only `id` and `name` are interpreted; every other field is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of looking an edge up in the enterprise edge list.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeLookup<T> {
    Found(T),
    /// Nothing matched; carries every edge that was scanned.
    NotFound(Vec<Edge>),
}

impl<T> EdgeLookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, EdgeLookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            EdgeLookup::Found(value) => Some(value),
            EdgeLookup::NotFound(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EdgeLookup<U> {
        match self {
            EdgeLookup::Found(value) => EdgeLookup::Found(f(value)),
            EdgeLookup::NotFound(edges) => EdgeLookup::NotFound(edges),
        }
    }
}

/// A LAN network (SVI) from an edge's device settings, keyed by VLAN id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanSvi {
    pub svi_name: String,
    pub ip_address: Option<String>,
    pub subnet_mask: Option<String>,
    pub dhcp_enabled: bool,
    pub dhcp_pool_base_number: Option<i64>,
    pub dhcp_pool_size: Option<i64>,
    pub advertised: bool,
    pub physical_interface: Vec<String>,
}

/// A routed (WAN-capable) interface, keyed by interface name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanInterface {
    pub ipv4_address: Option<String>,
    pub subnet_mask: Option<String>,
    #[serde(rename = "type")]
    pub addressing_type: String,
    pub cidr_prefix: Option<i64>,
    pub duplex: String,
    pub speed: String,
    pub overlay: String,
}

/// One row of `monitoring/getEnterpriseEdgeLinkStatus`: a link on an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeLinkStatus {
    #[serde(default)]
    pub edge_name: String,
    pub edge_serial_number: Option<String>,
    #[serde(rename = "edgeHASerialNumber")]
    pub edge_ha_serial_number: Option<String>,
    pub interface: Option<String>,
    pub link_ip_address: Option<String>,
    pub isp: Option<String>,
    pub link_state: Option<String>,
    pub link_vpn_state: Option<String>,
    pub edge_state: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Serial numbers of an edge and its HA standby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSerial {
    #[serde(rename = "edgeName")]
    pub edge_name: String,
    #[serde(rename = "Active_VCE_SN")]
    pub active_serial: Option<String>,
    #[serde(rename = "Standby_VCE_SN")]
    pub standby_serial: Option<String>,
}

/// State of one WAN link, keyed by interface name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WanLinkState {
    pub ip_address: Option<String>,
    pub isp_info: Option<String>,
    pub link_state: Option<String>,
    pub link_vpn_state: Option<String>,
    pub edge_state: Option<String>,
}

impl From<&EdgeLinkStatus> for WanLinkState {
    fn from(status: &EdgeLinkStatus) -> Self {
        Self {
            ip_address: status.link_ip_address.clone(),
            isp_info: status.isp.clone(),
            link_state: status.link_state.clone(),
            link_vpn_state: status.link_vpn_state.clone(),
            edge_state: status.edge_state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_edge_keeps_extra_fields() {
        let edge: Edge = serde_json::from_value(json!({
            "id": 7,
            "name": "NER0502D01",
            "edgeState": "CONNECTED",
            "modelNumber": "edge840"
        }))
        .unwrap();

        assert_eq!(edge.id, 7);
        assert_eq!(edge.name, "NER0502D01");
        assert_eq!(edge.extra["modelNumber"], "edge840");
        assert_eq!(serde_json::to_value(&edge).unwrap()["edgeState"], "CONNECTED");
    }

    #[test]
    fn test_link_status_field_names() {
        let status: EdgeLinkStatus = serde_json::from_value(json!({
            "edgeName": "NER0502D01",
            "edgeSerialNumber": "VC05200001",
            "edgeHASerialNumber": "VC05200002",
            "interface": "GE3",
            "linkIpAddress": "198.51.100.10",
            "isp": "Example Telecom",
            "linkState": "STABLE",
            "linkVpnState": "UNSTABLE",
            "edgeState": "CONNECTED",
            "linkId": 11
        }))
        .unwrap();

        assert_eq!(status.edge_ha_serial_number.as_deref(), Some("VC05200002"));
        assert_eq!(status.extra["linkId"], 11);

        let state = WanLinkState::from(&status);
        assert_eq!(state.link_state.as_deref(), Some("STABLE"));
        assert_eq!(state.link_vpn_state.as_deref(), Some("UNSTABLE"));
    }

    #[test]
    fn test_lookup_helpers() {
        let found: EdgeLookup<i64> = EdgeLookup::Found(3);
        assert!(found.is_found());
        assert_eq!(found.map(|id| id * 2).found(), Some(6));

        let missing: EdgeLookup<i64> = EdgeLookup::NotFound(Vec::new());
        assert_eq!(missing.found(), None);
    }

    #[test]
    fn test_wan_interface_type_field() {
        let wan = WanInterface {
            ipv4_address: None,
            subnet_mask: None,
            addressing_type: "DHCP".to_string(),
            cidr_prefix: None,
            duplex: "AUTO".to_string(),
            speed: "AUTO".to_string(),
            overlay: "AUTO_DISCOVERED".to_string(),
        };
        assert_eq!(serde_json::to_value(&wan).unwrap()["type"], "DHCP");
    }
}
