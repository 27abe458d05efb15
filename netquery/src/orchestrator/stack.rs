//! Summaries extracted from an edge configuration stack.
//!
//! The stack is an array of profiles; the edge-specific profile comes first
//! and its second module holds the device settings (`lan`,
//! `routedInterfaces`).

use std::collections::BTreeMap;

use serde_json::Value;

use super::model::{LanSvi, WanInterface};
use crate::error::ShapeError;
use crate::json_path;
use crate::shape::{self, Step};

const DEVICE_SETTINGS: [Step<'static>; 4] = [
    Step::Index(0),
    Step::Key("modules"),
    Step::Index(1),
    Step::Key("data"),
];

fn settings_path<'a>(rest: &[Step<'a>]) -> Vec<Step<'a>> {
    let mut path = DEVICE_SETTINGS.to_vec();
    path.extend_from_slice(rest);
    path
}

fn array_len(stack: &Value, path: &[Step<'_>]) -> Result<usize, ShapeError> {
    shape::at(stack, path)?
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| ShapeError::new(format!("{} (array)", shape::render(path))))
}

/// `lan.management.cidrIp` of the device settings.
pub fn management_ip(stack: &Value) -> Result<String, ShapeError> {
    let path = settings_path(&json_path!["lan", "management", "cidrIp"]);
    Ok(shape::str_at(stack, &path)?.to_string())
}

/// LAN networks keyed by VLAN id.
pub fn lan_svis(stack: &Value) -> Result<BTreeMap<i64, LanSvi>, ShapeError> {
    let networks = settings_path(&json_path!["lan", "networks"]);
    let mut svis = BTreeMap::new();

    for i in 0..array_len(stack, &networks)? {
        let field = |rest: &[Step<'static>]| {
            let mut path = networks.clone();
            path.push(Step::Index(i));
            path.extend_from_slice(rest);
            path
        };

        let vlan_id: i64 = shape::typed_at(stack, &field(&json_path!["vlanId"]))?;
        let svi = LanSvi {
            svi_name: shape::typed_at(stack, &field(&json_path!["name"]))?,
            ip_address: shape::typed_at(stack, &field(&json_path!["cidrIp"]))?,
            subnet_mask: shape::typed_at(stack, &field(&json_path!["netmask"]))?,
            dhcp_enabled: shape::typed_at(stack, &field(&json_path!["dhcp", "enabled"]))?,
            dhcp_pool_base_number: shape::typed_at(stack, &field(&json_path!["baseDhcpAddr"]))?,
            dhcp_pool_size: shape::typed_at(stack, &field(&json_path!["numDhcpAddr"]))?,
            advertised: shape::typed_at(stack, &field(&json_path!["advertise"]))?,
            physical_interface: shape::typed_at(stack, &field(&json_path!["interfaces"]))?,
        };
        svis.insert(vlan_id, svi);
    }

    Ok(svis)
}

/// Routed interfaces keyed by interface name.
pub fn wan_interfaces(stack: &Value) -> Result<BTreeMap<String, WanInterface>, ShapeError> {
    let routed = settings_path(&json_path!["routedInterfaces"]);
    let mut interfaces = BTreeMap::new();

    for i in 0..array_len(stack, &routed)? {
        let field = |rest: &[Step<'static>]| {
            let mut path = routed.clone();
            path.push(Step::Index(i));
            path.extend_from_slice(rest);
            path
        };

        let name: String = shape::typed_at(stack, &field(&json_path!["name"]))?;
        let interface = WanInterface {
            ipv4_address: shape::typed_at(stack, &field(&json_path!["addressing", "cidrIp"]))?,
            subnet_mask: shape::typed_at(stack, &field(&json_path!["addressing", "netmask"]))?,
            addressing_type: shape::typed_at(stack, &field(&json_path!["addressing", "type"]))?,
            cidr_prefix: shape::typed_at(stack, &field(&json_path!["addressing", "cidrPrefix"]))?,
            duplex: shape::typed_at(stack, &field(&json_path!["l2", "duplex"]))?,
            speed: shape::typed_at(stack, &field(&json_path!["l2", "speed"]))?,
            overlay: shape::typed_at(stack, &field(&json_path!["wanOverlay"]))?,
        };
        interfaces.insert(name, interface);
    }

    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stack(data: Value) -> Value {
        json!([{ "modules": [{ "name": "deviceSettings" }, { "name": "deviceSettings", "data": data }] }])
    }

    #[test]
    fn test_management_ip() {
        let doc = stack(json!({ "lan": { "management": { "cidrIp": "10.9.0.1" } } }));
        assert_eq!(management_ip(&doc).unwrap(), "10.9.0.1");
    }

    #[test]
    fn test_missing_management_names_path() {
        let doc = stack(json!({ "lan": {} }));
        assert_eq!(
            management_ip(&doc).unwrap_err().path,
            "[0].modules[1].data.lan.management"
        );

        let short = json!([{ "modules": [{}] }]);
        assert_eq!(management_ip(&short).unwrap_err().path, "[0].modules[1]");
    }

    #[test]
    fn test_lan_networks_must_be_array() {
        let doc = stack(json!({ "lan": { "networks": {} } }));
        assert_eq!(
            lan_svis(&doc).unwrap_err().path,
            "[0].modules[1].data.lan.networks (array)"
        );
    }

    #[test]
    fn test_lan_network_missing_field() {
        let doc = stack(json!({ "lan": { "networks": [{ "vlanId": 10, "name": "users" }] } }));
        assert_eq!(
            lan_svis(&doc).unwrap_err().path,
            "[0].modules[1].data.lan.networks[0].cidrIp"
        );
    }

    #[test]
    fn test_empty_routed_interfaces() {
        let doc = stack(json!({ "routedInterfaces": [] }));
        assert!(wan_interfaces(&doc).unwrap().is_empty());
    }
}
